// Analyzer module: combo aggregation and the derived summary metrics.

pub mod combo_stats;
pub mod summary;

// Re-export the main engine implementation for ease of use.
pub use combo_stats::ComboAnalyzer;
