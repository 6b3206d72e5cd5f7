//! BasketLens: monthly transaction reporting with co-purchase analysis.
//!
//! Loads per-month transaction CSV files and computes, per month
//! selection, which products are bought together in one timestamped
//! checkout versus bought alone, with revenue and margin summaries.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod loader;
pub mod model;
pub mod normalizer;
pub mod report;
pub mod utils;

// Re-export public items for easier access
pub use analyzer::ComboAnalyzer;
pub use analyzer::combo_stats::{Analyzer, ComboReport};
pub use analyzer::summary::{SalesSummary, summarize};
pub use cli::Args;
pub use config::{AppConfig, load_config};
pub use loader::{CsvLoader, Loader};
pub use model::{ComboKey, ComboStat, Dataset, LineItem, LoaderError};
