// Loader module: turns per-month delimited files into line items.

pub mod csv_loader;

pub use csv_loader::{CsvLoader, Loader};
