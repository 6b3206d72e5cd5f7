// Core structs: LineItem, Dataset, ComboStat
use thiserror::Error;

/// One row of a monthly transaction file. Monetary cells keep the raw
/// text from the file (they may carry thousands separators); the
/// normalizer parses them right before arithmetic.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub timestamp: String,
    pub product: String,
    pub sale_amount: String,
    pub sale_unit_price: String,
    pub purchase_unit_price: String,
    pub sale_date: String,
    /// Report-period label stamped at load time, e.g. "March (3월)".
    pub month: String,
}

/// Immutable snapshot of every loaded row. Reports always run over a
/// selection of this snapshot; nothing mutates it after loading.
#[derive(Debug, Default)]
pub struct Dataset {
    pub rows: Vec<LineItem>,
}

impl Dataset {
    pub fn new(rows: Vec<LineItem>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows for one month label, or every row when `month` is `None`.
    pub fn select(&self, month: Option<&str>) -> Vec<LineItem> {
        match month {
            None => self.rows.clone(),
            Some(label) => self
                .rows
                .iter()
                .filter(|r| r.month == label)
                .cloned()
                .collect(),
        }
    }
}

/// Identity of a product combination: the group's product names sorted
/// lexicographically. Repeated names stay repeated, so {A, A} and {A}
/// are different combinations.
pub type ComboKey = Vec<String>;

/// Aggregated statistics for one distinct combination.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboStat {
    pub key: ComboKey,
    /// Number of transaction groups that produced this key.
    pub purchase_count: usize,
    /// Sum of the parseable sale amounts across all matching items.
    pub total_sales: f64,
    /// Mean margin ratio across the matching items that have one.
    pub avg_margin: f64,
    /// Human-readable join of the key, e.g. "cola · ramen".
    pub tag: String,
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("{path} is not analyzable: missing required columns {columns}")]
    MissingColumns { path: String, columns: String },
}
