use serde::Deserialize;
use std::fs;

/// One reporting period: a label shown in the month menu and the CSV
/// file holding its transactions.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthFile {
    pub label: String,
    pub path: String,
}

/// Header names of the columns we read. Defaults match the source
/// ledger exports; override in config.json for differently named files.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMap {
    #[serde(default = "default_timestamp_column")]
    pub timestamp: String,
    #[serde(default = "default_product_column")]
    pub product: String,
    #[serde(default = "default_sale_amount_column")]
    pub sale_amount: String,
    #[serde(default = "default_sale_unit_price_column")]
    pub sale_unit_price: String,
    #[serde(default = "default_purchase_unit_price_column")]
    pub purchase_unit_price: String,
    #[serde(default = "default_sale_date_column")]
    pub sale_date: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            timestamp: default_timestamp_column(),
            product: default_product_column(),
            sale_amount: default_sale_amount_column(),
            sale_unit_price: default_sale_unit_price_column(),
            purchase_unit_price: default_purchase_unit_price_column(),
            sale_date: default_sale_date_column(),
        }
    }
}

fn default_timestamp_column() -> String {
    "시간".to_string()
}
fn default_product_column() -> String {
    "상품명".to_string()
}
fn default_sale_amount_column() -> String {
    "판매금액".to_string()
}
fn default_sale_unit_price_column() -> String {
    "판매단가".to_string()
}
fn default_purchase_unit_price_column() -> String {
    "구입단가".to_string()
}
fn default_sale_date_column() -> String {
    "판매일자".to_string()
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub months: Vec<MonthFile>,
    /// Minimum item count for the combo pass; the single pass is always 1.
    #[serde(default = "default_combo_min_items")]
    pub combo_min_items: usize,
    /// How many rows each report table shows.
    #[serde(default = "default_top_rows")]
    pub top_rows: usize,
    #[serde(default)]
    pub columns: ColumnMap,
}

fn default_combo_min_items() -> usize {
    2
}

fn default_top_rows() -> usize {
    20
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
