// CSV ingestion for the monthly ledger exports
use crate::config::ColumnMap;
use crate::model::{LineItem, LoaderError};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

pub trait Loader {
    fn load(&self, path: &str, month: &str) -> Result<Vec<LineItem>, LoaderError>;
}

pub struct CsvLoader {
    columns: ColumnMap,
}

impl CsvLoader {
    pub fn new(columns: ColumnMap) -> Self {
        Self { columns }
    }

    fn position(headers: &StringRecord, name: &str) -> Option<usize> {
        headers.iter().position(|h| h.trim() == name)
    }

    fn field(record: &StringRecord, idx: Option<usize>) -> String {
        idx.and_then(|i| record.get(i))
            .unwrap_or("")
            .trim()
            .to_string()
    }
}

impl Loader for CsvLoader {
    /// Reads one per-month file and stamps every row with its label.
    ///
    /// Timestamp and product name are required; without them the file
    /// cannot be grouped into checkouts at all. The monetary and date
    /// columns are optional, a missing one just leaves empty cells that
    /// the normalizer already treats as "no contribution".
    fn load(&self, path: &str, month: &str) -> Result<Vec<LineItem>, LoaderError> {
        let read_err = |source| LoaderError::Read {
            path: path.to_string(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(read_err)?;
        let headers = reader.headers().map_err(read_err)?.clone();

        let timestamp_idx = Self::position(&headers, &self.columns.timestamp);
        let product_idx = Self::position(&headers, &self.columns.product);

        let mut missing = Vec::new();
        if timestamp_idx.is_none() {
            missing.push(self.columns.timestamp.as_str());
        }
        if product_idx.is_none() {
            missing.push(self.columns.product.as_str());
        }
        let (Some(timestamp_idx), Some(product_idx)) = (timestamp_idx, product_idx) else {
            return Err(LoaderError::MissingColumns {
                path: path.to_string(),
                columns: missing.join(", "),
            });
        };

        let sale_amount_idx = Self::position(&headers, &self.columns.sale_amount);
        let sale_unit_idx = Self::position(&headers, &self.columns.sale_unit_price);
        let purchase_unit_idx = Self::position(&headers, &self.columns.purchase_unit_price);
        let sale_date_idx = Self::position(&headers, &self.columns.sale_date);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(read_err)?;
            rows.push(LineItem {
                timestamp: Self::field(&record, Some(timestamp_idx)),
                product: Self::field(&record, Some(product_idx)),
                sale_amount: Self::field(&record, sale_amount_idx),
                sale_unit_price: Self::field(&record, sale_unit_idx),
                purchase_unit_price: Self::field(&record, purchase_unit_idx),
                sale_date: Self::field(&record, sale_date_idx),
                month: month.to_string(),
            });
        }

        debug!("Loaded {} rows from {}", rows.len(), path);
        Ok(rows)
    }
}
