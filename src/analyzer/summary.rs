use crate::model::ComboStat;

/// Totals derived from one engine pass, for the report header.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    pub combos: usize,
    pub total_sales: f64,
    /// Margin averaged across combinations, weighted by their sales.
    pub weighted_margin: f64,
}

pub fn summarize(stats: &[ComboStat]) -> SalesSummary {
    let total_sales: f64 = stats.iter().map(|s| s.total_sales).sum();
    let total_profit: f64 = stats.iter().map(|s| s.total_sales * s.avg_margin).sum();
    let weighted_margin = if total_sales > 0.0 {
        total_profit / total_sales
    } else {
        0.0
    };

    SalesSummary {
        combos: stats.len(),
        total_sales,
        weighted_margin,
    }
}
