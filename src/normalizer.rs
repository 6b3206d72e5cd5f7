/// Parses a monetary cell, stripping thousands separators first.
/// Returns `None` for empty or unparsable cells so callers can leave
/// them out of sums instead of failing the whole report.
pub fn parse_money(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Per-item margin ratio: (sale − purchase) / sale.
/// `None` when either price is unparsable or the sale price is zero;
/// such items are excluded from margin means.
pub fn margin_ratio(sale_unit: &str, purchase_unit: &str) -> Option<f64> {
    let sale = parse_money(sale_unit)?;
    let purchase = parse_money(purchase_unit)?;
    if sale == 0.0 {
        return None;
    }
    Some((sale - purchase) / sale)
}
