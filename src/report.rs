// Report rendering: summary block, top tables, sale-date drill-down.
use crate::analyzer::ComboAnalyzer;
use crate::analyzer::combo_stats::{Analyzer, ComboReport};
use crate::analyzer::summary::{SalesSummary, summarize};
use crate::config::AppConfig;
use crate::model::LineItem;
use crate::utils::{format_amount, parse_date};
use indexmap::IndexSet;
use std::collections::HashSet;

/// Renders the full report for one month selection: both engine passes,
/// the overall summary, the top tables and the per-combination dates.
pub fn render(selection: &str, rows: &[LineItem], config: &AppConfig) {
    let analyzer = ComboAnalyzer::new();
    let multi = analyzer.combo_stats(rows, config.combo_min_items);
    let single = analyzer.combo_stats(rows, 1);

    println!("\n=== Transaction report: {selection} ({} rows) ===", rows.len());
    print_summary("🛍 Combo purchases", &summarize(&multi.stats), "combinations");
    print_summary("🧾 Single purchases", &summarize(&single.stats), "products");

    print_table("🛍 Top combo purchases", &multi, config.top_rows);
    print_table("🧾 Top single purchases", &single, config.top_rows);

    print_dates("Combo purchase dates", rows, &multi, config.top_rows);
    print_dates("Single purchase dates", rows, &single, config.top_rows);
}

fn print_summary(title: &str, summary: &SalesSummary, unit: &str) {
    println!("- {title}: {} {unit}", summary.combos);
    println!("    total sales: ₩{}", format_amount(summary.total_sales));
    println!("    avg margin:  {:.2}%", summary.weighted_margin * 100.0);
}

fn print_table(title: &str, report: &ComboReport, top_rows: usize) {
    println!("\n{title} (top {top_rows})");
    if report.stats.is_empty() {
        println!("  (no matching checkouts)");
        return;
    }
    println!(
        "  {:<42} {:>6} {:>14} {:>8}",
        "combination", "count", "sales", "margin"
    );
    for stat in report.stats.iter().take(top_rows) {
        println!(
            "  {:<42} {:>6} {:>14} {:>7.2}%",
            stat.tag,
            stat.purchase_count,
            format_amount(stat.total_sales),
            stat.avg_margin * 100.0
        );
    }
}

fn print_dates(title: &str, rows: &[LineItem], report: &ComboReport, top_rows: usize) {
    println!("\n{title}");
    for stat in report.stats.iter().take(top_rows) {
        let Some(timestamps) = report.groups.get(&stat.key) else {
            continue;
        };
        println!("  ▸ {}", stat.tag);
        for date in combo_dates(rows, timestamps) {
            println!("    - {date}");
        }
    }
}

/// Unique sale dates of the rows behind the given timestamps,
/// chronological when the cells parse as dates, unparsable cells after
/// them in lexical order.
pub fn combo_dates(rows: &[LineItem], timestamps: &[String]) -> Vec<String> {
    let wanted: HashSet<&str> = timestamps.iter().map(String::as_str).collect();
    let mut seen: IndexSet<&str> = IndexSet::new();
    for row in rows {
        if wanted.contains(row.timestamp.as_str()) && !row.sale_date.is_empty() {
            seen.insert(row.sale_date.as_str());
        }
    }

    let mut dates: Vec<String> = seen.into_iter().map(str::to_string).collect();
    // The key is a total order, so the list never depends on which row
    // order the cells were first seen in.
    dates.sort_by_cached_key(|d| (parse_date(d).is_none(), parse_date(d), d.clone()));
    dates
}

/// Renders the raw line items of one selection, the full ledger view.
pub fn render_rows(selection: &str, rows: &[LineItem]) {
    print!("{}", rows_table(selection, rows));
}

fn rows_table(selection: &str, rows: &[LineItem]) -> String {
    let mut out = format!("\n=== Transactions: {selection} ({} rows) ===\n", rows.len());
    if rows.is_empty() {
        out.push_str("  (no rows)\n");
        return out;
    }
    out.push_str(&format!(
        "  {:<8} {:<28} {:>12} {:>12} {:>12}  {}\n",
        "time", "product", "amount", "sale", "purchase", "date"
    ));
    for row in rows {
        out.push_str(&format!(
            "  {:<8} {:<28} {:>12} {:>12} {:>12}  {}\n",
            row.timestamp,
            row.product,
            row.sale_amount,
            row.sale_unit_price,
            row.purchase_unit_price,
            row.sale_date
        ));
    }
    out
}
