use crate::model::{ComboKey, ComboStat, LineItem};
use crate::normalizer::{margin_ratio, parse_money};
use std::collections::BTreeMap;

/// Separator used for the human-readable combination tag.
pub const TAG_SEPARATOR: &str = " · ";

/// Output of one engine pass: the aggregated rows plus the mapping back
/// to the timestamps each combination was seen at (used by the sale-date
/// drill-down).
#[derive(Debug, Default, PartialEq)]
pub struct ComboReport {
    /// Sorted by descending purchase count, ties by key.
    pub stats: Vec<ComboStat>,
    pub groups: BTreeMap<ComboKey, Vec<String>>,
}

/// Trait defining the interface for the combo statistics engine.
pub trait Analyzer {
    fn combo_stats(&self, rows: &[LineItem], min_items: usize) -> ComboReport;
}

/// Implementation of the combo statistics engine.
pub struct ComboAnalyzer;

impl ComboAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ComboAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

struct Agg {
    count: usize,
    sales: f64,
    margin_sum: f64,
    margin_n: usize,
    timestamps: Vec<String>,
}

impl Analyzer for ComboAnalyzer {
    /// Groups rows by timestamp, keeps the groups passing the item-count
    /// filter, and aggregates them by sorted product combination.
    ///
    /// `min_items == 1` keeps only single-item groups; `min_items > 1`
    /// keeps groups with at least that many items. A group therefore
    /// never shows up in both the single and the combo pass.
    fn combo_stats(&self, rows: &[LineItem], min_items: usize) -> ComboReport {
        // One checkout event = all rows sharing a timestamp. BTreeMap
        // keeps group iteration stable so reruns render identically.
        let mut by_time: BTreeMap<&str, Vec<&LineItem>> = BTreeMap::new();
        for row in rows {
            if row.timestamp.is_empty() || row.product.is_empty() {
                continue;
            }
            by_time.entry(row.timestamp.as_str()).or_default().push(row);
        }

        let mut aggs: BTreeMap<ComboKey, Agg> = BTreeMap::new();
        for (timestamp, items) in &by_time {
            let keep = if min_items == 1 {
                items.len() == 1
            } else {
                items.len() >= min_items
            };
            if !keep {
                continue;
            }

            let mut key: ComboKey = items.iter().map(|i| i.product.clone()).collect();
            key.sort();

            let agg = aggs.entry(key).or_insert_with(|| Agg {
                count: 0,
                sales: 0.0,
                margin_sum: 0.0,
                margin_n: 0,
                timestamps: Vec::new(),
            });
            agg.count += 1;
            agg.timestamps.push((*timestamp).to_string());

            for item in items {
                if let Some(amount) = parse_money(&item.sale_amount) {
                    agg.sales += amount;
                }
                if let Some(ratio) =
                    margin_ratio(&item.sale_unit_price, &item.purchase_unit_price)
                {
                    agg.margin_sum += ratio;
                    agg.margin_n += 1;
                }
            }
        }

        let mut stats: Vec<ComboStat> = Vec::with_capacity(aggs.len());
        let mut groups: BTreeMap<ComboKey, Vec<String>> = BTreeMap::new();
        for (key, agg) in aggs {
            let avg_margin = if agg.margin_n > 0 {
                agg.margin_sum / agg.margin_n as f64
            } else {
                0.0
            };
            stats.push(ComboStat {
                tag: key.join(TAG_SEPARATOR),
                key: key.clone(),
                purchase_count: agg.count,
                total_sales: agg.sales,
                avg_margin,
            });
            groups.insert(key, agg.timestamps);
        }

        stats.sort_by(|a, b| {
            b.purchase_count
                .cmp(&a.purchase_count)
                .then_with(|| a.key.cmp(&b.key))
        });

        ComboReport { stats, groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(timestamp: &str, product: &str, amount: &str, sale: &str, purchase: &str) -> LineItem {
        LineItem {
            timestamp: timestamp.to_string(),
            product: product.to_string(),
            sale_amount: amount.to_string(),
            sale_unit_price: sale.to_string(),
            purchase_unit_price: purchase.to_string(),
            sale_date: "2024-03-01".to_string(),
            month: "March".to_string(),
        }
    }

    fn sample_rows() -> Vec<LineItem> {
        vec![
            row("09:00", "A", "1,000", "500", "300"),
            row("09:00", "B", "2,000", "1,000", "800"),
            row("10:00", "B", "2,000", "1,000", "800"),
            row("10:00", "A", "1,000", "500", "300"),
            row("11:00", "A", "1,000", "500", "300"),
        ]
    }

    #[test]
    fn combos_and_singles_come_from_disjoint_groups() {
        let rows = sample_rows();
        let analyzer = ComboAnalyzer::new();

        let multi = analyzer.combo_stats(&rows, 2);
        assert_eq!(multi.stats.len(), 1);
        assert_eq!(multi.stats[0].key, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(multi.stats[0].purchase_count, 2);

        let single = analyzer.combo_stats(&rows, 1);
        assert_eq!(single.stats.len(), 1);
        assert_eq!(single.stats[0].key, vec!["A".to_string()]);
        assert_eq!(single.stats[0].purchase_count, 1);

        for stat in &multi.stats {
            assert!(!single.groups.contains_key(&stat.key));
        }
    }

    #[test]
    fn purchase_counts_add_up_to_filtered_group_count() {
        let rows = sample_rows();
        let report = ComboAnalyzer::new().combo_stats(&rows, 2);
        let total: usize = report.stats.iter().map(|s| s.purchase_count).sum();
        // 09:00 and 10:00 qualify, 11:00 is a single
        assert_eq!(total, 2);

        let single = ComboAnalyzer::new().combo_stats(&rows, 1);
        let total_single: usize = single.stats.iter().map(|s| s.purchase_count).sum();
        assert_eq!(total_single, 1);
    }

    #[test]
    fn item_order_within_a_group_does_not_matter() {
        let rows = sample_rows();
        let mut reversed = rows.clone();
        reversed.reverse();

        let a = ComboAnalyzer::new().combo_stats(&rows, 2);
        let b = ComboAnalyzer::new().combo_stats(&reversed, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn rerunning_gives_identical_output() {
        let rows = sample_rows();
        let analyzer = ComboAnalyzer::new();
        assert_eq!(analyzer.combo_stats(&rows, 2), analyzer.combo_stats(&rows, 2));
        assert_eq!(analyzer.combo_stats(&rows, 1), analyzer.combo_stats(&rows, 1));
    }

    #[test]
    fn sale_amounts_are_summed_numerically() {
        let rows = sample_rows();
        let report = ComboAnalyzer::new().combo_stats(&rows, 2);
        // Two A+B checkouts at 1,000 + 2,000 each.
        assert_eq!(report.stats[0].total_sales, 6000.0);
    }

    #[test]
    fn unparsable_amounts_reduce_the_sum_instead_of_failing() {
        let rows = vec![
            row("09:00", "A", "1,000", "500", "300"),
            row("09:00", "B", "oops", "1,000", "800"),
        ];
        let report = ComboAnalyzer::new().combo_stats(&rows, 2);
        assert_eq!(report.stats[0].total_sales, 1000.0);
    }

    #[test]
    fn all_amounts_unparsable_yields_zero_sales_and_margin() {
        let rows = vec![
            row("09:00", "A", "-", "", ""),
            row("09:00", "B", "n/a", "", ""),
        ];
        let report = ComboAnalyzer::new().combo_stats(&rows, 2);
        assert_eq!(report.stats[0].total_sales, 0.0);
        assert_eq!(report.stats[0].avg_margin, 0.0);
    }

    #[test]
    fn zero_sale_price_items_are_left_out_of_the_margin_mean() {
        let rows = vec![
            row("09:00", "A", "1,000", "1,000", "500"),
            row("09:00", "B", "0", "0", "100"),
        ];
        let report = ComboAnalyzer::new().combo_stats(&rows, 2);
        // Only A contributes: (1000 - 500) / 1000.
        assert_eq!(report.stats[0].avg_margin, 0.5);
    }

    #[test]
    fn repeated_products_keep_the_repetition_in_the_key() {
        let rows = vec![
            row("09:00", "A", "500", "500", "300"),
            row("09:00", "A", "500", "500", "300"),
        ];
        let report = ComboAnalyzer::new().combo_stats(&rows, 2);
        assert_eq!(report.stats[0].key, vec!["A".to_string(), "A".to_string()]);
        assert_eq!(report.stats[0].tag, "A · A");
        assert_eq!(report.stats[0].purchase_count, 1);
    }

    #[test]
    fn single_item_group_is_excluded_from_the_combo_pass() {
        let rows = vec![row("11:00", "A", "1,000", "500", "300")];
        let analyzer = ComboAnalyzer::new();
        assert!(analyzer.combo_stats(&rows, 2).stats.is_empty());
        assert_eq!(analyzer.combo_stats(&rows, 1).stats[0].purchase_count, 1);
    }

    #[test]
    fn empty_input_is_an_empty_report() {
        let report = ComboAnalyzer::new().combo_stats(&[], 2);
        assert!(report.stats.is_empty());
        assert!(report.groups.is_empty());
    }

    #[test]
    fn rows_without_timestamp_or_product_are_dropped() {
        let rows = vec![
            row("", "A", "1,000", "500", "300"),
            row("09:00", "", "1,000", "500", "300"),
        ];
        let report = ComboAnalyzer::new().combo_stats(&rows, 1);
        assert!(report.stats.is_empty());
    }

    #[test]
    fn output_is_sorted_by_count_then_key() {
        let rows = vec![
            row("09:00", "C", "100", "100", "50"),
            row("09:00", "D", "100", "100", "50"),
            row("10:00", "A", "100", "100", "50"),
            row("10:00", "B", "100", "100", "50"),
            row("11:00", "C", "100", "100", "50"),
            row("11:00", "D", "100", "100", "50"),
        ];
        let report = ComboAnalyzer::new().combo_stats(&rows, 2);
        let tags: Vec<&str> = report.stats.iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(tags, vec!["C · D", "A · B"]);
    }

    #[test]
    fn groups_map_records_the_matching_timestamps() {
        let rows = sample_rows();
        let report = ComboAnalyzer::new().combo_stats(&rows, 2);
        let key = vec!["A".to_string(), "B".to_string()];
        assert_eq!(
            report.groups.get(&key),
            Some(&vec!["09:00".to_string(), "10:00".to_string()])
        );
    }

    #[test]
    fn threshold_above_two_keeps_at_least_that_many_items() {
        let rows = vec![
            row("09:00", "A", "100", "100", "50"),
            row("09:00", "B", "100", "100", "50"),
            row("10:00", "A", "100", "100", "50"),
            row("10:00", "B", "100", "100", "50"),
            row("10:00", "C", "100", "100", "50"),
        ];
        let report = ComboAnalyzer::new().combo_stats(&rows, 3);
        assert_eq!(report.stats.len(), 1);
        assert_eq!(
            report.stats[0].key,
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );
    }
}
