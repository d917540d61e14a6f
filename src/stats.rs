use crate::factors::round_to;
use crate::model::{DailyRevenue, RevenueStats, SalesBreakdown, SalesRecord};
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, HashMap};

/// Keeps the records for one store; `None` or "all" keeps everything.
pub fn filter_by_store<'a>(
    records: &'a [SalesRecord],
    store: Option<&str>,
) -> Vec<&'a SalesRecord> {
    match store {
        None | Some("all") => records.iter().collect(),
        Some(id) => records.iter().filter(|r| r.store == id).collect(),
    }
}

pub fn category_breakdown(records: &[SalesRecord]) -> Vec<SalesBreakdown> {
    breakdown(records, |r| r.category.to_string())
}

pub fn store_breakdown(records: &[SalesRecord]) -> Vec<SalesBreakdown> {
    breakdown(records, |r| r.store.clone())
}

/// Best sellers by revenue, keyed by product name.
pub fn top_products(records: &[SalesRecord], n: usize) -> Vec<SalesBreakdown> {
    let mut rows = breakdown(records, |r| r.product_name.clone());
    rows.truncate(n);
    rows
}

fn breakdown<F>(records: &[SalesRecord], key: F) -> Vec<SalesBreakdown>
where
    F: Fn(&SalesRecord) -> String,
{
    let mut map: HashMap<String, Vec<&SalesRecord>> = HashMap::new();

    for record in records {
        map.entry(key(record)).or_default().push(record);
    }

    let total: f64 = records.iter().map(|r| r.total_sales).sum();

    let mut results: Vec<SalesBreakdown> = map
        .into_iter()
        .map(|(key, group)| {
            let revenue: f64 = group.iter().map(|r| r.total_sales).sum();
            SalesBreakdown {
                key,
                revenue: round_to(revenue, 2),
                units: group.iter().map(|r| r.quantity as u64).sum(),
                transactions: group.len(),
                share: if total > 0.0 {
                    round_to(revenue / total * 100.0, 1)
                } else {
                    0.0
                },
            }
        })
        .collect();

    // Highest revenue first, name breaks ties so output is stable.
    results.sort_by(|a, b| b.revenue.total_cmp(&a.revenue).then_with(|| a.key.cmp(&b.key)));
    results
}

pub fn daily_revenue(records: &[SalesRecord]) -> Vec<DailyRevenue> {
    let mut days: BTreeMap<_, (f64, u64)> = BTreeMap::new();

    for record in records {
        let day = days.entry(record.date).or_insert((0.0, 0));
        day.0 += record.total_sales;
        day.1 += record.quantity as u64;
    }

    days.into_iter()
        .map(|(date, (revenue, units))| DailyRevenue {
            date,
            revenue: round_to(revenue, 2),
            units,
        })
        .collect()
}

/// Spread and direction of the daily revenue series.
pub fn revenue_stats(records: &[SalesRecord]) -> RevenueStats {
    let series: Vec<f64> = daily_revenue(records).iter().map(|d| d.revenue).collect();
    if series.is_empty() {
        return RevenueStats::default();
    }

    let mut sorted = series.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let std_dev = if series.len() > 1 {
        series.clone().std_dev()
    } else {
        0.0
    };

    RevenueStats {
        days: series.len(),
        mean: series.clone().mean(),
        std_dev,

        q10: quantile(&sorted, 0.10),
        q50: quantile(&sorted, 0.50),
        q90: quantile(&sorted, 0.90),

        trend: calculate_trend(&series),
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() - 1) as f64 * q).round() as usize;
    sorted[idx]
}

// Least-squares slope against the day index.
fn calculate_trend(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n < 2.0 { return 0.0; }

    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for (i, &value) in values.iter().enumerate() {
        let x_diff = i as f64 - x_mean;
        numerator += x_diff * (value - y_mean);
        denominator += x_diff * x_diff;
    }

    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
