use crate::catalog::Catalog;
use crate::config::{Baseline, KpiConfig};
use crate::factors::{round_to, symmetric};
use crate::model::{KpiSnapshot, SalesRecord};
use rand::Rng;
use statrs::statistics::Statistics;
use std::collections::BTreeSet;
use tracing::debug;

pub fn aggregate_kpis<R: Rng + ?Sized>(
    records: &[SalesRecord],
    catalog: &Catalog,
    config: &KpiConfig,
    rng: &mut R,
) -> KpiSnapshot {
    if records.is_empty() {
        return KpiSnapshot::default();
    }

    let revenue: f64 = records.iter().map(|r| r.total_sales).sum();
    let total_revenue = revenue.round();

    let sold: BTreeSet<&str> = records.iter().map(|r| r.product_id.as_str()).collect();
    let lead_times: Vec<f64> = sold
        .iter()
        .map(|id| match catalog.product(id) {
            Some(p) => p.lead_time as f64,
            None => {
                debug!(product_id = id, "unknown product, using fallback lead time");
                config.fallback_lead_time
            }
        })
        .collect();

    // The remaining rates would come from a forecasting history log; here
    // they wander around fixed baselines.
    KpiSnapshot {
        total_revenue,
        inventory_value: (total_revenue * config.inventory_ratio).round(),
        forecast_accuracy: perturb(rng, config.forecast_accuracy),
        active_products: sold.len(),
        turnover_rate: perturb(rng, config.turnover_rate),
        stockout_rate: perturb(rng, config.stockout_rate),
        avg_lead_time: round_to(lead_times.mean(), 1),
        carrying_cost: perturb(rng, config.carrying_cost),
        service_level: perturb(rng, config.service_level),
    }
}

fn perturb<R: Rng + ?Sized>(rng: &mut R, baseline: Baseline) -> f64 {
    round_to(baseline.center + symmetric(rng, baseline.half_width), 1)
}
