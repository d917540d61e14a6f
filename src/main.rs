use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use smartsupply::model::{
    DailyRevenue, ForecastSummary, ModelComparison, RevenueStats, SalesBreakdown,
};
use smartsupply::{
    aggregate_kpis, compare_models, generate_forecast_from, generate_transactions_until, stats,
    summarize_forecast, Catalog, ForecastModel, ForecastPoint, KpiSnapshot, Result,
    SimulationConfig,
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    days: i64,
    store: Option<String>,
    transactions: usize,
    kpis: KpiSnapshot,
    categories: Vec<SalesBreakdown>,
    stores: Vec<SalesBreakdown>,
    top_products: Vec<SalesBreakdown>,
    daily_revenue: Vec<DailyRevenue>,
    revenue_stats: RevenueStats,
    forecast: Vec<ForecastPoint>,
    forecast_summary: Option<ForecastSummary>,
    model_comparison: Vec<ModelComparison>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = match env::var("SMARTSUPPLY_CONFIG") {
        Ok(path) => SimulationConfig::load(path)?,
        Err(_) => SimulationConfig::default(),
    };
    let catalog = match env::var("SMARTSUPPLY_CATALOG") {
        Ok(path) => Catalog::from_json_file(path)?,
        Err(_) => Catalog::default(),
    };

    let days = env_or("SMARTSUPPLY_DAYS", 30);
    let horizon = env_or("SMARTSUPPLY_HORIZON", 30);
    let product_id = env::var("SMARTSUPPLY_PRODUCT").unwrap_or_else(|_| "ELEC-001".to_string());
    let model = env::var("SMARTSUPPLY_MODEL")
        .map(|m| ForecastModel::parse_or_default(&m))
        .unwrap_or(ForecastModel::Xgboost);
    let store = env::var("SMARTSUPPLY_STORE").ok();

    let mut rng = match env::var("SMARTSUPPLY_SEED").ok().and_then(|s| s.parse().ok()) {
        Some(seed) => {
            info!(seed, "using seeded random source");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let today = Local::now().date_naive();
    let records = generate_transactions_until(&catalog, &config.sales, today, days, &mut rng);
    let selected: Vec<_> = stats::filter_by_store(&records, store.as_deref())
        .into_iter()
        .cloned()
        .collect();

    let kpis = aggregate_kpis(&selected, &catalog, &config.kpi, &mut rng);
    let forecast = generate_forecast_from(
        &catalog,
        &config.forecast,
        today,
        &product_id,
        horizon,
        model,
        &mut rng,
    );
    let forecast_summary = catalog
        .product(&product_id)
        .map(|p| summarize_forecast(&forecast, p));
    let model_comparison = compare_models(&catalog, &config.forecast, today, &product_id, &mut rng);

    let report = Report {
        days,
        store,
        transactions: selected.len(),
        kpis,
        categories: stats::category_breakdown(&selected),
        stores: stats::store_breakdown(&selected),
        top_products: stats::top_products(&selected, 5),
        daily_revenue: stats::daily_revenue(&selected),
        revenue_stats: stats::revenue_stats(&selected),
        forecast,
        forecast_summary,
        model_comparison,
    };

    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
