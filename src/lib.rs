//! Synthetic retail data: simulated point-of-sale transactions, KPI
//! snapshots and per-model demand forecasts over a fixed product and store
//! catalog. Every generator takes its random source as an argument, so a
//! seeded `StdRng` gives reproducible output.

pub mod catalog;
pub mod config;
pub mod error;
pub mod factors;
pub mod forecast;
pub mod generator;
pub mod kpi;
pub mod model;
pub mod stats;

pub use catalog::Catalog;
pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use forecast::{compare_models, generate_forecast, generate_forecast_from, summarize_forecast};
pub use generator::{generate_transactions, generate_transactions_until};
pub use kpi::aggregate_kpis;
pub use model::{
    ForecastModel, ForecastPoint, KpiSnapshot, ProductRecord, SalesRecord, StoreRecord,
};
