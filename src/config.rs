use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Tuning constants for all three generators. Every field has a default, so
/// a config file only needs to name what it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    pub sales: SalesConfig,
    pub kpi: KpiConfig,
    pub forecast: ForecastConfig,
}

/// Half-open `[low, high)` sampling range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub const fn new(low: f64, high: f64) -> Self {
        Range { low, high }
    }
}

/// A fixed baseline perturbed uniformly by up to `half_width` either way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    pub center: f64,
    pub half_width: f64,
}

impl Baseline {
    pub const fn new(center: f64, half_width: f64) -> Self {
        Baseline { center, half_width }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SalesConfig {
    pub weekend_multiplier: f64,
    pub traffic_baseline: f64,
    pub base_count_large: f64,
    pub base_count_medium: f64,
    pub base_count_small: f64,
    pub promotion_probability: f64,
    pub promotion_discount: f64,
    pub weather_amplitude: f64, // weather impact is uniform in [-amplitude, amplitude)
    pub stable_volatility: Range,
    pub moderate_volatility: Range,
    pub high_volatility: Range,
}

impl Default for SalesConfig {
    fn default() -> Self {
        SalesConfig {
            weekend_multiplier: 1.3,
            traffic_baseline: 400.0,
            base_count_large: 25.0,
            base_count_medium: 15.0,
            base_count_small: 8.0,
            promotion_probability: 0.10,
            promotion_discount: 0.85,
            weather_amplitude: 0.1,
            stable_volatility: Range::new(0.95, 1.05),
            moderate_volatility: Range::new(0.85, 1.15),
            high_volatility: Range::new(0.70, 1.30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KpiConfig {
    pub inventory_ratio: f64,
    pub fallback_lead_time: f64,
    pub forecast_accuracy: Baseline,
    pub turnover_rate: Baseline,
    pub stockout_rate: Baseline,
    pub carrying_cost: Baseline,
    pub service_level: Baseline,
}

impl Default for KpiConfig {
    fn default() -> Self {
        KpiConfig {
            inventory_ratio: 0.65,
            fallback_lead_time: 14.0,
            forecast_accuracy: Baseline::new(94.2, 1.5),
            turnover_rate: Baseline::new(8.5, 0.5),
            stockout_rate: Baseline::new(2.3, 0.4),
            carrying_cost: Baseline::new(18.5, 1.0),
            service_level: Baseline::new(97.8, 0.5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForecastConfig {
    pub min_price_adjustment: f64,
    pub noise_amplitude: f64,
    pub maturity_jitter: f64,
    pub comparison_horizon: u32,
    pub mape: Range,
    pub rmse: Range,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        ForecastConfig {
            min_price_adjustment: 0.3,
            noise_amplitude: 0.1,
            maturity_jitter: 0.05,
            comparison_horizon: 7,
            mape: Range::new(4.0, 7.0),
            rmse: Range::new(10.0, 15.0),
        }
    }
}

impl SimulationConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SimulationConfig = serde_json::from_str(&data).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        info!(path = %path.display(), "loaded simulation config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let sales = &self.sales;
        if !(0.0..=1.0).contains(&sales.promotion_probability) {
            return Err(invalid("sales.promotionProbability must be within [0, 1]"));
        }
        if !(sales.traffic_baseline > 0.0) {
            return Err(invalid("sales.trafficBaseline must be positive"));
        }
        for (name, value) in [
            ("sales.weekendMultiplier", sales.weekend_multiplier),
            ("sales.baseCountLarge", sales.base_count_large),
            ("sales.baseCountMedium", sales.base_count_medium),
            ("sales.baseCountSmall", sales.base_count_small),
            ("sales.promotionDiscount", sales.promotion_discount),
            ("sales.weatherAmplitude", sales.weather_amplitude),
        ] {
            if !(value >= 0.0) {
                return Err(invalid(&format!("{name} must not be negative")));
            }
        }
        for (name, range) in [
            ("sales.stableVolatility", sales.stable_volatility),
            ("sales.moderateVolatility", sales.moderate_volatility),
            ("sales.highVolatility", sales.high_volatility),
            ("forecast.mape", self.forecast.mape),
            ("forecast.rmse", self.forecast.rmse),
        ] {
            check_range(name, range)?;
        }

        let kpi = &self.kpi;
        if !(kpi.fallback_lead_time > 0.0) {
            return Err(invalid("kpi.fallbackLeadTime must be positive"));
        }
        for (name, baseline) in [
            ("kpi.forecastAccuracy", kpi.forecast_accuracy),
            ("kpi.turnoverRate", kpi.turnover_rate),
            ("kpi.stockoutRate", kpi.stockout_rate),
            ("kpi.carryingCost", kpi.carrying_cost),
            ("kpi.serviceLevel", kpi.service_level),
        ] {
            if !(baseline.half_width >= 0.0) {
                return Err(invalid(&format!("{name}.halfWidth must not be negative")));
            }
        }

        if self.forecast.noise_amplitude < 0.0 || self.forecast.maturity_jitter < 0.0 {
            return Err(invalid("forecast noise terms must not be negative"));
        }

        Ok(())
    }
}

fn check_range(name: &str, range: Range) -> Result<()> {
    if !(range.low <= range.high) {
        return Err(invalid(&format!(
            "{name} low {} is above high {}",
            range.low, range.high
        )));
    }
    Ok(())
}

fn invalid(msg: &str) -> Error {
    Error::InvalidConfig(msg.to_string())
}
