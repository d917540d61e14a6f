use crate::catalog::Catalog;
use crate::config::ForecastConfig;
use crate::factors::{category_base_demand, round_to, sample, seasonality_strength, symmetric};
use crate::model::{
    ForecastModel, ForecastPoint, ForecastSummary, Lifecycle, ModelComparison, ProductRecord,
    TrendDirection, Volatility,
};
use chrono::{Datelike, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::f64::consts::PI;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    pub accuracy: f64,
    pub smoothness: f64,
    // Carried for display; the seasonal curve does not weight by model.
    pub seasonality_weight: f64,
}

const XGBOOST: ModelParams = ModelParams {
    accuracy: 95.1,
    smoothness: 0.6,
    seasonality_weight: 0.9,
};

const MODEL_PARAMS: &[(ForecastModel, ModelParams)] = &[
    (
        ForecastModel::Prophet,
        ModelParams {
            accuracy: 94.2,
            smoothness: 0.8,
            seasonality_weight: 1.0,
        },
    ),
    (ForecastModel::Xgboost, XGBOOST),
    (
        ForecastModel::Arima,
        ModelParams {
            accuracy: 91.8,
            smoothness: 0.9,
            seasonality_weight: 0.7,
        },
    ),
    (
        ForecastModel::Neural,
        ModelParams {
            accuracy: 92.7,
            smoothness: 0.7,
            seasonality_weight: 0.8,
        },
    ),
];

pub fn baseline_params(model: ForecastModel) -> ModelParams {
    MODEL_PARAMS
        .iter()
        .find(|(m, _)| *m == model)
        .map(|(_, p)| *p)
        .unwrap_or(XGBOOST)
}

/// Baseline parameters shifted by how noisy the product's sales are.
pub fn model_params(model: ForecastModel, product: &ProductRecord) -> ModelParams {
    let mut params = baseline_params(model);
    match product.volatility {
        Volatility::High => {
            params.accuracy -= 2.0;
            params.smoothness -= 0.1;
        }
        Volatility::Stable => {
            params.accuracy += 1.0;
            params.smoothness += 0.1;
        }
        Volatility::Moderate => {}
    }
    params
}

/// Daily demand before trend and seasonality: category volume scaled down
/// for expensive items.
pub fn base_demand(config: &ForecastConfig, product: &ProductRecord) -> f64 {
    let price_adjustment =
        (1.0 - (product.base_price / 1000.0) * 0.5).max(config.min_price_adjustment);
    category_base_demand(product.category) * price_adjustment
}

fn trend_factor<R: Rng + ?Sized>(
    config: &ForecastConfig,
    lifecycle: Lifecycle,
    day: u32,
    days: u32,
    rng: &mut R,
) -> f64 {
    let progress = day as f64 / days as f64;
    match lifecycle {
        Lifecycle::Introduction => 1.0 + progress * 0.5,
        Lifecycle::Growth => 1.0 + progress * 0.3,
        Lifecycle::Maturity => 1.0 + symmetric(rng, config.maturity_jitter),
        Lifecycle::Decline => 1.0 - progress * 0.2,
    }
}

fn seasonal_factor(date: NaiveDate, product: &ProductRecord) -> f64 {
    let cycle = (date.ordinal() as f64 / 365.0 * 2.0 * PI).sin();
    1.0 + cycle * seasonality_strength(product.seasonality_pattern)
}

fn model_adjustment(model: ForecastModel, day: u32, params: &ModelParams, noise: f64) -> f64 {
    let i = day as f64;
    match model {
        ForecastModel::Prophet => 1.0 + noise * (1.0 - params.smoothness),
        ForecastModel::Xgboost => 1.0 + noise * 0.8 + (i / 7.0).sin() * 0.1, // weekly
        ForecastModel::Arima => 1.0 + noise * params.smoothness,
        ForecastModel::Neural => 1.0 + noise + (i / 3.0).sin() * 0.05,
    }
}

/// Daily forecast for `days` days starting tomorrow.
pub fn generate_forecast<R: Rng + ?Sized>(
    catalog: &Catalog,
    config: &ForecastConfig,
    product_id: &str,
    days: u32,
    model: ForecastModel,
    rng: &mut R,
) -> Vec<ForecastPoint> {
    let today = Local::now().date_naive();
    generate_forecast_from(catalog, config, today, product_id, days, model, rng)
}

pub fn generate_forecast_from<R: Rng + ?Sized>(
    catalog: &Catalog,
    config: &ForecastConfig,
    today: NaiveDate,
    product_id: &str,
    days: u32,
    model: ForecastModel,
    rng: &mut R,
) -> Vec<ForecastPoint> {
    let Some(product) = catalog.product(product_id) else {
        warn!(product_id, "forecast requested for unknown product");
        return Vec::new();
    };

    let base = base_demand(config, product);
    let params = model_params(model, product);
    let mut points = Vec::with_capacity(days as usize);

    for (day, date) in (0..days).zip(today.iter_days().skip(1)) {
        let trend = trend_factor(config, product.lifecycle, day, days, rng);
        let seasonal = seasonal_factor(date, product);
        let noise = symmetric(rng, config.noise_amplitude);
        let adjustment = model_adjustment(model, day, &params, noise);

        let predicted = (base * trend * seasonal * adjustment).max(0.0).round();
        let half_width = (predicted * (1.0 - params.accuracy / 100.0)).max(0.0);

        points.push(ForecastPoint {
            product_id: product.id.clone(),
            date,
            predicted,
            confidence_lower: (predicted - half_width).max(0.0).round(),
            confidence_upper: (predicted + half_width).round(),
            model_used: model,
            accuracy: round_to(params.accuracy, 1),
        });
    }

    debug!(product_id, %model, days, points = points.len(), "generated forecast");
    points
}

pub fn summarize_forecast(points: &[ForecastPoint], product: &ProductRecord) -> ForecastSummary {
    let trend = match product.lifecycle {
        Lifecycle::Growth => TrendDirection::Increasing,
        Lifecycle::Decline => TrendDirection::Decreasing,
        _ => TrendDirection::Stable,
    };
    if points.is_empty() {
        return ForecastSummary {
            trend,
            ..ForecastSummary::default()
        };
    }

    let total: f64 = points.iter().map(|p| p.predicted).sum();
    let peak = points.iter().map(|p| p.predicted).fold(0.0, f64::max);

    ForecastSummary {
        avg_prediction: (total / points.len() as f64).round(),
        peak_prediction: peak,
        total_units: total,
        trend,
    }
}

/// Runs every model over the comparison horizon for one product, most
/// accurate first. Each model draws from its own generator seeded from `rng`.
pub fn compare_models<R: Rng + ?Sized>(
    catalog: &Catalog,
    config: &ForecastConfig,
    today: NaiveDate,
    product_id: &str,
    rng: &mut R,
) -> Vec<ModelComparison> {
    if catalog.product(product_id).is_none() {
        warn!(product_id, "model comparison requested for unknown product");
        return Vec::new();
    }

    let jobs: Vec<(ForecastModel, u64)> = ForecastModel::iter().map(|m| (m, rng.gen())).collect();

    let mut rows: Vec<ModelComparison> = jobs
        .into_par_iter()
        .map(|(model, seed)| {
            let mut rng = StdRng::seed_from_u64(seed);
            let points = generate_forecast_from(
                catalog,
                config,
                today,
                product_id,
                config.comparison_horizon,
                model,
                &mut rng,
            );
            let avg_prediction = if points.is_empty() {
                0.0
            } else {
                (points.iter().map(|p| p.predicted).sum::<f64>() / points.len() as f64).round()
            };

            ModelComparison {
                model,
                name: model.display_name().to_string(),
                accuracy: baseline_params(model).accuracy,
                avg_prediction,
                mape: round_to(sample(&mut rng, config.mape), 1),
                rmse: round_to(sample(&mut rng, config.rmse), 1),
                training_time: model.training_time().to_string(),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.accuracy.total_cmp(&a.accuracy));
    rows
}
