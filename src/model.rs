use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
pub enum Category {
    Electronics,
    Sports,
    Clothing,
    #[serde(rename = "Home & Garden")]
    #[strum(serialize = "Home & Garden")]
    HomeGarden,
    Books,
    // Anything a loaded catalog names that the factor tables don't know about.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalityPattern {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    Stable,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Introduction,
    Growth,
    Maturity,
    Decline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Demographics {
    Urban,
    Suburban,
    Rural,
}

/// The simulated forecasting models. None of them fit anything; each one is
/// a parameter set plus a noise shape (see `forecast`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ForecastModel {
    Prophet,
    Arima,
    Xgboost,
    Neural,
}

impl ForecastModel {
    /// Unknown identifiers fall back to xgboost.
    pub fn parse_or_default(name: &str) -> Self {
        name.trim().parse().unwrap_or(ForecastModel::Xgboost)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ForecastModel::Xgboost => "XGBoost Ensemble",
            ForecastModel::Prophet => "Prophet (Meta)",
            ForecastModel::Neural => "Neural Network",
            ForecastModel::Arima => "ARIMA Time Series",
        }
    }

    pub fn training_time(self) -> &'static str {
        match self {
            ForecastModel::Neural => "45 min",
            ForecastModel::Xgboost => "15 min",
            ForecastModel::Arima => "5 min",
            ForecastModel::Prophet => "3 min",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub base_price: f64,
    pub lead_time: u32,
    pub supplier: String,
    pub seasonality_pattern: SeasonalityPattern,
    pub volatility: Volatility,
    pub lifecycle: Lifecycle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRecord {
    pub id: String,
    pub name: String,
    pub location: String,
    pub size: StoreSize,
    pub customer_demographics: Demographics,
    pub avg_foot_traffic: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub category: Category,
    pub store: String,
    pub date: NaiveDate,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_sales: f64,
    pub seasonality_factor: f64,
    pub promotion_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_impact: Option<f64>,
}

/// Dashboard metrics. The all-zero `Default` is what an empty sales window
/// reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub total_revenue: f64,
    pub inventory_value: f64,
    pub forecast_accuracy: f64,
    pub active_products: usize,
    pub turnover_rate: f64,
    pub stockout_rate: f64,
    pub avg_lead_time: f64,
    pub carrying_cost: f64,
    pub service_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub product_id: String,
    pub date: NaiveDate,
    pub predicted: f64,
    pub confidence_lower: f64,
    pub confidence_upper: f64,
    pub model_used: ForecastModel,
    pub accuracy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub avg_prediction: f64,
    pub peak_prediction: f64,
    pub total_units: f64,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelComparison {
    pub model: ForecastModel,
    pub name: String,
    pub accuracy: f64,
    pub avg_prediction: f64,
    pub mape: f64,
    pub rmse: f64,
    pub training_time: String,
}

/// Revenue, units and transaction count for one grouping key (a category,
/// a store or a product).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesBreakdown {
    pub key: String,
    pub revenue: f64,
    pub units: u64,
    pub transactions: usize,
    pub share: f64, // percent of total revenue
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
    pub units: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueStats {
    pub days: usize,
    pub mean: f64,
    pub std_dev: f64,

    pub q10: f64,
    pub q50: f64,
    pub q90: f64,

    pub trend: f64, // revenue change per day, least squares
}
