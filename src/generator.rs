use crate::catalog::Catalog;
use crate::config::SalesConfig;
use crate::factors::{round_to, sample, seasonal_factor, symmetric, weather_sensitivity};
use crate::model::{
    Category, Demographics, Lifecycle, ProductRecord, SalesRecord, StoreRecord, StoreSize,
    Volatility,
};
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Simulated transactions for the `day_span` days ending today.
pub fn generate_transactions<R: Rng + ?Sized>(
    catalog: &Catalog,
    config: &SalesConfig,
    day_span: i64,
    rng: &mut R,
) -> Vec<SalesRecord> {
    let today = Local::now().date_naive();
    generate_transactions_until(catalog, config, today, day_span, rng)
}

/// Simulated transactions for the window `[today - day_span, today)`.
pub fn generate_transactions_until<R: Rng + ?Sized>(
    catalog: &Catalog,
    config: &SalesConfig,
    today: NaiveDate,
    day_span: i64,
    rng: &mut R,
) -> Vec<SalesRecord> {
    if day_span <= 0 {
        return Vec::new();
    }
    let Some(start) = today.checked_sub_days(Days::new(day_span as u64)) else {
        return Vec::new();
    };

    let mut records = Vec::new();

    for (day_index, date) in start.iter_days().take(day_span as usize).enumerate() {
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let weekend_multiplier = if weekend { config.weekend_multiplier } else { 1.0 };
        let month = date.month0();

        // One weather draw per day, shared by every store.
        let weather_impact = symmetric(rng, config.weather_amplitude);

        for store in catalog.stores() {
            let count = daily_transaction_count(config, store, weekend_multiplier);

            for slot in 0..count {
                let Some(product) = select_product(catalog, store.customer_demographics, rng) else {
                    continue;
                };

                let promotion_active = rng.gen::<f64>() < config.promotion_probability;
                let seasonality_factor = seasonal_factor(product.category, month);
                let unit_price = round_to(
                    product.base_price
                        * seasonality_factor
                        * if promotion_active { config.promotion_discount } else { 1.0 }
                        * volatility_factor(config, product.volatility, rng)
                        * (1.0 + weather_impact * weather_sensitivity(product.category)),
                    2,
                );
                let quantity = if promotion_active {
                    rng.gen_range(1..=3)
                } else {
                    rng.gen_range(1..=2)
                };

                records.push(SalesRecord {
                    id: record_id(day_index, &store.id, slot, rng),
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    category: product.category,
                    store: store.id.clone(),
                    date,
                    quantity,
                    unit_price,
                    total_sales: round_to(unit_price * quantity as f64, 2),
                    seasonality_factor,
                    promotion_active,
                    weather_impact: Some(weather_impact),
                });
            }
        }
    }

    info!(
        start = %start,
        days = day_span,
        stores = catalog.stores().len(),
        records = records.len(),
        "generated sales window"
    );
    records
}

pub fn daily_transaction_count(
    config: &SalesConfig,
    store: &StoreRecord,
    weekend_multiplier: f64,
) -> u32 {
    let base = match store.size {
        StoreSize::Large => config.base_count_large,
        StoreSize::Medium => config.base_count_medium,
        StoreSize::Small => config.base_count_small,
    };
    let traffic = store.avg_foot_traffic as f64 / config.traffic_baseline;
    (base * traffic * weekend_multiplier).floor().max(0.0) as u32
}

/// Candidate products for a customer profile. An empty restriction falls
/// back to the whole catalog.
pub fn candidate_products(catalog: &Catalog, demographics: Demographics) -> Vec<&ProductRecord> {
    let products = catalog.products();
    let pool: Vec<&ProductRecord> = match demographics {
        Demographics::Urban => products
            .iter()
            .filter(|p| p.category == Category::Electronics || p.lifecycle == Lifecycle::Growth)
            .collect(),
        Demographics::Suburban => products.iter().collect(),
        Demographics::Rural => products
            .iter()
            .filter(|p| p.category != Category::Electronics || p.name.contains("TV"))
            .collect(),
    };

    if pool.is_empty() {
        debug!(?demographics, "no products match profile, using full catalog");
        products.iter().collect()
    } else {
        pool
    }
}

fn select_product<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    demographics: Demographics,
    rng: &mut R,
) -> Option<&'a ProductRecord> {
    candidate_products(catalog, demographics).choose(rng).copied()
}

fn volatility_factor<R: Rng + ?Sized>(
    config: &SalesConfig,
    volatility: Volatility,
    rng: &mut R,
) -> f64 {
    let range = match volatility {
        Volatility::Stable => config.stable_volatility,
        Volatility::Moderate => config.moderate_volatility,
        Volatility::High => config.high_volatility,
    };
    sample(rng, range)
}

fn record_id<R: Rng + ?Sized>(day_index: usize, store_id: &str, slot: u32, rng: &mut R) -> String {
    let suffix: String = (0..6)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{day_index}-{store_id}-{slot}-{suffix}")
}
