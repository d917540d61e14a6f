//! Fixed lookup tables shared by the sales and forecast generators, plus the
//! small sampling and rounding helpers both of them use.

use crate::config::Range;
use crate::model::{Category, SeasonalityPattern};
use rand::Rng;

const WEATHER_SENSITIVITY: &[(Category, f64)] = &[
    (Category::Electronics, 0.1),
    (Category::Sports, 0.3),
    (Category::Clothing, 0.4),
    (Category::HomeGarden, 0.5),
    (Category::Books, 0.05),
];
const DEFAULT_WEATHER_SENSITIVITY: f64 = 0.1;

const CATEGORY_BASE_DEMAND: &[(Category, f64)] = &[
    (Category::Electronics, 15.0),
    (Category::Sports, 25.0),
    (Category::Clothing, 30.0),
    (Category::HomeGarden, 12.0),
    (Category::Books, 8.0),
];
const DEFAULT_BASE_DEMAND: f64 = 15.0;

// (category, months with Jan = 0, multiplier). First match wins.
const MONTHLY_SEASONALITY: &[(Category, &[u32], f64)] = &[
    (Category::Electronics, &[10, 11, 0], 1.4),
    (Category::Sports, &[2, 3, 4, 8, 9], 1.3),
    (Category::Clothing, &[10, 11, 0, 1], 1.2),
    (Category::Clothing, &[5, 6, 7], 1.1),
    (Category::HomeGarden, &[3, 4, 5, 6, 7, 8], 1.3),
];
const DEFAULT_SEASONAL_FACTOR: f64 = 1.0;

fn lookup(table: &[(Category, f64)], category: Category, default: f64) -> f64 {
    table
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, v)| *v)
        .unwrap_or(default)
}

pub fn weather_sensitivity(category: Category) -> f64 {
    lookup(WEATHER_SENSITIVITY, category, DEFAULT_WEATHER_SENSITIVITY)
}

pub fn category_base_demand(category: Category) -> f64 {
    lookup(CATEGORY_BASE_DEMAND, category, DEFAULT_BASE_DEMAND)
}

pub fn seasonal_factor(category: Category, month0: u32) -> f64 {
    MONTHLY_SEASONALITY
        .iter()
        .find(|(c, months, _)| *c == category && months.contains(&month0))
        .map(|(_, _, factor)| *factor)
        .unwrap_or(DEFAULT_SEASONAL_FACTOR)
}

pub fn seasonality_strength(pattern: SeasonalityPattern) -> f64 {
    match pattern {
        SeasonalityPattern::High => 0.3,
        SeasonalityPattern::Medium => 0.15,
        SeasonalityPattern::Low => 0.05,
    }
}

/// Uniform sample in `[low, high)`; a collapsed range returns `low`.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, range: Range) -> f64 {
    range.low + rng.gen::<f64>() * (range.high - range.low)
}

/// Uniform sample in `[-amplitude, amplitude)`.
pub fn symmetric<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * 2.0 * amplitude
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn seasonal_table_matches_calendar() {
        assert_eq!(seasonal_factor(Category::Electronics, 11), 1.4);
        assert_eq!(seasonal_factor(Category::Electronics, 0), 1.4);
        assert_eq!(seasonal_factor(Category::Electronics, 1), 1.0);
        assert_eq!(seasonal_factor(Category::Sports, 9), 1.3);
        assert_eq!(seasonal_factor(Category::Sports, 6), 1.0);
        assert_eq!(seasonal_factor(Category::Clothing, 1), 1.2);
        assert_eq!(seasonal_factor(Category::Clothing, 6), 1.1);
        assert_eq!(seasonal_factor(Category::Clothing, 3), 1.0);
        assert_eq!(seasonal_factor(Category::HomeGarden, 3), 1.3);
        assert_eq!(seasonal_factor(Category::HomeGarden, 8), 1.3);
        assert_eq!(seasonal_factor(Category::HomeGarden, 9), 1.0);
        for month in 0..12 {
            assert_eq!(seasonal_factor(Category::Books, month), 1.0);
            assert_eq!(seasonal_factor(Category::Other, month), 1.0);
        }
    }

    #[test]
    fn unmapped_categories_use_defaults() {
        assert_eq!(weather_sensitivity(Category::Other), 0.1);
        assert_eq!(weather_sensitivity(Category::Books), 0.05);
        assert_eq!(category_base_demand(Category::Other), 15.0);
        assert_eq!(category_base_demand(Category::Clothing), 30.0);
    }

    #[test]
    fn samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let v = sample(&mut rng, Range::new(0.7, 1.3));
            assert!((0.7..1.3).contains(&v));
            let w = symmetric(&mut rng, 0.1);
            assert!((-0.1..0.1).contains(&w));
        }
        assert_eq!(sample(&mut rng, Range::new(2.0, 2.0)), 2.0);
    }

    #[test]
    fn rounds_to_decimals() {
        assert_eq!(round_to(12.345_6, 2), 12.35);
        assert_eq!(round_to(94.249, 1), 94.2);
        assert_eq!(round_to(7.5, 0), 8.0);
    }
}
