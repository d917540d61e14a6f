use crate::error::{Error, Result};
use crate::model::{
    Category, Demographics, Lifecycle, ProductRecord, SeasonalityPattern, StoreRecord, StoreSize,
    Volatility,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Immutable reference data the generators draw from. Build it once and pass
/// it by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<ProductRecord>,
    stores: Vec<StoreRecord>,
}

impl Catalog {
    pub fn new(products: Vec<ProductRecord>, stores: Vec<StoreRecord>) -> Result<Self> {
        let catalog = Catalog { products, stores };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: Catalog = serde_json::from_str(&data).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        catalog.validate()?;

        info!(
            path = %path.display(),
            products = catalog.products.len(),
            stores = catalog.stores.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn stores(&self) -> &[StoreRecord] {
        &self.stores
    }

    // Linear scans; the catalog is a handful of entries.
    pub fn product(&self, id: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn store(&self, id: &str) -> Option<&StoreRecord> {
        self.stores.iter().find(|s| s.id == id)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for p in &self.products {
            if !seen.insert(p.id.as_str()) {
                return Err(Error::InvalidCatalog(format!("duplicate product id {}", p.id)));
            }
            if !(p.base_price > 0.0) {
                return Err(Error::InvalidCatalog(format!(
                    "product {} has non-positive base price {}",
                    p.id, p.base_price
                )));
            }
            if p.lead_time == 0 {
                return Err(Error::InvalidCatalog(format!("product {} has zero lead time", p.id)));
            }
        }

        let mut seen = HashSet::new();
        for s in &self.stores {
            if !seen.insert(s.id.as_str()) {
                return Err(Error::InvalidCatalog(format!("duplicate store id {}", s.id)));
            }
            if s.avg_foot_traffic == 0 {
                return Err(Error::InvalidCatalog(format!("store {} has zero foot traffic", s.id)));
            }
        }

        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            products: default_products(),
            stores: default_stores(),
        }
    }
}

fn product(
    id: &str,
    name: &str,
    category: Category,
    base_price: f64,
    lead_time: u32,
    supplier: &str,
    seasonality_pattern: SeasonalityPattern,
    volatility: Volatility,
    lifecycle: Lifecycle,
) -> ProductRecord {
    ProductRecord {
        id: id.to_string(),
        name: name.to_string(),
        category,
        base_price,
        lead_time,
        supplier: supplier.to_string(),
        seasonality_pattern,
        volatility,
        lifecycle,
    }
}

fn default_products() -> Vec<ProductRecord> {
    use Category::*;
    use Lifecycle::*;
    use SeasonalityPattern as S;
    use Volatility as V;

    vec![
        // Electronics
        product(
            "ELEC-001",
            "iPhone 15 Pro",
            Electronics,
            999.0,
            7,
            "Apple Inc.",
            S::Medium,
            V::Moderate,
            Growth,
        ),
        product(
            "ELEC-002",
            "Samsung Galaxy S24",
            Electronics,
            899.0,
            10,
            "Samsung Electronics",
            S::Medium,
            V::Moderate,
            Maturity,
        ),
        product(
            "ELEC-003",
            "AirPods Pro",
            Electronics,
            249.0,
            5,
            "Apple Inc.",
            S::High,
            V::Stable,
            Maturity,
        ),
        product(
            "ELEC-004",
            "Samsung 55\" QLED TV",
            Electronics,
            1299.0,
            14,
            "Samsung Electronics",
            S::High,
            V::Moderate,
            Maturity,
        ),
        // Sports
        product(
            "SPRT-001",
            "Nike Air Max 270",
            Sports,
            150.0,
            21,
            "Nike Direct",
            S::Medium,
            V::Stable,
            Maturity,
        ),
        product(
            "SPRT-002",
            "Adidas UltraBoost",
            Sports,
            180.0,
            18,
            "Adidas AG",
            S::Low,
            V::Stable,
            Maturity,
        ),
        product(
            "SPRT-003",
            "Yoga Mat Premium",
            Sports,
            45.0,
            14,
            "FitnessCorp",
            S::Medium,
            V::Moderate,
            Growth,
        ),
        // Clothing
        product(
            "CLTH-001",
            "Levi's 501 Jeans",
            Clothing,
            80.0,
            28,
            "Levi Strauss & Co.",
            S::Low,
            V::Stable,
            Maturity,
        ),
        product(
            "CLTH-002",
            "Winter Parka",
            Clothing,
            200.0,
            45,
            "OutdoorGear Co.",
            S::High,
            V::High,
            Maturity,
        ),
        product(
            "CLTH-003",
            "Summer T-Shirt",
            Clothing,
            25.0,
            21,
            "BasicWear Ltd.",
            S::High,
            V::Moderate,
            Maturity,
        ),
        // Home & Garden
        product(
            "HOME-001",
            "KitchenAid Stand Mixer",
            HomeGarden,
            300.0,
            21,
            "KitchenAid",
            S::High,
            V::Stable,
            Maturity,
        ),
        product(
            "HOME-002",
            "Garden Hose 50ft",
            HomeGarden,
            35.0,
            14,
            "GardenMax",
            S::High,
            V::High,
            Maturity,
        ),
        product(
            "HOME-003",
            "Indoor Plant Collection",
            HomeGarden,
            60.0,
            7,
            "GreenThumb Nursery",
            S::Medium,
            V::Moderate,
            Growth,
        ),
    ]
}

fn store(
    id: &str,
    name: &str,
    location: &str,
    size: StoreSize,
    customer_demographics: Demographics,
    avg_foot_traffic: u32,
) -> StoreRecord {
    StoreRecord {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        size,
        customer_demographics,
        avg_foot_traffic,
    }
}

fn default_stores() -> Vec<StoreRecord> {
    vec![
        store(
            "downtown",
            "Downtown Flagship",
            "City Center",
            StoreSize::Large,
            Demographics::Urban,
            500,
        ),
        store(
            "mall",
            "Westfield Mall",
            "Shopping Center",
            StoreSize::Medium,
            Demographics::Suburban,
            800,
        ),
        store(
            "suburban",
            "Suburban Outlet",
            "Residential Area",
            StoreSize::Small,
            Demographics::Suburban,
            200,
        ),
    ]
}
