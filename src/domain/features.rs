// src/domain/features.rs
use serde::{Deserialize, Serialize};

/// Column names of the model input, in the order `FeatureRow` lays them out.
pub const CATEGORICAL_FEATURES: [&str; 2] = ["PropertyType", "Location"];
pub const NUMERIC_FEATURES: [&str; 3] = ["Size_sqm", "VisitCount", "VisitPopularity"];

/// A single model input row.
///
/// Both training rows and synthetic forecast rows are built through
/// [`FeatureRow::new`], which is the only place visit popularity is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub property_type: String,
    pub location: String,
    pub size_sqm: f64,
    pub visit_count: f64,
    pub visit_popularity: f64,
}

impl FeatureRow {
    pub fn new(property_type: &str, location: &str, size_sqm: f64, visit_count: f64) -> Self {
        Self {
            property_type: property_type.to_string(),
            location: location.to_string(),
            size_sqm,
            visit_count,
            visit_popularity: visit_popularity(visit_count, size_sqm),
        }
    }

    pub fn categorical(&self) -> [&str; 2] {
        [self.property_type.as_str(), self.location.as_str()]
    }

    pub fn numeric(&self) -> [f64; 3] {
        [self.size_sqm, self.visit_count, self.visit_popularity]
    }
}

/// Visits per square meter.
pub fn visit_popularity(visit_count: f64, size_sqm: f64) -> f64 {
    visit_count / size_sqm
}

/// Listing price per square meter.
pub fn price_per_sqm(price_usd: f64, size_sqm: f64) -> f64 {
    price_usd / size_sqm
}
