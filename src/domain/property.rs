// src/domain/property.rs

use crate::domain::features::FeatureRow;

/// One row of the aggregate property query, exactly as the database returns it.
/// Aggregates are optional because a LEFT JOIN may produce nothing to count.
#[derive(Debug, PartialEq, Clone)]
pub struct PropertyRecord {
    pub property_id: i64,
    pub property_type: String,
    pub location: String,
    pub size_sqm: f64,
    pub price_usd: f64,
    pub visit_count: Option<i64>,
    pub sale_count: Option<i64>,
    pub avg_sale_price: Option<f64>,
}

/// A property after missing aggregates were filled and derived
/// features computed. This is what training and forecasting consume.
#[derive(Debug, PartialEq, Clone)]
pub struct PreparedProperty {
    pub property_id: i64,
    pub property_type: String,
    pub location: String,
    pub size_sqm: f64,
    pub price_usd: f64,
    pub visit_count: f64,
    pub sale_count: f64,
    pub avg_sale_price: f64,
    pub price_per_sqm: f64,
    pub visit_popularity: f64,
}

impl PreparedProperty {
    /// The model input for this property.
    pub fn features(&self) -> FeatureRow {
        FeatureRow::new(
            &self.property_type,
            &self.location,
            self.size_sqm,
            self.visit_count,
        )
    }
}
