use tracing::{debug, info};

use crate::config::GrowthAssumptions;
use crate::domain::{FeatureRow, ForecastRecord, PreparedProperty};
use crate::errors::Result;
use crate::model::PricePipeline;

/// Historical averages of one (property type, location) group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBaseline {
    pub property_type: String,
    pub location: String,
    pub avg_size: f64,
    pub avg_visits: f64,
    pub avg_visit_popularity: f64,
    pub current_avg_price: f64,
}

impl GroupBaseline {
    /// Feature row for `offset` years ahead. Size and visits compound at
    /// their growth rates; popularity is re-derived from the projections.
    pub fn project(&self, growth: &GrowthAssumptions, offset: u32) -> FeatureRow {
        let k = offset as i32;
        let size = self.avg_size * (1.0 + growth.size_growth).powi(k);
        let visits = self.avg_visits * (1.0 + growth.visit_growth).powi(k);
        FeatureRow::new(&self.property_type, &self.location, size, visits)
    }
}

/// Distinct values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// One baseline per observed (type, location) combination that has rows.
pub fn group_baselines(properties: &[PreparedProperty]) -> Vec<GroupBaseline> {
    let types = distinct(properties.iter().map(|p| p.property_type.as_str()));
    let locations = distinct(properties.iter().map(|p| p.location.as_str()));

    let mut baselines = Vec::new();
    for property_type in &types {
        for location in &locations {
            let subset: Vec<&PreparedProperty> = properties
                .iter()
                .filter(|p| p.property_type == *property_type && p.location == *location)
                .collect();
            if subset.is_empty() {
                continue;
            }

            let n = subset.len() as f64;
            let avg =
                |f: fn(&PreparedProperty) -> f64| subset.iter().map(|p| f(*p)).sum::<f64>() / n;

            baselines.push(GroupBaseline {
                property_type: property_type.to_string(),
                location: location.to_string(),
                avg_size: avg(|p| p.size_sqm),
                avg_visits: avg(|p| p.visit_count),
                avg_visit_popularity: avg(|p| p.visit_popularity),
                current_avg_price: avg(|p| p.price_usd),
            });
        }
    }
    baselines
}

/// Predicts a price for every group and every year from `base_year`
/// through `base_year + horizon_years`.
pub fn generate_forecast(
    model: &PricePipeline,
    properties: &[PreparedProperty],
    growth: &GrowthAssumptions,
    base_year: i32,
    horizon_years: u32,
) -> Result<Vec<ForecastRecord>> {
    let baselines = group_baselines(properties);
    let mut records = Vec::new();

    for baseline in &baselines {
        debug!(
            property_type = %baseline.property_type,
            location = %baseline.location,
            avg_size = baseline.avg_size,
            avg_visits = baseline.avg_visits,
            avg_visit_popularity = baseline.avg_visit_popularity,
            current_avg_price = baseline.current_avg_price,
            "projecting group"
        );

        for offset in 0..=horizon_years {
            let features = baseline.project(growth, offset);
            records.push(ForecastRecord {
                year: base_year.saturating_add_unsigned(offset),
                property_type: baseline.property_type.clone(),
                location: baseline.location.clone(),
                predicted_price: model.predict_one(&features)?,
            });
        }
    }

    info!(
        groups = baselines.len(),
        rows = records.len(),
        "generated forecast"
    );
    Ok(records)
}
