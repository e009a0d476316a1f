use crate::domain::features::{price_per_sqm, visit_popularity};
use crate::domain::{PreparedProperty, PropertyRecord};
use tracing::{debug, warn};

/// Fills missing aggregates and derives the per-area features.
///
/// Missing visit and sale counts become 0, a missing average sale price
/// falls back to the listing price. Rows whose size is zero, negative or
/// not finite cannot be normalized by area and are dropped.
pub fn preprocess(records: &[PropertyRecord]) -> Vec<PreparedProperty> {
    let prepared: Vec<PreparedProperty> = records
        .iter()
        .filter_map(|r| {
            if !(r.size_sqm.is_finite() && r.size_sqm > 0.0) {
                warn!(
                    property_id = r.property_id,
                    size_sqm = r.size_sqm,
                    "skipping property with unusable size"
                );
                return None;
            }
            Some(prepare_one(r))
        })
        .collect();

    debug!(
        input = records.len(),
        kept = prepared.len(),
        "preprocessed property records"
    );
    prepared
}

fn prepare_one(r: &PropertyRecord) -> PreparedProperty {
    let visit_count = r.visit_count.unwrap_or(0) as f64;
    let sale_count = r.sale_count.unwrap_or(0) as f64;
    let avg_sale_price = r.avg_sale_price.unwrap_or(r.price_usd);

    PreparedProperty {
        property_id: r.property_id,
        property_type: r.property_type.clone(),
        location: r.location.clone(),
        size_sqm: r.size_sqm,
        price_usd: r.price_usd,
        visit_count,
        sale_count,
        avg_sale_price,
        price_per_sqm: price_per_sqm(r.price_usd, r.size_sqm),
        visit_popularity: visit_popularity(visit_count, r.size_sqm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, size: f64, price: f64) -> PropertyRecord {
        PropertyRecord {
            property_id: id,
            property_type: "Apartment".into(),
            location: "Downtown".into(),
            size_sqm: size,
            price_usd: price,
            visit_count: Some(10),
            sale_count: Some(1),
            avg_sale_price: Some(price - 20000.0),
        }
    }

    #[test]
    fn derives_ratio_features() {
        let out = preprocess(&[record(1, 120.0, 300000.0)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].price_per_sqm, 300000.0 / 120.0);
        assert_eq!(out[0].visit_popularity, 10.0 / 120.0);
    }

    #[test]
    fn missing_aggregates_fall_back() {
        let mut r = record(7, 50.0, 80000.0);
        r.visit_count = None;
        r.sale_count = None;
        r.avg_sale_price = None;

        let out = preprocess(&[r]);
        assert_eq!(out[0].visit_count, 0.0);
        assert_eq!(out[0].sale_count, 0.0);
        assert_eq!(out[0].avg_sale_price, 80000.0);
        assert_eq!(out[0].visit_popularity, 0.0);
    }

    #[test]
    fn present_sale_price_is_kept() {
        let out = preprocess(&[record(2, 100.0, 200000.0)]);
        assert_eq!(out[0].avg_sale_price, 180000.0);
    }

    #[test]
    fn unusable_sizes_are_excluded() {
        let out = preprocess(&[
            record(1, 0.0, 1000.0),
            record(2, -5.0, 1000.0),
            record(3, f64::NAN, 1000.0),
            record(4, 40.0, 1000.0),
        ]);
        let ids: Vec<i64> = out.iter().map(|p| p.property_id).collect();
        assert_eq!(ids, vec![4]);
        assert!(out.iter().all(|p| p.price_per_sqm.is_finite()));
    }

    #[test]
    fn features_use_the_prepared_values() {
        let out = preprocess(&[record(1, 200.0, 500000.0)]);
        let f = out[0].features();
        assert_eq!(f.size_sqm, 200.0);
        assert_eq!(f.visit_count, 10.0);
        assert_eq!(f.visit_popularity, out[0].visit_popularity);
    }
}
