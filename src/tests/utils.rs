use crate::db::connection::{init_db, Database};
use crate::domain::features::{price_per_sqm, visit_popularity};
use crate::domain::PreparedProperty;
use rusqlite::params;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const TYPES: [&str; 2] = ["Apartment", "Villa"];
pub const LOCATIONS: [&str; 2] = ["Downtown", "Suburbs"];

/// Unique file path under the system temp dir.
pub fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("property_forecast_{nanos}_{name}"))
}

pub fn temp_db_path(name: &str) -> PathBuf {
    temp_path(&format!("{name}.sqlite"))
}

pub fn prepared(
    id: i64,
    property_type: &str,
    location: &str,
    size_sqm: f64,
    price_usd: f64,
    visit_count: f64,
) -> PreparedProperty {
    PreparedProperty {
        property_id: id,
        property_type: property_type.into(),
        location: location.into(),
        size_sqm,
        price_usd,
        visit_count,
        sale_count: 0.0,
        avg_sale_price: price_usd,
        price_per_sqm: price_per_sqm(price_usd, size_sqm),
        visit_popularity: visit_popularity(visit_count, size_sqm),
    }
}

/// (type, location, size, visits, price) for 40 synthetic listings.
/// Price is driven by type, location and size, with a small visit effect.
fn fixture_rows() -> Vec<(&'static str, &'static str, f64, i64, f64)> {
    (0..40)
        .map(|i: i64| {
            let kind = TYPES[(i % 2) as usize];
            let loc = LOCATIONS[((i / 2) % 2) as usize];
            let base = if kind == "Villa" { 200.0 } else { 60.0 };
            let size = base + ((i * 7) % 50) as f64;
            let visits = (i * 3) % 11;
            let rate = match (kind, loc) {
                ("Apartment", "Downtown") => 3000.0,
                ("Apartment", _) => 2000.0,
                ("Villa", "Downtown") => 4000.0,
                _ => 2500.0,
            };
            (kind, loc, size, visits, size * rate + visits as f64 * 1000.0)
        })
        .collect()
}

pub fn sample_properties() -> Vec<PreparedProperty> {
    fixture_rows()
        .into_iter()
        .enumerate()
        .map(|(i, (kind, loc, size, visits, price))| {
            prepared(i as i64 + 1, kind, loc, size, price, visits as f64)
        })
        .collect()
}

/// Fresh database with the production schema and the fixture listings,
/// their visits, and a sale for every third listing.
pub fn init_fixture_db(name: &str) -> Database {
    let db = Database::new(temp_db_path(name));
    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        let mut visit_id = 1;
        for (i, (kind, loc, size, visits, price)) in fixture_rows().into_iter().enumerate() {
            let property_id = i as i64 + 1;
            tx.execute(
                "insert into Properties (PropertyID, PropertyType, Location, Size_sqm, PriceUSD)
                 values (?1, ?2, ?3, ?4, ?5)",
                params![property_id, kind, loc, size, price],
            )?;
            for _ in 0..visits {
                tx.execute(
                    "insert into Visits (VisitID, PropertyID, VisitDate)
                     values (?1, ?2, '2025-06-01')",
                    params![visit_id, property_id],
                )?;
                visit_id += 1;
            }
            if i % 3 == 0 {
                tx.execute(
                    "insert into Sales (PropertyID, SaleDate, SalePrice)
                     values (?1, '2025-07-01', ?2)",
                    params![property_id, price * 0.97],
                )?;
            }
        }
        tx.commit()?;
        Ok(())
    })
    .unwrap();

    db
}
