use crate::db::connection::Database;
use crate::domain::PropertyRecord;
use crate::errors::Result;
use rusqlite::Connection;
use tracing::info;

const SQL_PROPERTY_FEATURES: &str = include_str!("../../sql/property_features.sql");

/// Loads one aggregated row per property: listing data plus visit and
/// sale aggregates from the joined tables.
pub fn load_property_records(db: &Database) -> Result<Vec<PropertyRecord>> {
    let records = db.with_conn(|conn| query_property_records(conn))?;
    info!(rows = records.len(), "loaded property records");
    Ok(records)
}

/// Runs the aggregate query on an already open connection.
pub fn query_property_records(conn: &Connection) -> Result<Vec<PropertyRecord>> {
    let mut stmt = conn.prepare(SQL_PROPERTY_FEATURES)?;

    let rows = stmt.query_map([], |row| {
        Ok(PropertyRecord {
            property_id: row.get(0)?,
            property_type: row.get(1)?,
            location: row.get(2)?,
            size_sqm: row.get(3)?,
            price_usd: row.get(4)?,
            visit_count: row.get(5)?,
            sale_count: row.get(6)?,
            avg_sale_price: row.get(7)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
