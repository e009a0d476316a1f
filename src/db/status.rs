use crate::db::connection::Database;
use crate::errors::Result;
use rusqlite::Connection;

/// Row counts of the tables the forecast reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub properties: i64,
    pub visits: i64,
    pub sales: i64,
}

/// Connectivity check: opens the database and counts rows.
pub fn table_counts(db: &Database) -> Result<TableCounts> {
    db.with_conn(|conn| count_tables(conn))
}

fn count_tables(conn: &Connection) -> Result<TableCounts> {
    let count = |table: &str| -> Result<i64> {
        let n = conn.query_row(&format!("select count(*) from {table}"), [], |r| r.get(0))?;
        Ok(n)
    };

    Ok(TableCounts {
        properties: count("Properties")?,
        visits: count("Visits")?,
        sales: count("Sales")?,
    })
}
