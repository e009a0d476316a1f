pub mod connection;
pub mod properties;
pub mod status;

pub use connection::{init_db, Database};
pub use properties::load_property_records;
pub use status::table_counts;
