pub mod features;
pub mod forecast;
pub mod property;

pub use features::FeatureRow;
pub use forecast::ForecastRecord;
pub use property::{PreparedProperty, PropertyRecord};
