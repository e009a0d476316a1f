pub mod forecast_csv;
pub mod forecast_xlsx;

pub use forecast_csv::write_forecast_csv;
pub use forecast_xlsx::write_forecast_xlsx;
