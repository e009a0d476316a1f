pub mod chart;

pub use chart::write_forecast_chart;
