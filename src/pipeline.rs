use chrono::{Datelike, Local};
use std::path::Path;
use tracing::info;

use crate::config::{ForecastConfig, MAX_HORIZON_YEARS};
use crate::db::{load_property_records, Database};
use crate::domain::{FeatureRow, ForecastRecord};
use crate::errors::{PipelineError, Result};
use crate::forecast::generate_forecast;
use crate::model::{train_model, ModelArtifact, ModelMetrics};
use crate::preprocess::preprocess;
use crate::spreadsheets::{write_forecast_csv, write_forecast_xlsx};
use crate::templates::write_forecast_chart;

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub loaded: usize,
    pub trained_on: usize,
    pub metrics: Option<ModelMetrics>,
    pub forecast: Vec<ForecastRecord>,
}

/// Load, preprocess, train, forecast and write every output, in that order.
/// The first failing step aborts the run.
pub fn run(cfg: &ForecastConfig) -> Result<RunSummary> {
    if cfg.horizon_years > MAX_HORIZON_YEARS {
        return Err(PipelineError::Config(format!(
            "forecast horizon of {} years exceeds the maximum of {MAX_HORIZON_YEARS}",
            cfg.horizon_years
        )));
    }
    let db = Database::new(&cfg.db_path);

    info!(db = %db.path().display(), "loading data from database");
    let records = load_property_records(&db)?;

    info!("preprocessing data");
    let properties = preprocess(&records);

    info!("training model");
    let trained = train_model(&properties, &cfg.training, &cfg.outputs.model)?;

    info!(years = cfg.horizon_years, "generating future predictions");
    let base_year = cfg.base_year.unwrap_or_else(|| Local::now().year());
    let forecast = generate_forecast(
        &trained.pipeline,
        &properties,
        &cfg.growth,
        base_year,
        cfg.horizon_years,
    )?;

    write_forecast_csv(&cfg.outputs.predictions_csv, &forecast)?;
    if cfg.write_xlsx {
        write_forecast_xlsx(&cfg.outputs.predictions_xlsx, &forecast)?;
    }
    if cfg.write_chart {
        info!("plotting predictions");
        write_forecast_chart(&cfg.outputs.chart, &forecast)?;
    }

    info!("done; model and predictions ready for dashboard import");
    Ok(RunSummary {
        loaded: records.len(),
        trained_on: properties.len(),
        metrics: trained.metrics,
        forecast,
    })
}

/// Prices a single property with a previously saved model.
pub fn predict_with_saved_model(model_path: &Path, row: &FeatureRow) -> Result<f64> {
    if !(row.size_sqm.is_finite() && row.size_sqm > 0.0) {
        return Err(PipelineError::Model(format!(
            "size must be a positive number of square meters, got {}",
            row.size_sqm
        )));
    }
    let artifact = ModelArtifact::load(model_path)?;
    info!(
        trained_at = %artifact.trained_at,
        features = artifact.feature_names.len(),
        "loaded model"
    );
    artifact.pipeline.predict_one(row)
}
