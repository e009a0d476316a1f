use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};

use crate::config::TrainingConfig;
use crate::domain::{FeatureRow, PreparedProperty};
use crate::errors::Result;
use crate::model::metrics::ModelMetrics;
use crate::model::pipeline::{ModelArtifact, PricePipeline};
use crate::model::split::train_test_split;

/// A fitted pipeline and how it did on the held-out rows.
/// `metrics` is `None` when nothing was held out.
#[derive(Debug)]
pub struct TrainedModel {
    pub pipeline: PricePipeline,
    pub metrics: Option<ModelMetrics>,
}

/// Splits, fits and evaluates without touching the filesystem.
pub fn fit_and_evaluate(
    properties: &[PreparedProperty],
    cfg: &TrainingConfig,
) -> Result<TrainedModel> {
    let split = train_test_split(properties.len(), cfg.test_fraction, cfg.seed)?;

    let (train_x, train_y) = features_and_target(properties, &split.train);
    let (test_x, test_y) = features_and_target(properties, &split.test);

    let pipeline = PricePipeline::fit(&train_x, &train_y, cfg)?;

    let metrics = if test_x.is_empty() {
        None
    } else {
        let predicted = pipeline.predict(&test_x)?;
        Some(ModelMetrics::evaluate(&test_y, &predicted, train_x.len()))
    };

    Ok(TrainedModel { pipeline, metrics })
}

/// Trains the price model, reports held-out metrics and persists the
/// artifact. Metrics never block persistence.
pub fn train_model(
    properties: &[PreparedProperty],
    cfg: &TrainingConfig,
    model_path: &Path,
) -> Result<TrainedModel> {
    let trained = fit_and_evaluate(properties, cfg)?;

    match &trained.metrics {
        Some(m) => info!(
            mse = m.mse,
            r2 = m.r2,
            train_rows = m.train_rows,
            test_rows = m.test_rows,
            "model performance"
        ),
        None => warn!("no rows held out; skipping evaluation"),
    }

    let artifact = ModelArtifact {
        trained_at: Utc::now(),
        seed: cfg.seed,
        feature_names: trained.pipeline.feature_names(),
        metrics: trained.metrics,
        pipeline: trained.pipeline,
    };
    artifact.save(model_path)?;

    Ok(TrainedModel {
        pipeline: artifact.pipeline,
        metrics: artifact.metrics,
    })
}

fn features_and_target(
    properties: &[PreparedProperty],
    indices: &[usize],
) -> (Vec<FeatureRow>, Vec<f64>) {
    indices
        .iter()
        .map(|&i| (properties[i].features(), properties[i].price_usd))
        .unzip()
}
