use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info};

use crate::config::TrainingConfig;
use crate::domain::FeatureRow;
use crate::errors::{PipelineError, Result};
use crate::model::metrics::ModelMetrics;
use crate::model::transformer::ColumnTransformer;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Every feature is a split candidate at every node; bootstrap sampling
/// and the seed come from the forest itself.
fn forest_parameters(cfg: &TrainingConfig, n_features: usize) -> RandomForestRegressorParameters {
    let mut params = RandomForestRegressorParameters::default()
        .with_n_trees(cfg.n_estimators)
        .with_min_samples_split(cfg.min_samples_split)
        .with_m(n_features)
        .with_seed(cfg.seed);
    if let Some(depth) = cfg.max_depth {
        params = params.with_max_depth(u16::try_from(depth).unwrap_or(u16::MAX));
    }
    params
}

/// Preprocessing plus regressor, fitted together and used together.
#[derive(Serialize, Deserialize)]
pub struct PricePipeline {
    transformer: ColumnTransformer,
    forest: Forest,
}

impl fmt::Debug for PricePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricePipeline")
            .field("features", &self.transformer.feature_names())
            .finish_non_exhaustive()
    }
}

impl PricePipeline {
    /// Fits the column transformer on `rows`, then the forest on the
    /// transformed matrix against `prices`.
    pub fn fit(rows: &[FeatureRow], prices: &[f64], cfg: &TrainingConfig) -> Result<Self> {
        if rows.is_empty() {
            return Err(PipelineError::InsufficientData(
                "cannot fit a model on zero rows".into(),
            ));
        }
        if rows.len() != prices.len() {
            return Err(PipelineError::Model(format!(
                "{} feature rows but {} prices",
                rows.len(),
                prices.len()
            )));
        }

        let transformer = ColumnTransformer::fit(rows)?;
        let x = transformer.transform(rows)?;
        let n_features = transformer.n_outputs();
        let forest = Forest::fit(&x, &prices.to_vec(), forest_parameters(cfg, n_features))?;
        debug!(
            trees = cfg.n_estimators,
            features = n_features,
            rows = rows.len(),
            "fitted random forest"
        );

        Ok(Self {
            transformer,
            forest,
        })
    }

    pub fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let x = self.transformer.transform(rows)?;
        Ok(self.forest.predict(&x)?)
    }

    pub fn predict_one(&self, row: &FeatureRow) -> Result<f64> {
        self.predict(std::slice::from_ref(row))?
            .first()
            .copied()
            .ok_or_else(|| PipelineError::Model("forest returned no prediction".into()))
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.transformer.feature_names()
    }
}

/// What gets written to disk after training.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub trained_at: DateTime<Utc>,
    pub seed: u64,
    pub feature_names: Vec<String>,
    pub metrics: Option<ModelMetrics>,
    pub pipeline: PricePipeline,
}

impl ModelArtifact {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        info!(path = %path.display(), "saved model");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let artifact: Self = serde_json::from_reader(reader)?;
        if artifact.feature_names != artifact.pipeline.feature_names() {
            return Err(PipelineError::Model(format!(
                "model at {} lists features that its pipeline does not produce",
                path.display()
            )));
        }
        Ok(artifact)
    }
}
