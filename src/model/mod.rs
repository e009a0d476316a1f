//! Price model: one-hot encoding and smartcore scaling feeding a seeded
//! random forest, with held-out evaluation and persistence.

pub mod encoder;
pub mod metrics;
pub mod pipeline;
pub mod split;
pub mod trainer;
pub mod transformer;

pub use metrics::ModelMetrics;
pub use pipeline::{ModelArtifact, PricePipeline};
pub use trainer::{fit_and_evaluate, train_model};
