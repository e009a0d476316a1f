use std::path::PathBuf;

/// Longest projection `run` accepts, in years past the base year.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Yearly growth applied to a group's historical averages when projecting
/// forward. Both are fractions: 0.05 means +5% per year, compounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthAssumptions {
    pub size_growth: f64,
    pub visit_growth: f64,
}

impl Default for GrowthAssumptions {
    fn default() -> Self {
        Self {
            // Existing properties don't change size.
            size_growth: 0.0,
            visit_growth: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Share of rows held out for evaluation.
    pub test_fraction: f64,
    pub seed: u64,
    pub n_estimators: usize,
    /// `None` grows trees until leaves are pure.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub model: PathBuf,
    pub predictions_csv: PathBuf,
    pub predictions_xlsx: PathBuf,
    pub chart: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from("property_price_model.json"),
            predictions_csv: PathBuf::from("property_price_predictions.csv"),
            predictions_xlsx: PathBuf::from("property_price_predictions.xlsx"),
            chart: PathBuf::from("price_predictions.svg"),
        }
    }
}

/// Everything one pipeline run needs. `Default` reproduces a run with no
/// command-line arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    pub db_path: PathBuf,
    pub horizon_years: u32,
    /// First forecast year; `None` means the current calendar year.
    pub base_year: Option<i32>,
    pub growth: GrowthAssumptions,
    pub training: TrainingConfig,
    pub outputs: OutputPaths,
    pub write_xlsx: bool,
    pub write_chart: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("real_estate_agency.sqlite3"),
            horizon_years: 5,
            base_year: None,
            growth: GrowthAssumptions::default(),
            training: TrainingConfig::default(),
            outputs: OutputPaths::default(),
            write_xlsx: true,
            write_chart: true,
        }
    }
}
