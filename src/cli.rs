use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ForecastConfig, MAX_HORIZON_YEARS};

#[derive(Debug, Parser)]
#[command(
    name = "property-forecast",
    version,
    about = "Train a property price model and project price trends per type and location"
)]
pub struct Cli {
    /// SQLite database holding Properties, Visits and Sales.
    #[arg(long, env = "PROPERTY_FORECAST_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the whole pipeline (default).
    Run(RunArgs),
    /// Check the database connection and report table sizes.
    Status,
    /// Create the agency tables from a schema file.
    InitDb {
        #[arg(long, default_value = "sql/schema.sql")]
        schema: PathBuf,
    },
    /// Price one property with the saved model.
    Predict(PredictArgs),
}

#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Years to project beyond the current one.
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_HORIZON_YEARS)))]
    pub years: Option<u32>,
    /// First forecast year (defaults to the current year).
    #[arg(long)]
    pub base_year: Option<i32>,
    /// Yearly visit growth, e.g. 0.05 for 5%.
    #[arg(long, env = "PROPERTY_FORECAST_VISIT_GROWTH")]
    pub visit_growth: Option<f64>,
    /// Yearly size growth.
    #[arg(long, env = "PROPERTY_FORECAST_SIZE_GROWTH")]
    pub size_growth: Option<f64>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub trees: Option<usize>,
    #[arg(long)]
    pub test_fraction: Option<f64>,
    #[arg(long)]
    pub max_depth: Option<usize>,
    #[arg(long)]
    pub model_out: Option<PathBuf>,
    #[arg(long)]
    pub csv_out: Option<PathBuf>,
    #[arg(long)]
    pub xlsx_out: Option<PathBuf>,
    #[arg(long)]
    pub chart_out: Option<PathBuf>,
    #[arg(long)]
    pub no_xlsx: bool,
    #[arg(long)]
    pub no_chart: bool,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    #[arg(long)]
    pub property_type: String,
    #[arg(long)]
    pub location: String,
    /// Size in square meters.
    #[arg(long)]
    pub size: f64,
    #[arg(long, default_value_t = 0.0)]
    pub visits: f64,
    /// Model file written by `run`.
    #[arg(long)]
    pub model: Option<PathBuf>,
}

impl RunArgs {
    /// Overrides whatever was given on the command line.
    pub fn apply(self, cfg: &mut ForecastConfig) {
        if let Some(v) = self.years {
            cfg.horizon_years = v;
        }
        if self.base_year.is_some() {
            cfg.base_year = self.base_year;
        }
        if let Some(v) = self.visit_growth {
            cfg.growth.visit_growth = v;
        }
        if let Some(v) = self.size_growth {
            cfg.growth.size_growth = v;
        }
        if let Some(v) = self.seed {
            cfg.training.seed = v;
        }
        if let Some(v) = self.trees {
            cfg.training.n_estimators = v;
        }
        if let Some(v) = self.test_fraction {
            cfg.training.test_fraction = v;
        }
        if self.max_depth.is_some() {
            cfg.training.max_depth = self.max_depth;
        }
        if let Some(p) = self.model_out {
            cfg.outputs.model = p;
        }
        if let Some(p) = self.csv_out {
            cfg.outputs.predictions_csv = p;
        }
        if let Some(p) = self.xlsx_out {
            cfg.outputs.predictions_xlsx = p;
        }
        if let Some(p) = self.chart_out {
            cfg.outputs.chart = p;
        }
        cfg.write_xlsx &= !self.no_xlsx;
        cfg.write_chart &= !self.no_chart;
    }
}

impl Cli {
    /// Config for this invocation: defaults, then global flags.
    pub fn base_config(&self) -> ForecastConfig {
        let mut cfg = ForecastConfig::default();
        if let Some(db) = &self.db {
            cfg.db_path = db.clone();
        }
        cfg
    }
}
