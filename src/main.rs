use clap::Parser;
use tracing::{error, info};

use crate::cli::{Cli, Command};
use crate::db::{init_db, table_counts, Database};
use crate::domain::FeatureRow;
use crate::errors::Result;

mod cli;
mod config;
mod db;
mod domain;
mod errors;
mod forecast;
mod logging;
mod model;
mod pipeline;
mod preprocess;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = dispatch(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let mut cfg = cli.base_config();

    match cli.command.unwrap_or(Command::Run(Default::default())) {
        Command::Run(args) => {
            args.apply(&mut cfg);
            let summary = pipeline::run(&cfg)?;
            info!(
                loaded = summary.loaded,
                trained_on = summary.trained_on,
                forecast_rows = summary.forecast.len(),
                "pipeline finished"
            );
            if let Some(m) = summary.metrics {
                info!(mse = m.mse, r2 = m.r2, "held-out fit");
            }
        }
        Command::Status => {
            let db = Database::new(&cfg.db_path);
            let counts = table_counts(&db)?;
            info!(
                db = %db.path().display(),
                properties = counts.properties,
                visits = counts.visits,
                sales = counts.sales,
                "database reachable"
            );
        }
        Command::InitDb { schema } => {
            init_db(&Database::new(&cfg.db_path), &schema)?;
        }
        Command::Predict(args) => {
            let model_path = args.model.unwrap_or(cfg.outputs.model);
            let row = FeatureRow::new(&args.property_type, &args.location, args.size, args.visits);
            let price = pipeline::predict_with_saved_model(&model_path, &row)?;
            info!(
                property_type = %row.property_type,
                location = %row.location,
                size_sqm = row.size_sqm,
                predicted_price = price,
                "prediction"
            );
            println!("{price:.2}");
        }
    }
    Ok(())
}
