use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::domain::ForecastRecord;
use crate::errors::Result;

/// Writes `Year,PropertyType,Location,PredictedPrice` rows to any writer.
pub fn write_forecast_records<W: Write>(writer: W, records: &[ForecastRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for rec in records {
        wtr.serialize(rec)?;
    }
    wtr.flush()?;
    Ok(())
}

/// The dashboard input file.
pub fn write_forecast_csv(path: &Path, records: &[ForecastRecord]) -> Result<()> {
    write_forecast_records(File::create(path)?, records)?;
    info!(path = %path.display(), rows = records.len(), "wrote forecast csv");
    Ok(())
}
