use crate::domain::ForecastRecord;
use crate::errors::Result;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::info;

/// Builds a one-sheet workbook with the forecast rows.
pub fn forecast_workbook(records: &[ForecastRecord]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Forecast")?;

    let bold = Format::new().set_bold();
    let money = Format::new().set_num_format("$#,##0.00");

    // Headers
    let headers = ["Year", "PropertyType", "Location", "PredictedPrice"];
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    // Rows
    for (i, rec) in records.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_number(r, 0, rec.year as f64)?;
        worksheet.write_string(r, 1, &rec.property_type)?;
        worksheet.write_string(r, 2, &rec.location)?;
        worksheet.write_number_with_format(r, 3, rec.predicted_price, &money)?;
    }

    worksheet.set_column_width(1, 18)?;
    worksheet.set_column_width(2, 18)?;
    worksheet.set_column_width(3, 16)?;

    Ok(workbook)
}

pub fn write_forecast_xlsx(path: &Path, records: &[ForecastRecord]) -> Result<()> {
    let mut workbook = forecast_workbook(records)?;
    workbook.save(path)?;
    info!(path = %path.display(), rows = records.len(), "wrote forecast workbook");
    Ok(())
}
