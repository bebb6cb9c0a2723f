use std::fs::File;
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;

use crate::error::Result;
use crate::forecast::day_name;
use crate::models::{HistoricalRecord, PredictionSummary};

/// File formats for history export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Column header for CSV history export.
const CSV_HEADER: [&str; 7] = [
    "date",
    "day_of_week",
    "meal_type",
    "students_served",
    "event_flag",
    "food_items",
    "total_waste_kg",
];

/// Write history records to a CSV file, one row per meal.
///
/// Food items are joined with `;` so the column stays a single field.
pub fn write_history_csv(records: &[HistoricalRecord], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(CSV_HEADER)?;

    for record in records {
        let meal = &record.meal;
        wtr.write_record([
            meal.date.format("%Y-%m-%d").to_string(),
            day_name(meal.day_of_week as i64)
                .unwrap_or_default()
                .to_string(),
            meal.meal_type.to_string(),
            meal.students_served.to_string(),
            meal.event_flag.to_string(),
            meal.common_food_items.join(";"),
            format!("{:.1}", record.total_waste_kg),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write history records to a pretty-printed JSON array.
pub fn write_history_json(records: &[HistoricalRecord], path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(records)?.as_bytes())?;
    Ok(())
}

/// Write history in the requested format.
pub fn export_history(records: &[HistoricalRecord], format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Csv => write_history_csv(records, path),
        ExportFormat::Json => write_history_json(records, path),
    }
}

/// Write a single denormalized prediction as JSON.
pub fn write_summary_json(summary: &PredictionSummary, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(summary)?.as_bytes())?;
    Ok(())
}
