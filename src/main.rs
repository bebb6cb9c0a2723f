use std::io::IsTerminal;
use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use meal_waste_forecast_rs::cli::{Cli, Command};
use meal_waste_forecast_rs::error::{Result, WasteError};
use meal_waste_forecast_rs::forecast::{
    daily_totals, filter_by_meal, forecast, generate_history, meal_averages,
};
use meal_waste_forecast_rs::interface::{
    collect_meal_descriptor, display_forecast, display_history, display_trends,
    resolve_meal_type, split_items, with_meal_hint,
};
use meal_waste_forecast_rs::models::meal::parse_date;
use meal_waste_forecast_rs::models::{MealDescriptor, PredictionSummary};
use meal_waste_forecast_rs::report::{ExportFormat, export_history, write_summary_json};

fn main() {
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let today = Local::now().date_naive();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Predict {
            date,
            meal,
            students,
            event,
            items,
            json,
            export,
        } => {
            let descriptor = match (meal, students) {
                (Some(meal), Some(students)) => {
                    let date = match date {
                        Some(d) => parse_date(&d)?,
                        None => today,
                    };
                    let meal_type = resolve_meal_type(&meal, std::io::stdin().is_terminal())?;
                    if meal_type.as_str() != meal.trim() {
                        eprintln!("Using '{}' for '{}'", meal_type, meal);
                    }
                    MealDescriptor::new(date, meal_type, students, event, split_items(&items))?
                }
                _ => collect_meal_descriptor(today)?,
            };
            cmd_predict(&descriptor, json, export.as_deref(), &mut rng)
        }
        Command::History { days, meal, limit } => {
            cmd_history(days, meal.as_deref(), limit, today, &mut rng)
        }
        Command::Export { days, format, out } => cmd_export(days, format, &out, today, &mut rng),
    }
}

/// Forecast one meal and optionally export its summary.
fn cmd_predict(
    descriptor: &MealDescriptor,
    json: bool,
    export: Option<&Path>,
    rng: &mut StdRng,
) -> Result<()> {
    let prediction = forecast(descriptor, rng).map_err(with_meal_hint)?;
    info!(
        meal = %descriptor.meal_type,
        total_waste_kg = prediction.total_waste_kg,
        "forecast computed"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        display_forecast(descriptor, &prediction);
    }

    // The forecast is already shown; a failed export is only advisory.
    if let Some(path) = export {
        let summary = PredictionSummary::from_forecast(descriptor, &prediction);
        match write_summary_json(&summary, path) {
            Ok(()) => println!("Prediction saved to {}", path.display()),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "summary export failed");
                eprintln!("Forecast computed but not saved: {}", e);
            }
        }
    }

    Ok(())
}

/// List synthetic history with trends.
fn cmd_history(
    days: i64,
    meal: Option<&str>,
    limit: usize,
    today: NaiveDate,
    rng: &mut StdRng,
) -> Result<()> {
    let records = generate_history(days, today, rng)?;
    info!(days, records = records.len(), "history synthesized");

    let meal_filter = match meal {
        Some(m) => {
            let meal_type = resolve_meal_type(m, false)?;
            if !meal_type.is_known() {
                return Err(with_meal_hint(WasteError::UnsupportedMealType(
                    meal_type.to_string(),
                )));
            }
            Some(meal_type)
        }
        None => None,
    };
    let shown = filter_by_meal(&records, meal_filter.as_ref());

    display_history(&shown, limit);
    display_trends(&daily_totals(shown.iter().copied()), &meal_averages(&records));

    Ok(())
}

/// Write synthetic history to a file.
fn cmd_export(
    days: i64,
    format: ExportFormat,
    out: &Path,
    today: NaiveDate,
    rng: &mut StdRng,
) -> Result<()> {
    let records = generate_history(days, today, rng)?;
    export_history(&records, format, out)?;

    info!(records = records.len(), path = %out.display(), "history exported");
    println!("Exported {} records to {}", records.len(), out.display());

    Ok(())
}
