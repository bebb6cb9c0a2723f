use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::report::ExportFormat;

/// Meal waste forecaster: predicts food waste and donation pickup windows for a meal service.
#[derive(Parser, Debug)]
#[command(name = "meal_waste")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Seed for the random generator (omit for fresh randomness each run).
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Forecast waste for one meal service.
    Predict {
        /// Meal date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Meal type: Breakfast, Lunch or Dinner. Prompts when omitted.
        #[arg(long)]
        meal: Option<String>,

        /// Number of students served. Prompts when omitted.
        #[arg(long, allow_hyphen_values = true)]
        students: Option<i64>,

        /// Mark the meal as a special event.
        #[arg(long)]
        event: bool,

        /// Comma-separated main dishes.
        #[arg(long, default_value = "")]
        items: String,

        /// Print the forecast as JSON instead of a table.
        #[arg(long)]
        json: bool,

        /// Write the denormalized prediction summary to this JSON file.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Show synthetic history with daily trend and meal comparison.
    History {
        /// Number of past days to synthesize.
        #[arg(long, default_value = "14", allow_hyphen_values = true)]
        days: i64,

        /// Only show one meal type.
        #[arg(long)]
        meal: Option<String>,

        /// Maximum number of records to list.
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Write synthetic history to a file.
    Export {
        /// Number of past days to synthesize.
        #[arg(long, default_value = "7", allow_hyphen_values = true)]
        days: i64,

        /// Output format.
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file.
        #[arg(long, short)]
        out: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::History {
            days: 14,
            meal: None,
            limit: 10,
        }
    }
}
