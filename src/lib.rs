pub mod cli;
pub mod error;
pub mod forecast;
pub mod interface;
pub mod models;
pub mod report;

pub use error::{Result, WasteError};
pub use forecast::{day_index, day_name, forecast, generate_history};
pub use models::{HistoricalRecord, MealDescriptor, MealType, WasteForecast};
