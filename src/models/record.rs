use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::forecast::day_name;
use crate::models::forecast::{CategoryWaste, WasteForecast};
use crate::models::meal::{MealDescriptor, MealType};

/// A synthesized past meal with its "observed" waste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRecord {
    #[serde(flatten)]
    pub meal: MealDescriptor,

    /// Observed total, one decimal place.
    pub total_waste_kg: f64,

    /// Observed per-category amounts (independently perturbed).
    pub waste_by_type: Vec<CategoryWaste>,

    /// Days before the generation date (1 = yesterday).
    pub day_offset: u32,
}

impl HistoricalRecord {
    pub fn date(&self) -> NaiveDate {
        self.meal.date
    }

    pub fn meal_type(&self) -> &MealType {
        &self.meal.meal_type
    }
}

/// Denormalized view of a forecast, the shape a persistence layer stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub meal_type: String,
    pub day_of_week: String,
    pub students_served: u32,
    pub event_flag: bool,
    pub predicted_waste_kg: f64,
    pub waste_types: Vec<CategoryWaste>,
    /// First suggested window as `"HH:MM - HH:MM"`, empty if none.
    pub pickup_time: String,
}

impl PredictionSummary {
    pub fn from_forecast(meal: &MealDescriptor, forecast: &WasteForecast) -> Self {
        Self {
            meal_type: meal.meal_type.to_string(),
            day_of_week: day_name(meal.day_of_week as i64)
                .unwrap_or_default()
                .to_string(),
            students_served: meal.students_served,
            event_flag: meal.event_flag,
            predicted_waste_kg: forecast.total_waste_kg,
            waste_types: forecast.waste_by_type.clone(),
            pickup_time: forecast
                .primary_window()
                .map(|w| w.to_string())
                .unwrap_or_default(),
        }
    }
}
