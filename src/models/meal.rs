use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WasteError};

/// The service a forecast is made for.
///
/// Meal type is an open string at the edges: anything other than the three
/// known services is carried as `Other` and gets neutral factors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Other(String),
}

impl MealType {
    /// The three services, in serving order.
    pub const KNOWN: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    /// Column index into the per-meal lookup tables, `None` for unknown meals.
    pub fn slot(&self) -> Option<usize> {
        match self {
            MealType::Breakfast => Some(0),
            MealType::Lunch => Some(1),
            MealType::Dinner => Some(2),
            MealType::Other(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.slot().is_some()
    }

    pub fn as_str(&self) -> &str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Other(name) => name,
        }
    }
}

impl From<&str> for MealType {
    /// Exact, case-sensitive match like the stored values; no trimming.
    fn from(value: &str) -> Self {
        match value {
            "Breakfast" => MealType::Breakfast,
            "Lunch" => MealType::Lunch,
            "Dinner" => MealType::Dinner,
            other => MealType::Other(other.to_string()),
        }
    }
}

impl From<String> for MealType {
    fn from(value: String) -> Self {
        MealType::from(value.as_str())
    }
}

impl From<MealType> for String {
    fn from(value: MealType) -> Self {
        match value {
            MealType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Input to the forecast engine: one upcoming meal service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealDescriptor {
    pub date: NaiveDate,

    /// Sunday = 0 ... Saturday = 6. Must agree with `date`; not cross-checked.
    pub day_of_week: u8,

    pub meal_type: MealType,

    pub students_served: u32,

    pub event_flag: bool,

    /// Carried through for display; not used by the forecast math.
    #[serde(default)]
    pub common_food_items: Vec<String>,
}

impl MealDescriptor {
    /// Build a descriptor at the input boundary.
    ///
    /// The weekday is derived from `date`, and a negative attendance is
    /// rejected rather than clamped.
    pub fn new(
        date: NaiveDate,
        meal_type: MealType,
        students_served: i64,
        event_flag: bool,
        common_food_items: Vec<String>,
    ) -> Result<Self> {
        let students_served = u32::try_from(students_served).map_err(|_| {
            WasteError::InvalidInput(format!(
                "students served must be between 0 and {}, got {}",
                u32::MAX,
                students_served
            ))
        })?;

        Ok(Self {
            date,
            day_of_week: weekday_index(date),
            meal_type,
            students_served,
            event_flag,
            common_food_items,
        })
    }

    /// Check the fields the engine indexes with.
    pub fn validate(&self) -> Result<()> {
        if self.day_of_week > 6 {
            return Err(WasteError::InvalidInput(format!(
                "day of week must be 0-6, got {}",
                self.day_of_week
            )));
        }
        Ok(())
    }
}

/// Sunday-based weekday index for a date.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| WasteError::InvalidInput(format!("invalid date '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
    }

    #[test]
    fn test_meal_type_from_str() {
        assert_eq!(MealType::from("Lunch"), MealType::Lunch);
        assert_eq!(MealType::from("Brunch"), MealType::Other("Brunch".to_string()));
        // Stored values are case-sensitive
        assert!(!MealType::from("lunch").is_known());
    }

    #[test]
    fn test_meal_type_serde_as_string() {
        let json = serde_json::to_string(&MealType::Dinner).unwrap();
        assert_eq!(json, "\"Dinner\"");

        let other: MealType = serde_json::from_str("\"Supper\"").unwrap();
        assert_eq!(other, MealType::Other("Supper".to_string()));
    }

    #[test]
    fn test_new_derives_weekday() {
        let meal = MealDescriptor::new(wednesday(), MealType::Lunch, 225, false, vec![]).unwrap();
        assert_eq!(meal.day_of_week, 3);
        assert_eq!(meal.students_served, 225);
        assert!(meal.validate().is_ok());
    }

    #[test]
    fn test_new_rejects_negative_students() {
        let result = MealDescriptor::new(wednesday(), MealType::Lunch, -1, false, vec![]);
        assert!(matches!(result, Err(WasteError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_bad_weekday() {
        let mut meal =
            MealDescriptor::new(wednesday(), MealType::Dinner, 10, false, vec![]).unwrap();
        meal.day_of_week = 7;
        assert!(matches!(meal.validate(), Err(WasteError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-13").unwrap(), wednesday());
        assert!(parse_date("13/03/2024").is_err());
    }

    #[test]
    fn test_descriptor_json_shape() {
        let meal = MealDescriptor::new(
            wednesday(),
            MealType::Breakfast,
            250,
            true,
            vec!["Rice".to_string()],
        )
        .unwrap();
        let value = serde_json::to_value(&meal).unwrap();
        assert_eq!(value["date"], "2024-03-13");
        assert_eq!(value["dayOfWeek"], 3);
        assert_eq!(value["mealType"], "Breakfast");
        assert_eq!(value["studentsServed"], 250);
        assert_eq!(value["eventFlag"], true);
    }
}
