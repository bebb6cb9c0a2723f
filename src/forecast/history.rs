use std::ops::Range;

use chrono::{Days, NaiveDate};
use rand::Rng;
use tracing::debug;

use crate::error::{Result, WasteError};
use crate::forecast::engine::{forecast, round_to};
use crate::models::meal::weekday_index;
use crate::models::{CategoryWaste, HistoricalRecord, MealDescriptor, MealType};

/// Dishes a synthetic meal may list.
pub const MENU_ITEMS: [&str; 5] = ["Rice", "Bread", "Vegetables", "Chicken", "Salad"];

/// Knobs for synthetic history generation.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Number of past days to cover (three meals each).
    pub days: u32,
    /// Attendance is drawn uniformly from this range.
    pub students: Range<u32>,
    pub event_probability: f64,
    /// Chance that each of MENU_ITEMS appears on a given meal.
    pub item_probability: f64,
    /// Observed total = forecast total * uniform factor from this range.
    pub total_noise: Range<f64>,
    /// Observed category amount = forecast amount * uniform factor from this range.
    pub category_noise: Range<f64>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            days: 14,
            students: 200..300,
            event_probability: 0.10,
            item_probability: 0.70,
            total_noise: 0.85..1.15,
            category_noise: 0.8..1.2,
        }
    }
}

impl HistoryConfig {
    pub fn with_days(days: u32) -> Self {
        Self {
            days,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.students.is_empty() {
            return Err(WasteError::InvalidInput(format!(
                "student range {:?} is empty",
                self.students
            )));
        }
        if self.total_noise.is_empty() || self.category_noise.is_empty() {
            return Err(WasteError::InvalidInput(
                "noise ranges must not be empty".to_string(),
            ));
        }
        for p in [self.event_probability, self.item_probability] {
            if !(0.0..=1.0).contains(&p) {
                return Err(WasteError::InvalidInput(format!(
                    "probability must be within 0-1, got {}",
                    p
                )));
            }
        }
        Ok(())
    }
}

/// Generate `days` days of synthetic history ending yesterday.
///
/// Negative `days` is rejected. See [`generate_history_with`].
pub fn generate_history<R: Rng>(
    days: i64,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<HistoricalRecord>> {
    let days = u32::try_from(days).map_err(|_| {
        WasteError::InvalidInput(format!("days must be non-negative, got {}", days))
    })?;
    generate_history_with(&HistoryConfig::with_days(days), today, rng)
}

/// Generate synthetic history with explicit settings.
///
/// Records run oldest to newest, three per date in Breakfast, Lunch,
/// Dinner order, covering the `config.days` dates before `today`.
pub fn generate_history_with<R: Rng>(
    config: &HistoryConfig,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<HistoricalRecord>> {
    config.validate()?;

    // The oldest date bounds every other one
    if today.checked_sub_days(Days::new(config.days as u64)).is_none() {
        return Err(out_of_range(config.days, today));
    }

    let mut records = Vec::new();

    for offset in (1..=config.days).rev() {
        let date = today
            .checked_sub_days(Days::new(offset as u64))
            .ok_or_else(|| out_of_range(offset, today))?;

        for meal_type in MealType::KNOWN {
            let meal = synthesize_meal(config, date, meal_type, rng);
            records.push(observe(config, meal, offset, rng)?);
        }
    }

    debug!(days = config.days, records = records.len(), "generated history");

    Ok(records)
}

fn out_of_range(days: u32, today: NaiveDate) -> WasteError {
    WasteError::InvalidInput(format!("{} days before {} is out of range", days, today))
}

/// Draw a plausible meal descriptor for a date.
fn synthesize_meal<R: Rng>(
    config: &HistoryConfig,
    date: NaiveDate,
    meal_type: MealType,
    rng: &mut R,
) -> MealDescriptor {
    let students_served = rng.gen_range(config.students.clone());
    let event_flag = rng.gen_bool(config.event_probability);
    let common_food_items = MENU_ITEMS
        .iter()
        .filter(|_| rng.gen_bool(config.item_probability))
        .map(|item| item.to_string())
        .collect();

    MealDescriptor {
        date,
        day_of_week: weekday_index(date),
        meal_type,
        students_served,
        event_flag,
        common_food_items,
    }
}

/// Forecast a meal, then perturb the forecast into an "observed" record.
///
/// This observation noise is independent of the engine's own category noise.
fn observe<R: Rng>(
    config: &HistoryConfig,
    meal: MealDescriptor,
    day_offset: u32,
    rng: &mut R,
) -> Result<HistoricalRecord> {
    let predicted = forecast(&meal, rng)?;

    let total_waste_kg = round_to(
        predicted.total_waste_kg * rng.gen_range(config.total_noise.clone()),
        1,
    );

    let waste_by_type = predicted
        .waste_by_type
        .into_iter()
        .map(|item| CategoryWaste {
            amount_kg: round_to(item.amount_kg * rng.gen_range(config.category_noise.clone()), 1),
            ..item
        })
        .collect();

    Ok(HistoricalRecord {
        meal,
        total_waste_kg,
        waste_by_type,
        day_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_zero_days_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let records = generate_history(0, today(), &mut rng).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_negative_days_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate_history(-3, today(), &mut rng);
        assert!(matches!(result, Err(WasteError::InvalidInput(_))));
    }

    #[test]
    fn test_covers_days_before_today() {
        let mut rng = StdRng::seed_from_u64(2);
        let records = generate_history(3, today(), &mut rng).unwrap();
        assert_eq!(records.len(), 9);

        // 2024 is a leap year
        assert_eq!(records[0].date(), NaiveDate::from_ymd_opt(2024, 2, 27).unwrap());
        assert_eq!(records[0].day_offset, 3);
        assert_eq!(records[8].date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(records[8].day_offset, 1);
    }

    #[test]
    fn test_meal_order_per_day() {
        let mut rng = StdRng::seed_from_u64(3);
        let records = generate_history(2, today(), &mut rng).unwrap();
        for day in records.chunks(3) {
            assert_eq!(day[0].meal_type(), &MealType::Breakfast);
            assert_eq!(day[1].meal_type(), &MealType::Lunch);
            assert_eq!(day[2].meal_type(), &MealType::Dinner);
            assert!(day.iter().all(|r| r.date() == day[0].date()));
        }
    }

    #[test]
    fn test_synthesized_fields_in_range() {
        let mut rng = StdRng::seed_from_u64(4);
        let records = generate_history(30, today(), &mut rng).unwrap();
        for record in &records {
            assert!((200..300).contains(&record.meal.students_served));
            assert_eq!(record.meal.day_of_week, weekday_index(record.date()));
            assert!(record.meal.common_food_items.len() <= MENU_ITEMS.len());
            assert!(record
                .meal
                .common_food_items
                .iter()
                .all(|item| MENU_ITEMS.contains(&item.as_str())));
            assert_eq!(record.waste_by_type.len(), 7);
            assert!(record.total_waste_kg > 0.0);
        }
    }

    #[test]
    fn test_observed_total_within_noise_band() {
        let config = HistoryConfig::with_days(10);
        let mut rng = StdRng::seed_from_u64(5);
        let records = generate_history_with(&config, today(), &mut rng).unwrap();
        for record in &records {
            let predicted = crate::forecast::predict_total(&record.meal).unwrap();
            // Allow for one-decimal rounding on both sides
            assert!(record.total_waste_kg >= predicted * 0.85 - 0.05);
            assert!(record.total_waste_kg <= predicted * 1.15 + 0.05);
        }
    }

    #[test]
    fn test_custom_config() {
        let config = HistoryConfig {
            days: 2,
            students: 0..1,
            event_probability: 0.0,
            item_probability: 1.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(6);
        let records = generate_history_with(&config, today(), &mut rng).unwrap();
        assert_eq!(records.len(), 6);
        for record in &records {
            assert_eq!(record.meal.students_served, 0);
            assert!(!record.meal.event_flag);
            assert_eq!(record.meal.common_food_items.len(), MENU_ITEMS.len());
            assert_eq!(record.total_waste_kg, 0.0);
        }
    }

    #[test]
    fn test_days_beyond_calendar_rejected() {
        let mut rng = StdRng::seed_from_u64(8);
        let result = generate_history(u32::MAX as i64, today(), &mut rng);
        assert!(matches!(result, Err(WasteError::InvalidInput(_))));
    }

    #[test]
    fn test_category_amounts_within_observation_noise() {
        let config = HistoryConfig::default();
        let meal = synthesize_meal(&config, today(), MealType::Dinner, &mut StdRng::seed_from_u64(9));

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            // observe() draws the forecast first, so a clone replays it
            let predicted = forecast(&meal, &mut rng.clone()).unwrap();
            let record = observe(&config, meal.clone(), 1, &mut rng).unwrap();

            for (observed, expected) in record.waste_by_type.iter().zip(&predicted.waste_by_type) {
                assert_eq!(observed.category, expected.category);
                assert_eq!(observed.percentage, expected.percentage);
                assert!(observed.amount_kg >= expected.amount_kg * 0.8 - 0.05);
                assert!(observed.amount_kg <= expected.amount_kg * 1.2 + 0.05);
            }
        }
    }

    #[test]
    fn test_category_noise_independent_of_total() {
        let config = HistoryConfig {
            days: 5,
            total_noise: 1.0..1.0001,
            category_noise: 1.5..1.6,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(10);
        let records = generate_history_with(&config, today(), &mut rng).unwrap();
        for record in &records {
            let predicted = crate::forecast::predict_total(&record.meal).unwrap();
            let categories: f64 = record.waste_by_type.iter().map(|c| c.amount_kg).sum();
            assert!((record.total_waste_kg - predicted).abs() <= 0.05);
            // Seven categories, each rounded to 0.1 kg
            assert!(categories >= predicted * 1.5 - 0.35);
            assert!(categories <= predicted * 1.6 + 0.35);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = HistoryConfig {
            event_probability: 1.5,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        assert!(generate_history_with(&config, today(), &mut rng).is_err());
    }
}
