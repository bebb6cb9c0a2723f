use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::forecast::constants::day_name;
use crate::forecast::engine::round_to;
use crate::models::{HistoricalRecord, MealType};

/// Total waste for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub day: &'static str,
    pub waste_kg: f64,
}

/// Average waste for one meal service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealAverage {
    pub meal_type: MealType,
    pub average_kg: f64,
    pub samples: usize,
}

/// Records for a single meal type; `None` keeps everything.
pub fn filter_by_meal<'a>(
    records: &'a [HistoricalRecord],
    meal: Option<&MealType>,
) -> Vec<&'a HistoricalRecord> {
    records
        .iter()
        .filter(|r| meal.is_none_or(|m| r.meal_type() == m))
        .collect()
}

/// Sum waste per date, oldest first.
pub fn daily_totals<'a, I>(records: I) -> Vec<DailyTotal>
where
    I: IntoIterator<Item = &'a HistoricalRecord>,
{
    let mut by_date: BTreeMap<NaiveDate, (u8, f64)> = BTreeMap::new();
    for record in records {
        let entry = by_date
            .entry(record.date())
            .or_insert((record.meal.day_of_week, 0.0));
        entry.1 += record.total_waste_kg;
    }

    by_date
        .into_iter()
        .map(|(date, (dow, waste))| DailyTotal {
            date,
            day: day_name(dow as i64).unwrap_or_default(),
            waste_kg: round_to(waste, 1),
        })
        .collect()
}

/// Average waste per known meal, one decimal; zero when a meal has no records.
pub fn meal_averages<'a, I>(records: I) -> Vec<MealAverage>
where
    I: IntoIterator<Item = &'a HistoricalRecord> + Clone,
{
    MealType::KNOWN
        .into_iter()
        .map(|meal_type| {
            let (sum, samples) = records
                .clone()
                .into_iter()
                .filter(|r| r.meal_type() == &meal_type)
                .fold((0.0, 0usize), |(s, n), r| (s + r.total_waste_kg, n + 1));

            MealAverage {
                average_kg: round_to(sum / samples.max(1) as f64, 1),
                meal_type,
                samples,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealDescriptor;

    fn record(day: u32, meal_type: MealType, waste: f64) -> HistoricalRecord {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        HistoricalRecord {
            meal: MealDescriptor::new(date, meal_type, 250, false, vec![]).unwrap(),
            total_waste_kg: waste,
            waste_by_type: vec![],
            day_offset: 0,
        }
    }

    fn sample() -> Vec<HistoricalRecord> {
        vec![
            record(12, MealType::Breakfast, 10.0),
            record(12, MealType::Lunch, 20.5),
            record(11, MealType::Dinner, 30.0),
            record(11, MealType::Lunch, 21.5),
        ]
    }

    #[test]
    fn test_daily_totals_sorted_and_summed() {
        let records = sample();
        let totals = daily_totals(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(totals[0].day, "Monday");
        assert_eq!(totals[0].waste_kg, 51.5);
        assert_eq!(totals[1].waste_kg, 30.5);
    }

    #[test]
    fn test_meal_averages() {
        let records = sample();
        let averages = meal_averages(&records);
        assert_eq!(averages.len(), 3);
        assert_eq!(averages[0].meal_type, MealType::Breakfast);
        assert_eq!(averages[0].average_kg, 10.0);
        assert_eq!(averages[1].average_kg, 21.0);
        assert_eq!(averages[1].samples, 2);
        assert_eq!(averages[2].average_kg, 30.0);
    }

    #[test]
    fn test_meal_averages_empty() {
        let empty: Vec<HistoricalRecord> = Vec::new();
        let averages = meal_averages(&empty);
        assert!(averages.iter().all(|a| a.average_kg == 0.0 && a.samples == 0));
    }

    #[test]
    fn test_filter_by_meal() {
        let records = sample();
        assert_eq!(filter_by_meal(&records, None).len(), 4);

        let lunches = filter_by_meal(&records, Some(&MealType::Lunch));
        assert_eq!(lunches.len(), 2);
        assert_eq!(daily_totals(lunches).len(), 2);
    }
}
