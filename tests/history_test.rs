use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use meal_waste_forecast_rs::forecast::{
    MENU_ITEMS, daily_totals, generate_history, meal_averages,
};
use meal_waste_forecast_rs::models::MealType;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
}

#[test]
fn test_history_shape() {
    let mut rng = StdRng::seed_from_u64(11);
    let records = generate_history(14, today(), &mut rng).unwrap();
    assert_eq!(records.len(), 42);

    let dates: Vec<NaiveDate> = records.chunks(3).map(|day| day[0].date()).collect();
    assert_eq!(dates.len(), 14);
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert!(dates.iter().all(|d| *d < today()));

    // Crosses the year boundary
    assert_eq!(dates[0], NaiveDate::from_ymd_opt(2023, 12, 22).unwrap());
    assert_eq!(*dates.last().unwrap(), NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());

    for day in records.chunks(3) {
        let meals: Vec<&MealType> = day.iter().map(|r| r.meal_type()).collect();
        assert_eq!(meals, vec![&MealType::Breakfast, &MealType::Lunch, &MealType::Dinner]);
    }
}

#[test]
fn test_history_empty_and_negative() {
    let mut rng = StdRng::seed_from_u64(12);
    assert!(generate_history(0, today(), &mut rng).unwrap().is_empty());
    assert!(generate_history(-1, today(), &mut rng).is_err());
}

#[test]
fn test_history_regenerates_fresh_data() {
    let mut rng = StdRng::seed_from_u64(13);
    let first = generate_history(5, today(), &mut rng).unwrap();
    let second = generate_history(5, today(), &mut rng).unwrap();
    assert_eq!(first.len(), second.len());
    assert_ne!(first, second);
}

#[test]
fn test_history_feeds_trends() {
    let mut rng = StdRng::seed_from_u64(14);
    let records = generate_history(7, today(), &mut rng).unwrap();

    let daily = daily_totals(&records);
    assert_eq!(daily.len(), 7);
    assert!(daily.iter().all(|d| d.waste_kg > 0.0));

    let averages = meal_averages(&records);
    assert!(averages.iter().all(|a| a.samples == 7 && a.average_kg > 0.0));
}

#[test]
fn test_history_event_and_item_rates() {
    let mut rng = StdRng::seed_from_u64(15);
    let records = generate_history(400, today(), &mut rng).unwrap();
    assert_eq!(records.len(), 1200);

    let events = records.iter().filter(|r| r.meal.event_flag).count();
    let event_rate = events as f64 / records.len() as f64;
    assert!((0.06..=0.14).contains(&event_rate), "event rate {}", event_rate);

    let items: usize = records.iter().map(|r| r.meal.common_food_items.len()).sum();
    let item_rate = items as f64 / (records.len() * MENU_ITEMS.len()) as f64;
    assert!((0.65..=0.75).contains(&item_rate), "item rate {}", item_rate);
}
