use crate::forecast::{DailyTotal, MealAverage, day_name};
use crate::models::{HistoricalRecord, MealDescriptor, WasteForecast};

/// Display a forecast as a category table with pickup windows.
pub fn display_forecast(meal: &MealDescriptor, forecast: &WasteForecast) {
    println!();
    println!(
        "=== Waste Forecast: {} {} ({}) ===",
        day_name(meal.day_of_week as i64).unwrap_or_default(),
        meal.meal_type,
        meal.date
    );
    println!();

    let event = if meal.event_flag { "  [Event]" } else { "" };
    println!("Students served: {}{}", meal.students_served, event);
    if !meal.common_food_items.is_empty() {
        println!("Menu: {}", meal.common_food_items.join(", "));
    }
    println!();

    let width = forecast
        .waste_by_type
        .iter()
        .map(|c| c.category.name().len())
        .max()
        .unwrap_or(10);

    for item in &forecast.waste_by_type {
        println!(
            "  {:<width$}  {:>6.1} kg  {:>3}%",
            item.category.name(),
            item.amount_kg,
            item.percentage,
            width = width
        );
    }

    println!();
    println!("--- Pickup Windows ---");
    for window in &forecast.suggested_pickup_windows {
        println!("  {}  ({})", window, window.suitability);
    }

    println!();
    println!("Total waste: {:.1} kg", forecast.total_waste_kg);
    println!("Accuracy: {:.0}%", forecast.accuracy_score * 100.0);
    println!();
}

/// Display records newest first, up to `limit` rows.
pub fn display_history(records: &[&HistoricalRecord], limit: usize) {
    if records.is_empty() {
        println!("No history records.");
        return;
    }

    println!();
    println!("=== Recent Records ({} of {}) ===", limit.min(records.len()), records.len());
    println!();

    let mut newest_first: Vec<&HistoricalRecord> = records.to_vec();
    newest_first.sort_by(|a, b| b.date().cmp(&a.date()));

    for record in newest_first.into_iter().take(limit) {
        let event = if record.meal.event_flag { " [Event]" } else { "" };
        println!(
            "  {}  {:<9}  {:<9}  {:>3} students{:<8}  {:>6.1} kg",
            record.date(),
            day_name(record.meal.day_of_week as i64).unwrap_or_default(),
            record.meal.meal_type,
            record.meal.students_served,
            event,
            record.total_waste_kg
        );
    }
    println!();
}

/// Display daily totals and per-meal averages.
pub fn display_trends(daily: &[DailyTotal], averages: &[MealAverage]) {
    if !daily.is_empty() {
        println!("--- Daily Waste ---");
        for day in daily {
            println!("  {}  {:<9}  {:>6.1} kg", day.date, day.day, day.waste_kg);
        }
        println!();
    }

    println!("--- Meal Comparison ---");
    for avg in averages {
        println!(
            "  {:<9}  avg {:>5.1} kg  ({} records)",
            avg.meal_type, avg.average_kg, avg.samples
        );
    }
    println!();
}
