use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{FoodCategory, MealType, Suitability};

/// Average waste per service before any factor is applied, in kg.
pub const BASE_WASTE_KG: f64 = 20.0;

/// Day-of-week multipliers, Sunday through Saturday.
pub const DAY_FACTORS: [f64; 7] = [1.2, 0.8, 0.9, 1.0, 1.1, 1.3, 1.4];

/// Meal multipliers in `MealType::slot` order (Breakfast, Lunch, Dinner).
pub const MEAL_FACTORS: [f64; 3] = [0.7, 1.1, 1.2];

/// Meal multiplier for anything outside the three known services.
pub const UNKNOWN_MEAL_FACTOR: f64 = 1.0;

/// Attendance is scaled as `sqrt(students) / STUDENT_SCALE_DIVISOR`.
pub const STUDENT_SCALE_DIVISOR: f64 = 15.0;

/// Multiplier applied to special events.
pub const EVENT_FACTOR: f64 = 1.3;

/// Half-width of the uniform noise added to each category share.
pub const CATEGORY_NOISE: f64 = 0.05;

/// Lower bound of a category share after noise.
pub const MIN_CATEGORY_SHARE: f64 = 0.01;

/// Accuracy placeholder is `ACCURACY_FLOOR + uniform(0, ACCURACY_SPAN)`.
pub const ACCURACY_FLOOR: f64 = 0.85;
pub const ACCURACY_SPAN: f64 = 0.10;

/// Base category shares per meal column (Breakfast, Lunch, Dinner).
///
/// Unknown meals use the Lunch column, which holds the "any other meal"
/// value for every category.
pub const CATEGORY_SHARES: [(FoodCategory, [f64; 3]); 7] = [
    (FoodCategory::GrainsAndBread, [0.25, 0.20, 0.20]),
    (FoodCategory::Vegetables, [0.15, 0.15, 0.22]),
    (FoodCategory::Fruits, [0.18, 0.10, 0.10]),
    (FoodCategory::MeatAndProtein, [0.15, 0.15, 0.25]),
    (FoodCategory::Dairy, [0.20, 0.10, 0.10]),
    (FoodCategory::Desserts, [0.08, 0.08, 0.15]),
    (FoodCategory::Beverages, [0.05, 0.05, 0.05]),
];

/// Column used for meals with no slot of their own.
pub const DEFAULT_SHARE_COLUMN: usize = 1;

/// A pickup window as static data: (start, end, suitability).
pub type WindowSlot = (&'static str, &'static str, Suitability);

/// Pickup windows per meal column (Breakfast, Lunch, Dinner).
pub const PICKUP_WINDOWS: [[WindowSlot; 2]; 3] = [
    [
        ("10:30", "11:30", Suitability::High),
        ("11:30", "12:30", Suitability::Medium),
    ],
    [
        ("14:30", "15:30", Suitability::High),
        ("15:30", "16:30", Suitability::Medium),
    ],
    [
        ("21:00", "22:00", Suitability::High),
        ("08:00", "09:00", Suitability::Medium),
    ],
];

/// Weekday names, Sunday first.
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Map from weekday name to Sunday-based index.
pub static DAY_INDICES: LazyLock<HashMap<&'static str, u8>> = LazyLock::new(|| {
    DAY_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, i as u8))
        .collect()
});

/// Meal multiplier, neutral for unknown meals.
pub fn meal_factor(meal: &MealType) -> f64 {
    meal.slot().map_or(UNKNOWN_MEAL_FACTOR, |slot| MEAL_FACTORS[slot])
}

/// Event multiplier.
pub fn event_factor(event_flag: bool) -> f64 {
    if event_flag { EVENT_FACTOR } else { 1.0 }
}

/// Sub-linear attendance multiplier; zero students gives zero.
pub fn scale_factor(students_served: u32) -> f64 {
    (students_served as f64).sqrt() / STUDENT_SCALE_DIVISOR
}

/// Base share of a category for a meal, before noise.
pub fn base_share(category: FoodCategory, meal: &MealType) -> f64 {
    let column = meal.slot().unwrap_or(DEFAULT_SHARE_COLUMN);
    CATEGORY_SHARES
        .iter()
        .find(|(c, _)| *c == category)
        .map_or(0.0, |(_, shares)| shares[column])
}

/// Weekday name for a Sunday-based index, `None` outside 0..=6.
pub fn day_name(index: i64) -> Option<&'static str> {
    usize::try_from(index).ok().and_then(|i| DAY_NAMES.get(i).copied())
}

/// Sunday-based index for a weekday name (exact match).
pub fn day_index(name: &str) -> Option<u8> {
    DAY_INDICES.get(name).copied()
}
