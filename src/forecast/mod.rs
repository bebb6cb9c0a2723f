pub mod constants;
pub mod engine;
pub mod history;
pub mod trends;

pub use constants::{day_index, day_name};
pub use engine::{FactorBreakdown, forecast, pickup_windows, predict_total, round_to};
pub use history::{HistoryConfig, MENU_ITEMS, generate_history, generate_history_with};
pub use trends::{DailyTotal, MealAverage, daily_totals, filter_by_meal, meal_averages};
