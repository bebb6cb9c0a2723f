pub mod forecast;
pub mod meal;
pub mod record;

pub use forecast::{CategoryWaste, FoodCategory, PickupWindow, Suitability, WasteForecast};
pub use meal::{MealDescriptor, MealType};
pub use record::{HistoricalRecord, PredictionSummary};
