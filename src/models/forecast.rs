use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed waste categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodCategory {
    #[serde(rename = "Grains & Bread")]
    GrainsAndBread,
    #[serde(rename = "Vegetables")]
    Vegetables,
    #[serde(rename = "Fruits")]
    Fruits,
    #[serde(rename = "Meat & Protein")]
    MeatAndProtein,
    #[serde(rename = "Dairy")]
    Dairy,
    #[serde(rename = "Desserts")]
    Desserts,
    #[serde(rename = "Beverages")]
    Beverages,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 7] = [
        FoodCategory::GrainsAndBread,
        FoodCategory::Vegetables,
        FoodCategory::Fruits,
        FoodCategory::MeatAndProtein,
        FoodCategory::Dairy,
        FoodCategory::Desserts,
        FoodCategory::Beverages,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FoodCategory::GrainsAndBread => "Grains & Bread",
            FoodCategory::Vegetables => "Vegetables",
            FoodCategory::Fruits => "Fruits",
            FoodCategory::MeatAndProtein => "Meat & Protein",
            FoodCategory::Dairy => "Dairy",
            FoodCategory::Desserts => "Desserts",
            FoodCategory::Beverages => "Beverages",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Waste attributed to one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWaste {
    pub category: FoodCategory,

    /// Kilograms, one decimal place.
    pub amount_kg: f64,

    /// Integer percentage of the total (0-100).
    pub percentage: u32,
}

/// How good a pickup window is for donation collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suitability {
    High,
    Medium,
    Low,
}

impl fmt::Display for Suitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Suitability::High => "high",
            Suitability::Medium => "medium",
            Suitability::Low => "low",
        };
        f.pad(s)
    }
}

/// A suggested donation pickup time range (`HH:MM`, 24h clock).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupWindow {
    pub start_time: String,
    pub end_time: String,
    pub suitability: Suitability,
}

impl fmt::Display for PickupWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_time, self.end_time)
    }
}

/// Output of the forecast engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteForecast {
    /// Kilograms, one decimal place, never negative.
    pub total_waste_kg: f64,

    /// One entry per [`FoodCategory`], in `FoodCategory::ALL` order.
    pub waste_by_type: Vec<CategoryWaste>,

    pub suggested_pickup_windows: Vec<PickupWindow>,

    /// Display placeholder in [0.85, 0.95]. Not a statistical confidence.
    pub accuracy_score: f64,
}

impl WasteForecast {
    /// Sum of the integer category percentages (98..=102 after normalization).
    pub fn percentage_sum(&self) -> u32 {
        self.waste_by_type.iter().map(|c| c.percentage).sum()
    }

    /// Sum of the per-category amounts.
    pub fn category_total_kg(&self) -> f64 {
        self.waste_by_type.iter().map(|c| c.amount_kg).sum()
    }

    pub fn primary_window(&self) -> Option<&PickupWindow> {
        self.suggested_pickup_windows.first()
    }
}
