use rand::Rng;
use tracing::debug;

use crate::error::{Result, WasteError};
use crate::forecast::constants::*;
use crate::models::{
    CategoryWaste, FoodCategory, MealDescriptor, MealType, PickupWindow, WasteForecast,
};

/// Largest distance the percentage column may sit from 100 after rescaling.
pub const MAX_PERCENT_DRIFT: u32 = 2;

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// The multiplicative factors behind a total, for display and logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorBreakdown {
    pub day: f64,
    pub meal: f64,
    pub scale: f64,
    pub event: f64,
}

impl FactorBreakdown {
    pub fn for_meal(meal: &MealDescriptor) -> Result<Self> {
        let day = DAY_FACTORS
            .get(meal.day_of_week as usize)
            .copied()
            .ok_or_else(|| {
                WasteError::InvalidInput(format!(
                    "day of week must be 0-6, got {}",
                    meal.day_of_week
                ))
            })?;

        Ok(Self {
            day,
            meal: meal_factor(&meal.meal_type),
            scale: scale_factor(meal.students_served),
            event: event_factor(meal.event_flag),
        })
    }

    pub fn product(&self) -> f64 {
        self.day * self.meal * self.scale * self.event
    }

    /// Total waste in kg for these factors, one decimal.
    pub fn total_kg(&self) -> f64 {
        round_to(BASE_WASTE_KG * self.product(), 1)
    }
}

/// Predicted total waste in kg (one decimal), without any noise.
///
/// Formula: BASE * day * meal * sqrt(students) / 15 * event
pub fn predict_total(meal: &MealDescriptor) -> Result<f64> {
    Ok(FactorBreakdown::for_meal(meal)?.total_kg())
}

/// Draw a noisy share for every category.
///
/// Each share is the table value plus uniform noise in ±CATEGORY_NOISE,
/// floored at MIN_CATEGORY_SHARE so no category drops out.
pub fn category_shares<R: Rng>(meal_type: &MealType, rng: &mut R) -> Vec<(FoodCategory, f64)> {
    FoodCategory::ALL
        .iter()
        .map(|&category| {
            let noise = rng.gen_range(-CATEGORY_NOISE..=CATEGORY_NOISE);
            let share = (base_share(category, meal_type) + noise).max(MIN_CATEGORY_SHARE);
            (category, share)
        })
        .collect()
}

/// Split `total_kg` across weights in 0.1 kg units (largest remainder).
///
/// The returned amounts always add back up to `total_kg` rounded to one
/// decimal.
pub fn apportion_tenths(total_kg: f64, weights: &[f64]) -> Vec<f64> {
    let units = (total_kg * 10.0).round().max(0.0) as u64;
    let weight_sum: f64 = weights.iter().sum();
    if units == 0 || weight_sum <= 0.0 {
        return vec![0.0; weights.len()];
    }

    let quotas: Vec<f64> = weights
        .iter()
        .map(|w| units as f64 * w / weight_sum)
        .collect();
    let mut allotted: Vec<u64> = quotas.iter().map(|q| q.floor() as u64).collect();

    let given: u64 = allotted.iter().sum();
    let mut leftover = units.saturating_sub(given);

    let mut by_remainder: Vec<usize> = (0..quotas.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        let ra = quotas[a] - quotas[a].floor();
        let rb = quotas[b] - quotas[b].floor();
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });

    for idx in by_remainder {
        if leftover == 0 {
            break;
        }
        allotted[idx] += 1;
        leftover -= 1;
    }

    allotted.into_iter().map(|u| u as f64 / 10.0).collect()
}

/// Rescale integer percentages toward a sum of 100.
///
/// Each value becomes `round(p / sum * 100)`, which leaves a small drift.
/// Drift beyond MAX_PERCENT_DRIFT is taken off (or given to) the largest
/// entry.
pub fn normalize_percentages(raw: &[u32]) -> Vec<u32> {
    let raw_sum: u32 = raw.iter().sum();
    if raw_sum == 0 {
        return vec![0; raw.len()];
    }

    let mut scaled: Vec<u32> = raw
        .iter()
        .map(|&p| ((p as f64 / raw_sum as f64) * 100.0).round() as u32)
        .collect();

    let sum: u32 = scaled.iter().sum();
    let largest = scaled
        .iter()
        .enumerate()
        .max_by_key(|(_, p)| **p)
        .map(|(i, _)| i);

    if let Some(i) = largest {
        if sum > 100 + MAX_PERCENT_DRIFT {
            scaled[i] = scaled[i].saturating_sub(sum - 100 - MAX_PERCENT_DRIFT);
        } else if sum < 100 - MAX_PERCENT_DRIFT {
            scaled[i] += 100 - MAX_PERCENT_DRIFT - sum;
        }
    }

    scaled
}

/// Turn noisy shares into the per-category breakdown of `total_kg`.
pub fn breakdown(total_kg: f64, shares: &[(FoodCategory, f64)]) -> Vec<CategoryWaste> {
    let weights: Vec<f64> = shares.iter().map(|(_, s)| *s).collect();
    let amounts = apportion_tenths(total_kg, &weights);

    let raw_percentages: Vec<u32> = weights
        .iter()
        .map(|s| (s * 100.0).round() as u32)
        .collect();
    let percentages = normalize_percentages(&raw_percentages);

    shares
        .iter()
        .zip(amounts)
        .zip(percentages)
        .map(|(((category, _), amount_kg), percentage)| CategoryWaste {
            category: *category,
            amount_kg,
            percentage,
        })
        .collect()
}

/// Pickup windows for a meal.
///
/// Only the three known services have windows; anything else is rejected.
pub fn pickup_windows(meal_type: &MealType) -> Result<Vec<PickupWindow>> {
    let slot = meal_type
        .slot()
        .ok_or_else(|| WasteError::UnsupportedMealType(meal_type.to_string()))?;

    Ok(PICKUP_WINDOWS[slot]
        .iter()
        .map(|(start, end, suitability)| PickupWindow {
            start_time: start.to_string(),
            end_time: end.to_string(),
            suitability: *suitability,
        })
        .collect())
}

/// Placeholder accuracy in [0.85, 0.95], two decimals.
pub fn accuracy_score<R: Rng>(rng: &mut R) -> f64 {
    round_to(ACCURACY_FLOOR + rng.gen_range(0.0..ACCURACY_SPAN), 2)
}

/// Forecast waste for one meal service.
///
/// Consumes randomness for the category breakdown and the accuracy score,
/// so repeated calls differ; the total does not depend on the generator.
pub fn forecast<R: Rng>(meal: &MealDescriptor, rng: &mut R) -> Result<WasteForecast> {
    meal.validate()?;

    let factors = FactorBreakdown::for_meal(meal)?;
    let total_waste_kg = factors.total_kg();

    debug!(
        date = %meal.date,
        meal = %meal.meal_type,
        students = meal.students_served,
        event = meal.event_flag,
        day_factor = factors.day,
        meal_factor = factors.meal,
        scale_factor = factors.scale,
        event_factor = factors.event,
        total_waste_kg,
        "forecast total"
    );

    let shares = category_shares(&meal.meal_type, rng);
    let waste_by_type = breakdown(total_waste_kg, &shares);
    let suggested_pickup_windows = pickup_windows(&meal.meal_type)?;
    let accuracy = accuracy_score(rng);

    Ok(WasteForecast {
        total_waste_kg,
        waste_by_type,
        suggested_pickup_windows,
        accuracy_score: accuracy,
    })
}
