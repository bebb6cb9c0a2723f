use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{Result, WasteError};
use crate::models::meal::parse_date;
use crate::models::{MealDescriptor, MealType};

/// Similarity above which a typo is offered as a known meal.
const MEAL_MATCH_THRESHOLD: f64 = 0.8;

/// Closest known meal for free-form input, if one is close enough.
///
/// Exact case-insensitive matches win outright.
pub fn suggest_meal_type(input: &str) -> Option<MealType> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    MealType::KNOWN
        .into_iter()
        .map(|meal| {
            let score = jaro_winkler(&meal.as_str().to_lowercase(), &needle);
            (meal, score)
        })
        .filter(|(_, score)| *score > MEAL_MATCH_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(meal, _)| meal)
}

/// Resolve a meal name typed on the command line.
///
/// Known names pass through. Near misses are offered for confirmation when
/// `interactive`; otherwise the name is kept as an open meal type and never
/// swapped for a known one.
pub fn resolve_meal_type(input: &str, interactive: bool) -> Result<MealType> {
    let meal = MealType::from(input.trim());
    if meal.is_known() || !interactive {
        return Ok(meal);
    }

    if let Some(suggestion) = suggest_meal_type(input) {
        let confirm = prompt_yes_no(&format!("Did you mean '{}'?", suggestion), true)?;
        if confirm {
            return Ok(suggestion);
        }
    }

    Ok(meal)
}

/// Add the closest known meal to an unsupported-meal error.
///
/// Other errors pass through unchanged.
pub fn with_meal_hint(err: WasteError) -> WasteError {
    match err {
        WasteError::UnsupportedMealType(name) => match suggest_meal_type(&name) {
            Some(suggestion) => WasteError::UnsupportedMealType(format!(
                "{} (did you mean '{}'?)",
                name, suggestion
            )),
            None => WasteError::UnsupportedMealType(name),
        },
        other => other,
    }
}

/// Prompt for the service date, defaulting to `today`.
pub fn prompt_date(today: NaiveDate) -> Result<NaiveDate> {
    let input: String = Input::new()
        .with_prompt("Meal date (YYYY-MM-DD)")
        .default(today.format("%Y-%m-%d").to_string())
        .interact_text()?;

    parse_date(&input)
}

/// Prompt for the meal service.
pub fn prompt_meal_type() -> Result<MealType> {
    let known = MealType::KNOWN;
    let options: Vec<&str> = known.iter().map(|m| m.as_str()).collect();

    let selection = Select::new()
        .with_prompt("Which meal?")
        .items(&options)
        .default(1)
        .interact()?;

    Ok(known.into_iter().nth(selection).unwrap_or(MealType::Lunch))
}

/// Prompt for expected attendance.
pub fn prompt_students_served() -> Result<i64> {
    let input: String = Input::new()
        .with_prompt("How many students will be served?")
        .default("250".to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| WasteError::InvalidInput(format!("Invalid number: {}", input)))
}

/// Prompt for the special-event flag.
pub fn prompt_event() -> Result<bool> {
    prompt_yes_no("Is this a special event?", false)
}

/// Prompt for a comma-separated list of dishes.
pub fn prompt_food_items() -> Result<Vec<String>> {
    let input: String = Input::new()
        .with_prompt("Main dishes (comma-separated, Enter to skip)")
        .allow_empty(true)
        .interact_text()?;

    Ok(split_items(&input))
}

/// Split a comma-separated item list, dropping blanks.
pub fn split_items(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect a full meal descriptor interactively.
pub fn collect_meal_descriptor(today: NaiveDate) -> Result<MealDescriptor> {
    let date = prompt_date(today)?;
    let meal_type = prompt_meal_type()?;
    let students = prompt_students_served()?;
    let event = prompt_event()?;
    let items = prompt_food_items()?;

    MealDescriptor::new(date, meal_type, students, event, items)
}
