pub mod prompts;
pub mod render;

pub use prompts::{
    collect_meal_descriptor, prompt_yes_no, resolve_meal_type, split_items, suggest_meal_type,
    with_meal_hint,
};
pub use render::{display_forecast, display_history, display_trends};
