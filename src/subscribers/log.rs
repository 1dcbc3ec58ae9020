//! # Logging subscriber for debugging and demos.
//!
//! [`LogWriter`] writes every event it receives through `tracing` at `info`
//! level, in a compact human-readable format.
//!
//! ## Output format
//! ```text
//! [meal-added]
//! [grocery-selected] id=kiwi recommendation=true
//! [amount-changed] food=egg amount=2 unit=None
//! [goal-set] calories=Some(2200.0)
//! [notification] text="You added Kiwi!"
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use mealbus::{Bus, EventKind, LogWriter, SubscriberRef};
//!
//! let bus = Bus::new();
//! let log: SubscriberRef = Arc::new(LogWriter);
//! for kind in EventKind::ALL {
//!     bus.subscribe(kind, Arc::clone(&log));
//! }
//! ```

use tracing::info;

use crate::events::Event;
use crate::subscribers::Subscribe;

/// Tracing-backed logging subscriber.
///
/// Enabled via the `logging` feature.
pub struct LogWriter;

impl LogWriter {
    /// Renders the one-line description of an event.
    pub fn describe(e: &Event) -> String {
        match e {
            Event::MealAdded => "[meal-added]".to_string(),
            Event::GrocerySelected(c) => format!(
                "[grocery-selected] id={} recommendation={}",
                c.grocery.id, c.is_recommendation
            ),
            Event::FoodAmountInMealChanged(c) => format!(
                "[amount-changed] food={} amount={} unit={:?}",
                c.food.id, c.amount, c.unit
            ),
            Event::FoodInMealRemoved(c) => format!("[food-removed] food={}", c.food.id),
            Event::MealPrepSelected(c) => {
                format!("[meal-prep-selected] meal={:?} foods={}", c.meal.id, c.meal.foods.len())
            }
            Event::NewMealTimeChanged(c) => format!("[meal-time-changed] date={}", c.date),
            Event::CategorySelected(c) => format!("[category-selected] id={}", c.category.id),
            Event::NewFoodCreated(c) => format!("[food-created] id={}", c.food.id),
            Event::FoodUpdated(c) => format!("[food-updated] id={}", c.food.id),
            Event::FoodDeleted(c) => format!("[food-deleted] id={}", c.food.id),
            Event::GoalSet(c) => format!("[goal-set] calories={:?}", c.goal.calories),
            Event::Notification(c) => format!("[notification] text={:?}", c.text),
            Event::ListDataChanged(c) => format!("[list-data-changed] item={}", c.item),
        }
    }
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        info!(event = e.name(), "{}", Self::describe(e));
    }

    fn name(&self) -> &str {
        "log-writer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Food;

    #[test]
    fn test_describe() {
        assert_eq!(LogWriter::describe(&Event::MealAdded), "[meal-added]");
        assert_eq!(
            LogWriter::describe(&Event::notification("You added Kiwi!")),
            r#"[notification] text="You added Kiwi!""#
        );
        let kiwi = Food {
            id: "kiwi".into(),
            ..Food::default()
        };
        assert_eq!(
            LogWriter::describe(&Event::grocery_selected(kiwi, true)),
            "[grocery-selected] id=kiwi recommendation=true"
        );
        assert_eq!(
            LogWriter::describe(&Event::goal_set(2200.0)),
            "[goal-set] calories=Some(2200.0)"
        );
    }
}
