//! Events: vocabulary, payloads and the bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events exchanged between screens and widgets.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and typed context
//! - [`payload`] context structs and domain records (food, meal, goal, category)
//! - [`Bus`] synchronous publish/subscribe registry
//!
//! ## Quick reference
//! - **Publishers**: meal, goal, grocery and date screens.
//! - **Consumers**: statistics widgets, the calorie sphere, list items,
//!   [`NotificationCenter`](crate::NotificationCenter), [`Relay`](crate::Relay)s.

mod bus;
mod event;
pub mod payload;

pub use bus::{Bus, Delivery};
pub use event::{Event, EventKind};
pub use payload::{
    Category, CategorySelected, Food, FoodAmountChanged, FoodChanged, FoodRemoved, Goal, GoalSet,
    GrocerySelected, ListDataChanged, Macros, Meal, MealPrepSelected, MealTimeChanged,
    Notification, Unit,
};
