//! # Events exchanged between screens and widgets.
//!
//! The [`EventKind`] enum is the closed vocabulary of event names, used as the
//! subscription key. The [`Event`] enum carries the typed context for each kind:
//! - **Meal construction**: grocery/food selection, amounts, removal, meal time
//! - **Catalog changes**: foods created, updated or deleted; category selection
//! - **Application signals**: meal added, goal set, notifications, list refreshes
//!
//! ## Wire form
//! Events serialize as `{"name": "<eventName>", "context": {...}}`, the names
//! being the camelCase strings returned by [`EventKind::as_str`].
//!
//! ## Example
//! ```rust
//! use mealbus::{Event, EventKind};
//!
//! let ev = Event::from_json(r#"{"name":"goalSet","context":{"goal":{"calories":2200}}}"#).unwrap();
//! assert_eq!(ev.kind(), EventKind::GoalSet);
//! assert_eq!(Event::goal_set(2200.0), ev);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BusError, BusResult};

use super::payload::{
    CategorySelected, Food, FoodAmountChanged, FoodChanged, FoodRemoved, Goal, GoalSet,
    GrocerySelected, ListDataChanged, MealPrepSelected, MealTimeChanged, Notification,
};

/// Classification of events; one per name of the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    // === Meal construction ===
    /// A grocery was picked from the catalog or recommendations.
    GrocerySelected,
    /// The amount of a food in the meal being built changed.
    FoodAmountInMealChanged,
    /// A food was removed from the meal being built.
    FoodInMealRemoved,
    /// A meal prep was picked as the base of a new meal.
    MealPrepSelected,
    /// The date/time of the meal being built changed.
    NewMealTimeChanged,

    // === Catalog ===
    /// A grocery category was picked.
    CategorySelected,
    /// A food was added to the catalog.
    NewFoodCreated,
    /// A catalog food was modified.
    FoodUpdated,
    /// A catalog food was deleted.
    FoodDeleted,

    // === Application ===
    /// A meal was saved.
    MealAdded,
    /// A new calorie goal was set.
    GoalSet,
    /// A user-visible notification was requested.
    Notification,
    /// An element shown in a list changed and should be re-rendered.
    ListDataChanged,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 13] = [
        EventKind::GrocerySelected,
        EventKind::FoodAmountInMealChanged,
        EventKind::FoodInMealRemoved,
        EventKind::MealPrepSelected,
        EventKind::NewMealTimeChanged,
        EventKind::CategorySelected,
        EventKind::NewFoodCreated,
        EventKind::FoodUpdated,
        EventKind::FoodDeleted,
        EventKind::MealAdded,
        EventKind::GoalSet,
        EventKind::Notification,
        EventKind::ListDataChanged,
    ];

    /// Wire name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::GrocerySelected => "grocerySelected",
            EventKind::FoodAmountInMealChanged => "foodAmountInMealChanged",
            EventKind::FoodInMealRemoved => "foodInMealRemoved",
            EventKind::MealPrepSelected => "mealPrepSelected",
            EventKind::NewMealTimeChanged => "newMealTimeChanged",
            EventKind::CategorySelected => "categorySelected",
            EventKind::NewFoodCreated => "newFoodCreated",
            EventKind::FoodUpdated => "foodUpdated",
            EventKind::FoodDeleted => "foodDeleted",
            EventKind::MealAdded => "mealAdded",
            EventKind::GoalSet => "goalSet",
            EventKind::Notification => "notification",
            EventKind::ListDataChanged => "totoListDataChanged",
        }
    }

    /// False for kinds whose events carry no context (`mealAdded`).
    pub const fn has_context(self) -> bool {
        !matches!(self, EventKind::MealAdded)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = BusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| BusError::UnknownEvent { name: s.to_string() })
    }
}

/// An event with its typed context.
///
/// Variant names match [`EventKind`]; the serde tag is the wire name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "context")]
pub enum Event {
    #[serde(rename = "grocerySelected")]
    GrocerySelected(GrocerySelected),
    #[serde(rename = "foodAmountInMealChanged")]
    FoodAmountInMealChanged(FoodAmountChanged),
    #[serde(rename = "foodInMealRemoved")]
    FoodInMealRemoved(FoodRemoved),
    #[serde(rename = "mealPrepSelected")]
    MealPrepSelected(MealPrepSelected),
    #[serde(rename = "newMealTimeChanged")]
    NewMealTimeChanged(MealTimeChanged),
    #[serde(rename = "categorySelected")]
    CategorySelected(CategorySelected),
    #[serde(rename = "newFoodCreated")]
    NewFoodCreated(FoodChanged),
    #[serde(rename = "foodUpdated")]
    FoodUpdated(FoodChanged),
    #[serde(rename = "foodDeleted")]
    FoodDeleted(FoodChanged),
    #[serde(rename = "mealAdded")]
    MealAdded,
    #[serde(rename = "goalSet")]
    GoalSet(GoalSet),
    #[serde(rename = "notification")]
    Notification(Notification),
    #[serde(rename = "totoListDataChanged")]
    ListDataChanged(ListDataChanged),
}

impl Event {
    /// Returns the kind (name) of the event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::GrocerySelected(_) => EventKind::GrocerySelected,
            Event::FoodAmountInMealChanged(_) => EventKind::FoodAmountInMealChanged,
            Event::FoodInMealRemoved(_) => EventKind::FoodInMealRemoved,
            Event::MealPrepSelected(_) => EventKind::MealPrepSelected,
            Event::NewMealTimeChanged(_) => EventKind::NewMealTimeChanged,
            Event::CategorySelected(_) => EventKind::CategorySelected,
            Event::NewFoodCreated(_) => EventKind::NewFoodCreated,
            Event::FoodUpdated(_) => EventKind::FoodUpdated,
            Event::FoodDeleted(_) => EventKind::FoodDeleted,
            Event::MealAdded => EventKind::MealAdded,
            Event::GoalSet(_) => EventKind::GoalSet,
            Event::Notification(_) => EventKind::Notification,
            Event::ListDataChanged(_) => EventKind::ListDataChanged,
        }
    }

    /// Wire name of the event.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Decodes an event from its wire form.
    ///
    /// Unknown names fail with [`BusError::UnknownEvent`]; anything else that
    /// does not fit the vocabulary fails with [`BusError::Decode`].
    pub fn from_json(raw: &str) -> BusResult<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Decodes an event from an already-parsed JSON value.
    ///
    /// Context sent along with a kind that has none is ignored.
    pub fn from_value(mut value: Value) -> BusResult<Self> {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| BusError::Decode {
                reason: "missing string field `name`".to_string(),
            })?;
        let kind = name.parse::<EventKind>()?;
        if !kind.has_context() {
            if let Some(obj) = value.as_object_mut() {
                obj.remove("context");
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Encodes the event in its wire form.
    pub fn to_json(&self) -> BusResult<String> {
        serde_json::to_string(self).map_err(|err| BusError::Encode {
            reason: err.to_string(),
        })
    }

    /// Creates a `notification` event.
    #[inline]
    pub fn notification(text: impl Into<String>) -> Self {
        Event::Notification(Notification { text: text.into() })
    }

    /// Creates a `goalSet` event for a calorie goal.
    #[inline]
    pub fn goal_set(calories: f64) -> Self {
        Event::GoalSet(GoalSet {
            goal: Goal {
                calories: Some(calories),
                ..Goal::default()
            },
        })
    }

    /// Creates a `grocerySelected` event.
    #[inline]
    pub fn grocery_selected(grocery: Food, is_recommendation: bool) -> Self {
        Event::GrocerySelected(GrocerySelected {
            grocery,
            is_recommendation,
        })
    }

    /// True for `notification` events.
    #[inline]
    pub fn is_notification(&self) -> bool {
        matches!(self, Event::Notification(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names_round_trip_through_from_str() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "mealAded".parse::<EventKind>().unwrap_err();
        assert_eq!(
            err,
            BusError::UnknownEvent {
                name: "mealAded".into()
            }
        );

        let err = Event::from_json(r#"{"name":"weightLogged","context":{}}"#).unwrap_err();
        assert_eq!(err.as_label(), "bus_unknown_event");
    }

    #[test]
    fn test_meal_added_has_no_context() {
        let ev = Event::from_json(r#"{"name":"mealAdded"}"#).unwrap();
        assert_eq!(ev, Event::MealAdded);
        assert_eq!(ev.to_json().unwrap(), r#"{"name":"mealAdded"}"#);
    }

    #[test]
    fn test_meal_added_ignores_sent_context() {
        let ev = Event::from_json(r#"{"name":"mealAdded","context":{}}"#).unwrap();
        assert_eq!(ev, Event::MealAdded);

        let ev = Event::from_json(r#"{"name":"mealAdded","context":{"meal":{"id":"m1"}}}"#).unwrap();
        assert_eq!(ev, Event::MealAdded);
        assert!(!EventKind::MealAdded.has_context());
        assert!(EventKind::GoalSet.has_context());
    }

    #[test]
    fn test_goal_screen_payload() {
        let ev = Event::from_json(
            r#"{"name":"goalSet","context":{"goal":{"id":"g1","set":"20240102","calories":"2200"}}}"#,
        )
        .unwrap();
        match ev {
            Event::GoalSet(ctx) => {
                assert_eq!(ctx.goal.id.as_deref(), Some("g1"));
                assert_eq!(ctx.goal.calories, Some(2200.0));
                assert_eq!(ctx.goal.extra.get("set"), Some(&json!("20240102")));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_food_detail_amount_payload() {
        let ev = Event::from_json(
            r#"{"name":"foodAmountInMealChanged","context":{"food":{"id":"oats","name":"Oats","calories":380},"amount":"2","unit":"gr"}}"#,
        )
        .unwrap();
        match ev {
            Event::FoodAmountInMealChanged(ctx) => {
                assert_eq!(ctx.amount, 2.0);
                assert_eq!(ctx.unit, Some(crate::events::Unit::Grams));
                assert_eq!(ctx.food.id, "oats");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_food_detail_removal_payload() {
        let ev = Event::from_json(
            r#"{"name":"foodInMealRemoved","context":{"food":{"id":"oats"},"amount":"80","unit":"gr"}}"#,
        )
        .unwrap();
        match ev {
            Event::FoodInMealRemoved(ctx) => {
                assert_eq!(ctx.food.id, "oats");
                assert_eq!(ctx.extra.get("amount"), Some(&json!("80")));
                assert_eq!(ctx.extra.get("unit"), Some(&json!("gr")));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_goal_set_from_wire() {
        let ev =
            Event::from_json(r#"{"name":"goalSet","context":{"goal":{"calories":2200}}}"#).unwrap();
        match ev {
            Event::GoalSet(ctx) => assert_eq!(ctx.goal.calories, Some(2200.0)),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_list_data_changed_keeps_legacy_wire_name() {
        let ev = Event::ListDataChanged(ListDataChanged {
            item: json!({ "id": "f1", "amountGr": 30 }),
        });
        assert_eq!(ev.name(), "totoListDataChanged");
        let v: Value = serde_json::from_str(&ev.to_json().unwrap()).unwrap();
        assert_eq!(v["name"], json!("totoListDataChanged"));
        assert_eq!(v["context"]["item"]["amountGr"], json!(30));
    }

    #[test]
    fn test_wrong_context_shape_is_decode_error() {
        let err = Event::from_json(r#"{"name":"notification","context":{"txt":"hi"}}"#)
            .unwrap_err();
        assert_eq!(err.as_label(), "bus_decode");

        let err = Event::from_json(r#"{"context":{}}"#).unwrap_err();
        assert_eq!(err.as_label(), "bus_decode");
    }

    #[test]
    fn test_grocery_selected_recommendation_flag() {
        let ev = Event::from_json(
            r#"{"name":"grocerySelected","context":{"grocery":{"id":"kiwi"},"isRecommendation":true}}"#,
        )
        .unwrap();
        assert_eq!(
            ev,
            Event::grocery_selected(
                Food {
                    id: "kiwi".into(),
                    ..Food::default()
                },
                true
            )
        );

        let plain = Event::from_json(r#"{"name":"grocerySelected","context":{"grocery":{"id":"kiwi"}}}"#)
            .unwrap();
        assert!(matches!(plain, Event::GrocerySelected(ref c) if !c.is_recommendation));
    }
}
