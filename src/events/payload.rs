//! # Context payloads carried by events.
//!
//! Each event variant owns one of these structs. Field names follow the wire
//! (camelCase) so that payloads produced by other components decode as-is.
//! Domain records ([`Food`], [`Meal`], [`Goal`], [`Category`]) belong to the
//! backend; the bus only needs the fields listeners actually read, so every
//! record keeps the rest in a flattened `extra` map.
//!
//! ## Nutrient scaling
//! Amounts measured in grams or millilitres scale per 100 units; amounts
//! without a unit count pieces and scale 1:1.
//! ```rust
//! use mealbus::events::{Food, Unit};
//!
//! let oats = Food { id: "oats".into(), calories: Some(380.0), ..Food::default() };
//! let m = oats.macros_for(50.0, Some(Unit::Grams));
//! assert_eq!(m.calories, 190.0);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Measurement unit of a food amount. An absent unit means "pieces".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "gr")]
    Grams,
    #[serde(rename = "ml")]
    Milliliters,
}

/// Calories and macro-nutrients for some amount of food.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Macros {
    /// Component-wise sum.
    pub fn add(self, other: Macros) -> Macros {
        Macros {
            calories: self.calories + other.calories,
            proteins: self.proteins + other.proteins,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }
}

/// A food (grocery) from the catalog, possibly with an amount within a meal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Per 100 gr/ml, or per piece.
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub calories: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub proteins: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub carbs: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub fat: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub sugars: Option<f64>,
    /// Pieces.
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_gr: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_ml: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Food {
    /// Calories and macros for `amount` of this food measured in `unit`.
    ///
    /// Missing nutrient values count as zero.
    pub fn macros_for(&self, amount: f64, unit: Option<Unit>) -> Macros {
        let factor = match unit {
            Some(_) => amount / 100.0,
            None => amount,
        };
        Macros {
            calories: self.calories.unwrap_or(0.0) * factor,
            proteins: self.proteins.unwrap_or(0.0) * factor,
            carbs: self.carbs.unwrap_or(0.0) * factor,
            fat: self.fat.unwrap_or(0.0) * factor,
        }
    }

    /// Records `amount` in the field matching `unit`.
    pub fn set_amount(&mut self, amount: f64, unit: Option<Unit>) {
        match unit {
            Some(Unit::Grams) => self.amount_gr = Some(amount),
            Some(Unit::Milliliters) => self.amount_ml = Some(amount),
            None => self.amount = Some(amount),
        }
    }
}

/// A logged meal, or a meal prep template.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "mealDate", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, alias = "mealTime", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub foods: Vec<Food>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub calories: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub proteins: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub carbs: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub fat: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A dietary goal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub calories: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A grocery category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---- Per-event contexts ----

/// Context of `grocerySelected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrocerySelected {
    pub grocery: Food,
    /// Selected from the recommendation list rather than the catalog.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_recommendation: bool,
}

/// Context of `foodAmountInMealChanged`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodAmountChanged {
    pub food: Food,
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub amount: f64,
    #[serde(default)]
    pub unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Value>,
}

impl FoodAmountChanged {
    /// Macros of the new amount, using the nutrient values carried by `food`.
    pub fn macros(&self) -> Macros {
        self.food.macros_for(self.amount, self.unit)
    }
}

/// Context of `foodInMealRemoved`: the detail screen's state at removal time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRemoved {
    pub food: Food,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Context of `totoListDataChanged`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListDataChanged {
    /// The changed list element (new value).
    pub item: Value,
}

/// Context of `mealPrepSelected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPrepSelected {
    pub meal: Meal,
}

/// Context of `notification`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
}

/// Context of `goalSet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSet {
    pub goal: Goal,
}

/// Context of `newMealTimeChanged`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealTimeChanged {
    /// Chosen date, ISO-8601 by convention.
    pub date: String,
}

/// Context of `categorySelected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySelected {
    pub category: Category,
}

/// Context of `newFoodCreated`, `foodUpdated` and `foodDeleted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodChanged {
    pub food: Food,
}

/// Numbers as sent by text inputs: JSON numbers or numeric strings.
mod lenient {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    fn parse<E: Error>(raw: NumberOrText) -> Result<Option<f64>, E> {
        match raw {
            NumberOrText::Number(n) => Ok(Some(n)),
            NumberOrText::Text(t) => {
                let t = t.trim();
                if t.is_empty() {
                    return Ok(None);
                }
                t.parse::<f64>()
                    .map(Some)
                    .map_err(|_| E::custom(format!("invalid number: {t:?}")))
            }
        }
    }

    /// `null`, `""` and absent map to `None`.
    pub(super) fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match Option::<NumberOrText>::deserialize(d)? {
            Some(raw) => parse(raw),
            None => Ok(None),
        }
    }

    /// `""` maps to `0`.
    pub(super) fn number_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(parse(NumberOrText::deserialize(d)?)?.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn apple() -> Food {
        Food {
            id: "apple".into(),
            calories: Some(52.0),
            proteins: Some(0.3),
            carbs: Some(14.0),
            fat: Some(0.2),
            ..Food::default()
        }
    }

    #[test]
    fn test_macros_per_hundred_grams() {
        let m = apple().macros_for(200.0, Some(Unit::Grams));
        assert_eq!(m.calories, 104.0);
        assert_eq!(m.carbs, 28.0);
    }

    #[test]
    fn test_macros_per_piece_without_unit() {
        let egg = Food {
            id: "egg".into(),
            calories: Some(70.0),
            ..Food::default()
        };
        let m = egg.macros_for(3.0, None);
        assert_eq!(m.calories, 210.0);
        assert_eq!(m.fat, 0.0);
    }

    #[test]
    fn test_set_amount_picks_field_by_unit() {
        let mut food = apple();
        food.set_amount(150.0, Some(Unit::Milliliters));
        food.set_amount(2.0, None);
        assert_eq!(food.amount_ml, Some(150.0));
        assert_eq!(food.amount, Some(2.0));
        assert_eq!(food.amount_gr, None);
    }

    #[test]
    fn test_food_keeps_unknown_fields() {
        let food: Food = serde_json::from_value(json!({
            "id": "f1",
            "amountGr": 80,
            "png": "apple.png"
        }))
        .unwrap();
        assert_eq!(food.amount_gr, Some(80.0));
        assert_eq!(food.extra.get("png"), Some(&json!("apple.png")));

        let back = serde_json::to_value(&food).unwrap();
        assert_eq!(back["png"], json!("apple.png"));
    }

    #[test]
    fn test_meal_accepts_legacy_field_names() {
        let meal: Meal = serde_json::from_value(json!({
            "mealDate": "20240102",
            "mealTime": "12:30",
            "foods": [{ "id": "rice" }]
        }))
        .unwrap();
        assert_eq!(meal.date.as_deref(), Some("20240102"));
        assert_eq!(meal.time.as_deref(), Some("12:30"));
        assert_eq!(meal.foods.len(), 1);
    }

    #[test]
    fn test_goal_calories_from_text_input() {
        let goal: Goal = serde_json::from_value(json!({
            "id": "g1",
            "set": "20240102",
            "calories": "2200"
        }))
        .unwrap();
        assert_eq!(goal.calories, Some(2200.0));
        assert_eq!(goal.extra.get("set"), Some(&json!("20240102")));

        let cleared: Goal = serde_json::from_value(json!({ "calories": "" })).unwrap();
        assert_eq!(cleared.calories, None);

        let err = serde_json::from_value::<Goal>(json!({ "calories": "lots" })).unwrap_err();
        assert!(err.to_string().contains("invalid number"), "{err}");
    }

    #[test]
    fn test_amount_from_text_input() {
        let ctx: FoodAmountChanged = serde_json::from_value(json!({
            "food": { "id": "oats", "calories": "380" },
            "amount": " 50 ",
            "unit": "gr"
        }))
        .unwrap();
        assert_eq!(ctx.amount, 50.0);
        assert_eq!(ctx.food.calories, Some(380.0));
        assert_eq!(ctx.macros().calories, 190.0);

        let empty: FoodAmountChanged =
            serde_json::from_value(json!({ "food": { "id": "oats" }, "amount": "", "unit": "gr" }))
                .unwrap();
        assert_eq!(empty.amount, 0.0);
    }

    #[test]
    fn test_amount_changed_without_unit_decodes_as_pieces() {
        let ctx: FoodAmountChanged = serde_json::from_value(json!({
            "food": { "id": "egg", "calories": 70 },
            "amount": 2,
            "unit": null
        }))
        .unwrap();
        assert_eq!(ctx.unit, None);
        assert_eq!(ctx.macros().calories, 140.0);
    }
}
