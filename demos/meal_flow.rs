//! # Example: meal_flow
//!
//! Walks through building a meal the way the app screens do it, with every
//! event logged and the backend refresh handled by an async relay.
//!
//! Shows how to:
//! - Subscribe a [`LogWriter`] to every [`EventKind`].
//! - Keep the meal under construction in a closure subscriber.
//! - Push slow work behind a [`Relay`].
//!
//! ## Flow
//! ```text
//! grocery list ──► GrocerySelected ──► new-meal state (adds food)
//! detail screen ─► FoodAmountInMealChanged ──► new-meal state (amount, macros)
//!                                         └──► ListDataChanged (list refresh)
//! save ──────────► MealAdded ──► Relay ──► "backend" refresh
//!                 Notification ──► NotificationCenter
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example meal_flow
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mealbus::events::{Food, FoodAmountChanged, ListDataChanged, Macros, Unit};
use mealbus::{
    AsyncSubscribe, Bus, Config, Event, EventKind, LogWriter, NotificationCenter, Relay,
    SubscriberRef,
};
use tokio_util::sync::CancellationToken;

/// Pretends to reload the daily statistics from the backend.
struct StatsRefresher;

#[async_trait]
impl AsyncSubscribe for StatsRefresher {
    async fn on_event(&self, ev: &Event) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        println!("[stats] refreshed after {}", ev.name());
    }

    fn name(&self) -> &str {
        "stats-refresher"
    }
}

#[derive(Default)]
struct NewMeal {
    foods: Vec<Food>,
    totals: Macros,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    mealbus::init_logging();

    let cfg = Config::default();
    let bus = Bus::with_config(&cfg);

    let log: SubscriberRef = Arc::new(LogWriter);
    for kind in EventKind::ALL {
        bus.subscribe(kind, Arc::clone(&log));
    }

    let toasts = NotificationCenter::default();
    toasts.attach(&bus);

    // New-meal screen state.
    let meal = Arc::new(Mutex::new(NewMeal::default()));
    {
        let meal = Arc::clone(&meal);
        bus.subscribe_fn(EventKind::GrocerySelected, "new-meal/add", move |ev: &Event| {
            if let Event::GrocerySelected(ctx) = ev {
                if let Ok(mut m) = meal.lock() {
                    m.foods.push(ctx.grocery.clone());
                }
            }
        });
    }
    {
        let meal = Arc::clone(&meal);
        let bus_in = bus.clone();
        bus.subscribe_fn(
            EventKind::FoodAmountInMealChanged,
            "new-meal/amount",
            move |ev: &Event| {
                let Event::FoodAmountInMealChanged(ctx) = ev else {
                    return;
                };
                let changed = {
                    let Ok(mut m) = meal.lock() else { return };
                    let Some(food) = m.foods.iter_mut().find(|f| f.id == ctx.food.id) else {
                        return;
                    };
                    food.set_amount(ctx.amount, ctx.unit);
                    let added = food.macros_for(ctx.amount, ctx.unit);
                    let food = food.clone();
                    m.totals = m.totals.add(added);
                    food
                };
                let item = serde_json::to_value(&changed).unwrap_or_default();
                let _ = bus_in.publish(&Event::ListDataChanged(ListDataChanged { item }));
            },
        );
    }

    let token = CancellationToken::new();
    let (relay, worker) = Relay::spawn(
        Arc::new(StatsRefresher),
        cfg.relay_capacity_clamped(),
        token.clone(),
    );
    let relay: SubscriberRef = relay;
    bus.subscribe(EventKind::MealAdded, Arc::clone(&relay));

    // Grocery list screen.
    let oats = Food {
        id: "oats".into(),
        name: Some("Oats".into()),
        calories: Some(380.0),
        proteins: Some(13.0),
        carbs: Some(60.0),
        fat: Some(7.0),
        ..Food::default()
    };
    let _ = bus.publish(&Event::grocery_selected(oats.clone(), false));

    // Food detail screen, delivered as wire JSON.
    let amount = Event::FoodAmountInMealChanged(FoodAmountChanged {
        food: Food {
            id: oats.id.clone(),
            ..Food::default()
        },
        amount: 80.0,
        unit: Some(Unit::Grams),
        prediction: None,
    });
    let delivery = bus.publish_json(&amount.to_json()?)?;
    println!("amount change delivered to {} subscribers", delivery.delivered);

    // Save.
    let _ = bus.publish(&Event::MealAdded);
    let _ = bus.publish(&Event::notification("Meal saved!"));

    if let Ok(m) = meal.lock() {
        println!(
            "meal: {} food(s), {:.0} kcal, P {:.1} C {:.1} F {:.1}",
            m.foods.len(),
            m.totals.calories,
            m.totals.proteins,
            m.totals.carbs,
            m.totals.fat
        );
    }
    for text in toasts.drain() {
        println!("[toast] {text}");
    }

    bus.unsubscribe(EventKind::MealAdded, &relay);
    drop(relay);
    worker.join().await;
    Ok(())
}
