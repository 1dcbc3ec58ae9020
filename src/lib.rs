//! # mealbus
//!
//! **mealbus** is a typed, in-process publish/subscribe bus for meal-tracking
//! applications.
//!
//! Screens and widgets never hold references to each other: a screen that
//! saves a meal publishes [`Event::MealAdded`], and every statistics widget
//! subscribed to [`EventKind::MealAdded`] refreshes itself.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ save-meal    │   │ goal screen  │   │ grocery list │
//!     │ screen       │   │              │   │              │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ MealAdded        │ GoalSet          │ GrocerySelected
//!            │                  │ Notification     │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Bus (synchronous registry: EventKind → [SubscriberRef])          │
//! │  - snapshot of the list per publish                               │
//! │  - per-subscriber panic isolation → Delivery::failures            │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               ▼
//!   daily stats      calorie sphere    NotificationCenter    Relay
//!   (SubscriberFn)   (Subscribe)       (stateful)            (queue ─► AsyncSubscribe)
//! ```
//!
//! ### Delivery
//! ```text
//! publish(&event)
//!   ├─► kind = event.kind()
//!   ├─► snapshot = registry[kind].clone()      (lock released here)
//!   └─► for sub in snapshot (registration order):
//!         ├─ Ok    ─► delivered += 1
//!         └─ panic ─► log + BusError::SubscriberPanicked, continue
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Bus**           | Subscribe, unsubscribe, publish; typed or from wire JSON.    | [`Bus`], [`Delivery`]                       |
//! | **Events**        | Closed vocabulary with typed context payloads.               | [`Event`], [`EventKind`], [`events::payload`] |
//! | **Subscribers**   | Closure adapter, notification queue, async relay.            | [`Subscribe`], [`SubscriberFn`], [`Relay`]  |
//! | **Errors**        | Typed errors for the wire boundary and subscriber panics.    | [`BusError`]                                |
//! | **Configuration** | Deduplication and relay queue sizing.                        | [`Config`]                                  |
//!
//! ## Optional features
//! - `logging` (default): exports [`LogWriter`] and [`init_logging`].
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use mealbus::{Bus, Event, EventKind, NotificationCenter};
//!
//! let bus = Bus::new();
//!
//! let goal = Arc::new(Mutex::new(None));
//! let g = Arc::clone(&goal);
//! let sphere = bus.subscribe_fn(EventKind::GoalSet, "calorie-sphere", move |ev: &Event| {
//!     if let Event::GoalSet(ctx) = ev {
//!         *g.lock().unwrap() = ctx.goal.calories;
//!     }
//! });
//!
//! let toasts = NotificationCenter::default();
//! toasts.attach(&bus);
//!
//! let _ = bus.publish(&Event::notification("Your new goal has been set!"));
//! let _ = bus.publish(&Event::goal_set(2200.0));
//!
//! assert_eq!(*goal.lock().unwrap(), Some(2200.0));
//! assert_eq!(toasts.pending(), 1);
//!
//! bus.unsubscribe(EventKind::GoalSet, &sphere);
//! ```
mod config;
mod error;
pub mod events;
mod subscribers;

#[cfg(feature = "logging")]
mod logging;

// ---- Public re-exports ----

pub use config::Config;
pub use error::{BusError, BusResult};
pub use events::{Bus, Delivery, Event, EventKind};
pub use subscribers::{
    AsyncSubscribe, NotificationCenter, Relay, RelayWorker, Subscribe, SubscriberFn, SubscriberRef,
};

// Optional: tracing-backed logger subscriber and fmt setup.
// Enable with: `--features logging` (on by default)
#[cfg(feature = "logging")]
pub use logging::init_logging;
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
