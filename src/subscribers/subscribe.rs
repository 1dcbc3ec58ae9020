//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for reacting to events published on the
//! [`Bus`](crate::Bus). Subscribers are registered per [`EventKind`](crate::EventKind)
//! and invoked synchronously, on the publishing thread, in registration order.
//!
//! ## Contract
//! - `on_event` should return quickly; long work (network calls) belongs in a
//!   [`Relay`](crate::Relay).
//! - A panic inside `on_event` is caught by the bus and reported; the other
//!   subscribers of the same publish still run.
//! - Identity is the `Arc` allocation: keep the [`SubscriberRef`] returned at
//!   subscribe time to unsubscribe later.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use mealbus::{Bus, Event, EventKind, Subscribe};
//!
//! struct Sphere;
//!
//! impl Subscribe for Sphere {
//!     fn on_event(&self, ev: &Event) {
//!         if let Event::GoalSet(ctx) = ev {
//!             let _ = ctx.goal.calories;
//!         }
//!     }
//!     fn name(&self) -> &str { "sphere" }
//! }
//!
//! let bus = Bus::new();
//! let sphere: Arc<dyn Subscribe> = Arc::new(Sphere);
//! bus.subscribe(EventKind::GoalSet, sphere.clone());
//! let _ = bus.publish(&Event::goal_set(2200.0));
//! bus.unsubscribe(EventKind::GoalSet, &sphere);
//! ```

use std::sync::Arc;

use crate::events::Event;

/// Shared handle to a subscriber; also its identity on the bus.
pub type SubscriberRef = Arc<dyn Subscribe>;

/// Contract for event subscribers.
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event.
    ///
    /// # Parameters
    /// - `event`: Reference to the event (does not transfer ownership)
    fn on_event(&self, event: &Event);

    /// Human-readable name (for logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
