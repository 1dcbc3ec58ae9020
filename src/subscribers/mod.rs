//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait and built-in implementations
//! for handling events published on the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   screen ── publish(&Event) ──► Bus ──► subscribers of event.kind(), in order
//!                                              │
//!                                              ├──► Subscribe::on_event(&Event)
//!                                              │         │
//!                                              │    ┌────┴─────┬───────────────┬──────────┐
//!                                              │    ▼          ▼               ▼          ▼
//!                                              │  LogWriter  SubscriberFn  Notification  Custom
//!                                              │                           Center
//!                                              │
//!                                              └──► Relay ──► queue ──► AsyncSubscribe (tokio task)
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** - observe and react to events (logging, UI refresh)
//! - **Stateful subscribers** - maintain internal state based on events (NotificationCenter)
//! - **Async subscribers** - slow work behind a [`Relay`]

mod notifications;
mod relay;
mod subscribe;
mod subscriber_fn;

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use notifications::NotificationCenter;
pub use relay::{AsyncSubscribe, Relay, RelayWorker};
pub use subscribe::{Subscribe, SubscriberRef};
pub use subscriber_fn::SubscriberFn;

/// Renders a panic payload as text.
pub(crate) fn panic_info(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
