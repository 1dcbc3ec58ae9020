//! # Stateful subscriber that collects user notifications.
//!
//! [`NotificationCenter`] keeps a bounded FIFO of texts received through
//! `notification` events, for a UI layer to display one at a time.
//!
//! ## Architecture
//! ```text
//!  goal screen ── publish(Notification) ──► Bus
//!                                            │
//!                                       on_event()
//!                                            ▼
//!                   NotificationCenter (VecDeque<String> behind Mutex)
//!                             │                         │
//!                        push_back(text)          take_next() / drain()
//!                  (oldest dropped when full)        (UI layer)
//! ```
//!
//! ## Example
//! ```rust
//! use mealbus::{Bus, Event, NotificationCenter};
//!
//! let bus = Bus::new();
//! let center = NotificationCenter::new(8);
//! let handle = center.attach(&bus);
//!
//! let _ = bus.publish(&Event::notification("Your new goal has been set!"));
//! assert_eq!(center.take_next().as_deref(), Some("Your new goal has been set!"));
//!
//! center.detach(&bus, &handle);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::events::{Bus, Event, EventKind};
use crate::subscribers::{Subscribe, SubscriberRef};

/// Collects notification texts published on the bus.
///
/// Cloneable; clones share the same queue.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl NotificationCenter {
    /// Creates an empty center keeping at most `capacity` texts (min 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Subscribes a handle of this center to `notification` events and returns it.
    pub fn attach(&self, bus: &Bus) -> SubscriberRef {
        let handle: SubscriberRef = Arc::new(self.clone());
        bus.subscribe(EventKind::Notification, Arc::clone(&handle));
        handle
    }

    /// Removes a handle previously returned by [`attach`](Self::attach).
    pub fn detach(&self, bus: &Bus, handle: &SubscriberRef) -> bool {
        bus.unsubscribe(EventKind::Notification, handle)
    }

    /// Number of texts waiting to be shown.
    pub fn pending(&self) -> usize {
        self.queue().len()
    }

    /// Pops the oldest pending text.
    pub fn take_next(&self) -> Option<String> {
        self.queue().pop_front()
    }

    /// Takes every pending text, oldest first.
    pub fn drain(&self) -> Vec<String> {
        self.queue().drain(..).collect()
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Subscribe for NotificationCenter {
    fn on_event(&self, event: &Event) {
        let Event::Notification(n) = event else {
            return;
        };
        let mut q = self.queue();
        if q.len() == self.capacity {
            if let Some(dropped) = q.pop_front() {
                debug!(text = %dropped, "notification queue full; dropped oldest");
            }
        }
        q.push_back(n.text.clone());
    }

    fn name(&self) -> &str {
        "notification-center"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let bus = Bus::new();
        let center = NotificationCenter::default();
        center.attach(&bus);

        let _ = bus.publish(&Event::notification("You added Kiwi!"));
        let _ = bus.publish(&Event::notification("You updated Kiwi!"));
        assert_eq!(center.pending(), 2);
        assert_eq!(center.take_next().as_deref(), Some("You added Kiwi!"));
        assert_eq!(center.drain(), vec!["You updated Kiwi!".to_string()]);
        assert_eq!(center.take_next(), None);
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let center = NotificationCenter::new(2);
        for text in ["a", "b", "c"] {
            center.on_event(&Event::notification(text));
        }
        assert_eq!(center.drain(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_ignores_other_events() {
        let center = NotificationCenter::new(2);
        center.on_event(&Event::MealAdded);
        assert_eq!(center.pending(), 0);
    }

    #[test]
    fn test_detach_stops_collection() {
        let bus = Bus::new();
        let center = NotificationCenter::new(4);
        let handle = center.attach(&bus);
        assert!(center.detach(&bus, &handle));

        let _ = bus.publish(&Event::notification("late"));
        assert_eq!(center.pending(), 0);
    }
}
