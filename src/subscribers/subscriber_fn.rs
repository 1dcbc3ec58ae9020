//! # Function-backed subscriber (`SubscriberFn`)
//!
//! [`SubscriberFn`] wraps a closure `F: Fn(&Event)` with a name, so that
//! callers can subscribe plain functions without declaring a type.
//! If the closure needs state, capture an `Arc<...>` explicitly.
//!
//! ## Example
//! ```rust
//! use mealbus::{Event, SubscriberFn, SubscriberRef};
//!
//! let s: SubscriberRef = SubscriberFn::arc("home-refresh", |ev: &Event| {
//!     let _ = ev.name();
//! });
//! assert_eq!(s.name(), "home-refresh");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::events::Event;
use crate::subscribers::Subscribe;

/// Function-backed subscriber implementation.
pub struct SubscriberFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> SubscriberFn<F> {
    /// Creates a new function-backed subscriber.
    ///
    /// Prefer [`SubscriberFn::arc`] when you immediately need a [`SubscriberRef`](crate::SubscriberRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the subscriber and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F> fmt::Debug for SubscriberFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberFn")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> Subscribe for SubscriberFn<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event) {
        (self.f)(event)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_closure_is_invoked_with_event() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let sub = SubscriberFn::new("counter", move |ev: &Event| {
            if ev.is_notification() {
                h.fetch_add(1, Ordering::SeqCst);
            }
        });

        sub.on_event(&Event::notification("hi"));
        sub.on_event(&Event::MealAdded);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(sub.name(), "counter");
    }
}
