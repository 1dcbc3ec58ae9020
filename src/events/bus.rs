//! # Event bus for decoupled screens and widgets.
//!
//! [`Bus`] is a synchronous, in-process publish/subscribe registry keyed by
//! [`EventKind`]. Producers publish typed [`Event`]s; every subscriber
//! registered for that kind runs on the publishing thread before `publish`
//! returns.
//!
//! ## Architecture
//! ```text
//! Producers (many):                        Subscribers (per kind, ordered):
//!   save-meal screen ──┐                 ┌──► [MealAdded]    ─► home stats, sphere, ...
//!   goal screen      ──┼──► Bus::publish ┼──► [GoalSet]      ─► calorie sphere
//!   detail screen    ──┘   (snapshot)    └──► [Notification] ─► NotificationCenter
//! ```
//!
//! ## Rules
//! - **Registration order**: subscribers of one kind run in the order they subscribed.
//! - **Snapshot**: `publish()` copies the subscriber list before delivering; (un)subscribes
//!   made meanwhile (even from inside a subscriber) apply to the next publish.
//! - **Isolation**: a panicking subscriber is caught, logged and reported in
//!   [`Delivery::failures`]; the remaining subscribers still run.
//! - **No persistence**: events published with no subscribers are dropped silently.
//! - **Duplicates**: the same subscriber registered twice runs twice, unless
//!   [`Config::dedupe_subscriptions`] is set.
//!
//! ## Example
//! ```rust
//! use mealbus::{Bus, Event, EventKind};
//!
//! let bus = Bus::new();
//! let home = bus.subscribe_fn(EventKind::MealAdded, "home", |_ev: &Event| {});
//!
//! let delivery = bus.publish(&Event::MealAdded);
//! assert_eq!(delivery.delivered, 1);
//!
//! assert!(bus.unsubscribe(EventKind::MealAdded, &home));
//! assert!(bus.publish(&Event::MealAdded).is_empty());
//! ```

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, error, trace};

use crate::config::Config;
use crate::error::{BusError, BusResult};
use crate::subscribers::{Subscribe, SubscriberFn, SubscriberRef, panic_info};

use super::event::{Event, EventKind};

/// Outcome of one [`Bus::publish`] call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[must_use = "a delivery may carry subscriber failures"]
pub struct Delivery {
    /// Subscribers that handled the event without panicking.
    pub delivered: usize,
    /// One entry per subscriber that panicked.
    pub failures: Vec<BusError>,
}

impl Delivery {
    /// True if no subscriber was invoked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.delivered == 0 && self.failures.is_empty()
    }

    /// True if every invoked subscriber completed.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Subscriber lists per event kind.
struct Registry {
    routes: HashMap<EventKind, Vec<SubscriberRef>>,
}

/// Publish/subscribe registry for [`Event`]s.
///
/// ### Properties
/// - **Synchronous**: `publish()` returns after every subscriber ran.
/// - **Thread-safe**: the registry sits behind a `RwLock`, never held while subscribers run.
/// - **Cloneable**: cheap to clone; clones share the same registry.
#[derive(Clone)]
pub struct Bus {
    inner: Arc<RwLock<Registry>>,
    cfg: Arc<Config>,
}

impl Bus {
    /// Creates a bus with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates a bus with the given configuration.
    pub fn with_config(cfg: &Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Registry {
                routes: HashMap::new(),
            })),
            cfg: Arc::new(cfg.clone()),
        }
    }

    /// Returns the configuration this bus was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Registers `subscriber` for every future publish of `kind`.
    ///
    /// Returns `false` only when deduplication is enabled and the subscriber is
    /// already registered for `kind`.
    pub fn subscribe(&self, kind: EventKind, subscriber: SubscriberRef) -> bool {
        let mut reg = self.write();
        let list = reg
            .routes
            .entry(kind)
            .or_insert_with(|| Vec::with_capacity(self.cfg.initial_kind_capacity));

        if self.cfg.dedupe_subscriptions && list.iter().any(|s| same(s, &subscriber)) {
            debug!(event = %kind, subscriber = subscriber.name(), "already subscribed");
            return false;
        }

        debug!(event = %kind, subscriber = subscriber.name(), "subscribed");
        list.push(subscriber);
        true
    }

    /// Wraps `f` in a [`SubscriberFn`], subscribes it to `kind` and returns its handle.
    pub fn subscribe_fn<F>(
        &self,
        kind: EventKind,
        name: impl Into<std::borrow::Cow<'static, str>>,
        f: F,
    ) -> SubscriberRef
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let sub: SubscriberRef = SubscriberFn::arc(name, f);
        self.subscribe(kind, Arc::clone(&sub));
        sub
    }

    /// Removes the first registration of `subscriber` under `kind`.
    ///
    /// Returns `false` (and does nothing) when it was not registered.
    pub fn unsubscribe(&self, kind: EventKind, subscriber: &SubscriberRef) -> bool {
        let mut reg = self.write();
        let Some(list) = reg.routes.get_mut(&kind) else {
            return false;
        };
        let Some(pos) = list.iter().position(|s| same(s, subscriber)) else {
            return false;
        };

        list.remove(pos);
        if list.is_empty() {
            reg.routes.remove(&kind);
        }
        debug!(event = %kind, subscriber = subscriber.name(), "unsubscribed");
        true
    }

    /// Publishes an event to the subscribers of its kind.
    ///
    /// Subscribers run in registration order against a snapshot of the list.
    /// Panics are caught per subscriber and returned in [`Delivery::failures`].
    pub fn publish(&self, event: &Event) -> Delivery {
        let kind = event.kind();
        let snapshot: Vec<SubscriberRef> = match self.read().routes.get(&kind) {
            Some(list) => list.clone(),
            None => {
                trace!(event = %kind, "published with no subscribers");
                return Delivery::default();
            }
        };

        let mut delivery = Delivery::default();
        for sub in &snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| sub.on_event(event))) {
                Ok(()) => delivery.delivered += 1,
                Err(payload) => {
                    let info = panic_info(payload.as_ref());
                    error!(event = %kind, subscriber = sub.name(), %info, "subscriber panicked");
                    delivery.failures.push(BusError::SubscriberPanicked {
                        subscriber: sub.name().to_string(),
                        event: kind.as_str(),
                        info,
                    });
                }
            }
        }
        delivery
    }

    /// Decodes an event from its wire form and publishes it.
    pub fn publish_json(&self, raw: &str) -> BusResult<Delivery> {
        let event = Event::from_json(raw)?;
        Ok(self.publish(&event))
    }

    /// Number of registrations for `kind` (duplicates included).
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.read().routes.get(&kind).map_or(0, Vec::len)
    }

    /// True if `subscriber` is registered at least once for `kind`.
    pub fn is_subscribed(&self, kind: EventKind, subscriber: &SubscriberRef) -> bool {
        self.read()
            .routes
            .get(&kind)
            .is_some_and(|list| list.iter().any(|s| same(s, subscriber)))
    }

    /// Drops every registration for `kind`; returns how many were removed.
    pub fn clear(&self, kind: EventKind) -> usize {
        let removed = self.write().routes.remove(&kind).map_or(0, |l| l.len());
        if removed > 0 {
            debug!(event = %kind, removed, "cleared subscribers");
        }
        removed
    }

    // The lock is never held across user code, so a poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reg = self.read();
        let mut counts: Vec<(&'static str, usize)> = reg
            .routes
            .iter()
            .map(|(k, l)| (k.as_str(), l.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("Bus")
            .field("routes", &counts)
            .field("cfg", &self.cfg)
            .finish()
    }
}

/// Identity of a subscriber: the address of its allocation (vtable ignored).
#[inline]
fn same(a: &SubscriberRef, b: &SubscriberRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
