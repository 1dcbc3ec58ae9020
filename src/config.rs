//! # Bus configuration.
//!
//! Provides [`Config`], the centralized settings for a [`Bus`](crate::Bus) and the
//! [`Relay`](crate::Relay)s attached to it.
//!
//! Config is used in two ways:
//! 1. **Bus creation**: `Bus::with_config(&config)`
//! 2. **Relay creation**: `Relay::spawn(sub, config.relay_capacity_clamped(), token)`
//!
//! ## Loading
//! All fields have defaults, so a partial JSON document is enough:
//! ```rust
//! use mealbus::Config;
//!
//! let cfg = Config::from_json(r#"{ "dedupe_subscriptions": true }"#).unwrap();
//! assert!(cfg.dedupe_subscriptions);
//! assert_eq!(cfg.relay_capacity, 1024);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::BusResult;

/// Configuration for the event bus.
///
/// ## Field semantics
/// - `dedupe_subscriptions`: ignore a second registration of the same subscriber for the same kind
/// - `relay_capacity`: queue size for relays (min 1; clamped by accessor)
/// - `initial_kind_capacity`: pre-sized subscriber list per event kind
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// When `true`, `subscribe` is idempotent per (kind, subscriber) pair.
    ///
    /// Off by default: registering the same subscriber twice makes it run twice per publish.
    pub dedupe_subscriptions: bool,

    /// Capacity of each relay's bounded queue.
    ///
    /// Events that arrive while the queue is full are dropped for that relay (warn).
    pub relay_capacity: usize,

    /// Initial capacity of the subscriber list created for a new event kind.
    pub initial_kind_capacity: usize,
}

impl Config {
    /// Parses a configuration from a JSON document; missing fields take defaults.
    pub fn from_json(raw: &str) -> BusResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Returns a relay capacity clamped to a minimum of 1.
    #[inline]
    pub fn relay_capacity_clamped(&self) -> usize {
        self.relay_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `dedupe_subscriptions = false` (duplicates are delivered twice)
    /// - `relay_capacity = 1024`
    /// - `initial_kind_capacity = 4` (a handful of mounted listeners per event)
    fn default() -> Self {
        Self {
            dedupe_subscriptions: false,
            relay_capacity: 1024,
            initial_kind_capacity: 4,
        }
    }
}
