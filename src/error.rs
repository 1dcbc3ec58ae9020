//! Error types used by the event bus and its wire boundary.
//!
//! [`BusError`] covers the three ways delivery can go wrong:
//!
//! - an unknown event name arriving at the string boundary,
//! - a malformed wire document or context payload (or one that cannot be encoded),
//! - a subscriber panicking while handling an event.
//!
//! Like the rest of the crate, the enum offers `as_label` / `as_message`
//! helpers for logs.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type BusResult<T> = Result<T, BusError>;

/// # Errors produced by the event bus.
///
/// Typed publishing never fails; errors only appear when decoding events from
/// their wire form, or are *collected* (not returned) when a subscriber panics.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// Event name is not part of the vocabulary.
    #[error("unknown event name: {name:?}")]
    UnknownEvent {
        /// The name as received.
        name: String,
    },

    /// Wire document or context payload could not be decoded.
    #[error("failed to decode event: {reason}")]
    Decode {
        /// Decoder message.
        reason: String,
    },

    /// Event could not be encoded to its wire form.
    #[error("failed to encode event: {reason}")]
    Encode {
        /// Encoder message.
        reason: String,
    },

    /// Subscriber panicked while handling an event; delivery to the others went on.
    #[error("subscriber '{subscriber}' panicked on '{event}': {info}")]
    SubscriberPanicked {
        /// Name reported by the subscriber.
        subscriber: String,
        /// Wire name of the event being delivered.
        event: &'static str,
        /// Panic payload rendered as text.
        info: String,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use mealbus::BusError;
    ///
    /// let err = BusError::UnknownEvent { name: "mealAded".into() };
    /// assert_eq!(err.as_label(), "bus_unknown_event");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::UnknownEvent { .. } => "bus_unknown_event",
            BusError::Decode { .. } => "bus_decode",
            BusError::Encode { .. } => "bus_encode",
            BusError::SubscriberPanicked { .. } => "bus_subscriber_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BusError::UnknownEvent { name } => format!("unknown event: {name}"),
            BusError::Decode { reason } => format!("decode: {reason}"),
            BusError::Encode { reason } => format!("encode: {reason}"),
            BusError::SubscriberPanicked {
                subscriber,
                event,
                info,
            } => format!("subscriber={subscriber} event={event} panic={info}"),
        }
    }
}

impl From<serde_json::Error> for BusError {
    fn from(err: serde_json::Error) -> Self {
        BusError::Decode {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let decode = BusError::Decode {
            reason: "eof".into(),
        };
        let panicked = BusError::SubscriberPanicked {
            subscriber: "sphere".into(),
            event: "goalSet",
            info: "boom".into(),
        };
        let encode = BusError::Encode {
            reason: "key must be a string".into(),
        };
        assert_eq!(decode.as_label(), "bus_decode");
        assert_eq!(encode.as_label(), "bus_encode");
        assert_eq!(encode.to_string(), "failed to encode event: key must be a string");
        assert_eq!(panicked.as_label(), "bus_subscriber_panicked");
        assert_eq!(
            panicked.as_message(),
            "subscriber=sphere event=goalSet panic=boom"
        );
    }

    #[test]
    fn test_serde_error_maps_to_decode() {
        let err: BusError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.as_label(), "bus_decode");
    }
}
