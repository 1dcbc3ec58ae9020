//! # Relay: hand events from the synchronous bus to async workers.
//!
//! Subscribers run on the publishing thread, so anything slow (REST calls,
//! disk writes) must not happen inside `on_event`. A [`Relay`] is a
//! [`Subscribe`] implementation that only enqueues; a dedicated tokio task
//! drains the queue and drives an [`AsyncSubscribe`].
//!
//! ## Architecture
//! ```text
//! Bus::publish(&Event)
//!     │
//!     └──► Relay::on_event ── try_send ──► [bounded queue] ──► worker ──► AsyncSubscribe::on_event().await
//!              │                                                 └──► panic → logged, next event
//!              └── full / closed → event dropped (warn)
//! ```
//!
//! ## Rules
//! - **Non-blocking**: `on_event()` returns immediately (uses `try_send`).
//! - **FIFO**: the async subscriber sees events in publish order.
//! - **Overflow**: event dropped for this relay only, counted in [`Relay::dropped`].
//! - **Isolation**: panics in the async subscriber are caught with `catch_unwind`.
//! - **Stop**: the worker exits when the token is cancelled, or when every
//!   handle to the relay is gone and the queue is drained.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if the subscriber uses `Arc<Mutex<T>>` and panics while holding the lock.
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//! use mealbus::{AsyncSubscribe, Bus, Event, EventKind, Relay, SubscriberRef};
//!
//! struct StatsRefresher;
//!
//! #[async_trait]
//! impl AsyncSubscribe for StatsRefresher {
//!     async fn on_event(&self, _ev: &Event) {
//!         // reload the weekly statistics from the backend
//!     }
//!     fn name(&self) -> &str { "stats-refresher" }
//! }
//!
//! # async fn demo() {
//! let bus = Bus::new();
//! let token = CancellationToken::new();
//! let (relay, worker) = Relay::spawn(Arc::new(StatsRefresher), 64, token.clone());
//! let handle: SubscriberRef = relay;
//! bus.subscribe(EventKind::MealAdded, handle.clone());
//!
//! let _ = bus.publish(&Event::MealAdded);
//!
//! bus.unsubscribe(EventKind::MealAdded, &handle);
//! drop(handle);
//! worker.join().await;
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use crate::events::Event;
use crate::subscribers::{Subscribe, panic_info};

/// Contract for subscribers driven by a [`Relay`] worker.
///
/// Called from the relay's own tokio task. Implementations may await freely;
/// they only delay later events of the same relay.
#[async_trait]
pub trait AsyncSubscribe: Send + Sync + 'static {
    /// Handle a single event.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Bus-facing side of a relay: enqueues events for the worker.
pub struct Relay {
    name: String,
    sender: mpsc::Sender<Arc<Event>>,
    dropped: AtomicU64,
}

/// Worker side of a relay.
#[must_use = "dropping the worker handle detaches the task; call join() to wait for it"]
pub struct RelayWorker {
    handle: JoinHandle<()>,
}

impl Relay {
    /// Spawns the worker task and returns the relay to subscribe on the bus.
    ///
    /// Must be called within a tokio runtime. The queue holds at most
    /// `capacity` events (min 1).
    pub fn spawn(
        sub: Arc<dyn AsyncSubscribe>,
        capacity: usize,
        token: CancellationToken,
    ) -> (Arc<Relay>, RelayWorker) {
        let name = sub.name().to_string();
        let (tx, mut rx) = mpsc::channel::<Arc<Event>>(capacity.max(1));

        let handle = tokio::spawn(async move {
            loop {
                let ev = tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    ev = rx.recv() => match ev {
                        Some(ev) => ev,
                        None => break,
                    },
                };

                let fut = sub.on_event(ev.as_ref());
                if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                    error!(
                        subscriber = sub.name(),
                        event = ev.name(),
                        info = %panic_info(panic_err.as_ref()),
                        "async subscriber panicked"
                    );
                }
            }
        });

        let relay = Arc::new(Relay {
            name,
            sender: tx,
            dropped: AtomicU64::new(0),
        });
        (relay, RelayWorker { handle })
    }

    /// Number of events dropped because the queue was full or the worker gone.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Subscribe for Relay {
    fn on_event(&self, event: &Event) {
        let reason = match self.sender.try_send(Arc::new(event.clone())) {
            Ok(()) => return,
            Err(mpsc::error::TrySendError::Full(_)) => "full",
            Err(mpsc::error::TrySendError::Closed(_)) => "closed",
        };
        self.dropped.fetch_add(1, Ordering::Relaxed);
        warn!(relay = %self.name, event = event.name(), reason, "relay dropped event");
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl RelayWorker {
    /// Waits for the worker task to finish.
    pub async fn join(self) {
        if let Err(err) = self.handle.await {
            error!(%err, "relay worker aborted");
        }
    }

    /// True if the worker task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
