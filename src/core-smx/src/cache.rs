//! Time-bounded, single-flight memoization of an async computation.
//!
//! # States
//!
//! ```text
//!            get()                   resolves Ok
//!   Empty ───────────► Pending ─────────────────► Fresh(value, built_at)
//!     ▲                  │  ▲                         │
//!     └──── resolves Err ┘  └──── get() after max_age ┘
//! ```
//!
//! While a computation is pending, every `get()` awaits that same computation.
//! Once a value expires, the next `get()` starts exactly one new computation and
//! every caller waits for it; stale values are never served.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::errors::Result;

type Loader<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

type Flight<T> = Shared<BoxFuture<'static, Result<Arc<T>>>>;

enum Slot<T> {
    Empty,
    Pending { generation: u64, flight: Flight<T> },
    Fresh { value: Arc<T>, built_at: DateTime<Utc> },
}

struct State<T> {
    slot: Slot<T>,
    generation: u64,
}

/// Caches the result of `loader` for `max_age`, sharing in-flight computations.
pub struct RefreshCache<T> {
    loader: Loader<T>,
    max_age: Duration,
    clock: Arc<dyn Clock>,
    state: Arc<Mutex<State<T>>>,
}

impl<T> RefreshCache<T>
where
    T: Send + Sync + 'static,
{
    pub fn new<F, Fut>(max_age: Duration, clock: Arc<dyn Clock>, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            loader: Arc::new(move || loader().boxed()),
            max_age,
            clock,
            state: Arc::new(Mutex::new(State {
                slot: Slot::Empty,
                generation: 0,
            })),
        }
    }

    /// Returns the cached value, computing it first if there is none or it expired.
    ///
    /// A failed computation is not cached: its error goes to every caller that
    /// awaited it, and the next call starts over.
    pub async fn get(&self) -> Result<Arc<T>> {
        let flight = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            match &state.slot {
                Slot::Fresh { value, built_at } if !self.is_expired(*built_at) => {
                    return Ok(Arc::clone(value));
                }
                Slot::Pending { flight, .. } => {
                    tracing::debug!("Joining in-flight sitemap refresh");
                    flight.clone()
                }
                Slot::Fresh { .. } | Slot::Empty => {
                    state.generation += 1;
                    let generation = state.generation;
                    let flight = self.start(generation);
                    state.slot = Slot::Pending {
                        generation,
                        flight: flight.clone(),
                    };
                    flight
                }
            }
        };

        flight.await
    }

    /// Drops any cached value so the next `get()` recomputes. An in-flight
    /// computation keeps running for the callers already waiting on it.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.slot = Slot::Empty;
    }

    fn is_expired(&self, built_at: DateTime<Utc>) -> bool {
        let age = self.clock.now().signed_duration_since(built_at);
        match age.to_std() {
            Ok(age) => age >= self.max_age,
            // Clock moved backwards
            Err(_) => false,
        }
    }

    fn start(&self, generation: u64) -> Flight<T> {
        let load = (self.loader)();
        let state = Arc::clone(&self.state);
        let clock = Arc::clone(&self.clock);

        async move {
            tracing::debug!(generation, "Starting sitemap refresh");
            let outcome = load.await.map(Arc::new);

            let mut state = state.lock().await;
            if state.generation == generation {
                state.slot = match &outcome {
                    Ok(value) => Slot::Fresh {
                        value: Arc::clone(value),
                        built_at: clock.now(),
                    },
                    Err(_) => Slot::Empty,
                };
            }

            match &outcome {
                Ok(_) => tracing::debug!(generation, "Sitemap refresh finished"),
                Err(error) => tracing::warn!(generation, %error, "Sitemap refresh failed"),
            }
            outcome
        }
        .boxed()
        .shared()
    }
}

impl<T> std::fmt::Debug for RefreshCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCache")
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}
