//! # Await coordinator — suspend until a fixed quota of matches arrives.
//!
//! `await_events` registers a short-lived request backed by a bounded
//! channel: the dispatcher is the only producer, the suspended caller the
//! only consumer, which decouples scheduling from delivery. Concurrent
//! requests on the same kind are independent — one fired event is fanned out
//! to every open request, never claimed exclusively by the oldest one.
//!
//! ## Rules
//! - The buffer holds exactly `amount` events; arrivals on a full buffer are
//!   dropped for this request only.
//! - Deregistration is tied to a guard, so abandoning the wait (e.g. losing
//!   a `tokio::time::timeout` race) removes the request as reliably as
//!   completing it.
//! - There is no built-in timeout; compose one externally:
//!
//! ```no_run
//! use std::time::Duration;
//! use etude::{Dispatcher, Kind};
//!
//! # async fn demo(dispatcher: Dispatcher) {
//! let first_press = tokio::time::timeout(
//!     Duration::from_secs(10),
//!     dispatcher.await_events(Kind::Key, 1, |e| e.is_note_on()),
//! )
//! .await;
//! # }
//! ```

use tokio::sync::mpsc;

use crate::dispatch::dispatcher::Dispatcher;
use crate::dispatch::entry::AwaitSlot;
use crate::error::DispatchError;
use crate::events::{Event, Kind};

/// Removes the await request when the owning call completes or is dropped.
struct AwaitGuard {
    dispatcher: Dispatcher,
    id: u64,
}

impl Drop for AwaitGuard {
    fn drop(&mut self) {
        let mut registry = self.dispatcher.registry();
        registry.awaits.retain(|slot| slot.id != self.id);
    }
}

impl Dispatcher {
    /// Suspends the calling task until `amount` events matching `kind` and
    /// `filter` have arrived, then returns them in arrival order.
    ///
    /// Each event fired while the request is open lands in its private
    /// buffer of `amount` slots; the call consumes the buffer one event at a
    /// time and deregisters the request once the quota is met.
    ///
    /// ### Errors
    /// [`DispatchError::InvalidAmount`] if `amount` is zero. The request is
    /// rejected before any registration occurs.
    pub async fn await_events<F>(
        &self,
        kind: Kind,
        amount: usize,
        filter: F,
    ) -> Result<Vec<Event>, DispatchError>
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        if amount == 0 {
            return Err(DispatchError::InvalidAmount);
        }

        let (tx, mut rx) = mpsc::channel::<Event>(amount);
        let id = {
            let mut registry = self.registry();
            let id = registry.ids.next();
            registry.awaits.push(AwaitSlot {
                id,
                kind,
                filter: Box::new(filter),
                tx,
            });
            id
        };
        let _guard = AwaitGuard {
            dispatcher: self.clone(),
            id,
        };

        let mut results = Vec::with_capacity(amount);
        while results.len() < amount {
            match rx.recv().await {
                Some(event) => results.push(event),
                // the sender half lives in the registry slot until the guard
                // runs, so the channel cannot close while we are registered
                None => unreachable!("await buffer closed while request registered"),
            }
        }

        Ok(results)
    }
}
