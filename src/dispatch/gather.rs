//! # Gather coordinator — open a window, accumulate, close explicitly.
//!
//! A gather session collects matching events passively between an explicit
//! `begin_gather` and its paired `end_gather`. Neither call suspends; how
//! long the window stays open is entirely the caller's business (typically a
//! sleep between the two calls).
//!
//! ## Example
//! ```no_run
//! use std::time::Duration;
//! use etude::{Dispatcher, Kind};
//!
//! # async fn demo(dispatcher: Dispatcher) -> Result<(), etude::DispatchError> {
//! let window = dispatcher.begin_gather(Kind::Key, 0, |e| e.is_note_on());
//! tokio::time::sleep(Duration::from_secs(10)).await;
//! let presses = dispatcher.end_gather(window)?;
//! println!("you hit {} keys", presses.len());
//! # Ok(())
//! # }
//! ```

use crate::dispatch::dispatcher::Dispatcher;
use crate::dispatch::entry::GatherSlot;
use crate::dispatch::id::GatherId;
use crate::error::DispatchError;
use crate::events::{Event, Kind};

impl Dispatcher {
    /// Opens a gather session for `kind` and returns its id immediately.
    ///
    /// Events matching `kind` and `filter` accumulate in the session buffer
    /// until the paired [`end_gather`](Dispatcher::end_gather). `capacity`
    /// bounds the buffer; `0` means unbounded. Arrivals on a full buffer are
    /// dropped for this session only.
    ///
    /// The session's owner must close it exactly once.
    pub fn begin_gather<F>(&self, kind: Kind, capacity: usize, filter: F) -> GatherId
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        let mut registry = self.registry();
        let id = GatherId(registry.ids.next());
        registry.gathers.push(GatherSlot {
            id,
            kind,
            filter: Box::new(filter),
            capacity,
            buffer: std::collections::VecDeque::new(),
        });
        id
    }

    /// Closes a gather session, returning everything it buffered in arrival
    /// order.
    ///
    /// ### Errors
    /// [`DispatchError::GatherNotFound`] if `id` does not name a currently
    /// open session (already ended, or never issued here).
    pub fn end_gather(&self, id: GatherId) -> Result<Vec<Event>, DispatchError> {
        let mut registry = self.registry();
        let pos = registry
            .gathers
            .iter()
            .position(|slot| slot.id == id)
            .ok_or(DispatchError::GatherNotFound { id })?;
        let slot = registry.gathers.remove(pos);
        Ok(slot.buffer.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bounded_window_keeps_the_first_events_and_drops_the_rest() {
        let dispatcher = Dispatcher::new();
        let window = dispatcher.begin_gather(Kind::Key, 2, |_| true);

        let a = Event::Key { key: 60, velocity: 100 };
        let b = Event::Key { key: 62, velocity: 100 };
        let c = Event::Key { key: 64, velocity: 100 };
        dispatcher.fire(a);
        dispatcher.fire(b);
        dispatcher.fire(c);

        assert_eq!(dispatcher.end_gather(window), Ok(vec![a, b]));
    }

    #[tokio::test]
    async fn ending_twice_fails_with_not_found() {
        let dispatcher = Dispatcher::new();
        let window = dispatcher.begin_gather(Kind::Key, 2, |_| true);

        assert!(dispatcher.end_gather(window).is_ok());
        assert_eq!(
            dispatcher.end_gather(window),
            Err(DispatchError::GatherNotFound { id: window })
        );
    }

    #[tokio::test]
    async fn zero_capacity_means_unbounded() {
        let dispatcher = Dispatcher::new();
        let window = dispatcher.begin_gather(Kind::Keystroke, 0, |_| true);

        for key in 0..100u32 {
            dispatcher.fire(Event::Keystroke { key, pressed: true });
        }

        let events = dispatcher.end_gather(window).unwrap();
        assert_eq!(events.len(), 100);
        assert_eq!(events[0], Event::Keystroke { key: 0, pressed: true });
        assert_eq!(events[99], Event::Keystroke { key: 99, pressed: true });
    }

    #[tokio::test]
    async fn filter_and_kind_both_gate_the_buffer() {
        let dispatcher = Dispatcher::new();
        let window = dispatcher.begin_gather(Kind::Key, 0, |e| e.is_note_on());

        let press = Event::Key { key: 60, velocity: 90 };
        dispatcher.fire(press);
        dispatcher.fire(Event::Key { key: 60, velocity: 0 });
        dispatcher.fire(Event::Keystroke { key: 60, pressed: true });

        assert_eq!(dispatcher.end_gather(window), Ok(vec![press]));
    }

    #[tokio::test]
    async fn independent_windows_do_not_steal_from_each_other() {
        let dispatcher = Dispatcher::new();
        let first = dispatcher.begin_gather(Kind::Key, 1, |_| true);
        let second = dispatcher.begin_gather(Kind::Key, 2, |_| true);

        let a = Event::Key { key: 60, velocity: 100 };
        let b = Event::Key { key: 61, velocity: 100 };
        dispatcher.fire(a);
        dispatcher.fire(b);

        assert_eq!(dispatcher.end_gather(first), Ok(vec![a]));
        assert_eq!(dispatcher.end_gather(second), Ok(vec![a, b]));
    }
}
