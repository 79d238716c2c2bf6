//! # Dispatcher — registry mutations and broadcast delivery.
//!
//! [`Dispatcher`] owns the registry of live interest entries and resolves
//! each fired event against all four categories in a fixed order:
//!
//! ```text
//! fire(event)
//!   │ (registry locked for the whole pass)
//!   ├─ 1. callbacks   match → schedule action, remove entry
//!   ├─ 2. handlers    match → schedule action, entry stays
//!   ├─ 3. awaits      match + filter → try_send, drop on full
//!   └─ 4. gathers     match + filter → push, drop on full
//!   │ (registry unlocked)
//!   └─ spawn the collected actions, one task each
//! ```
//!
//! ## Rules
//! - **Non-suspending**: `fire` only schedules work and pushes into buffers;
//!   it never waits on them.
//! - **Snapshot-at-start**: the registry lock is held for the whole pass, so
//!   registrations or cancellations made by tasks the pass just scheduled
//!   cannot alter it mid-flight.
//! - **Callbacks before handlers**: one-shot callbacks represent "first
//!   reaction wins" setup code and must see the event before persistent
//!   handlers that may mutate shared state; await/gather entries are passive
//!   and are serviced last.
//! - **Isolation**: a panic inside an action is caught and logged; it never
//!   reaches the dispatcher or other actions.

use std::sync::{Arc, Mutex, MutexGuard};

use futures::FutureExt;
use tokio::sync::mpsc::error::TrySendError;

use crate::dispatch::entry::{CallbackSlot, HandlerSlot, Registry};
use crate::dispatch::id::HandlerId;
use crate::events::{Event, Kind};
use crate::handlers::HandlerRef;

/// Interest registry and broadcast dispatcher for one interactive surface.
///
/// Cheap to clone (internally an `Arc`-backed handle); every clone sees the
/// same registry. Create one per running session.
///
/// ## Example
/// ```no_run
/// use etude::{Dispatcher, Event, HandlerFn, Kind};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let dispatcher = Dispatcher::new();
///
///     let id = dispatcher.register_handler(
///         Kind::Key,
///         HandlerFn::arc(|event: Event| async move {
///             println!("key event: {event:?}");
///         }),
///     );
///
///     dispatcher.fire(Event::Key { key: 60, velocity: 100 });
///     dispatcher.cancel(id);
/// }
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    pub(crate) registry: Arc<Mutex<Registry>>,
}

impl Dispatcher {
    /// Creates a dispatcher with an empty registry and a fresh id counter.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::new())),
        }
    }

    /// Locks the registry.
    ///
    /// The lock is only ever held across non-suspending sections; poisoning
    /// means a filter panicked mid-pass and the entry collections are
    /// suspect, so there is nothing to salvage.
    pub(crate) fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().expect("event registry poisoned")
    }

    /// Registers a persistent handler for `kind` and returns its id.
    ///
    /// The action is scheduled as a new task on every matching
    /// [`fire`](Dispatcher::fire) until [`cancel`](Dispatcher::cancel) is
    /// called with the returned id.
    pub fn register_handler(&self, kind: Kind, action: HandlerRef) -> HandlerId {
        let mut registry = self.registry();
        let id = HandlerId(registry.ids.next());
        registry.handlers.push(HandlerSlot { id, kind, action });
        id
    }

    /// Registers a one-shot callback for `kind`.
    ///
    /// The action is scheduled on the first matching fire and the entry is
    /// removed in the same pass; it can never fire twice. No id is returned
    /// because a callback cannot be cancelled once registered.
    pub fn register_callback(&self, kind: Kind, action: HandlerRef) {
        let mut registry = self.registry();
        registry.callbacks.push(CallbackSlot { kind, action });
    }

    /// Cancels a persistent handler.
    ///
    /// Takes effect synchronously: the handler is excluded from every
    /// dispatch after this call returns. Actions already scheduled by an
    /// earlier fire are not retracted. Cancelling an id that is not live is
    /// a no-op.
    pub fn cancel(&self, id: HandlerId) {
        let mut registry = self.registry();
        let before = registry.handlers.len();
        registry.handlers.retain(|slot| slot.id != id);
        if registry.handlers.len() == before {
            log::debug!("cancel of {id}: not registered");
        }
    }

    /// Dispatches one event to every matching interest entry.
    ///
    /// Never suspends: matching callback and handler actions are spawned as
    /// new tasks, matching await/gather buffers receive the event with a
    /// non-blocking push. An entry whose buffer is full drops the event for
    /// that entry only.
    ///
    /// Must be called from within a Tokio runtime, since actions are spawned
    /// onto it.
    pub fn fire(&self, event: Event) {
        let actions = {
            let mut registry = self.registry();
            let mut actions: Vec<HandlerRef> = Vec::new();

            registry.callbacks.retain(|slot| {
                if slot.kind.matches(&event) {
                    actions.push(Arc::clone(&slot.action));
                    false
                } else {
                    true
                }
            });

            for slot in &registry.handlers {
                if slot.kind.matches(&event) {
                    actions.push(Arc::clone(&slot.action));
                }
            }

            for slot in &registry.awaits {
                if slot.kind.matches(&event) && (slot.filter)(&event) {
                    match slot.tx.try_send(event) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            log::debug!("await buffer full; dropped {:?}", event.kind());
                        }
                        // receiver dropped but the guard has not run yet
                        Err(TrySendError::Closed(_)) => {}
                    }
                }
            }

            for slot in &mut registry.gathers {
                if slot.kind.matches(&event) && (slot.filter)(&event) {
                    if slot.is_full() {
                        log::debug!("gather {} full; dropped {:?}", slot.id, event.kind());
                    } else {
                        slot.buffer.push_back(event);
                    }
                }
            }

            actions
        };

        for action in actions {
            tokio::spawn(async move {
                let fut = action.on_event(event);
                if let Err(panic) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                    log::error!("event action panicked: {panic:?}");
                }
            });
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerFn;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Yields enough times for every task spawned so far to run on the
    /// current-thread scheduler.
    async fn drain() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    fn counting_action(counter: Arc<AtomicUsize>) -> HandlerRef {
        HandlerFn::arc(move |_event: Event| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        })
    }

    #[tokio::test]
    async fn callback_fires_once_handler_fires_every_time() {
        let dispatcher = Dispatcher::new();
        let callback_hits = Arc::new(AtomicUsize::new(0));
        let handler_hits = Arc::new(AtomicUsize::new(0));

        dispatcher.register_callback(Kind::Key, counting_action(Arc::clone(&callback_hits)));
        dispatcher.register_handler(Kind::Key, counting_action(Arc::clone(&handler_hits)));

        dispatcher.fire(Event::Key { key: 60, velocity: 100 });
        drain().await;
        assert_eq!(callback_hits.load(Ordering::SeqCst), 1);
        assert_eq!(handler_hits.load(Ordering::SeqCst), 1);

        dispatcher.fire(Event::Key { key: 62, velocity: 100 });
        drain().await;
        assert_eq!(callback_hits.load(Ordering::SeqCst), 1, "callback must not fire twice");
        assert_eq!(handler_hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn ancestor_interest_sees_descendant_events() {
        let dispatcher = Dispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));

        dispatcher.register_handler(Kind::Midi, counting_action(Arc::clone(&hits)));

        dispatcher.fire(Event::Key { key: 60, velocity: 1 });
        dispatcher.fire(Event::Keystroke { key: 13, pressed: true });
        drain().await;

        assert_eq!(hits.load(Ordering::SeqCst), 1, "keystroke is not a midi event");
    }

    #[tokio::test]
    async fn cancel_stops_future_dispatches() {
        let dispatcher = Dispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let id = dispatcher.register_handler(Kind::Any, counting_action(Arc::clone(&hits)));

        dispatcher.fire(Event::Key { key: 60, velocity: 100 });
        drain().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        dispatcher.cancel(id);
        dispatcher.fire(Event::Key { key: 60, velocity: 100 });
        drain().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancel_of_unknown_id_is_a_no_op() {
        let dispatcher = Dispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));
        dispatcher.register_handler(Kind::Any, counting_action(Arc::clone(&hits)));

        dispatcher.cancel(HandlerId(9999));

        dispatcher.fire(Event::Keystroke { key: 1, pressed: true });
        drain().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1, "live handler must survive");
    }

    #[tokio::test]
    async fn registration_from_a_scheduled_action_misses_the_current_pass() {
        let dispatcher = Dispatcher::new();
        let late_hits = Arc::new(AtomicUsize::new(0));

        let d = dispatcher.clone();
        let late = counting_action(Arc::clone(&late_hits));
        dispatcher.register_handler(
            Kind::Key,
            HandlerFn::arc(move |_event: Event| {
                let d = d.clone();
                let late = Arc::clone(&late);
                async move {
                    d.register_callback(Kind::Key, late);
                }
            }),
        );

        dispatcher.fire(Event::Key { key: 60, velocity: 100 });
        drain().await;
        assert_eq!(
            late_hits.load(Ordering::SeqCst),
            0,
            "callback registered during the pass must not see the event that caused it"
        );

        dispatcher.fire(Event::Key { key: 62, velocity: 100 });
        drain().await;
        assert_eq!(late_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn panicking_action_does_not_poison_the_dispatcher() {
        let dispatcher = Dispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));

        dispatcher.register_handler(
            Kind::Any,
            HandlerFn::arc(|_event: Event| async move {
                panic!("boom");
            }),
        );
        dispatcher.register_handler(Kind::Any, counting_action(Arc::clone(&hits)));

        dispatcher.fire(Event::Keystroke { key: 1, pressed: true });
        drain().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        // the registry is still usable after the panic
        dispatcher.fire(Event::Keystroke { key: 2, pressed: false });
        drain().await;
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
