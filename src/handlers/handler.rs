//! # Handler abstraction — the action behind an interest entry.
//!
//! This module defines the [`Handler`] trait (async, fire-and-forget) and the
//! common handle type [`HandlerRef`], an `Arc<dyn Handler>` suitable for
//! storing in the registry and cloning per dispatch.
//!
//! The same contract backs both delivery modes that carry an action:
//! persistent handlers (invoked on every match until cancelled) and one-shot
//! callbacks (invoked at most once). Which mode applies is decided at
//! registration time, not by the action itself.

use async_trait::async_trait;
use std::sync::Arc;

use crate::events::Event;

/// # Asynchronous reaction to a dispatched event.
///
/// Each matching dispatch schedules [`on_event`](Handler::on_event) as a new
/// concurrent task. The body may suspend freely — awaiting further events,
/// sleeping, driving audio output — without blocking the dispatcher or other
/// actions.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use etude::{Event, Handler};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Handler for Echo {
///     async fn on_event(&self, event: Event) {
///         println!("saw {event:?}");
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Reacts to a single dispatched event.
    ///
    /// Runs as its own task; a panic in the body is caught and logged by the
    /// dispatcher rather than propagated.
    async fn on_event(&self, event: Event);
}

/// Shared handle to a handler action (`Arc<dyn Handler>`).
pub type HandlerRef = Arc<dyn Handler>;
