//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(Event) -> Fut`, producing a fresh
//! future per dispatch. Each invocation owns its state; shared state across
//! invocations must be captured explicitly (e.g. an `Arc`) inside the
//! closure.
//!
//! ## Example
//! ```rust
//! use etude::{Event, HandlerFn, HandlerRef};
//!
//! let echo: HandlerRef = HandlerFn::arc(|event: Event| async move {
//!     println!("saw {event:?}");
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::events::Event;
use crate::handlers::handler::Handler;

/// Function-backed handler implementation.
///
/// Wraps a closure that *creates* a new future per dispatch.
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a [`HandlerRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn on_event(&self, event: Event) {
        (self.f)(event).await;
    }
}
