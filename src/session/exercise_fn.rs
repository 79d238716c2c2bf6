//! # Function-backed exercise (`ExerciseFn`)
//!
//! [`ExerciseFn`] wraps a closure `F: Fn(Dispatcher, CancellationToken) ->
//! Fut`, producing a fresh future per run. Shared state across runs must be
//! captured explicitly (e.g. an `Arc`) inside the closure.
//!
//! ## Example
//! ```rust
//! use etude::{Dispatcher, DispatchError, ExerciseFn, ExerciseRef, Kind};
//! use tokio_util::sync::CancellationToken;
//!
//! let listen: ExerciseRef = ExerciseFn::arc(
//!     "listen",
//!     |dispatcher: Dispatcher, ctx: CancellationToken| async move {
//!         if ctx.is_cancelled() {
//!             return Ok(());
//!         }
//!         let events = dispatcher.await_events(Kind::Key, 1, |_| true).await?;
//!         println!("heard {events:?}");
//!         Ok::<_, DispatchError>(())
//!     },
//! );
//!
//! assert_eq!(listen.name(), "listen");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::dispatch::Dispatcher;
use crate::error::DispatchError;
use crate::session::exercise::Exercise;

/// Function-backed exercise implementation.
///
/// Wraps a closure that *creates* a new future per run.
#[derive(Debug)]
pub struct ExerciseFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ExerciseFn<F> {
    /// Creates a new function-backed exercise.
    ///
    /// Prefer [`ExerciseFn::arc`] when you immediately need an
    /// [`ExerciseRef`](crate::ExerciseRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the exercise and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Exercise for ExerciseFn<F>
where
    F: Fn(Dispatcher, CancellationToken) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), DispatchError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(
        &self,
        dispatcher: Dispatcher,
        ctx: CancellationToken,
    ) -> Result<(), DispatchError> {
        (self.f)(dispatcher, ctx).await
    }
}
