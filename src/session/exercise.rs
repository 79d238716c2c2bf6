//! # Exercise abstraction — a supervised piece of reactive practice logic.
//!
//! An exercise is the unit a [`Session`](crate::Session) runs: straight-line
//! async code that registers interest in events, awaits or gathers them, and
//! drives whatever feedback the practice routine needs. It receives the
//! session's dispatcher and a [`CancellationToken`] and should check the
//! token at natural pause points so shutdown stays prompt.

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::dispatch::Dispatcher;
use crate::error::DispatchError;

/// # Asynchronous, cancelable practice routine.
///
/// An `Exercise` has a stable [`name`](Exercise::name) and an async
/// [`run`](Exercise::run) method. `run` is invoked once per
/// [`Session::run`](crate::Session::run); reacting repeatedly is done by
/// looping inside it or by registering persistent handlers.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use etude::{Dispatcher, DispatchError, Exercise, Kind};
/// use tokio_util::sync::CancellationToken;
///
/// struct FirstPress;
///
/// #[async_trait]
/// impl Exercise for FirstPress {
///     fn name(&self) -> &str { "first-press" }
///
///     async fn run(
///         &self,
///         dispatcher: Dispatcher,
///         ctx: CancellationToken,
///     ) -> Result<(), DispatchError> {
///         tokio::select! {
///             _ = ctx.cancelled() => Ok(()),
///             pressed = dispatcher.await_events(Kind::Key, 1, |e| e.is_note_on()) => {
///                 println!("first press: {:?}", pressed?);
///                 Ok(())
///             }
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Exercise: Send + Sync + 'static {
    /// Returns a stable, human-readable exercise name (for logs).
    fn name(&self) -> &str;

    /// Executes the exercise until completion or cancellation.
    ///
    /// Implementations should watch `ctx` and exit promptly during shutdown;
    /// an exercise that ignores it risks the session's grace period.
    async fn run(
        &self,
        dispatcher: Dispatcher,
        ctx: CancellationToken,
    ) -> Result<(), DispatchError>;
}

/// Shared handle to an exercise (`Arc<dyn Exercise>`).
pub type ExerciseRef = Arc<dyn Exercise>;
