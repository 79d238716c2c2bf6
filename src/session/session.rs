//! # Session: couples one dispatcher with supervised exercises.
//!
//! A [`Session`] is the runtime surface an interactive program lives on: it
//! owns the [`Dispatcher`] every collaborator fires into, spawns the
//! exercises that react, and performs graceful shutdown.
//!
//! ## High-level architecture
//! ```text
//! Inputs to run():
//!   Vec<ExerciseRef> ──► Session::run(exercises)
//!
//! Spawn exercises:
//!   Exercise[0]   Exercise[1]  ...  Exercise[N-1]
//!       │             │                  │
//!       └──► set.spawn(exercise.run(dispatcher.clone(), child_token))
//!                      └──► child = token.child_token()  (one per exercise)
//!
//! Event flow:
//!   input collaborator ── Session::fire ──► Dispatcher ──► matching entries
//!
//! Shutdown path:
//!   Session::shutdown() ──► token.cancel() → propagates to child tokens
//!       └─► wait_all_with_grace(cfg.grace):
//!              ├─ all joined in time → Ok(())
//!              └─ timeout            → Err(SessionError::GraceExceeded)
//! ```
//!
//! ## Rules
//! - `run` returns on its own once every exercise finishes; `shutdown` is
//!   only needed to stop exercises that loop forever.
//! - Panics inside an exercise are caught and logged; they never take the
//!   session down.
//! - The handle is cheap to clone; a clone can drive `shutdown`/`fire`
//!   while another runs.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::SessionError;
use crate::events::Event;
use crate::session::exercise::ExerciseRef;

/// Coordinates one dispatcher instance and the exercises reacting to it.
///
/// ## Example
/// ```no_run
/// use std::time::Duration;
/// use etude::{Config, Dispatcher, DispatchError, Event, ExerciseFn, ExerciseRef, Kind, Session};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), etude::SessionError> {
///     let session = Session::new(Config::default());
///
///     let echo: ExerciseRef = ExerciseFn::arc(
///         "echo",
///         |dispatcher: Dispatcher, ctx: CancellationToken| async move {
///             tokio::select! {
///                 _ = ctx.cancelled() => Ok(()),
///                 heard = dispatcher.await_events(Kind::Key, 1, |_| true) => {
///                     println!("heard {:?}", heard?);
///                     Ok::<(), DispatchError>(())
///                 }
///             }
///         },
///     );
///
///     // stand-in for the device-polling collaborator
///     let input = session.clone();
///     tokio::spawn(async move {
///         tokio::time::sleep(Duration::from_millis(100)).await;
///         input.fire(Event::Key { key: 60, velocity: 100 });
///     });
///
///     session.run(vec![echo]).await
/// }
/// ```
#[derive(Clone)]
pub struct Session {
    cfg: Config,
    dispatcher: Dispatcher,
    token: CancellationToken,
}

impl Session {
    /// Creates a session with a fresh dispatcher and its own id space.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            dispatcher: Dispatcher::new(),
            token: CancellationToken::new(),
        }
    }

    /// The dispatcher every collaborator of this session shares.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Forwards one input occurrence to the dispatcher.
    ///
    /// Shorthand for `session.dispatcher().fire(event)`, for collaborators
    /// that only hold the session handle.
    pub fn fire(&self, event: Event) {
        self.dispatcher.fire(event);
    }

    /// Requests shutdown: cancels every exercise's token.
    ///
    /// `run` then waits up to [`Config::grace`] for the exercises to finish.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Runs the provided exercises until either:
    /// - all of them exit on their own, or
    /// - [`shutdown`](Session::shutdown) is called → graceful stop (may end
    ///   with [`SessionError::GraceExceeded`]).
    pub async fn run(&self, exercises: Vec<ExerciseRef>) -> Result<(), SessionError> {
        let mut set = JoinSet::new();
        for exercise in exercises {
            self.spawn_exercise(&mut set, exercise);
        }

        tokio::select! {
            _ = self.token.cancelled() => self.wait_all_with_grace(&mut set).await,
            _ = async { while set.join_next().await.is_some() {} } => Ok(()),
        }
    }

    /// Spawns one exercise with its own child token and panic isolation.
    fn spawn_exercise(&self, set: &mut JoinSet<()>, exercise: ExerciseRef) {
        let dispatcher = self.dispatcher.clone();
        let child = self.token.child_token();
        set.spawn(async move {
            let name = exercise.name().to_string();
            let fut = exercise.run(dispatcher, child);
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(())) => log::debug!("exercise '{name}' finished"),
                Ok(Err(err)) => {
                    log::error!("exercise '{name}' failed: {}", err.as_message());
                }
                Err(panic) => log::error!("exercise '{name}' panicked: {panic:?}"),
            }
        });
    }

    /// Waits for all exercises to finish within the configured grace period.
    async fn wait_all_with_grace(&self, set: &mut JoinSet<()>) -> Result<(), SessionError> {
        let grace = self.cfg.grace;
        let done = async { while set.join_next().await.is_some() {} };

        match tokio::time::timeout(grace, done).await {
            Ok(_) => Ok(()),
            Err(_) => Err(SessionError::GraceExceeded { grace }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Kind;
    use crate::session::exercise_fn::ExerciseFn;
    use std::time::Duration;

    use crate::error::DispatchError;

    fn idle(name: &'static str) -> ExerciseRef {
        ExerciseFn::arc(name, |_dispatcher: Dispatcher, _ctx: CancellationToken| async move {
            Ok::<(), DispatchError>(())
        })
    }

    #[tokio::test]
    async fn run_returns_once_every_exercise_finishes() {
        let session = Session::new(Config::default());
        assert!(session.run(vec![idle("quick"), idle("quicker")]).await.is_ok());
    }

    #[tokio::test]
    async fn exercises_receive_events_through_the_session_dispatcher() {
        let session = Session::new(Config::default());

        let listen: ExerciseRef = ExerciseFn::arc(
            "listen",
            |dispatcher: Dispatcher, _ctx: CancellationToken| async move {
                let events = dispatcher.await_events(Kind::Key, 1, |_| true).await?;
                assert_eq!(events, vec![Event::Key { key: 60, velocity: 100 }]);
                Ok::<(), DispatchError>(())
            },
        );

        let runner = session.clone();
        let running = tokio::spawn(async move { runner.run(vec![listen]).await });

        while session.dispatcher().registry().awaits.is_empty() {
            tokio::task::yield_now().await;
        }
        session.fire(Event::Key { key: 60, velocity: 100 });

        assert!(running.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn shutdown_cancels_cooperative_exercises_within_grace() {
        let session = Session::new(Config {
            grace: Duration::from_secs(1),
        });

        let forever: ExerciseRef = ExerciseFn::arc(
            "forever",
            |_dispatcher: Dispatcher, ctx: CancellationToken| async move {
                ctx.cancelled().await;
                Ok::<(), DispatchError>(())
            },
        );

        let runner = session.clone();
        let running = tokio::spawn(async move { runner.run(vec![forever]).await });
        tokio::task::yield_now().await;

        session.shutdown();
        assert!(running.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn stuck_exercise_exceeds_grace() {
        let session = Session::new(Config {
            grace: Duration::from_millis(20),
        });

        let stuck: ExerciseRef = ExerciseFn::arc(
            "stuck",
            |_dispatcher: Dispatcher, _ctx: CancellationToken| async move {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<(), DispatchError>(())
            },
        );

        let runner = session.clone();
        let running = tokio::spawn(async move { runner.run(vec![stuck]).await });
        tokio::task::yield_now().await;

        session.shutdown();
        let err = running.await.unwrap().unwrap_err();
        assert_eq!(err.as_label(), "session_grace_exceeded");
    }

    #[tokio::test]
    async fn panicking_exercise_does_not_take_down_the_session() {
        let session = Session::new(Config::default());

        let bad: ExerciseRef = ExerciseFn::arc(
            "bad",
            |_dispatcher: Dispatcher, _ctx: CancellationToken| async move {
                if true {
                    panic!("boom");
                }
                Ok::<(), DispatchError>(())
            },
        );

        assert!(session.run(vec![bad, idle("good")]).await.is_ok());
    }
}
