//! # etude
//!
//! **Etude** is the event-dispatch and coordination core of an interactive
//! music-practice engine.
//!
//! Independently scheduled pieces of practice logic ("exercises") react to a
//! shared stream of input events — key presses, note-on/off signals —
//! without polling each other. The crate provides the registry of interest
//! declarations and four delivery modes with deterministic, race-free
//! semantics under a cooperative scheduler.
//!
//! ## Architecture
//! ```text
//!  input collaborator (MIDI poller / keyboard emulator)
//!        │
//!        ▼ fire(Event)                     one locked pass, fixed order
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Dispatcher (registry + broadcast)                                │
//! │  1. callbacks   one-shot, removed on first match                  │
//! │  2. handlers    persistent until cancel(HandlerId)                │
//! │  3. awaits      bounded buffer, quota wait (await_events)         │
//! │  4. gathers     window buffer (begin_gather / end_gather)         │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   spawned action     spawned action    suspended caller resumes /
//!   (new task)         (new task)        window owner drains later
//!
//!  Session::run(exercises)
//!        └──► spawns each Exercise with a child CancellationToken,
//!             shuts down within Config::grace
//! ```
//!
//! Delivery is fan-out: one fired event reaches **every** matching entry
//! independently; it is never claimed exclusively. Await and gather buffers
//! are bounded and drop silently when full — a deliberate backpressure
//! choice favoring forward progress of the dispatcher over completeness of
//! slow consumers.
//!
//! ## Features
//! | Area            | Description                                              | Key types / traits                   |
//! |-----------------|----------------------------------------------------------|--------------------------------------|
//! | **Events**      | Occurrence values and the kind tree used for matching.   | [`Event`], [`Kind`]                  |
//! | **Dispatch**    | Registration, cancellation, broadcast, await/gather.     | [`Dispatcher`], [`HandlerId`], [`GatherId`] |
//! | **Handlers**    | Async reactions, as trait impls or plain closures.       | [`Handler`], [`HandlerFn`], [`HandlerRef`] |
//! | **Sessions**    | Supervised exercises over one dispatcher, graceful stop. | [`Session`], [`Exercise`], [`ExerciseFn`] |
//! | **Notes**       | Pitch parsing/formatting and practice-note generation.   | [`Note`], [`NoteWalk`]               |
//! | **Errors**      | Typed errors for dispatch, sessions, and note parsing.   | [`DispatchError`], [`SessionError`], [`NoteError`] |
//! | **Configuration** | Centralized session settings.                          | [`Config`]                           |
//!
//! ## Example
//! ```no_run
//! use std::time::Duration;
//! use etude::{Config, Dispatcher, DispatchError, Event, ExerciseFn, ExerciseRef, Kind, Session};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::new(Config::default());
//!
//!     // Count key presses for one second, passively.
//!     let count_presses: ExerciseRef = ExerciseFn::arc(
//!         "count-presses",
//!         |dispatcher: Dispatcher, _ctx: CancellationToken| async move {
//!             let window = dispatcher.begin_gather(Kind::Key, 0, |e| e.is_note_on());
//!             tokio::time::sleep(Duration::from_secs(1)).await;
//!             let presses = dispatcher.end_gather(window)?;
//!             println!("{} presses", presses.len());
//!             Ok::<(), DispatchError>(())
//!         },
//!     );
//!
//!     // Stand-in for the device-polling collaborator.
//!     let input = session.clone();
//!     tokio::spawn(async move {
//!         loop {
//!             input.fire(Event::Key { key: 60, velocity: 100 });
//!             tokio::time::sleep(Duration::from_millis(100)).await;
//!         }
//!     });
//!
//!     session.run(vec![count_presses]).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod dispatch;
mod error;
mod events;
mod handlers;
mod notes;
mod session;

// ---- Public re-exports ----

pub use config::Config;
pub use dispatch::{Dispatcher, GatherId, HandlerId};
pub use error::{DispatchError, NoteError, SessionError};
pub use events::{Event, Kind};
pub use handlers::{Handler, HandlerFn, HandlerRef};
pub use notes::{Note, NoteWalk};
pub use session::{Exercise, ExerciseFn, ExerciseRef, Session};
