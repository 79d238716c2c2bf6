//! # Demo: trill_count
//!
//! Timed trill rounds over a gather window, with a simulated pair of hands
//! hammering two keys.
//!
//! Shows how to:
//! - Arm a one-shot [`Dispatcher::register_callback`] that announces the
//!   first key press of the run.
//! - Open a passive [`Dispatcher::begin_gather`] window, sleep, and drain it
//!   with [`Dispatcher::end_gather`].
//! - Filter buffered events down to the two trill keys.
//!
//! ## Flow
//! ```text
//! main ──► Session::run(vec![trill_rounds])
//!   │            └─► per round: begin_gather ─► sleep ─► end_gather ─► count
//!   └──► spawned hands: alternate C/D presses, plus stray other keys
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example trill_count
//! ```

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use etude::{
    Config, DispatchError, Dispatcher, Event, ExerciseFn, ExerciseRef, HandlerFn, Kind, Note,
    Session,
};

const ROUNDS: usize = 2;
const ROUND_TIME: Duration = Duration::from_secs(2);

/// Runs `ROUNDS` trill rounds between the two given keys.
fn trill_rounds(low: Note, high: Note) -> ExerciseRef {
    ExerciseFn::arc(
        "trill-rounds",
        move |dispatcher: Dispatcher, _ctx: CancellationToken| async move {
            dispatcher.register_callback(
                Kind::Key,
                HandlerFn::arc(|_event: Event| async move {
                    println!("  (first key heard, go!)");
                }),
            );

            for round in 1..=ROUNDS {
                println!(
                    "Round {round}: trill {} and {} for {:?}!",
                    low.ascii(),
                    high.ascii(),
                    ROUND_TIME
                );

                let window = dispatcher.begin_gather(Kind::Key, 0, move |e| {
                    e.is_note_on()
                        && matches!(e, Event::Key { key, .. }
                            if *key == low.midi() || *key == high.midi())
                });
                tokio::time::sleep(ROUND_TIME).await;
                let hits = dispatcher.end_gather(window)?;

                println!("  you hit {} keys", hits.len());
            }

            Ok::<(), DispatchError>(())
        },
    )
}

/// Simulated hands: alternate the two trill keys with an occasional stray
/// key the filter must ignore.
fn spawn_hands(session: &Session, low: Note, high: Note) {
    let input = session.clone();
    tokio::spawn(async move {
        let mut beat = 0u32;
        loop {
            let key = match beat % 5 {
                4 => 96, // stray key outside the trill
                n if n % 2 == 0 => low.midi(),
                _ => high.midi(),
            };
            input.fire(Event::Key { key, velocity: 110 });
            input.fire(Event::Key { key, velocity: 0 });

            beat += 1;
            tokio::time::sleep(Duration::from_millis(120)).await;
        }
    });
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let low: Note = "C".parse()?;
    let high: Note = "D".parse()?;

    let session = Session::new(Config::default());
    spawn_hands(&session, low, high);
    session.run(vec![trill_rounds(low, high)]).await?;

    Ok(())
}
