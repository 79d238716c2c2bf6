//! # Demo: note_quiz
//!
//! One round of the "play the keys you hear" quiz, with a simulated player
//! standing in for real MIDI hardware.
//!
//! Shows how to:
//! - Generate a short phrase with [`NoteWalk`].
//! - Suspend an exercise on [`Dispatcher::await_events`] until the next
//!   key press arrives.
//! - Drive a [`Session`] to completion without an explicit shutdown.
//!
//! ## Flow
//! ```text
//! main ──► Session::run(vec![quiz])
//!   │            └─► quiz: "plays" the phrase, then per note:
//!   │                  await_events(Kind::Key, 1, note-on) ─► score it
//!   └──► spawned player: fires Event::Key presses on a timer
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example note_quiz
//! ```

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use etude::{
    Config, DispatchError, Dispatcher, Event, ExerciseFn, ExerciseRef, Kind, Note, NoteWalk,
    Session,
};

const PHRASE_LENGTH: usize = 3;

/// The quiz: play the phrase back to the user, then grade one key press per
/// expected note.
fn quiz(phrase: Vec<Note>) -> ExerciseRef {
    ExerciseFn::arc("note-quiz", move |dispatcher: Dispatcher, _ctx: CancellationToken| {
        let phrase = phrase.clone();
        async move {
            println!("Play the keys you hear!");
            for note in &phrase {
                println!("  (playing {})", note.ascii());
                tokio::time::sleep(Duration::from_millis(300)).await;
            }

            let mut correct = 0;
            for note in &phrase {
                let events = dispatcher
                    .await_events(Kind::Key, 1, |e| e.is_note_on())
                    .await?;
                let played = match events[0] {
                    Event::Key { key, .. } => Note(key),
                    other => unreachable!("await on Kind::Key returned {other:?}"),
                };

                if played == *note {
                    println!("  correct! ({})", note.ascii());
                    correct += 1;
                } else {
                    println!(
                        "  wrong. expected {}, played {}",
                        note.ascii(),
                        played.ascii()
                    );
                }
            }

            println!("{correct}/{} this round", phrase.len());
            Ok::<(), DispatchError>(())
        }
    })
}

/// Simulated player: waits for the phrase playback, then presses one key per
/// expected note — flubbing the second one.
fn spawn_player(session: &Session, phrase: Vec<Note>) {
    let input = session.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300 * PHRASE_LENGTH as u64 + 200)).await;

        for (i, note) in phrase.iter().enumerate() {
            let key = if i == 1 {
                note.midi().saturating_add(1)
            } else {
                note.midi()
            };
            input.fire(Event::Key { key, velocity: 100 });
            tokio::time::sleep(Duration::from_millis(50)).await;
            input.fire(Event::Key { key, velocity: 0 });
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    });
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base: Note = "C".parse()?;
    let phrase: Vec<Note> = NoteWalk::new(base, 12).take(PHRASE_LENGTH).collect();

    let session = Session::new(Config::default());
    spawn_player(&session, phrase.clone());
    session.run(vec![quiz(phrase)]).await?;

    Ok(())
}
