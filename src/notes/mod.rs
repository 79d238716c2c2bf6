//! # Note theory helpers.
//!
//! The small amount of pitch arithmetic the engine and its exercises need:
//! - [`Note`] — MIDI note number with parsing, formatting, white/black
//!   classification and diatonic conversion
//! - [`NoteWalk`] — bounded random-walk generator for practice sequences
//!
//! Device I/O stays with the collaborators; everything here is pure.

mod note;
mod walk;

pub use note::Note;
pub use walk::NoteWalk;
