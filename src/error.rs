//! Error types used by the dispatch core, sessions, and note parsing.
//!
//! This module defines three error enums:
//!
//! - [`DispatchError`] — failures of registry operations (`await_events`,
//!   `end_gather`).
//! - [`SessionError`] — failures of session orchestration itself.
//! - [`NoteError`] — malformed note text passed to [`Note`](crate::Note)
//!   parsing.
//!
//! Dispatch and session errors provide `as_label`/`as_message` helpers for
//! logging. Buffer overflow is deliberately **not** an error anywhere in this
//! crate: events arriving on a full await/gather buffer are dropped for that
//! entry only.

use std::time::Duration;
use thiserror::Error;

use crate::dispatch::GatherId;

/// # Errors produced by registry operations.
///
/// Both variants are surfaced to the caller immediately and are never retried
/// by the dispatcher.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// `await_events` was asked for zero events.
    ///
    /// Rejected before any registration occurs, so no request state is left
    /// behind.
    #[error("await amount must be positive")]
    InvalidAmount,

    /// `end_gather` was called with an id that is not currently open
    /// (already ended, or never issued by this dispatcher).
    #[error("no open gather session with id {id}")]
    GatherNotFound {
        /// The id that failed to resolve.
        id: GatherId,
    },
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use etude::DispatchError;
    ///
    /// assert_eq!(DispatchError::InvalidAmount.as_label(), "dispatch_invalid_amount");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::InvalidAmount => "dispatch_invalid_amount",
            DispatchError::GatherNotFound { .. } => "dispatch_gather_not_found",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DispatchError::InvalidAmount => "await amount must be positive".to_string(),
            DispatchError::GatherNotFound { id } => {
                format!("gather session {id} is not open")
            }
        }
    }
}

/// # Errors produced by session orchestration.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SessionError {
    /// Shutdown grace period was exceeded; some exercises were still running
    /// when the session gave up waiting.
    #[error("shutdown grace {grace:?} exceeded; some exercises are still running")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },
}

impl SessionError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SessionError::GraceExceeded { .. } => "session_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SessionError::GraceExceeded { grace } => {
                format!("grace exceeded after {grace:?}")
            }
        }
    }
}

/// # Errors produced by note-text parsing.
///
/// Parsing fails fast on the first malformed character; see
/// [`Note`](crate::Note) for the accepted grammar.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    /// The text did not start with a white-note letter `A`–`G`.
    #[error("note name must start with a letter A-G")]
    UnknownNoteName,

    /// A character in the accidental run was neither a sharp nor a flat sign.
    #[error("unrecognized accidental {found:?}")]
    UnknownAccidental {
        /// The offending character.
        found: char,
    },

    /// The octave suffix after `-` was not a decimal number.
    #[error("invalid octave {text:?}")]
    InvalidOctave {
        /// The text that failed to parse as an octave.
        text: String,
    },

    /// The note resolved outside the playable 0–127 range.
    #[error("note {value} is outside the MIDI range 0-127")]
    OutOfRange {
        /// The resolved chromatic value.
        value: i32,
    },
}
