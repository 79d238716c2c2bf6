//! # Input events and the kind tree used for matching.
//!
//! [`Event`] is an immutable occurrence value fed into the dispatcher by the
//! input collaborator (MIDI poller, keyboard emulator). [`Kind`] classifies
//! events into a small fixed tree so that interest declarations can match a
//! whole family of events at once:
//!
//! ```text
//! Any ── Midi ── Key           note toggled on a MIDI-like device
//!    └── Keystroke             raw computer-keyboard key
//! ```
//!
//! ## Matching rule
//! An interest declared for kind `K` matches an incoming event of kind `E`
//! iff `E` is `K` or a descendant of `K`. `Any` and `Midi` are interest-only
//! nodes; events always carry one of the leaf kinds.
//!
//! ## Example
//! ```rust
//! use etude::{Event, Kind};
//!
//! let ev = Event::Key { key: 60, velocity: 100 };
//!
//! assert!(Kind::Any.matches(&ev));
//! assert!(Kind::Midi.matches(&ev));
//! assert!(Kind::Key.matches(&ev));
//! assert!(!Kind::Keystroke.matches(&ev));
//! ```

/// Node in the event-kind tree.
///
/// The tree is fixed at compile time; each node knows its ancestor chain, so
/// matching is a tag comparison plus a slice lookup — no downcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Root of the tree: matches every event.
    Any,
    /// Any MIDI-like occurrence. Interest-only; events never carry this kind.
    Midi,
    /// A key toggled with velocity on a MIDI-like device.
    Key,
    /// A raw keystroke from the computer keyboard.
    Keystroke,
}

impl Kind {
    /// Returns the strict ancestors of this kind, nearest first.
    pub const fn ancestors(self) -> &'static [Kind] {
        match self {
            Kind::Any => &[],
            Kind::Midi => &[Kind::Any],
            Kind::Key => &[Kind::Midi, Kind::Any],
            Kind::Keystroke => &[Kind::Any],
        }
    }

    /// True iff `event` is of this kind or a descendant of it.
    pub fn matches(self, event: &Event) -> bool {
        let concrete = event.kind();
        self == concrete || concrete.ancestors().contains(&self)
    }
}

/// An immutable input occurrence.
///
/// Constructed by whichever collaborator owns device polling and handed to
/// [`Dispatcher::fire`](crate::Dispatcher::fire) once per occurrence. Events
/// are small `Copy` values; every matching interest entry receives its own
/// copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key toggled on a MIDI-like device.
    ///
    /// `velocity == 0` is the conventional note-off; filters that only care
    /// about presses can use [`Event::is_note_on`].
    Key {
        /// MIDI note number (0–127).
        key: u8,
        /// Strike velocity; `0` means the key was released.
        velocity: u8,
    },
    /// A raw key on the computer keyboard went down or up.
    Keystroke {
        /// Platform keycode.
        key: u32,
        /// True on press, false on release.
        pressed: bool,
    },
}

impl Event {
    /// The concrete kind of this event (always a leaf of the tree).
    pub const fn kind(&self) -> Kind {
        match self {
            Event::Key { .. } => Kind::Key,
            Event::Keystroke { .. } => Kind::Keystroke,
        }
    }

    /// True for a [`Event::Key`] with non-zero velocity.
    pub const fn is_note_on(&self) -> bool {
        matches!(self, Event::Key { velocity, .. } if *velocity > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_matches_whole_ancestor_chain() {
        let ev = Event::Key { key: 60, velocity: 64 };
        assert!(Kind::Key.matches(&ev));
        assert!(Kind::Midi.matches(&ev));
        assert!(Kind::Any.matches(&ev));
    }

    #[test]
    fn keystroke_event_skips_the_midi_branch() {
        let ev = Event::Keystroke { key: 27, pressed: true };
        assert!(Kind::Keystroke.matches(&ev));
        assert!(Kind::Any.matches(&ev));
        assert!(!Kind::Midi.matches(&ev));
        assert!(!Kind::Key.matches(&ev));
    }

    #[test]
    fn sibling_leaves_never_match_each_other() {
        let key = Event::Key { key: 60, velocity: 64 };
        let stroke = Event::Keystroke { key: 13, pressed: false };
        assert!(!Kind::Keystroke.matches(&key));
        assert!(!Kind::Key.matches(&stroke));
    }

    #[test]
    fn note_on_requires_velocity() {
        assert!(Event::Key { key: 60, velocity: 1 }.is_note_on());
        assert!(!Event::Key { key: 60, velocity: 0 }.is_note_on());
        assert!(!Event::Keystroke { key: 60, pressed: true }.is_note_on());
    }
}
