//! # Chromatic note numbers: parsing, formatting, classification.
//!
//! [`Note`] wraps the MIDI note number (0–127) that key events carry and
//! gives it the small amount of music theory the engine needs: note-name
//! text in both directions, white/black classification for keyboard
//! rendering, and the chromatic→diatonic conversion staff rendering wants.
//!
//! ## Text grammar
//! `<letter> <accidentals> [- <octave>]`, whitespace ignored anywhere:
//! - `letter`: `A`–`G`
//! - `accidentals`: any run of `#`/`♯` (up one semitone) and `b`/`♭` (down)
//! - `octave`: decimal, defaults to 4
//!
//! ```rust
//! use etude::Note;
//!
//! let a4: Note = "A".parse().unwrap();
//! assert_eq!(a4.midi(), 57);
//!
//! let b_flat2: Note = "Bb-2".parse().unwrap();
//! assert_eq!(b_flat2.midi(), 34);
//! assert_eq!(b_flat2.to_string(), "A♯-2");
//! ```
//!
//! Formatting always spells black keys as sharps of the white key below, so
//! parsing a formatted note is lossless even though enharmonic spellings
//! collapse.

use std::fmt;
use std::str::FromStr;

use crate::error::NoteError;

/// White-key letters with their chromatic offsets within one octave.
/// The array position doubles as the diatonic offset (C=0 … B=6).
const WHITE_NOTES: [(char, u8); 7] = [
    ('C', 0),
    ('D', 2),
    ('E', 4),
    ('F', 5),
    ('G', 7),
    ('A', 9),
    ('B', 11),
];

fn chromatic_offset(letter: char) -> Option<u8> {
    WHITE_NOTES
        .iter()
        .find(|&&(name, _)| name == letter)
        .map(|&(_, offset)| offset)
}

/// Diatonic index of a white-key chromatic offset.
fn white_index(offset: u8) -> usize {
    match offset {
        0 => 0,
        2 => 1,
        4 => 2,
        5 => 3,
        7 => 4,
        9 => 5,
        11 => 6,
        _ => unreachable!("not a white-key offset"),
    }
}

/// A chromatic note identified by its MIDI number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Note(pub u8);

impl Note {
    /// The raw MIDI note number.
    pub const fn midi(self) -> u8 {
        self.0
    }

    /// The octave this note sits in (12 semitones each).
    pub const fn octave(self) -> u8 {
        self.0 / 12
    }

    /// True for the seven natural notes of each octave.
    pub fn is_white(self) -> bool {
        WHITE_NOTES.iter().any(|&(_, offset)| offset == self.0 % 12)
    }

    /// True for the five sharps/flats of each octave.
    pub fn is_black(self) -> bool {
        !self.is_white()
    }

    /// Position of this note on a diatonic (seven-note) scale, plus whether
    /// it needs a sharp in front.
    ///
    /// Staff rendering places note heads by diatonic index and draws the
    /// accidental separately, so a black key reports the index of the white
    /// key below it and `true`.
    pub fn diatonic(self) -> (u8, bool) {
        let sharp = self.is_black();
        let chromatic = if sharp { self.0 - 1 } else { self.0 };
        let index = self.octave() * 7 + white_index(chromatic % 12) as u8;
        (index, sharp)
    }

    /// Formats the note with an ASCII `#` instead of the unicode sharp.
    pub fn ascii(self) -> String {
        let (letter, sharp) = self.spelling();
        if sharp {
            format!("{letter}#-{}", self.octave())
        } else {
            format!("{letter}-{}", self.octave())
        }
    }

    /// White-key letter and sharp flag for display.
    fn spelling(self) -> (char, bool) {
        let sharp = self.is_black();
        let chromatic = if sharp { self.0 - 1 } else { self.0 };
        (WHITE_NOTES[white_index(chromatic % 12)].0, sharp)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (letter, sharp) = self.spelling();
        if sharp {
            write!(f, "{letter}♯-{}", self.octave())
        } else {
            write!(f, "{letter}-{}", self.octave())
        }
    }
}

impl FromStr for Note {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars().filter(|c| !c.is_whitespace());

        let letter = chars.next().ok_or(NoteError::UnknownNoteName)?;
        let offset = chromatic_offset(letter).ok_or(NoteError::UnknownNoteName)?;

        let rest: String = chars.collect();
        let (accidentals, octave) = match rest.split_once('-') {
            None => (rest.as_str(), 4),
            Some((accidentals, octave_str)) => {
                let octave = octave_str.parse::<i32>().map_err(|_| NoteError::InvalidOctave {
                    text: octave_str.to_string(),
                })?;
                (accidentals, octave)
            }
        };

        let mut shift = 0i32;
        for ch in accidentals.chars() {
            match ch {
                'b' | '♭' => shift -= 1,
                '#' | '♯' => shift += 1,
                _ => return Err(NoteError::UnknownAccidental { found: ch }),
            }
        }

        let value = octave * 12 + i32::from(offset) + shift;
        if !(0..=127).contains(&value) {
            return Err(NoteError::OutOfRange { value });
        }
        Ok(Note(value as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_spellings() {
        let cases = [
            ("A", 57),
            ("  B      b- 2", 34),
            ("C\nb-3", 35),
            ("G#", 56),
            ("C-0", 0),
            ("F♯-5", 66),
            ("Bbb-4", 57),
        ];
        for (text, midi) in cases {
            assert_eq!(text.parse::<Note>(), Ok(Note(midi)), "parsing {text:?}");
        }
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!("bB".parse::<Note>(), Err(NoteError::UnknownNoteName));
        assert_eq!("".parse::<Note>(), Err(NoteError::UnknownNoteName));
        assert_eq!(
            "A#4".parse::<Note>(),
            Err(NoteError::UnknownAccidental { found: '4' })
        );
        assert_eq!(
            "A-x".parse::<Note>(),
            Err(NoteError::InvalidOctave { text: "x".to_string() })
        );
        assert_eq!("C-11".parse::<Note>(), Err(NoteError::OutOfRange { value: 132 }));
        assert_eq!("Cb-0".parse::<Note>(), Err(NoteError::OutOfRange { value: -1 }));
    }

    #[test]
    fn formats_black_keys_as_sharps() {
        assert_eq!(Note(61).to_string(), "C♯-5");
        assert_eq!(Note(61).ascii(), "C#-5");
        assert_eq!(Note(57).to_string(), "A-4");
        assert_eq!(Note(0).to_string(), "C-0");
    }

    #[test]
    fn formatting_then_parsing_is_lossless() {
        for midi in [0u8, 34, 57, 60, 61, 66, 99, 127] {
            let note = Note(midi);
            assert_eq!(note.to_string().parse::<Note>(), Ok(note));
            assert_eq!(note.ascii().parse::<Note>(), Ok(note));
        }
    }

    #[test]
    fn classifies_white_and_black_keys() {
        assert!(Note(60).is_white()); // C
        assert!(Note(61).is_black()); // C#
        assert!(Note(59).is_white()); // B
        assert!(Note(58).is_black()); // A#
    }

    #[test]
    fn diatonic_index_tracks_the_staff() {
        assert_eq!(Note(60).diatonic(), (35, false)); // C-5
        assert_eq!(Note(61).diatonic(), (35, true)); // C#-5 sits on the C line
        assert_eq!(Note(59).diatonic(), (34, false)); // B-4
        assert_eq!(Note(0).diatonic(), (0, false));
    }
}
