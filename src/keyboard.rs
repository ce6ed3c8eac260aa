//! # Keyboard Mapping
//!
//! Maps pitches onto a fixed-range piano keyboard for display.
//!
//! The display range is independent of the search range: by default the
//! keyboard spans three octaves (`C3..B5`) while voicings are searched in
//! `C3..C5`. Pitches outside the keyboard are simply not shown.
//!
//! Keys are named with sharps (`C#4`, never `Db4`); any key whose name carries
//! an accidental is black.
//!
//! ## Example
//! ```rust
//! use chordvoice::{Keyboard, Voicing};
//!
//! let keyboard = Keyboard::default();
//! let voicing = Voicing::new(vec!["A3".parse()?, "C4".parse()?, "E4".parse()?]);
//! let lit: Vec<String> = keyboard.highlight(Some(&voicing)).into_iter().map(|k| k.name).collect();
//! assert_eq!(lit, vec!["A3", "C4", "E4"]);
//! # Ok::<(), chordvoice::VoicingError>(())
//! ```

use serde::Serialize;

use crate::pitch::{Note, NoteName, Pitch, PitchRange};
use crate::voicing::Voicing;

/// One piano key as handed to a display sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardKey {
    pub midi_note: i32,
    /// Sharp spelling, e.g. `"F#3"`
    pub name: String,
    /// 0..11, C = 0
    pub pitch_class: u8,
    pub octave: i32,
    pub is_black: bool,
    pub is_active: bool,
}

impl KeyboardKey {
    fn new(midi: i32, is_active: bool) -> Self {
        let pitch = Pitch::from_midi(midi, true);
        KeyboardKey {
            midi_note: midi,
            name: pitch.to_string(),
            pitch_class: midi.rem_euclid(12) as u8,
            octave: pitch.octave,
            is_black: pitch.note.alter != 0,
            is_active,
        }
    }
}

/// A contiguous run of piano keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyboard {
    pub range: PitchRange,
}

impl Default for Keyboard {
    /// Three octaves, `C3..B5`
    fn default() -> Self {
        Keyboard {
            range: PitchRange {
                low: Pitch::new(Note::new(NoteName::C, 0), 3),
                high: Pitch::new(Note::new(NoteName::B, 0), 5),
            },
        }
    }
}

impl Keyboard {
    pub fn new(range: PitchRange) -> Self {
        Keyboard { range }
    }

    /// Every key on the keyboard, low to high, with `highlighted` MIDI notes active
    pub fn keys(&self, highlighted: &[i32]) -> Vec<KeyboardKey> {
        self.range
            .midi_notes()
            .map(|midi| KeyboardKey::new(midi, highlighted.contains(&midi)))
            .collect()
    }

    /// Only the keys a voicing lights up. Empty for `None` or an empty voicing.
    pub fn highlight(&self, voicing: Option<&Voicing>) -> Vec<KeyboardKey> {
        let Some(voicing) = voicing else {
            return Vec::new();
        };
        voicing
            .midi_notes()
            .into_iter()
            .filter(|&midi| self.range.contains_midi(midi))
            .map(|midi| KeyboardKey::new(midi, true))
            .collect()
    }

    /// Number of keys on the keyboard
    pub fn len(&self) -> usize {
        self.range.midi_notes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voicing(names: &[&str]) -> Voicing {
        Voicing::new(names.iter().map(|n| n.parse().unwrap()).collect())
    }

    #[test]
    fn test_default_keyboard_spans_three_octaves() {
        let keyboard = Keyboard::default();
        let keys = keyboard.keys(&[]);
        assert_eq!(keys.len(), 36);
        assert_eq!(keys[0].name, "C3");
        assert_eq!(keys[0].midi_note, 48);
        assert_eq!(keys[35].name, "B5");
        assert_eq!(keys.iter().filter(|k| k.is_black).count(), 15);
        assert!(keys.iter().all(|k| !k.is_active));
    }

    #[test]
    fn test_key_classification() {
        let keys = Keyboard::default().keys(&[]);
        let c_sharp = &keys[1];
        assert_eq!(c_sharp.name, "C#3");
        assert_eq!(c_sharp.pitch_class, 1);
        assert_eq!(c_sharp.octave, 3);
        assert!(c_sharp.is_black);
        assert!(!keys[4].is_black); // E3
    }

    #[test]
    fn test_flat_spelled_pitches_light_sharp_keys() {
        let lit = Keyboard::default().highlight(Some(&voicing(&["Ab3", "C4", "Eb4"])));
        let names: Vec<_> = lit.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["G#3", "C4", "D#4"]);
        assert!(lit.iter().all(|k| k.is_active));
        assert!(lit[0].is_black);
    }

    #[test]
    fn test_out_of_display_range_is_hidden() {
        let lit = Keyboard::default().highlight(Some(&voicing(&["A2", "C3", "C6"])));
        assert_eq!(lit.len(), 1);
        assert_eq!(lit[0].name, "C3");
    }

    #[test]
    fn test_empty_selection() {
        assert!(Keyboard::default().highlight(None).is_empty());
        assert!(Keyboard::default().highlight(Some(&Voicing::new(vec![]))).is_empty());
    }

    #[test]
    fn test_keys_marks_active() {
        let keys = Keyboard::default().keys(&[60, 64, 67]);
        let active: Vec<_> = keys.iter().filter(|k| k.is_active).map(|k| k.midi_note).collect();
        assert_eq!(active, vec![60, 64, 67]);
    }
}
