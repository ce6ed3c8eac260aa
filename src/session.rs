//! # Session
//!
//! Selection state for one user browsing progression voicings.
//!
//! The session owns what the user has picked (key, progression, selected
//! chord, selected voicing) and the voicings derived from it. Everything
//! derived is rebuilt from scratch whenever the key or the progression
//! changes; nothing is patched in place.
//!
//! ## State After a Change
//! | operation          | chords   | voicing set | chord index | voicing index |
//! |--------------------|----------|-------------|-------------|---------------|
//! | `set_key`          | resolved | rebuilt     | `None`      | `0`           |
//! | `set_progression`  | resolved | rebuilt     | `None`      | `0`           |
//! | `select_chord`     | -        | -           | given       | -             |
//! | `next/previous`    | -        | -           | -           | cycles        |
//!
//! ## Example
//! ```rust
//! use chordvoice::{Config, Session};
//!
//! let mut session = Session::new(Config::default());
//! session.set_progression(&["I", "V", "vi", "IV"]);
//! session.select_chord(Some(2));
//!
//! let notes = session.current_chord_note_list(2);
//! assert_eq!(notes.len(), 3);
//! assert!(!session.current_highlighted_pitches().is_empty());
//! ```

use crate::chord::ChordSymbol;
use crate::config::Config;
use crate::error::VoicingError;
use crate::keyboard::{Keyboard, KeyboardKey};
use crate::pitch::Pitch;
use crate::progression::{build_voicing_set, ProgressionVoicingSet};
use crate::roman::{resolve_progression, Key};
use crate::voice_leading::{TopNoteDiff, VoiceLeading};
use crate::voicing::Voicing;

pub struct Session {
    config: Config,
    keyboard: Keyboard,
    cost: Box<dyn VoiceLeading>,
    degrees: Vec<String>,
    chords: Vec<ChordSymbol>,
    voicings: ProgressionVoicingSet,
    current_chord: Option<usize>,
    current_voicing: usize,
}

impl Session {
    /// Start with the configured key, no progression, and top-note voice leading
    pub fn new(config: Config) -> Self {
        Session {
            keyboard: Keyboard::new(config.display_range),
            config,
            cost: Box::new(TopNoteDiff),
            degrees: Vec::new(),
            chords: Vec::new(),
            voicings: Vec::new(),
            current_chord: None,
            current_voicing: 0,
        }
    }

    /// Replace the continuity cost and rebuild
    pub fn with_voice_leading(mut self, cost: impl VoiceLeading + 'static) -> Self {
        self.cost = Box::new(cost);
        self.regenerate();
        self
    }

    pub fn key(&self) -> Key {
        self.config.key
    }

    /// Change the key by name. On error the session is left untouched.
    pub fn set_key(&mut self, key: &str) -> Result<(), VoicingError> {
        self.config.key = Key::parse(key)?;
        self.regenerate();
        Ok(())
    }

    /// Replace the progression with new degree symbols
    pub fn set_progression<S: AsRef<str>>(&mut self, degrees: &[S]) {
        self.degrees = degrees.iter().map(|d| d.as_ref().to_string()).collect();
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.chords = resolve_progression(self.degrees.as_slice(), &self.config.key);
        self.voicings = build_voicing_set(
            &self.chords,
            &self.config.search_range,
            &self.config.dictionary,
            self.cost.as_ref(),
        );
        self.current_chord = None;
        self.current_voicing = 0;

        if !self.chords.is_empty() {
            let names: Vec<&str> = self.chords.iter().map(ChordSymbol::name).collect();
            log::info!(
                "key {}: [{}] -> {} progression voicings",
                self.config.key,
                names.join(", "),
                self.voicings.len()
            );
        }
    }

    /// Select a chord for display, or clear the selection with `None`.
    ///
    /// An index past the end of the progression selects nothing visible.
    pub fn select_chord(&mut self, index: Option<usize>) {
        self.current_chord = index;
    }

    /// Advance to the next progression voicing, wrapping to the first
    pub fn next_voicing_set(&mut self) {
        if !self.voicings.is_empty() {
            self.current_voicing = (self.current_voicing + 1) % self.voicings.len();
        }
    }

    /// Step back to the previous progression voicing, wrapping to the last
    pub fn previous_voicing_set(&mut self) {
        if !self.voicings.is_empty() {
            self.current_voicing = match self.current_voicing {
                0 => self.voicings.len() - 1,
                i => i - 1,
            };
        }
    }

    /// Keys lit for the selected chord in the current progression voicing
    pub fn current_highlighted_pitches(&self) -> Vec<KeyboardKey> {
        let voicing = self.current_chord.and_then(|i| self.voicing_for(i));
        self.keyboard.highlight(voicing)
    }

    /// Pitches of chord `index` in the current progression voicing, low to high
    pub fn current_chord_note_list(&self, index: usize) -> Vec<Pitch> {
        self.voicing_for(index)
            .map(|v| v.pitches().to_vec())
            .unwrap_or_default()
    }

    /// The whole keyboard with the selected chord lit
    pub fn keyboard_keys(&self) -> Vec<KeyboardKey> {
        let lit: Vec<i32> = self
            .current_highlighted_pitches()
            .iter()
            .map(|k| k.midi_note)
            .collect();
        self.keyboard.keys(&lit)
    }

    fn voicing_for(&self, index: usize) -> Option<&Voicing> {
        self.voicings.get(self.current_voicing)?.get(index)
    }

    pub fn degrees(&self) -> &[String] {
        &self.degrees
    }

    pub fn chord_symbols(&self) -> &[ChordSymbol] {
        &self.chords
    }

    pub fn voicing_set(&self) -> &ProgressionVoicingSet {
        &self.voicings
    }

    pub fn voicing_count(&self) -> usize {
        self.voicings.len()
    }

    pub fn current_voicing_index(&self) -> usize {
        self.current_voicing
    }

    pub fn current_chord_index(&self) -> Option<usize> {
        self.current_chord
    }

    /// `"Voicing 2 of 5"`, or `None` when there are no voicings
    pub fn voicing_label(&self) -> Option<String> {
        if self.voicings.is_empty() {
            return None;
        }
        Some(format!(
            "Voicing {} of {}",
            self.current_voicing + 1,
            self.voicings.len()
        ))
    }
}

/// Render pitches as sharp-spelled names for text display
pub fn format_note_list(pitches: &[Pitch]) -> String {
    if pitches.is_empty() {
        return "No notes available".to_string();
    }
    pitches
        .iter()
        .map(|p| Pitch::from_midi(p.midi(), true).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
