//! Continuity costs between consecutive voicings.
//!
//! Lower is smoother. The sequencer only ever compares costs, so any
//! non-negative measure works; closures can be passed directly:
//!
//! ```rust
//! use chordvoice::{TopNoteDiff, VoiceLeading, Voicing};
//!
//! let low: Voicing = Voicing::new(vec!["C4".parse()?, "E4".parse()?, "G4".parse()?]);
//! let high: Voicing = Voicing::new(vec!["E4".parse()?, "G4".parse()?, "C5".parse()?]);
//! assert_eq!(TopNoteDiff.cost(&low, &high), 5.0);
//!
//! let bass_motion = |a: &Voicing, b: &Voicing| {
//!     (a.midi_notes()[0] - b.midi_notes()[0]).abs() as f64
//! };
//! assert_eq!(bass_motion.cost(&low, &high), 4.0);
//! # Ok::<(), chordvoice::VoicingError>(())
//! ```

use crate::voicing::Voicing;

/// A cost function from (previous voicing, candidate voicing) to a real number.
pub trait VoiceLeading {
    fn cost(&self, previous: &Voicing, candidate: &Voicing) -> f64;
}

/// Absolute semitone distance between the two top notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopNoteDiff;

impl VoiceLeading for TopNoteDiff {
    fn cost(&self, previous: &Voicing, candidate: &Voicing) -> f64 {
        let top = |v: &Voicing| v.top().map(|p| p.midi()).unwrap_or(0);
        (top(previous) - top(candidate)).abs() as f64
    }
}

impl<F> VoiceLeading for F
where
    F: Fn(&Voicing, &Voicing) -> f64,
{
    fn cost(&self, previous: &Voicing, candidate: &Voicing) -> f64 {
        self(previous, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voicing(names: &[&str]) -> Voicing {
        Voicing::new(names.iter().map(|n| n.parse().unwrap()).collect())
    }

    #[test]
    fn test_top_note_diff_is_symmetric() {
        let a = voicing(&["C3", "E3", "G3"]);
        let b = voicing(&["B3", "D4", "G4"]);
        assert_eq!(TopNoteDiff.cost(&a, &b), 12.0);
        assert_eq!(TopNoteDiff.cost(&b, &a), 12.0);
        assert_eq!(TopNoteDiff.cost(&a, &a), 0.0);
    }

    #[test]
    fn test_top_note_diff_ignores_lower_voices() {
        let a = voicing(&["C3", "E3", "G4"]);
        let b = voicing(&["B3", "D4", "G4"]);
        assert_eq!(TopNoteDiff.cost(&a, &b), 0.0);
    }

    #[test]
    fn test_enharmonic_tops_cost_nothing() {
        let a = voicing(&["C4", "Eb4", "G#4"]);
        let b = voicing(&["C4", "E4", "Ab4"]);
        assert_eq!(TopNoteDiff.cost(&a, &b), 0.0);
    }
}
