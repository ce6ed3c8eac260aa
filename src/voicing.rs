//! # Voicing Search
//!
//! Enumerates every concrete placement of a chord's dictionary templates that
//! fits inside a pitch range.
//!
//! ## Algorithm
//! For each template of the chord's quality, in dictionary order:
//! 1. The bottom pitch class is the tonic transposed by the template's first interval
//! 2. Every MIDI number in the range with that pitch class is a candidate start,
//!    tried from low to high
//! 3. The other pitches are the template intervals measured from the first one
//! 4. A placement is kept only if every pitch lies inside the range
//!
//! Dictionary templates are validated to ascend strictly, so voicings never
//! repeat an absolute pitch.
//! A quality with no templates, or a chord that cannot fit, yields no voicings.
//!
//! ## Example
//! ```rust
//! use chordvoice::{search, ChordSymbol, PitchRange, VoicingDictionary};
//!
//! let range: PitchRange = "C3..C5".parse()?;
//! let voicings = search(&ChordSymbol::new("Cmaj"), &range, &VoicingDictionary::all());
//! assert_eq!(voicings[0].to_string(), "C3 E3 G3");
//! # Ok::<(), chordvoice::VoicingError>(())
//! ```

use std::fmt;

use serde::{Serialize, Serializer};

use crate::chord::ChordSymbol;
use crate::dictionary::VoicingDictionary;
use crate::pitch::{Pitch, PitchRange};

/// A chord realized as concrete pitches, low to high.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Voicing(Vec<Pitch>);

impl Voicing {
    pub fn new(pitches: Vec<Pitch>) -> Self {
        Voicing(pitches)
    }

    pub fn pitches(&self) -> &[Pitch] {
        &self.0
    }

    /// Highest pitch (the melodic voice)
    pub fn top(&self) -> Option<&Pitch> {
        self.0.last()
    }

    pub fn bottom(&self) -> Option<&Pitch> {
        self.0.first()
    }

    pub fn midi_notes(&self) -> Vec<i32> {
        self.0.iter().map(Pitch::midi).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Voicing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(Pitch::to_string).collect();
        f.write_str(&names.join(" "))
    }
}

impl Serialize for Voicing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(Pitch::to_string))
    }
}

/// Find every voicing of `chord` inside `range`.
///
/// The order is template order, then ascending start pitch. It is stable for
/// identical inputs but carries no musical ranking.
pub fn search(chord: &ChordSymbol, range: &PitchRange, dictionary: &VoicingDictionary) -> Vec<Voicing> {
    let Some((tonic, quality)) = chord.tokenize() else {
        log::debug!("{}: no tonic, no voicings", chord);
        return Vec::new();
    };
    let Some(templates) = dictionary.lookup(quality) else {
        log::debug!("{}: quality '{}' not in dictionary", chord, quality);
        return Vec::new();
    };

    let mut voicings = Vec::new();
    for template in templates {
        let Some(&first) = template.first() else {
            continue;
        };
        let bottom = tonic.transpose(first);
        let relative: Vec<_> = template.iter().map(|i| i.subtract(first)).collect();

        for midi in range.midi_notes() {
            if midi.rem_euclid(12) != bottom.chroma() {
                continue;
            }
            let start = Pitch::from_note_and_midi(bottom, midi);
            let pitches: Vec<Pitch> = relative.iter().map(|&i| start.transpose(i)).collect();
            if pitches.iter().all(|p| range.contains(p)) {
                voicings.push(Voicing::new(pitches));
            }
        }
    }

    log::debug!("{}: {} voicings in {}", chord, voicings.len(), range);
    voicings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn find(chord: &str, range: &str) -> Vec<Voicing> {
        search(&ChordSymbol::new(chord), &range.parse().unwrap(), &VoicingDictionary::all())
    }

    fn names(voicings: &[Voicing]) -> Vec<String> {
        voicings.iter().map(Voicing::to_string).collect()
    }

    #[test]
    fn test_c_major_in_default_range() {
        assert_eq!(
            names(&find("Cmaj", "C3..C5")),
            vec!["C3 E3 G3", "C4 E4 G4", "E3 G3 C4", "E4 G4 C5", "G3 C4 E4"]
        );
    }

    #[test]
    fn test_flat_chord_spelling() {
        let voicings = find("Abmaj", "C3..C5");
        assert_eq!(voicings[0].to_string(), "Ab3 C4 Eb4");
        for v in &voicings {
            assert!(v.to_string().contains("Ab"));
        }
    }

    #[test]
    fn test_rootless_dominant() {
        // 3-13-7-9 from B, then 7-9-3-13 from F
        assert_eq!(names(&find("G7", "C3..C5")), vec!["B3 E4 F4 A4", "F3 A3 B3 E4"]);
    }

    #[test]
    fn test_unknown_quality_has_no_voicings() {
        assert!(find("Cmm7", "C3..C5").is_empty());
        assert!(find("N.C.", "C3..C5").is_empty());
    }

    #[test]
    fn test_range_too_small() {
        assert!(find("Cmaj", "C4..D4").is_empty());
    }

    #[test]
    fn test_voicings_stay_in_range_without_duplicates() {
        let range: PitchRange = "C3..C5".parse().unwrap();
        let chords = ["Cmaj", "Dm", "E7", "FMaj7", "G7", "Am7", "Bm7b5", "Bbmaj", "C#o", "Ebaug", "F#m6"];
        for chord in chords {
            for voicing in search(&ChordSymbol::new(chord), &range, &VoicingDictionary::all()) {
                let midi = voicing.midi_notes();
                assert!(midi.iter().all(|&m| range.contains_midi(m)), "{}: {}", chord, voicing);
                let unique: HashSet<_> = midi.iter().collect();
                assert_eq!(unique.len(), midi.len(), "{}: {}", chord, voicing);
                assert!(midi.windows(2).all(|w| w[0] < w[1]), "{}: {}", chord, voicing);
            }
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        assert_eq!(find("Am", "C3..C5"), find("Am", "C3..C5"));
    }
}
