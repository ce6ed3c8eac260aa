//! Absolute chord symbols (`Am`, `Cmaj`, `G7`, `FMaj7`) and chord-type aliases.
//!
//! A chord symbol is a tonic note followed by a quality string. The quality is
//! matched against voicing dictionary entries through the alias table below,
//! so `Cmaj`, `C`, `CM` and `C^` all reach the major-triad templates.

use std::fmt;

use serde::Serialize;

use crate::pitch::Note;

/// Chord-type aliases, keyed by the dictionary identifier they resolve to.
///
/// # Supported Chord Types
/// - **Major**: `M`, `maj`, `^`, `` (empty)
/// - **Minor**: `m`, `min`, `-`
/// - **Diminished**: `o`, `dim`, `°`
/// - **Augmented**: `aug`, `+`, `+5`
/// - **Dominant 7th**: `7`, `dom`
/// - **Major 7th**: `^7`, `maj7`, `Maj7`, `M7`, `ma7`, `Δ`
/// - **Minor 7th**: `m7`, `min7`, `mi7`, `-7`
/// - **Half-diminished**: `m7b5`, `ø`, `h7`, `-7b5`
/// - **Diminished 7th**: `o7`, `dim7`, `°7`
/// - **Minor-major 7th**: `mM7`, `mMaj7`, `m/ma7`, `-^7`
/// - **Minor 6th**: `m6`, `-6`
/// - **6/9**: `69`, `6/9`, `M69`
/// - **Altered dominants**: `7b9`, `7b13`, `7#11`, `7#9`
pub const CHORD_TYPE_ALIASES: &[(&str, &[&str])] = &[
    ("M", &["M", "maj", "^", ""]),
    ("m", &["m", "min", "-"]),
    ("o", &["o", "dim", "°"]),
    ("aug", &["aug", "+", "+5"]),
    ("7", &["7", "dom"]),
    ("^7", &["^7", "maj7", "Maj7", "M7", "ma7", "Δ"]),
    ("m7", &["m7", "min7", "mi7", "-7"]),
    ("m7b5", &["m7b5", "ø", "h7", "-7b5"]),
    ("o7", &["o7", "dim7", "°7"]),
    ("mM7", &["mM7", "mMaj7", "m/ma7", "-^7"]),
    ("m6", &["m6", "-6"]),
    ("69", &["69", "6/9", "M69"]),
    ("7b9", &["7b9"]),
    ("7b13", &["7b13"]),
    ("7#11", &["7#11", "7#4"]),
    ("7#9", &["7#9"]),
];

/// Dictionary identifiers a quality string may be looked up under, best match first.
pub fn quality_candidates(quality: &str) -> impl Iterator<Item = &'static str> + '_ {
    CHORD_TYPE_ALIASES
        .iter()
        .filter(move |(_, aliases)| aliases.contains(&quality))
        .map(|(id, _)| *id)
}

/// An absolute chord name, independent of any key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChordSymbol(String);

impl ChordSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        ChordSymbol(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Split into tonic and quality.
    ///
    /// Returns `None` when the name does not start with a note letter; such a
    /// chord has no voicings.
    ///
    /// ```
    /// use chordvoice::ChordSymbol;
    ///
    /// let chord = ChordSymbol::new("Abmaj");
    /// let (tonic, quality) = chord.tokenize().unwrap();
    /// assert_eq!(tonic.to_string(), "Ab");
    /// assert_eq!(quality, "maj");
    /// ```
    pub fn tokenize(&self) -> Option<(Note, &str)> {
        let (tonic, rest) = Note::parse_prefix(&self.0)?;
        Some((tonic, rest.trim_start()))
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChordSymbol {
    fn from(name: &str) -> Self {
        ChordSymbol::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let cases = [
            ("Cmaj", "C", "maj"),
            ("Am", "A", "m"),
            ("G7", "G", "7"),
            ("Bbm7", "Bb", "m7"),
            ("F#m7b5", "F#", "m7b5"),
            ("E#m", "E#", "m"),
            ("D", "D", ""),
        ];
        for (name, tonic, quality) in cases {
            let symbol = ChordSymbol::new(name);
            let (t, q) = symbol.tokenize().unwrap();
            assert_eq!(t.to_string(), tonic, "chord {}", name);
            assert_eq!(q, quality, "chord {}", name);
        }
    }

    #[test]
    fn test_tokenize_without_tonic() {
        assert!(ChordSymbol::new("N.C.").tokenize().is_none());
        assert!(ChordSymbol::new("").tokenize().is_none());
        assert!(ChordSymbol::new("iim7").tokenize().is_none());
    }

    #[test]
    fn test_quality_candidates() {
        assert_eq!(quality_candidates("maj").collect::<Vec<_>>(), vec!["M"]);
        assert_eq!(quality_candidates("").collect::<Vec<_>>(), vec!["M"]);
        assert_eq!(quality_candidates("Maj7").collect::<Vec<_>>(), vec!["^7"]);
        assert_eq!(quality_candidates("dim").collect::<Vec<_>>(), vec!["o"]);
        assert_eq!(quality_candidates("mm7").count(), 0);
    }
}
