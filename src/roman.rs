//! # Roman Numeral Resolution
//!
//! Converts scale-degree symbols (`I`, `vi`, `bVII`, `ii7`, `Imaj7`) into absolute
//! chord symbols relative to a key.
//!
//! ## Grammar
//! ```text
//! degree    := flat? numeral extension
//! flat      := "b"
//! numeral   := I | II | III | IV | V | VI | VII      (any case; all uppercase is major)
//! extension := any remaining text ("", "7", "maj7", "m7", ...)
//! ```
//!
//! ## Quality Token
//! Each symbol is first turned into an intermediate quality token, checked in
//! this priority order:
//! 1. uppercase numeral with extension `7` → dominant seventh (`V7`)
//! 2. extension `maj7` (either case) → major seventh (`IVMaj7`, `viMaj7`)
//! 3. otherwise uppercase → `maj`, anything else → `m`, followed by the extension
//!    verbatim (`Imaj`, `iim7`, `iimm7`)
//!
//! The token's chord type is then attached to the scale degree of the key, so
//! `vi` in C becomes `Am` and `bVImaj` in C becomes `Abmaj`.
//!
//! Symbols outside the grammar pass through unchanged as absolute chord names.
//!
//! ## Example
//! ```rust
//! use chordvoice::{resolve_degree, Key};
//!
//! let key = Key::parse("C")?;
//! assert_eq!(resolve_degree("vi", &key).to_string(), "Am");
//! assert_eq!(resolve_degree("V7", &key).to_string(), "G7");
//! assert_eq!(resolve_degree("bVII", &key).to_string(), "Bbmaj");
//! # Ok::<(), chordvoice::VoicingError>(())
//! ```

use std::fmt;

use crate::chord::ChordSymbol;
use crate::error::VoicingError;
use crate::pitch::{Interval, Note};

/// The twelve keys offered by the key picker, in circle-of-fifths order
pub const KEYS: [&str; 12] = [
    "C", "G", "D", "A", "E", "B", "F#", "Db", "Ab", "Eb", "Bb", "F",
];

/// Major-scale degrees above the tonic (I..VII)
const DEGREE_INTERVALS: [Interval; 7] = [
    Interval { steps: 0, semitones: 0 },
    Interval { steps: 1, semitones: 2 },
    Interval { steps: 2, semitones: 4 },
    Interval { steps: 3, semitones: 5 },
    Interval { steps: 4, semitones: 7 },
    Interval { steps: 5, semitones: 9 },
    Interval { steps: 6, semitones: 11 },
];

/// The tonic used as the reference for roman-numeral resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Key {
    pub tonic: Note,
}

impl Key {
    /// Parse a key name such as `"C"`, `"F#"` or `"Db"`.
    pub fn parse(s: &str) -> Result<Self, VoicingError> {
        s.parse::<Note>()
            .map(|tonic| Key { tonic })
            .map_err(|_| VoicingError::InvalidKey(s.to_string()))
    }

    /// Root of the chord built on a scale degree (1-based, wrapping mod 7), optionally flattened
    pub fn degree_root(&self, numeral: u8, flat: bool) -> Note {
        let mut interval = DEGREE_INTERVALS[degree_index(numeral)];
        if flat {
            interval.semitones -= 1;
        }
        self.tonic.transpose(interval)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tonic)
    }
}

/// Extension suffix after the numeral
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    None,
    Seven,
    Maj7,
    Other(String),
}

impl Extension {
    fn from_suffix(suffix: &str) -> Self {
        match suffix {
            "" => Extension::None,
            "7" => Extension::Seven,
            "maj7" => Extension::Maj7,
            other => Extension::Other(other.to_string()),
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Extension::None => "",
            Extension::Seven => "7",
            Extension::Maj7 => "maj7",
            Extension::Other(s) => s,
        }
    }
}

/// A parsed scale-degree symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeSymbol {
    pub flat: bool,
    /// Scale degree, 1..=7
    pub numeral: u8,
    /// Whether the numeral letters are uppercase (major-leaning)
    pub major_case: bool,
    pub extension: Extension,
}

impl DegreeSymbol {
    /// Parse a degree symbol. Returns `None` for anything outside the grammar.
    pub fn parse(symbol: &str) -> Option<Self> {
        let (flat, body) = match symbol.strip_prefix('b') {
            Some(rest) => (true, rest),
            None => (false, symbol),
        };

        let letters_len = body
            .chars()
            .take_while(|c| matches!(c, 'I' | 'V' | 'i' | 'v'))
            .count();
        if letters_len == 0 {
            return None;
        }
        let (letters, suffix) = body.split_at(letters_len);

        // anything short of all-uppercase reads as minor, so `Vi` is `vi`
        let major_case = letters.chars().all(|c| c.is_ascii_uppercase());
        let numeral = numeral_value(&letters.to_ascii_uppercase())?;

        Some(DegreeSymbol {
            flat,
            numeral,
            major_case,
            extension: Extension::from_suffix(suffix),
        })
    }

    /// Build the intermediate quality token
    pub fn quality_token(&self) -> QualityToken {
        let chord_type = match (&self.extension, self.major_case) {
            (Extension::Seven, true) => "7".to_string(),
            (Extension::Maj7, _) => "Maj7".to_string(),
            (ext, true) => format!("maj{}", ext.as_str()),
            (ext, false) => format!("m{}", ext.as_str()),
        };
        QualityToken {
            flat: self.flat,
            numeral: self.numeral,
            major_case: self.major_case,
            chord_type,
        }
    }
}

fn numeral_value(letters: &str) -> Option<u8> {
    match letters {
        "I" => Some(1),
        "II" => Some(2),
        "III" => Some(3),
        "IV" => Some(4),
        "V" => Some(5),
        "VI" => Some(6),
        "VII" => Some(7),
        _ => None,
    }
}

/// Zero-based scale position of a 1-based degree; `0` is the seventh
fn degree_index(numeral: u8) -> usize {
    (numeral as usize + 6) % 7
}

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// A scale degree paired with the chord type it will carry (`bVImaj`, `iim7`, `V7`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityToken {
    pub flat: bool,
    pub numeral: u8,
    pub major_case: bool,
    pub chord_type: String,
}

impl QualityToken {
    /// Attach the chord type to the key's scale degree
    pub fn resolve(&self, key: &Key) -> ChordSymbol {
        let root = key.degree_root(self.numeral, self.flat);
        ChordSymbol::new(format!("{}{}", root, self.chord_type))
    }
}

impl fmt::Display for QualityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeral = NUMERALS[degree_index(self.numeral)];
        if self.flat {
            f.write_str("b")?;
        }
        if self.major_case {
            write!(f, "{}{}", numeral, self.chord_type)
        } else {
            write!(f, "{}{}", numeral.to_ascii_lowercase(), self.chord_type)
        }
    }
}

/// Resolve one degree symbol against a key.
///
/// Symbols that don't match the grammar are returned verbatim as chord names.
pub fn resolve_degree(symbol: &str, key: &Key) -> ChordSymbol {
    match DegreeSymbol::parse(symbol) {
        Some(degree) => degree.quality_token().resolve(key),
        None => {
            log::warn!("'{}' is not a roman numeral, using it as a chord name", symbol);
            ChordSymbol::new(symbol)
        }
    }
}

/// Resolve a whole progression, preserving order
pub fn resolve_progression<S: AsRef<str>>(symbols: &[S], key: &Key) -> Vec<ChordSymbol> {
    symbols
        .iter()
        .map(|symbol| resolve_degree(symbol.as_ref(), key))
        .collect()
}
