//! # Pitch Model
//!
//! Spelled notes, absolute pitches, intervals and pitch ranges.
//!
//! ## Concepts
//! - [`NoteName`] - the seven letters C..B
//! - [`Note`] - a spelled pitch class: letter plus alteration (`Eb`, `F#`, `C##`)
//! - [`Pitch`] - a note in a given octave (`Eb4`), convertible to and from MIDI
//! - [`Interval`] - shorthand intervals (`3M`, `5P`, `7m`, `10m`) used by voicing templates
//! - [`PitchRange`] - inclusive lower/upper pitch bounds
//!
//! ## MIDI Numbering
//! Scientific octave numbering: `C4 = 60`, `A4 = 69`, `C-1 = 0`.
//! Octaves always turn over at C, so `Cb4` is MIDI 59 and `B#3` is MIDI 60.
//!
//! ## Spelling
//! Interval arithmetic moves the letter and the semitone count separately, then
//! derives the alteration. This keeps chord tones spelled the way a musician
//! would write them: `Ab + 3M = C`, `F# + 3M = A#`, `Db + 3M = F`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VoicingError;

/// Note names C through B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NoteName {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    const ALL: [NoteName; 7] = [
        NoteName::C,
        NoteName::D,
        NoteName::E,
        NoteName::F,
        NoteName::G,
        NoteName::A,
        NoteName::B,
    ];

    /// Parse a letter, accepting either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    /// Position in the diatonic sequence (C = 0 .. B = 6)
    pub fn index(self) -> i32 {
        match self {
            NoteName::C => 0,
            NoteName::D => 1,
            NoteName::E => 2,
            NoteName::F => 3,
            NoteName::G => 4,
            NoteName::A => 5,
            NoteName::B => 6,
        }
    }

    /// Letter at a diatonic position, wrapping in both directions
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(7) as usize]
    }

    /// Semitone offset of the natural note from C
    pub fn semitone(self) -> i32 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }
}

/// A spelled pitch class: letter plus alteration in semitones
/// (`1` = sharp, `-1` = flat, `2` = double sharp, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Note {
    pub name: NoteName,
    pub alter: i8,
}

impl Note {
    pub fn new(name: NoteName, alter: i8) -> Self {
        Self { name, alter }
    }

    /// Pitch class 0..11 (C = 0)
    pub fn chroma(&self) -> i32 {
        (self.name.semitone() + self.alter as i32).rem_euclid(12)
    }

    /// Transpose by an interval, keeping diatonic spelling.
    ///
    /// ```
    /// use chordvoice::{Interval, Note};
    ///
    /// let ab: Note = "Ab".parse().unwrap();
    /// let third: Interval = "3M".parse().unwrap();
    /// assert_eq!(ab.transpose(third).to_string(), "C");
    /// ```
    pub fn transpose(&self, interval: Interval) -> Note {
        let name = NoteName::from_index(self.name.index() + interval.steps);
        let target = self.chroma() + interval.semitones;
        // Shortest signed distance from the natural letter to the target chroma
        let alter = (target - name.semitone() + 6).rem_euclid(12) - 6;
        Note::new(name, alter as i8)
    }

    /// Sharp-preferring spelling of a pitch class
    pub fn from_chroma(chroma: i32, sharps: bool) -> Note {
        let (name, alter) = match chroma.rem_euclid(12) {
            0 => (NoteName::C, 0),
            1 if sharps => (NoteName::C, 1),
            1 => (NoteName::D, -1),
            2 => (NoteName::D, 0),
            3 if sharps => (NoteName::D, 1),
            3 => (NoteName::E, -1),
            4 => (NoteName::E, 0),
            5 => (NoteName::F, 0),
            6 if sharps => (NoteName::F, 1),
            6 => (NoteName::G, -1),
            7 => (NoteName::G, 0),
            8 if sharps => (NoteName::G, 1),
            8 => (NoteName::A, -1),
            9 => (NoteName::A, 0),
            10 if sharps => (NoteName::A, 1),
            10 => (NoteName::B, -1),
            _ => (NoteName::B, 0),
        };
        Note::new(name, alter)
    }

    /// Parse the leading note of `s`, returning the note and the unparsed rest.
    ///
    /// Accidentals are any run of `#` or any run of `b` directly after the letter.
    pub(crate) fn parse_prefix(s: &str) -> Option<(Note, &str)> {
        let letter = s.chars().next()?;
        let name = NoteName::from_char(letter)?;
        let rest = &s[letter.len_utf8()..];

        let sharps = rest.chars().take_while(|&c| c == '#').count();
        if sharps > 0 {
            return Some((Note::new(name, sharps as i8), &rest[sharps..]));
        }
        let flats = rest.chars().take_while(|&c| c == 'b').count();
        Some((Note::new(name, -(flats as i8)), &rest[flats..]))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.as_char())?;
        let symbol = if self.alter > 0 { "#" } else { "b" };
        for _ in 0..self.alter.unsigned_abs() {
            f.write_str(symbol)?;
        }
        Ok(())
    }
}

impl FromStr for Note {
    type Err = VoicingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Note::parse_prefix(s.trim()) {
            Some((note, "")) => Ok(note),
            _ => Err(VoicingError::InvalidNote(s.to_string())),
        }
    }
}

/// Octaves a pitch name may carry, covering the MIDI range `C-1..G9`
const OCTAVES: std::ops::RangeInclusive<i32> = -1..=9;

/// An absolute pitch: a spelled note in a specific octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub note: Note,
    pub octave: i32,
}

impl Pitch {
    pub fn new(note: Note, octave: i32) -> Self {
        Self { note, octave }
    }

    /// MIDI note number (`C4 = 60`)
    pub fn midi(&self) -> i32 {
        (self.octave + 1) * 12 + self.note.name.semitone() + self.note.alter as i32
    }

    /// Spell a MIDI number with sharps or flats.
    ///
    /// ```
    /// use chordvoice::Pitch;
    ///
    /// assert_eq!(Pitch::from_midi(61, true).to_string(), "C#4");
    /// assert_eq!(Pitch::from_midi(61, false).to_string(), "Db4");
    /// ```
    pub fn from_midi(midi: i32, sharps: bool) -> Pitch {
        let note = Note::from_chroma(midi, sharps);
        Pitch::from_note_and_midi(note, midi)
    }

    /// Spell a MIDI number using the given pitch-class spelling.
    ///
    /// The octave is whatever makes `note` sound at `midi`, so `Cb` at 59 is `Cb4`.
    /// The caller is responsible for `note.chroma()` matching `midi`.
    pub fn from_note_and_midi(note: Note, midi: i32) -> Pitch {
        let natural = midi - note.alter as i32 - note.name.semitone();
        Pitch::new(note, natural.div_euclid(12) - 1)
    }

    /// Transpose by an interval, keeping diatonic spelling
    pub fn transpose(&self, interval: Interval) -> Pitch {
        let index = self.note.name.index() + interval.steps;
        let name = NoteName::from_index(index);
        let octave = self.octave + index.div_euclid(7);
        let natural = (octave + 1) * 12 + name.semitone();
        let target = self.midi() + interval.semitones;
        Pitch::new(Note::new(name, (target - natural) as i8), octave)
    }

    /// Whether the pitch sits on a black key (any non-natural pitch class)
    pub fn is_black_key(&self) -> bool {
        matches!(self.midi().rem_euclid(12), 1 | 3 | 6 | 8 | 10)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.note, self.octave)
    }
}

impl FromStr for Pitch {
    type Err = VoicingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (note, rest) =
            Note::parse_prefix(trimmed).ok_or_else(|| VoicingError::InvalidNote(s.to_string()))?;
        let octave = rest
            .parse::<i32>()
            .ok()
            .filter(|octave| OCTAVES.contains(octave))
            .ok_or_else(|| VoicingError::InvalidNote(s.to_string()))?;
        Ok(Pitch::new(note, octave))
    }
}

/// Interval quality as written in shorthand (`P`, `M`, `m`, `A`, `d`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quality {
    Perfect,
    Major,
    Minor,
    Augmented,
    Diminished,
}

/// An ascending interval with both a diatonic size and a chromatic size.
///
/// `steps` is the number of letter steps (a third is 2), `semitones` the size
/// in half steps (a major third is 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub steps: i32,
    pub semitones: i32,
}

impl Interval {
    pub const UNISON: Interval = Interval { steps: 0, semitones: 0 };

    /// Difference between two intervals (`self` measured from `other`)
    pub fn subtract(self, other: Interval) -> Interval {
        Interval {
            steps: self.steps - other.steps,
            semitones: self.semitones - other.semitones,
        }
    }
}

impl FromStr for Interval {
    type Err = VoicingError;

    /// Parse shorthand like `"1P"`, `"3m"`, `"10M"`, `"5d"`, `"11A"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VoicingError::InvalidInterval(s.to_string());
        let trimmed = s.trim();
        let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
        let number: i32 = digits.parse().map_err(|_| invalid())?;
        if number < 1 {
            return Err(invalid());
        }
        let quality = match &trimmed[digits.len()..] {
            "P" => Quality::Perfect,
            "M" => Quality::Major,
            "m" => Quality::Minor,
            "A" => Quality::Augmented,
            "d" => Quality::Diminished,
            _ => return Err(invalid()),
        };

        let steps = number - 1;
        let simple = steps.rem_euclid(7);
        let octaves = steps.div_euclid(7);
        let base = [0, 2, 4, 5, 7, 9, 11][simple as usize];
        let perfectable = matches!(simple, 0 | 3 | 4);

        let alter = match (perfectable, quality) {
            (true, Quality::Perfect) | (false, Quality::Major) => 0,
            (false, Quality::Minor) => -1,
            (_, Quality::Augmented) => 1,
            (true, Quality::Diminished) => -1,
            (false, Quality::Diminished) => -2,
            _ => return Err(invalid()),
        };

        Ok(Interval {
            steps,
            semitones: base + octaves * 12 + alter,
        })
    }
}

/// Inclusive pitch bounds constraining generated voicings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchRange {
    pub low: Pitch,
    pub high: Pitch,
}

impl PitchRange {
    pub fn new(low: Pitch, high: Pitch) -> Result<Self, VoicingError> {
        if low.midi() > high.midi() {
            return Err(VoicingError::InvalidRange(format!("{}..{}", low, high)));
        }
        Ok(Self { low, high })
    }

    pub fn contains(&self, pitch: &Pitch) -> bool {
        self.contains_midi(pitch.midi())
    }

    pub fn contains_midi(&self, midi: i32) -> bool {
        (self.low.midi()..=self.high.midi()).contains(&midi)
    }

    /// Every MIDI number in the range, ascending
    pub fn midi_notes(&self) -> std::ops::RangeInclusive<i32> {
        self.low.midi()..=self.high.midi()
    }
}

impl Default for PitchRange {
    /// `C3..C5`, the range the progression helper searches
    fn default() -> Self {
        Self {
            low: Pitch::new(Note::new(NoteName::C, 0), 3),
            high: Pitch::new(Note::new(NoteName::C, 0), 5),
        }
    }
}

impl fmt::Display for PitchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.low, self.high)
    }
}

impl FromStr for PitchRange {
    type Err = VoicingError;

    /// Parse `"C3..C5"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (low, high) = s
            .split_once("..")
            .ok_or_else(|| VoicingError::InvalidRange(s.to_string()))?;
        PitchRange::new(low.parse()?, high.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    #[test]
    fn test_midi_reference_points() {
        assert_eq!(pitch("C4").midi(), 60);
        assert_eq!(pitch("A4").midi(), 69);
        assert_eq!(pitch("C3").midi(), 48);
        assert_eq!(pitch("C-1").midi(), 0);
        assert_eq!(pitch("Eb4").midi(), 63);
        assert_eq!(pitch("Cb4").midi(), 59);
        assert_eq!(pitch("B#3").midi(), 60);
        assert_eq!(pitch("F##2").midi(), 43);
    }

    #[test]
    fn test_midi_conversion_is_lossless() {
        for midi in 0..128 {
            assert_eq!(Pitch::from_midi(midi, true).midi(), midi);
            assert_eq!(Pitch::from_midi(midi, false).midi(), midi);
        }
        assert_eq!(Pitch::from_midi(70, true).to_string(), "A#4");
        assert_eq!(Pitch::from_midi(70, false).to_string(), "Bb4");
    }

    #[test]
    fn test_respelling_keeps_octave_boundary() {
        let cb: Note = "Cb".parse().unwrap();
        let p = Pitch::from_note_and_midi(cb, 59);
        assert_eq!(p.to_string(), "Cb4");
        assert_eq!(p.midi(), 59);
    }

    #[test]
    fn test_parse_errors() {
        assert!("H4".parse::<Pitch>().is_err());
        assert!("C".parse::<Pitch>().is_err());
        assert!("C#x".parse::<Pitch>().is_err());
        assert!("".parse::<Note>().is_err());
        assert!("Eb".parse::<Note>().is_ok());
        assert!("e4".parse::<Pitch>().is_ok());
    }

    #[test]
    fn test_octave_bounds() {
        assert_eq!(pitch("C-1").midi(), 0);
        assert_eq!(pitch("G9").midi(), 127);
        assert!(matches!("C10".parse::<Pitch>(), Err(VoicingError::InvalidNote(_))));
        assert!(matches!("C-2".parse::<Pitch>(), Err(VoicingError::InvalidNote(_))));
        assert!("C999999999".parse::<Pitch>().is_err());
        assert!("C3..C999999999".parse::<PitchRange>().is_err());
        assert!("C-999999999..C3".parse::<PitchRange>().is_err());
    }

    #[test]
    fn test_interval_sizes() {
        let cases = [
            ("1P", 0, 0),
            ("3m", 2, 3),
            ("3M", 2, 4),
            ("5d", 4, 6),
            ("5P", 4, 7),
            ("5A", 4, 8),
            ("7m", 6, 10),
            ("7M", 6, 11),
            ("8P", 7, 12),
            ("9M", 8, 14),
            ("10m", 9, 15),
            ("11A", 10, 18),
            ("12d", 11, 18),
            ("13M", 12, 21),
        ];
        for (text, steps, semitones) in cases {
            let interval: Interval = text.parse().unwrap();
            assert_eq!(interval, Interval { steps, semitones }, "interval {}", text);
        }
        assert!("3P".parse::<Interval>().is_err());
        assert!("5m".parse::<Interval>().is_err());
        assert!("0P".parse::<Interval>().is_err());
    }

    #[test]
    fn test_note_transpose_spelling() {
        let third: Interval = "3M".parse().unwrap();
        let fifth: Interval = "5P".parse().unwrap();
        assert_eq!("F#".parse::<Note>().unwrap().transpose(third).to_string(), "A#");
        assert_eq!("Db".parse::<Note>().unwrap().transpose(third).to_string(), "F");
        assert_eq!("B".parse::<Note>().unwrap().transpose(fifth).to_string(), "F#");
        assert_eq!("Bb".parse::<Note>().unwrap().transpose(fifth).to_string(), "F");
    }

    #[test]
    fn test_pitch_transpose_crosses_octave() {
        let minor_tenth: Interval = "10m".parse().unwrap();
        assert_eq!(pitch("E4").transpose(minor_tenth).to_string(), "G5");
        let fourth: Interval = "4P".parse().unwrap();
        assert_eq!(pitch("G3").transpose(fourth).to_string(), "C4");
    }

    #[test]
    fn test_range() {
        let range: PitchRange = "C3..C5".parse().unwrap();
        assert_eq!(range, PitchRange::default());
        assert!(range.contains(&pitch("C3")));
        assert!(range.contains(&pitch("C5")));
        assert!(!range.contains(&pitch("C#5")));
        assert!("C5..C3".parse::<PitchRange>().is_err());
        assert!("C3-C5".parse::<PitchRange>().is_err());
    }

    #[test]
    fn test_black_keys() {
        assert!(pitch("C#4").is_black_key());
        assert!(pitch("Bb3").is_black_key());
        assert!(!pitch("E4").is_black_key());
        assert!(!pitch("Cb4").is_black_key());
    }
}
