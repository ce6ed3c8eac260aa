pub mod chord;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod keyboard;
pub mod library;
pub mod pitch;
pub mod progression;
pub mod roman;
pub mod session;
pub mod voice_leading;
pub mod voicing;

pub use chord::ChordSymbol;
pub use config::Config;
pub use dictionary::VoicingDictionary;
pub use error::VoicingError;
pub use keyboard::{Keyboard, KeyboardKey};
pub use library::{default_progressions, parse_progression_text, ProgressionRecord, ProgressionStore};
pub use pitch::{Interval, Note, NoteName, Pitch, PitchRange};
pub use progression::{build_voicing_set, sequence, ProgressionVoicing, ProgressionVoicingSet};
pub use roman::{resolve_degree, resolve_progression, DegreeSymbol, Key};
pub use session::{format_note_list, Session};
pub use voice_leading::{TopNoteDiff, VoiceLeading};
pub use voicing::{search, Voicing};

/// Voice a roman-numeral progression in a key.
/// This is the main entry point for the library.
///
/// ```rust
/// use chordvoice::{voice_progression, Config};
///
/// let set = voice_progression("C", &["ii", "V7", "I"], &Config::default())?;
/// assert!(!set.is_empty());
/// assert!(set.iter().all(|run| run.len() == 3));
/// # Ok::<(), chordvoice::VoicingError>(())
/// ```
pub fn voice_progression<S: AsRef<str>>(
    key: &str,
    degrees: &[S],
    config: &Config,
) -> Result<ProgressionVoicingSet, VoicingError> {
    let key = Key::parse(key)?;
    let chords = resolve_progression(degrees, &key);
    Ok(build_voicing_set(
        &chords,
        &config.search_range,
        &config.dictionary,
        &TopNoteDiff,
    ))
}
