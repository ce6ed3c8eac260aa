//! # Progression Sequencing
//!
//! Chains voicings across a progression so each chord moves smoothly from the
//! one before it.
//!
//! ## Sequencer
//! [`sequence()`] seeds the first chord with a given voicing, then walks left to
//! right: for every later chord it searches all voicings and keeps the one with
//! the lowest continuity cost against the previous choice. Ties go to the
//! earliest candidate. The choice is greedy, with no lookahead or backtracking.
//!
//! ## Voicing Set
//! [`build_voicing_set()`] runs the sequencer once per voicing of the first
//! chord, giving one alternative progression voicing per starting voicing.
//! Runs that hit a chord with no voicings are dropped; the rest keep the order
//! the first chord's search produced them in.
//!
//! ## Example
//! ```rust
//! use chordvoice::{build_voicing_set, ChordSymbol, PitchRange, TopNoteDiff, VoicingDictionary};
//!
//! let chords: Vec<ChordSymbol> = ["Cmaj", "Gmaj", "Am", "Fmaj"].map(ChordSymbol::from).to_vec();
//! let set = build_voicing_set(&chords, &PitchRange::default(), &VoicingDictionary::all(), &TopNoteDiff);
//!
//! assert_eq!(set.len(), 5);
//! assert!(set.iter().all(|run| run.len() == 4));
//! ```

use crate::chord::ChordSymbol;
use crate::dictionary::VoicingDictionary;
use crate::pitch::PitchRange;
use crate::voice_leading::VoiceLeading;
use crate::voicing::{search, Voicing};

/// One voicing per chord of a progression
pub type ProgressionVoicing = Vec<Voicing>;

/// Alternative progression voicings, one per viable starting voicing
pub type ProgressionVoicingSet = Vec<ProgressionVoicing>;

/// Voice a whole progression starting from `start`.
///
/// Returns `None` if `chords` is empty or any chord after the first has no
/// voicings in `range`.
pub fn sequence<C>(
    chords: &[ChordSymbol],
    range: &PitchRange,
    dictionary: &VoicingDictionary,
    cost: &C,
    start: &Voicing,
) -> Option<ProgressionVoicing>
where
    C: VoiceLeading + ?Sized,
{
    if chords.is_empty() {
        return None;
    }

    let mut voiced = Vec::with_capacity(chords.len());
    voiced.push(start.clone());

    for chord in &chords[1..] {
        let previous = voiced.last()?;
        let candidates = search(chord, range, dictionary);
        let best = closest(previous, candidates, cost)?;
        voiced.push(best);
    }

    Some(voiced)
}

/// First candidate with the minimum cost against `previous`. NaN costs never win.
fn closest<C>(previous: &Voicing, candidates: Vec<Voicing>, cost: &C) -> Option<Voicing>
where
    C: VoiceLeading + ?Sized,
{
    let mut best: Option<(f64, Voicing)> = None;
    for candidate in candidates {
        let c = cost.cost(previous, &candidate);
        if c.is_nan() {
            log::debug!("skipping [{}]: cost is NaN", candidate);
            continue;
        }
        // strict comparison keeps the earliest of equal-cost candidates
        if best.as_ref().map_or(true, |(lowest, _)| c < *lowest) {
            best = Some((c, candidate));
        }
    }
    best.map(|(_, voicing)| voicing)
}

/// Run the sequencer once per voicing of the first chord.
///
/// Empty when the progression is empty or its first chord has no voicings.
pub fn build_voicing_set<C>(
    chords: &[ChordSymbol],
    range: &PitchRange,
    dictionary: &VoicingDictionary,
    cost: &C,
) -> ProgressionVoicingSet
where
    C: VoiceLeading + ?Sized,
{
    let Some(first) = chords.first() else {
        return Vec::new();
    };

    let starts = search(first, range, dictionary);
    let total = starts.len();
    let set: ProgressionVoicingSet = starts
        .iter()
        .filter_map(|start| {
            let run = sequence(chords, range, dictionary, cost, start);
            if run.is_none() {
                log::debug!("dropping run starting at [{}]", start);
            }
            run
        })
        .collect();

    log::debug!("{} of {} starting voicings produced a full progression", set.len(), total);
    set
}
