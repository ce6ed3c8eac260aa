use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;

use chordvoice::library::{all_progressions, CHORD_PALETTE};
use chordvoice::roman::KEYS;
use chordvoice::{
    format_note_list, parse_progression_text, resolve_progression, Config, Key, KeyboardKey,
    ProgressionStore, Session, VoicingError,
};

const DEFAULT_STORE: &str = "chordvoice-progressions.json";

#[derive(Parser)]
#[command(name = "chordvoice", about = "Voice roman-numeral chord progressions with smooth voice leading")]
#[command(version)]
struct Cli {
    /// YAML config file (key, ranges, dictionary)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON file holding custom progressions
    #[arg(long, global = true, default_value = DEFAULT_STORE)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Voice a progression and show one of its alternative voicings
    Voice {
        /// Degree symbols separated by dashes, e.g. "I-V-vi-IV"
        progression: Option<String>,

        /// Use a preset or custom progression by name instead
        #[arg(long, conflicts_with = "progression")]
        preset: Option<String>,

        /// Key, e.g. C, F#, Bb (overrides the config)
        #[arg(long, short)]
        key: Option<String>,

        /// Which progression voicing to show, starting at 1 (wraps around)
        #[arg(long, default_value_t = 1)]
        voicing: usize,

        /// Chord to light on the keyboard, starting at 1
        #[arg(long)]
        chord: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the chord symbols a progression resolves to
    Resolve {
        /// Degree symbols separated by dashes, e.g. "ii-V7-I"
        progression: String,

        #[arg(long, short, default_value = "C")]
        key: String,
    },

    /// List preset and custom progressions, keys and the chord palette
    Presets,

    /// Save a custom progression
    Add {
        name: String,
        /// Degree symbols separated by dashes
        chords: String,
    },

    /// Delete a custom progression by its position in the custom list (starting at 1)
    Remove { index: usize },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChordReport {
    degree: String,
    symbol: String,
    notes: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceReport {
    key: String,
    voicing_index: usize,
    voicing_count: usize,
    chords: Vec<ChordReport>,
    selected_chord: Option<usize>,
    highlighted: Vec<KeyboardKey>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), VoicingError> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Command::Voice {
            progression,
            preset,
            key,
            voicing,
            chord,
            json,
        } => {
            let degrees = match (progression, preset) {
                (Some(text), _) => parse_progression_text(&text),
                (None, Some(name)) => find_preset(&cli.store, &name)?,
                (None, None) => {
                    return Err(VoicingError::ConfigError(
                        "give a progression like I-V-vi-IV or --preset NAME".to_string(),
                    ))
                }
            };

            let mut session = Session::new(config);
            if let Some(key) = key {
                session.set_key(&key)?;
            }
            session.set_progression(degrees.as_slice());

            for _ in 1..voicing.max(1) {
                session.next_voicing_set();
            }
            session.select_chord(chord.map(|c| c.saturating_sub(1)));

            if json {
                print_json(&session)?;
            } else {
                print_session(&session);
            }
        }
        Command::Resolve { progression, key } => {
            let key = Key::parse(&key)?;
            let degrees = parse_progression_text(&progression);
            for (degree, chord) in degrees.iter().zip(resolve_progression(degrees.as_slice(), &key)) {
                println!("{:<8} {}", degree, chord);
            }
        }
        Command::Presets => {
            let store = ProgressionStore::load(&cli.store)?;
            let presets = all_progressions(store.records());
            let preset_count = presets.len() - store.records().len();
            for (i, record) in presets.iter().enumerate() {
                let tag = if i < preset_count {
                    "preset".to_string()
                } else {
                    format!("custom {}", i - preset_count + 1)
                };
                println!("{:<10} {:<16} {}", tag, record.name, record.chords.join("-"));
            }
            println!();
            println!("Keys:    {}", KEYS.join(" "));
            println!("Palette: {}", CHORD_PALETTE.join(" "));
        }
        Command::Add { name, chords } => {
            let mut store = ProgressionStore::load(&cli.store)?;
            let added = store.add(&name, &chords)?.clone();
            store.save()?;
            eprintln!("Saved '{}' ({}) to {}", added.name, added.chords.join("-"), cli.store.display());
        }
        Command::Remove { index } => {
            let mut store = ProgressionStore::load(&cli.store)?;
            let removed = store.remove(index.saturating_sub(1))?;
            store.save()?;
            eprintln!("Removed '{}' from {}", removed.name, cli.store.display());
        }
    }

    Ok(())
}

fn find_preset(store: &Path, name: &str) -> Result<Vec<String>, VoicingError> {
    let store = ProgressionStore::load(store)?;
    all_progressions(store.records())
        .into_iter()
        .find(|record| record.name == name)
        .map(|record| record.chords)
        .ok_or_else(|| VoicingError::ConfigError(format!("no progression named '{}'", name)))
}

fn print_session(session: &Session) {
    println!("Key: {}", session.key());

    match session.voicing_label() {
        Some(label) => println!("{}", label),
        None => println!("No voicings available"),
    }
    println!();

    for (i, (degree, chord)) in session
        .degrees()
        .iter()
        .zip(session.chord_symbols())
        .enumerate()
    {
        let marker = if session.current_chord_index() == Some(i) { ">" } else { " " };
        let notes = format_note_list(&session.current_chord_note_list(i));
        println!("{} {:>2}. {:<8} {:<8} {}", marker, i + 1, degree, chord.name(), notes);
    }

    if session.current_chord_index().is_some() {
        println!();
        println!("{}", render_keyboard(&session.keyboard_keys()));
    }
}

/// One character per key: white keys as `-`, black keys as `^`, lit keys as `#`
fn render_keyboard(keys: &[KeyboardKey]) -> String {
    let mut line = String::new();
    let mut labels = String::new();
    for key in keys {
        line.push(match (key.is_active, key.is_black) {
            (true, _) => '#',
            (false, true) => '^',
            (false, false) => '-',
        });
        labels.push(if key.pitch_class == 0 { '|' } else { ' ' });
    }
    let first = keys.first().map(|k| k.name.as_str()).unwrap_or("");
    format!("{}\n{}  (from {})", line, labels, first)
}

fn print_json(session: &Session) -> Result<(), VoicingError> {
    let chords = session
        .degrees()
        .iter()
        .zip(session.chord_symbols())
        .enumerate()
        .map(|(i, (degree, chord))| ChordReport {
            degree: degree.clone(),
            symbol: chord.name().to_string(),
            notes: session
                .current_chord_note_list(i)
                .iter()
                .map(|p| p.to_string())
                .collect(),
        })
        .collect();

    let report = VoiceReport {
        key: session.key().to_string(),
        voicing_index: session.current_voicing_index(),
        voicing_count: session.voicing_count(),
        chords,
        selected_chord: session.current_chord_index(),
        highlighted: session.current_highlighted_pitches(),
    };

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| VoicingError::ConfigError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
