//! Square-wave note synthesis for a piezo buzzer driven from a single pin.
//!
//! This crate turns compact, byte-packed note tables into a stream of pin
//! toggles separated by busy-waits. It knows nothing about the board beyond
//! the [`BuzzerOutput`] trait: flip the output, wait some calibrated units,
//! pause some milliseconds.
//!
//! # Architecture
//!
//! ```text
//! Player (songs, octave state, song index)
//!   ├── note:  PackedNote ─► NoteEvent ─► (period, cycles)
//!   ├── chord: time-sliced voices
//!   ├── morse: dot / dash presets
//!   └── tone:  ToneRequest + Shape ─► BuzzerOutput::{toggle, busy_wait, pause_ms}
//! ```
//!
//! Every playback call blocks for its whole duration. The only safe place
//! to stop a song early is between notes, see
//! [`Player::play_song_until()`].
//!
//! # Quick Start
//!
//! ```ignore
//! use buzzer_tones::{Player, PinBuzzer, SynthConfig, DEFAULT_PLAYLIST, DEFAULT_UNIT_NS};
//!
//! let buzzer = PinBuzzer::new(beeper_pin, delay, DEFAULT_UNIT_NS);
//! let mut player = Player::new(buzzer, SynthConfig::default(), DEFAULT_PLAYLIST);
//!
//! // Each call plays the next built-in song.
//! player.play_song()?;
//! player.morse_dot()?;
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging and `defmt::Format` derives for
//!   embedded targets.

#![cfg_attr(not(test), no_std)]

pub mod chord;
pub mod config;
pub mod driver;
pub mod error;
pub mod hal;
pub mod morse;
pub mod note;
pub mod player;
pub mod shape;
pub mod songs;
pub mod tone;

#[cfg(test)]
mod testing;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use chord::{ChordPlan, MAX_CHORD_NOTES};
pub use config::SynthConfig;
pub use driver::{PinBuzzer, DEFAULT_UNIT_NS};
pub use error::BuzzerError;
pub use hal::BuzzerOutput;
pub use morse::MorseSymbol;
pub use note::{note, NoteEvent, NoteLength, OctaveShift, OctaveState, PackedNote, Pitch};
pub use player::{NoteOutcome, Player, SongStatus};
pub use shape::Shape;
pub use songs::{Song, DEFAULT_PLAYLIST};
pub use tone::{generate_tone, ToneRequest};
