//! Error types for tone generation and playback.

use core::fmt;

/// Errors that can occur while driving the buzzer.
///
/// Generic over the error type of the underlying [`BuzzerOutput`], in the
/// same way a bus driver error wraps the bus error.
///
/// Most degenerate input never reaches this type: unknown pitches play as
/// rests, octave changes clamp, and notes too short to hold one cycle are
/// skipped. Only requests that would divide by zero or select something that
/// does not exist are rejected.
///
/// [`BuzzerOutput`]: crate::BuzzerOutput
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerError<E> {
    /// The output pin failed to toggle.
    Output(E),

    /// The tone run is shorter than its period shape needs.
    TooFewCycles {
        /// Minimum number of cycles for the requested shape.
        required: u32,
        /// Number of cycles that was requested.
        actual: u32,
    },

    /// A chord was requested with no notes.
    EmptyChord,

    /// A chord was requested with more than [`MAX_CHORD_NOTES`](crate::MAX_CHORD_NOTES) notes.
    ChordTooLarge,

    /// Song index out of bounds.
    BadSongIndex,

    /// The player was built with no songs.
    EmptyPlaylist,
}

// Allow ergonomic `?` propagation from raw output errors.
impl<E> From<E> for BuzzerError<E> {
    fn from(error: E) -> Self {
        BuzzerError::Output(error)
    }
}

impl<E: fmt::Debug> fmt::Display for BuzzerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BuzzerError::Output(e) => write!(f, "Output error: {:?}", e),
            BuzzerError::TooFewCycles { required, actual } => write!(
                f,
                "Tone needs at least {} cycles, got {}",
                required, actual
            ),
            BuzzerError::EmptyChord => write!(f, "Chord has no notes"),
            BuzzerError::ChordTooLarge => write!(f, "Chord has too many notes"),
            BuzzerError::BadSongIndex => write!(f, "Song index out of bounds"),
            BuzzerError::EmptyPlaylist => write!(f, "No songs to play"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for BuzzerError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            BuzzerError::Output(e) => defmt::write!(f, "Output error: {}", e),
            BuzzerError::TooFewCycles { required, actual } => {
                defmt::write!(f, "Too few cycles: need {}, got {}", required, actual)
            }
            BuzzerError::EmptyChord => defmt::write!(f, "Empty chord"),
            BuzzerError::ChordTooLarge => defmt::write!(f, "Chord too large"),
            BuzzerError::BadSongIndex => defmt::write!(f, "Bad song index"),
            BuzzerError::EmptyPlaylist => defmt::write!(f, "Empty playlist"),
        }
    }
}
