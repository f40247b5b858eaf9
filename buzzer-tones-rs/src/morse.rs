//! Morse symbol chirps.
//!
//! Dots and dashes skip the note codec. They are fixed tone runs with a
//! shaped period so they are easy to tell apart from song notes: a dot
//! sweeps up and a dash dips in the middle.

use crate::config::SynthConfig;
use crate::shape::Shape;
use crate::tone::ToneRequest;

/// Dash runs are this many dots long.
pub const DASH_LENGTH_IN_DOTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MorseSymbol {
    Dot,
    Dash,
}

impl MorseSymbol {
    /// The tone run for this symbol under `config`.
    ///
    /// ```
    /// use buzzer_tones::{MorseSymbol, Shape, SynthConfig};
    ///
    /// let dash = MorseSymbol::Dash.request(&SynthConfig::default());
    /// assert_eq!(dash.cycles, 600);
    /// assert_eq!(dash.period, 40);
    /// assert_eq!(dash.shape, Shape::Valley);
    /// ```
    pub fn request(self, config: &SynthConfig) -> ToneRequest {
        let period = config.morse_period();
        match self {
            MorseSymbol::Dot => {
                ToneRequest::new(config.morse_dot_cycles, period).with_shape(Shape::Rising)
            }
            MorseSymbol::Dash => ToneRequest::new(
                config.morse_dot_cycles.saturating_mul(DASH_LENGTH_IN_DOTS),
                period,
            )
            .with_shape(Shape::Valley),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
