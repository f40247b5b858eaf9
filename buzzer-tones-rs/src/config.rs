//! Tunable synthesis constants.

/// Tunable constants for the synthesis core.
///
/// All scaling numbers live here, there are **no** mutable module-level
/// globals. [`SynthConfig::default()`] reproduces the demo board tuning
/// (48 MHz clock, software wait loop).
///
/// Construct with struct-update syntax to change a single value:
///
/// ```
/// use buzzer_tones::SynthConfig;
///
/// let config = SynthConfig {
///     eighth_note_cycles: 25_000, // double tempo
///     ..SynthConfig::default()
/// };
/// assert_eq!(config.period_scale, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SynthConfig {
    /// Divisor applied to octave-scaled periods to bring them into
    /// wait-unit range. Default: 1000.
    pub period_scale: u32,
    /// Length of an eighth note, in wait units. Every other note length is
    /// a multiple of this. Default: 50 000.
    pub eighth_note_cycles: u32,
    /// Octave at start-up and after an octave-reset note. Default: 4.
    pub default_octave: u8,
    /// Highest reachable octave; the lowest is always 1. Default: 8.
    pub max_octave: u8,
    /// Silence after each rendered note or rest, in ms. Default: 50.
    pub inter_note_pause_ms: u32,
    /// Silence between repeats of a repeated tone, in ms. Default: 300.
    pub inter_repeat_pause_ms: u32,
    /// Upper bound on notes read from a song before giving up on finding
    /// the end marker. Default: 100.
    pub max_song_length: usize,
    /// Cycle count of a Morse dot chirp. A dash is three times this.
    /// Default: 200.
    pub morse_dot_cycles: u32,
    /// Morse chirp period before `period_scale` is applied. Default: 40 000.
    pub morse_dot_period: u32,
    /// Number of time slices each chord voice gets. Default: 4.
    pub chord_chunks_per_note: u32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            period_scale: 1000,
            eighth_note_cycles: 50_000,
            default_octave: 4,
            max_octave: 8,
            inter_note_pause_ms: 50,
            inter_repeat_pause_ms: 300,
            max_song_length: 100,
            morse_dot_cycles: 200,
            morse_dot_period: 40_000,
            chord_chunks_per_note: 4,
        }
    }
}

impl SynthConfig {
    /// Return a copy with every divisor and bound forced into a usable range.
    ///
    /// - `period_scale` and `chord_chunks_per_note` are at least 1.
    /// - `max_octave` is at least 1.
    /// - `default_octave` is clamped to `[1, max_octave]`.
    pub fn validated(self) -> Self {
        let max_octave = self.max_octave.max(1);
        Self {
            period_scale: self.period_scale.max(1),
            max_octave,
            default_octave: self.default_octave.clamp(1, max_octave),
            chord_chunks_per_note: self.chord_chunks_per_note.max(1),
            ..self
        }
    }

    /// Period used for both Morse presets, after scaling. Never zero.
    pub fn morse_period(&self) -> u32 {
        (self.morse_dot_period / self.period_scale.max(1)).max(1)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let c = SynthConfig::default();
        assert_eq!(c.period_scale, 1000);
        assert_eq!(c.eighth_note_cycles, 50_000);
        assert_eq!(c.default_octave, 4);
        assert_eq!(c.max_octave, 8);
        assert_eq!(c.inter_note_pause_ms, 50);
        assert_eq!(c.inter_repeat_pause_ms, 300);
        assert_eq!(c.max_song_length, 100);
        assert_eq!(c.morse_dot_cycles, 200);
        assert_eq!(c.morse_dot_period, 40_000);
        assert_eq!(c.chord_chunks_per_note, 4);
    }

    #[test]
    fn default_is_already_valid() {
        let c = SynthConfig::default();
        assert_eq!(c.validated(), c);
    }

    #[test]
    fn validated_fixes_zero_divisors() {
        let c = SynthConfig {
            period_scale: 0,
            chord_chunks_per_note: 0,
            max_octave: 0,
            default_octave: 0,
            ..SynthConfig::default()
        }
        .validated();
        assert_eq!(c.period_scale, 1);
        assert_eq!(c.chord_chunks_per_note, 1);
        assert_eq!(c.max_octave, 1);
        assert_eq!(c.default_octave, 1);
    }

    #[test]
    fn validated_clamps_default_octave_to_max() {
        let c = SynthConfig {
            default_octave: 9,
            max_octave: 6,
            ..SynthConfig::default()
        }
        .validated();
        assert_eq!(c.default_octave, 6);
    }

    #[test]
    fn morse_period_is_scaled() {
        assert_eq!(SynthConfig::default().morse_period(), 40);
    }

    #[test]
    fn morse_period_never_zero() {
        let c = SynthConfig {
            morse_dot_period: 10,
            ..SynthConfig::default()
        };
        assert_eq!(c.morse_period(), 1);
    }
}
