//! The packed note format and the note codec.
//!
//! Song tables store one byte per note so they stay small on the target:
//!
//! ```text
//!   7   6   5   4   3   2   1   0
//! ┌───────────┬───────────────────┐
//! │  length   │      pitch        │
//! └───────────┴───────────────────┘
//!   NoteLength   Pitch (incl. rest,
//!   (0 = eighth)  end and octave controls)
//! ```
//!
//! A [`PackedNote`] is decoded into a structured [`NoteEvent`] at the codec
//! boundary and nothing past this module looks at the raw bits.
//!
//! Pitches map to a half-period through a table computed for the reference
//! clock at octave 0. The current octave then halves the period once per
//! octave, and [`SynthConfig::period_scale`](crate::SynthConfig) brings the
//! result into wait-unit range.

/// Number of low bits holding the pitch.
pub const PITCH_BITS: u8 = 5;

/// Mask selecting the pitch bits of a packed note.
pub const PITCH_MASK: u8 = (1 << PITCH_BITS) - 1;

/// Clock the period table is computed for.
pub const REFERENCE_CLOCK_HZ: u64 = 48_000_000;

/// Period returned for anything that should not sound.
pub const SILENT_PERIOD: u32 = 0;

/// Lowest reachable octave.
pub const MIN_OCTAVE: u8 = 1;

// ── Pitch ────────────────────────────────────────────────────────────────

/// The low five bits of a packed note.
///
/// The twelve chromatic pitches come first, followed by the pseudo-notes
/// that control playback instead of sounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Pitch {
    C = 0,
    /// C sharp / D flat.
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
    /// Silence for the note's length.
    Rest,
    /// Marks the end of a song.
    End,
    /// Move up one octave.
    OctaveUp,
    /// Move down one octave.
    OctaveDown,
    /// Return to the default octave.
    OctaveReset,
}

impl Pitch {
    /// The twelve sounding pitches, in semitone order.
    pub const CHROMATIC: [Pitch; 12] = [
        Pitch::C,
        Pitch::Cs,
        Pitch::D,
        Pitch::Ds,
        Pitch::E,
        Pitch::F,
        Pitch::Fs,
        Pitch::G,
        Pitch::Gs,
        Pitch::A,
        Pitch::As,
        Pitch::B,
    ];

    /// Decode the pitch bits of `bits`. Values with no defined pitch decode
    /// as [`Pitch::Rest`].
    pub const fn from_bits(bits: u8) -> Self {
        match bits & PITCH_MASK {
            0 => Pitch::C,
            1 => Pitch::Cs,
            2 => Pitch::D,
            3 => Pitch::Ds,
            4 => Pitch::E,
            5 => Pitch::F,
            6 => Pitch::Fs,
            7 => Pitch::G,
            8 => Pitch::Gs,
            9 => Pitch::A,
            10 => Pitch::As,
            11 => Pitch::B,
            13 => Pitch::End,
            14 => Pitch::OctaveUp,
            15 => Pitch::OctaveDown,
            16 => Pitch::OctaveReset,
            _ => Pitch::Rest,
        }
    }

    /// Semitone above C for sounding pitches, `None` otherwise.
    pub const fn semitone(self) -> Option<u8> {
        let value = self as u8;
        if value < 12 {
            Some(value)
        } else {
            None
        }
    }

    /// `true` for the twelve pitches that produce a tone.
    pub const fn is_tonal(self) -> bool {
        self.semitone().is_some()
    }
}

// ── NoteLength ───────────────────────────────────────────────────────────

/// The high three bits of a packed note.
///
/// An eighth note is encoded as zero, so a bare pitch is an eighth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum NoteLength {
    #[default]
    Eighth = 0,
    Quarter,
    ThreeEighths,
    Half,
    SixEighths,
    Full,
}

impl NoteLength {
    /// Every length, shortest first.
    pub const ALL: [NoteLength; 6] = [
        NoteLength::Eighth,
        NoteLength::Quarter,
        NoteLength::ThreeEighths,
        NoteLength::Half,
        NoteLength::SixEighths,
        NoteLength::Full,
    ];

    /// Decode the length bits of `bits`. The two unused encodings decode
    /// as [`NoteLength::Eighth`].
    pub const fn from_bits(bits: u8) -> Self {
        match bits >> PITCH_BITS {
            1 => NoteLength::Quarter,
            2 => NoteLength::ThreeEighths,
            3 => NoteLength::Half,
            4 => NoteLength::SixEighths,
            5 => NoteLength::Full,
            _ => NoteLength::Eighth,
        }
    }

    /// Length in eighth notes.
    pub const fn eighths(self) -> u32 {
        match self {
            NoteLength::Eighth => 1,
            NoteLength::Quarter => 2,
            NoteLength::ThreeEighths => 3,
            NoteLength::Half => 4,
            NoteLength::SixEighths => 6,
            NoteLength::Full => 8,
        }
    }

    const fn bits(self) -> u8 {
        (self as u8) << PITCH_BITS
    }
}

// ── PackedNote ───────────────────────────────────────────────────────────

/// One byte of song data: `length << 5 | pitch`.
///
/// ```
/// use buzzer_tones::{note, NoteEvent, NoteLength, PackedNote, Pitch};
///
/// let g_half = note(Pitch::G, NoteLength::Half);
/// assert_eq!(g_half.bits(), 7 | 3 << 5);
/// assert_eq!(
///     g_half.decode(),
///     NoteEvent::Tone { pitch: Pitch::G, length: NoteLength::Half }
/// );
/// assert_eq!(PackedNote::from(13).decode(), NoteEvent::End);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct PackedNote(u8);

/// Pack `pitch` and `length` into one byte. Usable in `const` song tables.
pub const fn note(pitch: Pitch, length: NoteLength) -> PackedNote {
    PackedNote::new(pitch, length)
}

impl PackedNote {
    /// The end-of-song marker.
    pub const END: PackedNote = PackedNote::new(Pitch::End, NoteLength::Eighth);

    pub const fn new(pitch: Pitch, length: NoteLength) -> Self {
        Self(pitch as u8 | length.bits())
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn pitch(self) -> Pitch {
        Pitch::from_bits(self.0)
    }

    pub const fn length(self) -> NoteLength {
        NoteLength::from_bits(self.0)
    }

    /// Split the byte into the event the sequencer acts on.
    pub const fn decode(self) -> NoteEvent {
        let length = self.length();
        match self.pitch() {
            Pitch::Rest => NoteEvent::Rest(length),
            Pitch::End => NoteEvent::End,
            Pitch::OctaveUp => NoteEvent::Octave(OctaveShift::Up),
            Pitch::OctaveDown => NoteEvent::Octave(OctaveShift::Down),
            Pitch::OctaveReset => NoteEvent::Octave(OctaveShift::Reset),
            pitch => NoteEvent::Tone { pitch, length },
        }
    }
}

impl From<u8> for PackedNote {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<PackedNote> for u8 {
    fn from(note: PackedNote) -> Self {
        note.0
    }
}

impl From<Pitch> for PackedNote {
    fn from(pitch: Pitch) -> Self {
        PackedNote::new(pitch, NoteLength::Eighth)
    }
}

// ── Decoded events ───────────────────────────────────────────────────────

/// Octave change requested by a control note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OctaveShift {
    Up,
    Down,
    Reset,
}

/// What a packed note asks the sequencer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoteEvent {
    /// Sound `pitch` for `length`.
    Tone { pitch: Pitch, length: NoteLength },
    /// Stay silent for `length`.
    Rest(NoteLength),
    /// Change octave; nothing is played.
    Octave(OctaveShift),
    /// Stop reading the song.
    End,
}

// ── Octave state ─────────────────────────────────────────────────────────

/// The current octave, clamped to `[MIN_OCTAVE, max]`.
///
/// Only octave control notes change it, and a new song does not reset it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OctaveState {
    current: u8,
    default: u8,
    max: u8,
}

impl OctaveState {
    /// Start at `default`, clamped into `[MIN_OCTAVE, max]`.
    pub fn new(default: u8, max: u8) -> Self {
        let max = max.max(MIN_OCTAVE);
        let default = default.clamp(MIN_OCTAVE, max);
        Self {
            current: default,
            default,
            max,
        }
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    /// Apply `shift` and return the new octave. Moving past either bound
    /// leaves the octave where it is.
    pub fn apply(&mut self, shift: OctaveShift) -> u8 {
        self.current = match shift {
            OctaveShift::Up => self.current.saturating_add(1).min(self.max),
            OctaveShift::Down => self.current.saturating_sub(1).max(MIN_OCTAVE),
            OctaveShift::Reset => self.default,
        };
        self.current
    }

    /// Back to the default octave.
    pub fn reset(&mut self) {
        self.current = self.default;
    }
}

// ── Period and length ────────────────────────────────────────────────────

/// Octave-0 frequencies of C..B in hundredths of a hertz.
const OCTAVE_ZERO_CENTI_HZ: [u64; 12] = [
    1635, 1732, 1835, 1945, 2060, 2183, 2312, 2450, 2596, 2750, 2914, 3087,
];

/// Reference-clock ticks per octave-0 cycle of each chromatic pitch.
const BASE_PERIODS: [u32; 12] = base_periods();

const fn base_periods() -> [u32; 12] {
    let mut periods = [0u32; 12];
    let mut i = 0;
    while i < 12 {
        periods[i] = (REFERENCE_CLOCK_HZ * 100 / OCTAVE_ZERO_CENTI_HZ[i]) as u32;
        i += 1;
    }
    periods
}

/// Octave-independent period of `pitch`.
///
/// Rests, unknown pitches and control notes return [`SILENT_PERIOD`].
/// Octave controls are handled by the caller through [`NoteEvent::Octave`];
/// they never reach this function as a tone.
pub const fn base_period(pitch: Pitch) -> u32 {
    match pitch.semitone() {
        Some(semitone) => BASE_PERIODS[semitone as usize],
        None => SILENT_PERIOD,
    }
}

/// Period used to time a rest: a B, so a rest lasts exactly as long as a
/// sounded B of the same length at the same octave.
pub const REST_PERIOD: u32 = base_period(Pitch::B);

/// Scale `base` to `octave`: halve once per octave, then divide by
/// `period_scale`.
///
/// Non-silent periods never scale below 1, so dividing a note length by the
/// result is always safe. [`SILENT_PERIOD`] stays silent.
pub fn adjusted_period(base: u32, octave: u8, period_scale: u32) -> u32 {
    if base == SILENT_PERIOD {
        return SILENT_PERIOD;
    }
    let shifted = base.checked_shr(u32::from(octave)).unwrap_or(0);
    (shifted / period_scale.max(1)).max(1)
}

/// Absolute length of `length` in wait units.
pub fn length_cycles(length: NoteLength, eighth_note_cycles: u32) -> u32 {
    eighth_note_cycles.saturating_mul(length.eighths())
}

/// Cycles needed to fill `length_cycles` at `period`.
///
/// This keeps every note the same duration whatever its pitch: a higher
/// pitch gets more, shorter cycles. A silent period yields zero cycles.
pub fn cycles_for(length_cycles: u32, period: u32) -> u32 {
    length_cycles.checked_div(period).unwrap_or(0)
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE: u32 = 1000;
    const EIGHTH: u32 = 50_000;

    // ── Bit layout ───────────────────────────────────────────────────

    #[test]
    fn bare_pitch_is_an_eighth() {
        let n = PackedNote::from(Pitch::A);
        assert_eq!(n.bits(), 9);
        assert_eq!(n.length(), NoteLength::Eighth);
    }

    #[test]
    fn every_pitch_and_length_decodes_back() {
        for semitone in 0..17u8 {
            let pitch = Pitch::from_bits(semitone);
            for length in NoteLength::ALL {
                let packed = note(pitch, length);
                assert_eq!(packed.pitch(), pitch);
                assert_eq!(packed.length(), length);
            }
        }
    }

    #[test]
    fn length_occupies_the_high_bits() {
        assert_eq!(note(Pitch::C, NoteLength::Quarter).bits(), 0b0010_0000);
        assert_eq!(note(Pitch::C, NoteLength::Full).bits(), 0b1010_0000);
        assert_eq!(note(Pitch::B, NoteLength::Full).bits(), 0b1010_1011);
    }

    #[test]
    fn unknown_pitch_bits_decode_as_rest() {
        for bits in 17..32u8 {
            assert_eq!(Pitch::from_bits(bits), Pitch::Rest);
            assert_eq!(
                PackedNote::from(bits | 0b0110_0000).decode(),
                NoteEvent::Rest(NoteLength::Half)
            );
        }
    }

    #[test]
    fn unused_length_bits_decode_as_eighth() {
        assert_eq!(NoteLength::from_bits(0b1100_0000), NoteLength::Eighth);
        assert_eq!(NoteLength::from_bits(0b1110_0000), NoteLength::Eighth);
    }

    #[test]
    fn decode_control_notes() {
        assert_eq!(PackedNote::END.decode(), NoteEvent::End);
        assert_eq!(
            PackedNote::from(Pitch::OctaveUp).decode(),
            NoteEvent::Octave(OctaveShift::Up)
        );
        assert_eq!(
            PackedNote::from(Pitch::OctaveDown).decode(),
            NoteEvent::Octave(OctaveShift::Down)
        );
        assert_eq!(
            PackedNote::from(Pitch::OctaveReset).decode(),
            NoteEvent::Octave(OctaveShift::Reset)
        );
    }

    #[test]
    fn tonal_pitches() {
        for (i, pitch) in Pitch::CHROMATIC.iter().enumerate() {
            assert_eq!(pitch.semitone(), Some(i as u8));
            assert!(pitch.is_tonal());
        }
        assert!(!Pitch::Rest.is_tonal());
        assert!(!Pitch::End.is_tonal());
        assert!(!Pitch::OctaveReset.is_tonal());
    }

    // ── Periods ──────────────────────────────────────────────────────

    #[test]
    fn base_periods_fall_with_pitch() {
        for pair in Pitch::CHROMATIC.windows(2) {
            assert!(base_period(pair[0]) > base_period(pair[1]));
        }
    }

    #[test]
    fn base_period_of_a_matches_the_clock() {
        // A0 = 27.5 Hz at a 48 MHz reference.
        assert_eq!(base_period(Pitch::A), 1_745_454);
    }

    #[test]
    fn non_tonal_pitches_are_silent() {
        for pitch in [
            Pitch::Rest,
            Pitch::End,
            Pitch::OctaveUp,
            Pitch::OctaveDown,
            Pitch::OctaveReset,
        ] {
            assert_eq!(base_period(pitch), SILENT_PERIOD);
        }
    }

    #[test]
    fn adjusted_period_never_rises_with_octave() {
        for pitch in Pitch::CHROMATIC {
            let base = base_period(pitch);
            for octave in MIN_OCTAVE..8 {
                assert!(
                    adjusted_period(base, octave + 1, SCALE) <= adjusted_period(base, octave, SCALE),
                    "{:?} octave {}",
                    pitch,
                    octave
                );
            }
        }
    }

    #[test]
    fn adjusted_period_halves_per_octave() {
        let base = base_period(Pitch::C);
        assert_eq!(adjusted_period(base, 4, SCALE), 183);
        assert_eq!(adjusted_period(base, 5, SCALE), 91);
        assert_eq!(adjusted_period(base, 6, SCALE), 45);
    }

    #[test]
    fn adjusted_period_clamps_to_one() {
        assert_eq!(adjusted_period(base_period(Pitch::B), 31, SCALE), 1);
        assert_eq!(adjusted_period(base_period(Pitch::B), 200, SCALE), 1);
        assert_eq!(adjusted_period(5, 0, 0), 5);
    }

    #[test]
    fn silent_period_stays_silent() {
        assert_eq!(adjusted_period(SILENT_PERIOD, 4, SCALE), SILENT_PERIOD);
    }

    // ── Lengths ──────────────────────────────────────────────────────

    #[test]
    fn lengths_are_exact_multiples_of_an_eighth() {
        let multiples: Vec<u32> = NoteLength::ALL
            .iter()
            .map(|&l| length_cycles(l, EIGHTH) / EIGHTH)
            .collect();
        assert_eq!(multiples, vec![1, 2, 3, 4, 6, 8]);
    }

    #[test]
    fn lengths_strictly_increase() {
        for pair in NoteLength::ALL.windows(2) {
            assert!(length_cycles(pair[0], EIGHTH) < length_cycles(pair[1], EIGHTH));
        }
    }

    #[test]
    fn cycles_times_period_fills_the_length() {
        for pitch in Pitch::CHROMATIC {
            for octave in MIN_OCTAVE..=8 {
                for length in NoteLength::ALL {
                    let period = adjusted_period(base_period(pitch), octave, SCALE);
                    let total = length_cycles(length, EIGHTH);
                    let cycles = cycles_for(total, period);
                    let played = cycles * period;
                    assert!(played <= total);
                    assert!(total - played < period);
                }
            }
        }
    }

    #[test]
    fn higher_pitch_gets_more_cycles() {
        let total = length_cycles(NoteLength::Full, EIGHTH);
        let low = cycles_for(total, adjusted_period(base_period(Pitch::C), 4, SCALE));
        let high = cycles_for(total, adjusted_period(base_period(Pitch::C), 5, SCALE));
        assert!(high > low);
    }

    #[test]
    fn zero_period_gives_zero_cycles() {
        assert_eq!(cycles_for(400_000, 0), 0);
    }

    // ── Octave state ─────────────────────────────────────────────────

    #[test]
    fn octave_starts_at_default() {
        let octave = OctaveState::new(4, 8);
        assert_eq!(octave.current(), 4);
        assert_eq!(octave.max(), 8);
    }

    #[test]
    fn octave_up_clamps_at_max() {
        let mut octave = OctaveState::new(8, 8);
        assert_eq!(octave.apply(OctaveShift::Up), 8);
        assert_eq!(octave.current(), 8);
    }

    #[test]
    fn octave_down_clamps_at_one() {
        let mut octave = OctaveState::new(1, 8);
        assert_eq!(octave.apply(OctaveShift::Down), 1);
    }

    #[test]
    fn octave_reset_returns_to_default() {
        let mut octave = OctaveState::new(4, 8);
        octave.apply(OctaveShift::Up);
        octave.apply(OctaveShift::Up);
        assert_eq!(octave.current(), 6);
        assert_eq!(octave.apply(OctaveShift::Reset), 4);
    }

    #[test]
    fn octave_new_clamps_default() {
        assert_eq!(OctaveState::new(0, 8).current(), 1);
        assert_eq!(OctaveState::new(12, 8).current(), 8);
        assert_eq!(OctaveState::new(4, 0).current(), 1);
    }
}
