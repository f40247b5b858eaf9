//! Chords on a single-pin buzzer by time-division multiplexing.
//!
//! A one-bit output can only play one pitch at a time. A chord is
//! approximated by cutting the note's duration into short slices and
//! cycling through the voices one slice at a time, fast enough that the ear
//! blends them.
//!
//! ```text
//! chunks_per_note = 2, three voices:
//!
//! |  C  |  E  |  G  |  C  |  E  |  G  |
//! └──── round 1 ────┘└──── round 2 ────┘
//! ```
//!
//! The first note's length sets the length of the whole chord. Voices that
//! cannot sound (rests, control notes, or a period too long to fit one cycle
//! into a slice) keep their place in the rotation but their slices are
//! skipped.

use heapless::Vec;

use crate::config::SynthConfig;
use crate::error::BuzzerError;
use crate::note::{
    adjusted_period, base_period, cycles_for, length_cycles, NoteEvent, NoteLength, PackedNote,
    SILENT_PERIOD,
};
use crate::tone::ToneRequest;

/// Most voices one chord can hold.
pub const MAX_CHORD_NOTES: usize = 8;

/// One note of a chord, resolved at the chord's octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Voice {
    pub note: PackedNote,
    /// Half-period in wait units, [`SILENT_PERIOD`] for voices that do not
    /// sound.
    pub period: u32,
    /// Cycles played per slice. Zero when the voice is skipped.
    pub slice_cycles: u32,
}

impl Voice {
    /// The burst for one of this voice's slices, or `None` if it is skipped.
    pub fn request(&self) -> Option<ToneRequest> {
        if self.period == SILENT_PERIOD || self.slice_cycles == 0 {
            None
        } else {
            Some(ToneRequest::new(self.slice_cycles, self.period))
        }
    }
}

/// The slice schedule of one chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordPlan {
    voices: Vec<Voice, MAX_CHORD_NOTES>,
    length: NoteLength,
    rounds: u32,
    slice_length: u32,
}

impl ChordPlan {
    /// Resolve `notes` at `octave`.
    ///
    /// Octave control notes inside a chord are silent voices; they do not
    /// change the octave.
    ///
    /// # Errors
    ///
    /// [`BuzzerError::EmptyChord`] for no notes,
    /// [`BuzzerError::ChordTooLarge`] for more than [`MAX_CHORD_NOTES`].
    ///
    /// ```
    /// use buzzer_tones::{note, ChordPlan, NoteLength, Pitch, SynthConfig};
    ///
    /// let c_major = [
    ///     note(Pitch::C, NoteLength::Full),
    ///     note(Pitch::E, NoteLength::Eighth),
    ///     note(Pitch::G, NoteLength::Eighth),
    /// ];
    /// let plan = ChordPlan::new::<()>(&c_major, 4, &SynthConfig::default()).unwrap();
    /// // A full note cut into 4 rounds of 3 slices.
    /// assert_eq!(plan.slice_count(), 12);
    /// assert_eq!(plan.slice_length(), 400_000 / 12);
    /// ```
    pub fn new<E>(
        notes: &[PackedNote],
        octave: u8,
        config: &SynthConfig,
    ) -> Result<Self, BuzzerError<E>> {
        let first = notes.first().ok_or(BuzzerError::<E>::EmptyChord)?;
        if notes.len() > MAX_CHORD_NOTES {
            return Err(BuzzerError::ChordTooLarge);
        }

        let length = first.length();
        let rounds = config.chord_chunks_per_note.max(1);
        let slices = rounds.saturating_mul(notes.len() as u32);
        let slice_length = length_cycles(length, config.eighth_note_cycles) / slices;

        let mut voices = Vec::new();
        for &note in notes {
            let period = match note.decode() {
                NoteEvent::Tone { pitch, .. } => {
                    adjusted_period(base_period(pitch), octave, config.period_scale)
                }
                _ => SILENT_PERIOD,
            };
            let voice = Voice {
                note,
                period,
                slice_cycles: cycles_for(slice_length, period),
            };
            voices.push(voice).map_err(|_| BuzzerError::<E>::ChordTooLarge)?;
        }

        Ok(Self {
            voices,
            length,
            rounds,
            slice_length,
        })
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Length of the chord, taken from its first note.
    pub fn length(&self) -> NoteLength {
        self.length
    }

    /// Wait units each slice is sized to.
    pub fn slice_length(&self) -> u32 {
        self.slice_length
    }

    /// Total slots in the schedule, skipped ones included.
    pub fn slice_count(&self) -> u32 {
        self.rounds.saturating_mul(self.voices.len() as u32)
    }

    /// Every slot in playing order: each round visits every voice once.
    pub fn slices(&self) -> impl Iterator<Item = &Voice> + '_ {
        (0..self.rounds).flat_map(move |_| self.voices.iter())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
