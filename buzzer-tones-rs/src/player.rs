//! The song sequencer.
//!
//! [`Player`] owns everything that persists between calls: the output, the
//! current octave and the index of the next song. There is no global state,
//! so independent players (one per test, say) never interfere.
//!
//! Octave state is **not** reset when a new song starts. A song
//! that relies on a known octave begins with an octave-reset note; the
//! others inherit whatever the previous song left behind.

use crate::chord::ChordPlan;
use crate::config::SynthConfig;
use crate::error::BuzzerError;
use crate::hal::BuzzerOutput;
use crate::morse::MorseSymbol;
use crate::note::{
    adjusted_period, base_period, cycles_for, length_cycles, NoteEvent, OctaveState, PackedNote,
    Pitch, REST_PERIOD,
};
use crate::songs::Song;
use crate::tone::{generate_tone, ToneRequest};

/// What [`Player::play_note()`] did with a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoteOutcome {
    /// A tone was played.
    Played { pitch: Pitch, period: u32, cycles: u32 },
    /// The output stayed still for the note's length.
    Rested { period: u32, cycles: u32 },
    /// An octave control note moved the octave (or tried to, at a bound).
    OctaveChanged { octave: u8 },
    /// The end marker. Nothing was played.
    EndOfSong,
    /// The note is shorter than one cycle at its period. Nothing was played.
    Skipped { pitch: Pitch, period: u32 },
}

/// How a song run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SongStatus {
    /// The end marker, the end of the table or the length guard was reached.
    Finished { index: usize, notes: usize },
    /// The stop condition fired before note number `notes`.
    Cancelled { index: usize, notes: usize },
}

impl SongStatus {
    pub fn index(&self) -> usize {
        match *self {
            SongStatus::Finished { index, .. } | SongStatus::Cancelled { index, .. } => index,
        }
    }

    /// Notes handled before the run ended, control notes included.
    pub fn notes(&self) -> usize {
        match *self {
            SongStatus::Finished { notes, .. } | SongStatus::Cancelled { notes, .. } => notes,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, SongStatus::Finished { .. })
    }
}

/// Plays notes, songs, Morse chirps and chords on one [`BuzzerOutput`].
///
/// # Example
///
/// ```
/// use buzzer_tones::{BuzzerOutput, Player, SongStatus, SynthConfig, DEFAULT_PLAYLIST};
/// # struct Null;
/// # impl BuzzerOutput for Null {
/// #     type Error = ();
/// #     fn toggle(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn busy_wait(&mut self, _: u32) {}
/// #     fn pause_ms(&mut self, _: u32) {}
/// # }
///
/// let mut player = Player::new(Null, SynthConfig::default(), DEFAULT_PLAYLIST);
/// assert_eq!(player.play_song(), Ok(SongStatus::Finished { index: 0, notes: 5 }));
/// assert_eq!(player.octave(), 6);
/// assert_eq!(player.current_song_index(), 1);
/// ```
pub struct Player<'a, B> {
    output: B,
    config: SynthConfig,
    octave: OctaveState,
    songs: &'a [Song<'a>],
    current_song: usize,
}

impl<'a, B> Player<'a, B>
where
    B: BuzzerOutput,
{
    /// Create a player starting at the first song and the default octave.
    ///
    /// `config` is passed through [`SynthConfig::validated()`].
    pub fn new(output: B, config: SynthConfig, songs: &'a [Song<'a>]) -> Self {
        let config = config.validated();
        Self {
            output,
            octave: OctaveState::new(config.default_octave, config.max_octave),
            config,
            songs,
            current_song: 0,
        }
    }

    // ── Notes ────────────────────────────────────────────────────────

    /// Decode and play one note.
    ///
    /// Tones and rests last `length / period` cycles of `period`, so every
    /// note of a given length takes the same time whatever its pitch, and
    /// are followed by the inter-note pause. Octave control notes and the
    /// end marker return immediately.
    pub fn play_note(&mut self, note: PackedNote) -> Result<NoteOutcome, BuzzerError<B::Error>> {
        let (pitch, length, base, silent) = match note.decode() {
            NoteEvent::End => return Ok(NoteOutcome::EndOfSong),
            NoteEvent::Octave(shift) => {
                let octave = self.octave.apply(shift);
                #[cfg(feature = "defmt")]
                defmt::debug!("octave {} -> {}", shift, octave);
                return Ok(NoteOutcome::OctaveChanged { octave });
            }
            NoteEvent::Tone { pitch, length } => (pitch, length, base_period(pitch), false),
            NoteEvent::Rest(length) => (Pitch::Rest, length, REST_PERIOD, true),
        };

        let period = adjusted_period(base, self.octave.current(), self.config.period_scale);
        let cycles = cycles_for(
            length_cycles(length, self.config.eighth_note_cycles),
            period,
        );
        if cycles == 0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("skip {}: period {} too long", pitch, period);
            return Ok(NoteOutcome::Skipped { pitch, period });
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("note {} x{} period {} cycles {}", pitch, length, period, cycles);

        let request = ToneRequest::new(cycles, period).with_silent(silent);
        generate_tone(&mut self.output, &request, self.config.inter_repeat_pause_ms)?;
        self.output.pause_ms(self.config.inter_note_pause_ms);

        Ok(if silent {
            NoteOutcome::Rested { period, cycles }
        } else {
            NoteOutcome::Played {
                pitch,
                period,
                cycles,
            }
        })
    }

    // ── Songs ────────────────────────────────────────────────────────

    /// Play the current song to its end, then move the song index on by one
    /// (wrapping).
    pub fn play_song(&mut self) -> Result<SongStatus, BuzzerError<B::Error>> {
        self.play_song_until(|| false)
    }

    /// Like [`play_song()`](Self::play_song), polling `stop` before each
    /// note. A cancelled song leaves the song index where it was, so the
    /// same song starts over on the next call.
    ///
    /// # Errors
    ///
    /// [`BuzzerError::EmptyPlaylist`] if the player has no songs, or any
    /// error from the output.
    pub fn play_song_until<F>(&mut self, stop: F) -> Result<SongStatus, BuzzerError<B::Error>>
    where
        F: FnMut() -> bool,
    {
        if self.songs.is_empty() {
            return Err(BuzzerError::EmptyPlaylist);
        }
        let index = self.current_song;
        let status = self.run_song(index, stop)?;
        if status.is_finished() {
            self.current_song = (index + 1) % self.songs.len();
        }
        Ok(status)
    }

    /// Play song `index` without touching the rotation.
    pub fn play_song_at(&mut self, index: usize) -> Result<SongStatus, BuzzerError<B::Error>> {
        self.run_song(index, || false)
    }

    fn run_song<F>(&mut self, index: usize, mut stop: F) -> Result<SongStatus, BuzzerError<B::Error>>
    where
        F: FnMut() -> bool,
    {
        let song = *self.songs.get(index).ok_or(BuzzerError::<B::Error>::BadSongIndex)?;

        #[cfg(feature = "defmt")]
        defmt::info!("song {}: {=str} (octave {})", index, song.name, self.octave.current());

        let guard = self.config.max_song_length;
        let mut played = 0;
        for &note in song.notes.iter().take(guard) {
            if stop() {
                #[cfg(feature = "defmt")]
                defmt::info!("song {} cancelled after {} notes", index, played);
                return Ok(SongStatus::Cancelled {
                    index,
                    notes: played,
                });
            }
            if self.play_note(note)? == NoteOutcome::EndOfSong {
                #[cfg(feature = "defmt")]
                defmt::info!("song {} finished, {} notes", index, played);
                return Ok(SongStatus::Finished {
                    index,
                    notes: played,
                });
            }
            played += 1;
        }

        if song.notes.len() > guard {
            #[cfg(feature = "defmt")]
            defmt::warn!("song {} has no end marker within {} notes", index, guard);
        }
        Ok(SongStatus::Finished {
            index,
            notes: played,
        })
    }

    // ── Other sounds ─────────────────────────────────────────────────

    /// A flat tone repeated `times` times, with the inter-repeat pause
    /// between repeats.
    pub fn beep(&mut self, cycles: u32, period: u32, times: u32) -> Result<(), BuzzerError<B::Error>> {
        let request = ToneRequest::new(cycles, period).with_repeat(times);
        generate_tone(&mut self.output, &request, self.config.inter_repeat_pause_ms)
    }

    pub fn morse(&mut self, symbol: MorseSymbol) -> Result<(), BuzzerError<B::Error>> {
        let request = symbol.request(&self.config);
        generate_tone(&mut self.output, &request, self.config.inter_repeat_pause_ms)
    }

    /// Rising chirp.
    pub fn morse_dot(&mut self) -> Result<(), BuzzerError<B::Error>> {
        self.morse(MorseSymbol::Dot)
    }

    /// Longer chirp that dips in the middle.
    pub fn morse_dash(&mut self) -> Result<(), BuzzerError<B::Error>> {
        self.morse(MorseSymbol::Dash)
    }

    /// Play `notes` together for the length of the first one, at the
    /// current octave. Returns the number of slices that sounded.
    ///
    /// The chord is followed by one inter-note pause.
    pub fn play_chord(&mut self, notes: &[PackedNote]) -> Result<u32, BuzzerError<B::Error>> {
        let plan = ChordPlan::new::<B::Error>(notes, self.octave.current(), &self.config)?;

        let mut sounded = 0;
        for voice in plan.slices() {
            match voice.request() {
                Some(request) => {
                    generate_tone(&mut self.output, &request, self.config.inter_repeat_pause_ms)?;
                    sounded += 1;
                }
                None => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("chord slice skipped for {}", voice.note);
                }
            }
        }
        self.output.pause_ms(self.config.inter_note_pause_ms);
        Ok(sounded)
    }

    // ── State ────────────────────────────────────────────────────────

    pub fn octave(&self) -> u8 {
        self.octave.current()
    }

    /// Index of the song the next [`play_song()`](Self::play_song) plays.
    pub fn current_song_index(&self) -> usize {
        self.current_song
    }

    pub fn songs(&self) -> &'a [Song<'a>] {
        self.songs
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn output(&self) -> &B {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut B {
        &mut self.output
    }

    /// Back to the default octave and the first song, as after power-up.
    pub fn reset(&mut self) {
        self.octave.reset();
        self.current_song = 0;
    }

    /// Consume the player and hand back the output.
    pub fn release(self) -> B {
        self.output
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
