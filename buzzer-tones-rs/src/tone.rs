//! The square-wave tone generator.
//!
//! [`generate_tone`] is the only code in the crate that touches the output:
//! every note, rest, chord slice and Morse chirp ends up here as a
//! [`ToneRequest`].

use crate::error::BuzzerError;
use crate::hal::BuzzerOutput;
use crate::shape::Shape;

/// A single tone run, consumed by [`generate_tone`].
///
/// Build one with [`ToneRequest::new()`] and adjust it with the `with_*`
/// methods:
///
/// ```
/// use buzzer_tones::{Shape, ToneRequest};
///
/// let chirp = ToneRequest::new(200, 40).with_shape(Shape::Rising);
/// assert_eq!(chirp.repeat, 1);
/// assert!(!chirp.silent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneRequest {
    /// Number of half-cycles (output edges) per repeat.
    pub cycles: u32,
    /// Target half-period, in wait units, handed to the shape.
    pub period: u32,
    /// Envelope applied across the run.
    pub shape: Shape,
    /// When set, the output is never toggled but the run still takes the
    /// same time. Rests are rendered this way.
    pub silent: bool,
    /// How many times the run is played. Zero plays nothing.
    pub repeat: u32,
}

impl ToneRequest {
    /// A single, audible, flat run.
    pub const fn new(cycles: u32, period: u32) -> Self {
        Self {
            cycles,
            period,
            shape: Shape::Constant,
            silent: false,
            repeat: 1,
        }
    }

    /// Replace the period envelope.
    pub const fn with_shape(self, shape: Shape) -> Self {
        Self { shape, ..self }
    }

    /// Mark the run as silent (timing only) or audible.
    pub const fn with_silent(self, silent: bool) -> Self {
        Self { silent, ..self }
    }

    /// Play the run `repeat` times.
    pub const fn with_repeat(self, repeat: u32) -> Self {
        Self { repeat, ..self }
    }

    /// Sum of every per-cycle wait this request will issue, across all
    /// repeats. Pauses between repeats are not included.
    pub fn total_wait_units(&self) -> u64 {
        let per_run: u64 = (0..self.cycles)
            .map(|c| u64::from(self.shape.period(c, self.cycles, self.period)))
            .sum();
        per_run * u64::from(self.repeat)
    }

    /// Number of output edges this request will produce.
    pub fn total_toggles(&self) -> u64 {
        if self.silent {
            0
        } else {
            u64::from(self.cycles) * u64::from(self.repeat)
        }
    }

    /// Reject runs too short for the requested shape.
    pub fn check<E>(&self) -> Result<(), BuzzerError<E>> {
        let required = self.shape.min_cycles();
        if self.cycles < required {
            return Err(BuzzerError::TooFewCycles {
                required,
                actual: self.cycles,
            });
        }
        Ok(())
    }
}

/// Play `request` on `output`, blocking until it is done.
///
/// For each repeat, and for each cycle `c` in `0..cycles`: toggle the output
/// (unless silent), then busy-wait `shape.period(c, cycles, period)` units.
/// `repeat_pause_ms` of silence separates consecutive repeats; there is no
/// pause before the first or after the last.
///
/// # Errors
///
/// * [`BuzzerError::TooFewCycles`] if `cycles` is below the shape's minimum
///   (checked before anything is played).
/// * [`BuzzerError::Output`] if the output fails to toggle. The run stops at
///   the failing edge.
///
/// # Example
///
/// ```
/// # use buzzer_tones::{generate_tone, BuzzerOutput, ToneRequest};
/// # struct Null;
/// # impl BuzzerOutput for Null {
/// #     type Error = ();
/// #     fn toggle(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn busy_wait(&mut self, _: u32) {}
/// #     fn pause_ms(&mut self, _: u32) {}
/// # }
/// # let mut buzzer = Null;
/// // Three short beeps, 300 ms apart.
/// let beep = ToneRequest::new(500, 100).with_repeat(3);
/// generate_tone(&mut buzzer, &beep, 300).unwrap();
/// ```
pub fn generate_tone<B>(
    output: &mut B,
    request: &ToneRequest,
    repeat_pause_ms: u32,
) -> Result<(), BuzzerError<B::Error>>
where
    B: BuzzerOutput,
{
    if request.repeat == 0 {
        return Ok(());
    }
    request.check::<B::Error>()?;

    for run in 0..request.repeat {
        if run > 0 {
            output.pause_ms(repeat_pause_ms);
        }
        for c in 0..request.cycles {
            if !request.silent {
                output.toggle()?;
            }
            let n = request.shape.period(c, request.cycles, request.period);
            output.busy_wait(n);
        }
    }

    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────
