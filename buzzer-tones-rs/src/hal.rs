//! The hardware boundary.
//!
//! The synthesis core needs exactly three things from the board, and they
//! are collected in [`BuzzerOutput`]. [`PinBuzzer`](crate::PinBuzzer) is the
//! stock implementation over `embedded-hal`; tests use a recording fake.

/// Everything the synthesis core needs from the hardware.
///
/// Wait units are abstract. One unit is whatever the implementation decides
/// it is, and the caller calibrates it against the board clock. Only the
/// *ratios* between periods and note lengths are meaningful to this crate.
pub trait BuzzerOutput {
    /// Error produced when the output line cannot be driven.
    type Error;

    /// Flip the buzzer line, producing one square-wave edge.
    fn toggle(&mut self) -> Result<(), Self::Error>;

    /// Block for approximately `units` calibrated wait units.
    fn busy_wait(&mut self, units: u32);

    /// Block for approximately `ms` milliseconds of wall-clock time.
    ///
    /// Used for the fixed gaps between notes and between repeats, which are
    /// real time rather than calibrated units.
    fn pause_ms(&mut self, ms: u32);
}

impl<T: BuzzerOutput + ?Sized> BuzzerOutput for &mut T {
    type Error = T::Error;

    fn toggle(&mut self) -> Result<(), Self::Error> {
        (**self).toggle()
    }

    fn busy_wait(&mut self, units: u32) {
        (**self).busy_wait(units)
    }

    fn pause_ms(&mut self, ms: u32) {
        (**self).pause_ms(ms)
    }
}
