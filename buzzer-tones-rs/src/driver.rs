//! [`BuzzerOutput`] on top of `embedded-hal` 1.0.
//!
//! [`PinBuzzer`] drives a piezo from any [`StatefulOutputPin`] and times it
//! with any [`DelayNs`], so the same player runs on every HAL that
//! implements the 1.0 traits.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::StatefulOutputPin;

use crate::hal::BuzzerOutput;

/// Nanoseconds per wait unit that put A at the default octave (a period of
/// 109 units) close to 440 Hz.
pub const DEFAULT_UNIT_NS: u32 = 10_400;

/// A buzzer on a single GPIO.
///
/// One wait unit lasts `unit_ns` nanoseconds. Waits longer than `u32::MAX`
/// nanoseconds are issued as several delays.
///
/// # Example
///
/// ```ignore
/// use buzzer_tones::{PinBuzzer, DEFAULT_UNIT_NS};
///
/// let beeper = Output::new(p.PIN_14, Level::Low);
/// let mut buzzer = PinBuzzer::new(beeper, Delay, DEFAULT_UNIT_NS);
///
/// // Running from a slower clock: make each unit longer.
/// buzzer.set_unit_ns(2 * DEFAULT_UNIT_NS);
/// ```
pub struct PinBuzzer<P, D> {
    pin: P,
    delay: D,
    unit_ns: u32,
}

impl<P, D> PinBuzzer<P, D>
where
    P: StatefulOutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D, unit_ns: u32) -> Self {
        Self {
            pin,
            delay,
            unit_ns,
        }
    }

    pub fn unit_ns(&self) -> u32 {
        self.unit_ns
    }

    /// Recalibrate the wait unit.
    pub fn set_unit_ns(&mut self, unit_ns: u32) {
        self.unit_ns = unit_ns;
    }

    /// Current pin level.
    pub fn is_high(&mut self) -> Result<bool, P::Error> {
        self.pin.is_set_high()
    }

    /// Give back the pin and delay.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D> BuzzerOutput for PinBuzzer<P, D>
where
    P: StatefulOutputPin,
    D: DelayNs,
{
    type Error = P::Error;

    fn toggle(&mut self) -> Result<(), P::Error> {
        self.pin.toggle()
    }

    fn busy_wait(&mut self, units: u32) {
        let mut remaining = u64::from(units) * u64::from(self.unit_ns);
        while remaining > 0 {
            let chunk = remaining.min(u64::from(u32::MAX)) as u32;
            self.delay.delay_ns(chunk);
            remaining -= u64::from(chunk);
        }
    }

    fn pause_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SynthConfig;
    use crate::note::{note, NoteLength, Pitch};
    use crate::player::Player;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorType, OutputPin};

    #[derive(Default)]
    struct FakePin {
        high: bool,
        edges: usize,
    }

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            if self.high {
                self.edges += 1;
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            if !self.high {
                self.edges += 1;
            }
            self.high = true;
            Ok(())
        }
    }

    impl StatefulOutputPin for FakePin {
        fn is_set_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_set_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    #[derive(Default)]
    struct FakeDelay {
        calls: Vec<u32>,
    }

    impl FakeDelay {
        fn total_ns(&self) -> u64 {
            self.calls.iter().map(|&ns| u64::from(ns)).sum()
        }
    }

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.calls.push(ns);
        }
    }

    fn buzzer() -> PinBuzzer<FakePin, FakeDelay> {
        PinBuzzer::new(FakePin::default(), FakeDelay::default(), DEFAULT_UNIT_NS)
    }

    #[test]
    fn toggle_flips_the_pin() {
        let mut b = buzzer();
        assert_eq!(b.is_high(), Ok(false));
        b.toggle().unwrap();
        assert_eq!(b.is_high(), Ok(true));
        b.toggle().unwrap();
        assert_eq!(b.is_high(), Ok(false));
    }

    #[test]
    fn wait_units_become_nanoseconds() {
        let mut b = buzzer();
        b.busy_wait(109);
        let (_, delay) = b.release();
        assert_eq!(delay.total_ns(), 109 * 10_400);
    }

    #[test]
    fn zero_wait_issues_no_delay() {
        let mut b = buzzer();
        b.busy_wait(0);
        let (_, delay) = b.release();
        assert!(delay.calls.is_empty());
    }

    #[test]
    fn long_wait_is_split_without_overflow() {
        let mut b = buzzer();
        b.busy_wait(u32::MAX);
        let (_, delay) = b.release();
        assert!(delay.calls.len() > 1);
        assert_eq!(delay.total_ns(), u64::from(u32::MAX) * 10_400);
    }

    #[test]
    fn pause_is_in_milliseconds() {
        let mut b = buzzer();
        b.pause_ms(50);
        let (_, delay) = b.release();
        assert_eq!(delay.total_ns(), 50_000_000);
    }

    #[test]
    fn recalibrated_unit() {
        let mut b = buzzer();
        b.set_unit_ns(1_000);
        assert_eq!(b.unit_ns(), 1_000);
        b.busy_wait(3);
        let (_, delay) = b.release();
        assert_eq!(delay.total_ns(), 3_000);
    }

    #[test]
    fn default_calibration_puts_a_near_440_hz() {
        // One cycle of the square wave is two half-periods.
        let half_period_ns = 109u64 * u64::from(DEFAULT_UNIT_NS);
        let hz = 1_000_000_000 / (2 * half_period_ns);
        assert!((430..=450).contains(&hz), "{} Hz", hz);
    }

    #[test]
    fn player_drives_the_pin() {
        let mut player = Player::new(buzzer(), SynthConfig::default(), &[]);
        player.play_note(note(Pitch::A, NoteLength::Eighth)).unwrap();

        let (pin, delay) = player.release().release();
        // 50 000 / 109 cycles, one edge each.
        assert_eq!(pin.edges, 458);
        let expected = 458 * 109 * u64::from(DEFAULT_UNIT_NS) + 50_000_000;
        assert_eq!(delay.total_ns(), expected);
    }
}
