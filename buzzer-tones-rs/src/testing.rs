//! Test-only [`BuzzerOutput`] that records everything it is asked to do.

use crate::hal::BuzzerOutput;

/// One call made on the output, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Toggle,
    Wait(u32),
    Pause(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PinStuck;

#[derive(Debug, Default)]
pub(crate) struct RecordingBuzzer {
    pub(crate) level: bool,
    pub(crate) events: Vec<Event>,
    /// Fail every toggle once this many have succeeded.
    pub(crate) fail_after: Option<usize>,
}

impl RecordingBuzzer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_after(toggles: usize) -> Self {
        Self {
            fail_after: Some(toggles),
            ..Self::default()
        }
    }

    pub(crate) fn toggles(&self) -> usize {
        self.events.iter().filter(|e| **e == Event::Toggle).count()
    }

    pub(crate) fn waits(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Wait(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn waited_units(&self) -> u64 {
        self.waits().iter().map(|&n| u64::from(n)).sum()
    }

    pub(crate) fn pauses(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Pause(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }
}

impl BuzzerOutput for RecordingBuzzer {
    type Error = PinStuck;

    fn toggle(&mut self) -> Result<(), PinStuck> {
        if let Some(limit) = self.fail_after {
            if self.toggles() >= limit {
                return Err(PinStuck);
            }
        }
        self.level = !self.level;
        self.events.push(Event::Toggle);
        Ok(())
    }

    fn busy_wait(&mut self, units: u32) {
        self.events.push(Event::Wait(units));
    }

    fn pause_ms(&mut self, ms: u32) {
        self.events.push(Event::Pause(ms));
    }
}
