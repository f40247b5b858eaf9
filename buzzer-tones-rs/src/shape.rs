//! Period envelopes applied across a tone run.
//!
//! A [`Shape`] maps `(cycle index, total cycles, target period)` to the
//! half-period used for that one cycle. It colours a tone (chirp, swell,
//! soft edges) without changing which note is being played.

/// Envelope applied to the period of each cycle in a tone run.
///
/// All variants are pure integer arithmetic. The `index` passed to
/// [`Shape::period()`] is always in `0..total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    /// Every cycle uses the target period.
    #[default]
    Constant,
    /// Linear ramp from 0 up to the target.
    Rising,
    /// Linear ramp from the target down to 0.
    Falling,
    /// Parabola: target at both edges, 0 at the midpoint.
    Valley,
    /// Inverted parabola: 0 at both edges, target at the midpoint.
    Hill,
    /// Flat target in the middle; short linear ramps over the first and last
    /// `total / 80` cycles soften the attack and release.
    Bowl,
}

/// Ramp length divisor for [`Shape::Bowl`]: each edge ramp covers
/// `total / BOWL_EDGE_DIVISOR` cycles, leaving 97.5% of the run flat.
pub const BOWL_EDGE_DIVISOR: u32 = 80;

impl Shape {
    /// Every variant, for exhaustive checks.
    pub const ALL: [Shape; 6] = [
        Shape::Constant,
        Shape::Rising,
        Shape::Falling,
        Shape::Valley,
        Shape::Hill,
        Shape::Bowl,
    ];

    /// Smallest run this shape is defined for.
    ///
    /// The parabolic and bowl shapes divide by half the run length, so they
    /// need at least two cycles.
    pub const fn min_cycles(self) -> u32 {
        match self {
            Shape::Constant | Shape::Rising | Shape::Falling => 1,
            Shape::Valley | Shape::Hill | Shape::Bowl => 2,
        }
    }

    /// Period for cycle `index` of a run of `total` cycles aiming at `target`.
    ///
    /// Callers must keep `total >= self.min_cycles()`. Outside that range the
    /// result is `target` rather than a division fault.
    ///
    /// # Example
    ///
    /// ```
    /// use buzzer_tones::Shape;
    ///
    /// assert_eq!(Shape::Valley.period(50, 100, 40), 0);
    /// assert_eq!(Shape::Valley.period(0, 100, 40), 40);
    /// assert_eq!(Shape::Hill.period(50, 100, 40), 40);
    /// ```
    pub fn period(self, index: u32, total: u32, target: u32) -> u32 {
        if total < self.min_cycles() {
            return target;
        }
        match self {
            Shape::Constant => target,
            Shape::Rising => ramp(index, total, target),
            Shape::Falling => target.saturating_sub(ramp(index, total, target)),
            Shape::Valley => valley(index, total, target),
            Shape::Hill => target.saturating_sub(valley(index, total, target)),
            Shape::Bowl => bowl(index, total, target),
        }
    }
}

/// `index * target / total`, widened so the product cannot overflow.
fn ramp(index: u32, total: u32, target: u32) -> u32 {
    (u64::from(index) * u64::from(target) / u64::from(total)) as u32
}

fn valley(index: u32, total: u32, target: u32) -> u32 {
    let half = u128::from(total / 2);
    let distance = u128::from(index.abs_diff(total / 2));
    // distance <= half for every index in 0..total, so this never exceeds target
    (distance * distance * u128::from(target) / (half * half)) as u32
}

fn bowl(index: u32, total: u32, target: u32) -> u32 {
    let edge = total / BOWL_EDGE_DIVISOR;
    if edge == 0 {
        return target;
    }
    let from_edge = index.min((total - 1).saturating_sub(index));
    if from_edge >= edge {
        target
    } else {
        ramp(from_edge, edge, target)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
