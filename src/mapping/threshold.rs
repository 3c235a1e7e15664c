//! Threshold step functions
//!
//! Turns a continuous reading into one of a small, fixed set of tiers.
//! Thresholds are tested in order and the first strict comparison that
//! holds wins; if none holds the fallback tier is returned.

/// Comparison applied against each threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThresholdDirection {
    /// Tier selected when the input is strictly above the threshold
    Rising,
    /// Tier selected when the input is strictly below the threshold
    Falling,
}

/// Ordered threshold table mapping a reading onto a tier
///
/// A `Rising` table lists thresholds from highest to lowest, a `Falling`
/// table from lowest to highest. NaN never satisfies a comparison and so
/// always lands on the fallback.
#[derive(Debug, Clone, Copy)]
pub struct StepFunction<T: Copy + 'static> {
    direction: ThresholdDirection,
    steps: &'static [(f64, T)],
    otherwise: T,
}

impl<T: Copy + 'static> StepFunction<T> {
    /// Table whose tiers trigger when the input exceeds each threshold
    pub const fn rising(steps: &'static [(f64, T)], otherwise: T) -> Self {
        Self {
            direction: ThresholdDirection::Rising,
            steps,
            otherwise,
        }
    }

    /// Table whose tiers trigger when the input is below each threshold
    pub const fn falling(steps: &'static [(f64, T)], otherwise: T) -> Self {
        Self {
            direction: ThresholdDirection::Falling,
            steps,
            otherwise,
        }
    }

    /// Select the tier for an input value
    pub fn select(&self, input: f64) -> T {
        self.steps
            .iter()
            .find(|(threshold, _)| match self.direction {
                ThresholdDirection::Rising => input > *threshold,
                ThresholdDirection::Falling => input < *threshold,
            })
            .map(|(_, tier)| *tier)
            .unwrap_or(self.otherwise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RISING: StepFunction<u8> = StepFunction::rising(&[(75.0, 2), (50.0, 1)], 0);
    const FALLING: StepFunction<u8> = StepFunction::falling(&[(0.3, 0), (0.6, 1)], 2);

    #[test]
    fn test_rising_is_strict() {
        assert_eq!(RISING.select(75.0), 1);
        assert_eq!(RISING.select(75.1), 2);
        assert_eq!(RISING.select(50.0), 0);
        assert_eq!(RISING.select(50.5), 1);
        assert_eq!(RISING.select(-10.0), 0);
    }

    #[test]
    fn test_falling_is_strict() {
        assert_eq!(FALLING.select(0.0), 0);
        assert_eq!(FALLING.select(0.3), 1);
        assert_eq!(FALLING.select(0.59), 1);
        assert_eq!(FALLING.select(0.6), 2);
        assert_eq!(FALLING.select(1.0), 2);
    }

    #[test]
    fn test_nan_takes_fallback() {
        assert_eq!(RISING.select(f64::NAN), 0);
        assert_eq!(FALLING.select(f64::NAN), 2);
    }

    #[test]
    fn test_single_step_table() {
        const LOW: StepFunction<f64> = StepFunction::falling(&[(20.0, -0.7)], -0.3);

        assert_eq!(LOW.select(19.9), -0.7);
        assert_eq!(LOW.select(20.0), -0.3);
    }
}
