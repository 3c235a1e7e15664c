//! Linear range mapper
//!
//! Every continuous output of the engine (tempo, filter cutoff, reverb,
//! bass velocity) and every normalized load value is a linear rescale of
//! one input range onto one output range, clamped to the output bounds.

use super::Mapper;

/// Linear interpolation mapper
#[derive(Debug, Clone)]
pub struct LinearMapper {
    name: &'static str,
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
}

impl LinearMapper {
    /// Create a new clamped linear mapper
    pub fn new(name: &'static str, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Self {
        Self {
            name,
            in_min,
            in_max,
            out_min,
            out_max,
        }
    }

    /// Mapper from `[in_min, in_max]` onto the unit interval
    pub fn unit(name: &'static str, in_min: f64, in_max: f64) -> Self {
        Self::new(name, in_min, in_max, 0.0, 1.0)
    }

    /// Lower and upper output bounds, in ascending order
    pub fn output_bounds(&self) -> (f64, f64) {
        (self.out_min.min(self.out_max), self.out_min.max(self.out_max))
    }
}

impl Mapper for LinearMapper {
    fn name(&self) -> &str {
        self.name
    }

    fn map(&self, input: f64) -> f64 {
        // NaN reads as the bottom of the input range
        if input.is_nan() {
            return self.out_min;
        }

        let in_range = self.in_max - self.in_min;
        let normalized = if in_range.abs() < f64::EPSILON {
            0.5
        } else {
            (input - self.in_min) / in_range
        };

        let output = self.out_min + normalized * (self.out_max - self.out_min);
        let (lo, hi) = self.output_bounds();
        output.clamp(lo, hi)
    }
}
