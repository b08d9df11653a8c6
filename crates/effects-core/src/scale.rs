//! Linear value-to-pixel scaling and axis ticks.

use effects_model::Tick;

/// Spacing between axis ticks, in coefficient units.
pub const TICK_STEP: f64 = 0.1;

/// Domains needing more ticks than this get no axis ticks at all.
pub const MAX_TICKS: usize = 1000;

/// Maps a value domain linearly onto a pixel range, clamping to the domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    pixel_min: f64,
    pixel_max: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), pixels: (f64, f64)) -> Self {
        Self {
            domain_min: domain.0,
            domain_max: domain.1,
            pixel_min: pixels.0,
            pixel_max: pixels.1,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    pub fn pixels(&self) -> (f64, f64) {
        (self.pixel_min, self.pixel_max)
    }

    /// Clamps `value` into the domain. NaN lands on the upper bound.
    pub fn clamp(&self, value: f64) -> f64 {
        self.domain_min.max(self.domain_max.min(value))
    }

    /// Pixel position of `value`. A zero-width domain maps everything to
    /// the start of the pixel range.
    pub fn apply(&self, value: f64) -> f64 {
        let span = self.domain_max - self.domain_min;
        if span == 0.0 || !span.is_finite() {
            return self.pixel_min;
        }
        let t = (self.clamp(value) - self.domain_min) / span;
        self.pixel_min + t * (self.pixel_max - self.pixel_min)
    }

    /// [`apply`](Self::apply) rounded to a whole pixel.
    pub fn apply_px(&self, value: f64) -> i32 {
        self.apply(value).round() as i32
    }

    /// Ticks every [`TICK_STEP`] from the domain minimum up to its maximum.
    ///
    /// Empty when the domain is not finite, is inverted, or would need more
    /// than [`MAX_TICKS`] ticks.
    pub fn ticks(&self) -> Vec<Tick> {
        let steps = ((self.domain_max - self.domain_min + 1e-9) / TICK_STEP).floor();
        if !steps.is_finite() || steps < 0.0 || steps >= MAX_TICKS as f64 {
            return Vec::new();
        }
        let count = steps as usize + 1;
        (0..count)
            .map(|index| {
                let value = round_to(self.domain_min + index as f64 * TICK_STEP, 1);
                Tick {
                    value,
                    x: self.apply_px(value),
                    label: tick_label(value),
                }
            })
            .collect()
    }
}

/// Free-function form of [`LinearScale::apply`].
pub fn scale(value: f64, domain_min: f64, domain_max: f64, pixel_min: f64, pixel_max: f64) -> f64 {
    LinearScale::new((domain_min, domain_max), (pixel_min, pixel_max)).apply(value)
}

/// Rounds half away from zero at the given number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Two-decimal rounding applied to overview coefficients before placement.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

fn tick_label(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value:.1}")
    }
}
