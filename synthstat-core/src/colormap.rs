//! Diverging cool-warm colour scale for the heatmap.
//!
//! Blue at the low end, a neutral grey in the middle, red at the high end.
//! Colours between the anchor stops are linearly interpolated in RGB.

use serde::{Deserialize, Serialize};

/// An 8-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Relative luminance in [0, 1] (sRGB, linearized).
    pub fn luminance(&self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.0) + 0.7152 * channel(self.1) + 0.0722 * channel(self.2)
    }

    /// Whether text drawn on this colour should be dark to stay legible.
    pub fn prefers_dark_text(&self) -> bool {
        self.luminance() > 0.408
    }
}

const COOLWARM_STOPS: [(f64, Rgb); 5] = [
    (0.00, Rgb(59, 76, 192)),
    (0.25, Rgb(141, 176, 254)),
    (0.50, Rgb(221, 221, 221)),
    (0.75, Rgb(244, 154, 123)),
    (1.00, Rgb(180, 4, 38)),
];

/// Maps values in `[vmin, vmax]` onto the cool-warm scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergingScale {
    pub vmin: f64,
    pub vmax: f64,
}

impl DivergingScale {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Position of `value` on the scale, clamped to [0, 1].
    ///
    /// A zero-width range maps everything to the neutral midpoint.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span <= 0.0 || !span.is_finite() {
            return 0.5;
        }
        ((value - self.vmin) / span).clamp(0.0, 1.0)
    }

    /// The colour for `value`.
    pub fn color(&self, value: f64) -> Rgb {
        coolwarm(self.normalize(value))
    }
}

/// Samples the cool-warm scale at `t` in [0, 1].
pub fn coolwarm(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };

    for pair in COOLWARM_STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * f).round() as u8;
            return Rgb(lerp(c0.0, c1.0), lerp(c0.1, c1.1), lerp(c0.2, c1.2));
        }
    }
    COOLWARM_STOPS[COOLWARM_STOPS.len() - 1].1
}
