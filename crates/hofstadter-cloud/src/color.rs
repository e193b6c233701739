// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Point Color Classification
// ─────────────────────────────────────────────────────────────────────
//! Binary color classification of a sample.
//!
//!   correlation = |a(n) - Q(n)| / (a(n) + Q(n) + 1)
//!
//! Below the threshold the two sequences move together (concordant);
//! otherwise they diverge (discordant). Each class has exactly one
//! color, given in HSL and emitted as linear RGB.

use serde::{Deserialize, Serialize};

use hofstadter_types::Rgb;

/// HSL triple, every component in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// Pink.
pub const CONCORDANT_HSL: Hsl = Hsl::new(0.95, 0.9, 0.6);
/// Blue.
pub const DISCORDANT_HSL: Hsl = Hsl::new(0.6, 0.7, 0.5);

#[inline]
fn hue_channel(lo: f64, hi: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        lo + (hi - lo) * 6.0 * t
    } else if t < 0.5 {
        hi
    } else if t < 2.0 / 3.0 {
        lo + (hi - lo) * 6.0 * (2.0 / 3.0 - t)
    } else {
        lo
    }
}

/// HSL → sRGB. Hue wraps into [0, 1); saturation and lightness clamp.
pub fn hsl_to_srgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(1.0);
    let s = hsl.s.clamp(0.0, 1.0);
    let l = hsl.l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Rgb::new(l, l, l);
    }

    let hi = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let lo = 2.0 * l - hi;
    Rgb::new(
        hue_channel(lo, hi, h + 1.0 / 3.0),
        hue_channel(lo, hi, h),
        hue_channel(lo, hi, h - 1.0 / 3.0),
    )
}

/// sRGB transfer function inverse for one channel.
#[inline]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c < 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn hsl_to_linear(hsl: Hsl) -> Rgb {
    let srgb = hsl_to_srgb(hsl);
    Rgb::new(
        srgb_to_linear(srgb.r),
        srgb_to_linear(srgb.g),
        srgb_to_linear(srgb.b),
    )
}

/// Binary classification driving the point color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorClass {
    Concordant,
    Discordant,
}

impl ColorClass {
    pub fn classify(correlation: f64, threshold: f64) -> Self {
        if correlation < threshold {
            ColorClass::Concordant
        } else {
            ColorClass::Discordant
        }
    }

    pub fn hsl(self) -> Hsl {
        match self {
            ColorClass::Concordant => CONCORDANT_HSL,
            ColorClass::Discordant => DISCORDANT_HSL,
        }
    }

    /// Linear RGB for this class. Always one of exactly two triples.
    pub fn rgb(self) -> Rgb {
        hsl_to_linear(self.hsl())
    }
}
