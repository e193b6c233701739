// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Camera Framing
// ─────────────────────────────────────────────────────────────────────
//! Bounding-box-driven camera suggestion plus fixed view presets.
//!
//! The suggestion backs the camera away from the box centre along a
//! fixed oblique direction, proportionally to the largest extent:
//!
//!   position = center + (max_dim · factor) · (0.7, 0.3, 0.5)
//!   target   = center
//!
//! It assumes the cloud's extents are comparable across axes; it is not
//! a general best-view search.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hofstadter_types::{BoundingBox, HeartError, Vec3, ViewSuggestion};

/// Oblique offset ratios applied to the camera distance.
pub const VIEW_DIRECTION: Vec3 = Vec3::new(0.7, 0.3, 0.5);

/// Camera suggestion for a non-empty point set.
pub fn derive_view(bounds: &BoundingBox, distance_factor: f64) -> ViewSuggestion {
    let center = bounds.center();
    let distance = bounds.max_dim() * distance_factor;
    ViewSuggestion {
        position: center + VIEW_DIRECTION * distance,
        target: center,
    }
}

/// Fixed framings a renderer may offer next to the computed suggestion.
/// All of them look at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewPreset {
    /// Elevated front view.
    Heart,
    /// Along +x.
    Side,
    /// Along +z.
    Front,
    /// Initial camera placement.
    Reset,
}

impl ViewPreset {
    pub const ALL: [ViewPreset; 4] = [
        ViewPreset::Heart,
        ViewPreset::Side,
        ViewPreset::Front,
        ViewPreset::Reset,
    ];

    pub fn view(self) -> ViewSuggestion {
        let position = match self {
            ViewPreset::Heart => Vec3::new(0.0, 200.0, 300.0),
            ViewPreset::Side => Vec3::new(300.0, 0.0, 0.0),
            ViewPreset::Front => Vec3::new(0.0, 0.0, 400.0),
            ViewPreset::Reset => Vec3::new(200.0, 150.0, 300.0),
        };
        ViewSuggestion {
            position,
            target: Vec3::ZERO,
        }
    }

    /// Single-key shortcut conventionally bound to the preset.
    pub fn key(self) -> char {
        match self {
            ViewPreset::Heart => 't',
            ViewPreset::Side => 's',
            ViewPreset::Front => 'f',
            ViewPreset::Reset => 'r',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewPreset::Heart => "heart",
            ViewPreset::Side => "side",
            ViewPreset::Front => "front",
            ViewPreset::Reset => "reset",
        }
    }
}

impl fmt::Display for ViewPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewPreset {
    type Err = HeartError;

    /// Accepts the preset name or its key, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        ViewPreset::ALL
            .into_iter()
            .find(|p| s == p.name() || s.chars().eq(std::iter::once(p.key())))
            .ok_or_else(|| HeartError::Config(format!("unknown view preset '{s}'")))
    }
}
