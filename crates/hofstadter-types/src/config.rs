// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{HeartError, HeartResult};

/// Default upper index for both sequence tables.
pub const DEFAULT_N_MAX: i64 = 10_750;

/// Runtime configuration for one point-cloud generation pass.
///
/// Every scaling constant of the index → point mapping lives here so
/// tests and embedders can vary it without touching the algorithm.
/// Omitted JSON fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Highest sequence index scanned.
    /// Default: 10750.
    pub n_max: i64,

    /// Stride between scanned indices (1, 1+step, 1+2·step, ...).
    /// Default: 1.
    pub step: i64,

    /// x = (n - n_max/2) · x_scale.
    /// Default: 0.03.
    pub x_scale: f64,

    /// y = (a(n) - Q(n)) · y_scale.
    /// Default: 0.125.
    pub y_scale: f64,

    /// z = local variation · z_scale.
    /// Default: 0.1.
    pub z_scale: f64,

    /// Look-back window for the local variation term.
    /// Default: 5.
    pub z_lookback: i64,

    /// Indices n ≤ flat_prefix are placed at z = 0.
    /// Default: 10.
    pub flat_prefix: i64,

    /// Points with |x| above this are rejected.
    /// Default: 200.
    pub x_limit: f64,

    /// Points with |y| above this are rejected.
    /// Default: 100.
    pub y_limit: f64,

    /// Points with |z| above this are rejected.
    /// Default: 50.
    pub z_limit: f64,

    /// correlation < threshold → concordant color.
    /// Default: 0.3.
    pub correlation_threshold: f64,

    /// Camera distance = largest bounding-box extent · factor.
    /// Default: 3.0.
    pub camera_distance_factor: f64,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            n_max: DEFAULT_N_MAX,
            step: 1,
            x_scale: 0.03,
            y_scale: 0.125,
            z_scale: 0.1,
            z_lookback: 5,
            flat_prefix: 10,
            x_limit: 200.0,
            y_limit: 100.0,
            z_limit: 50.0,
            correlation_threshold: 0.3,
            camera_distance_factor: 3.0,
        }
    }
}

impl CloudConfig {
    /// Default constants with the given index range.
    pub fn with_range(n_max: i64, step: i64) -> Self {
        Self {
            n_max,
            step,
            ..Self::default()
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> HeartResult<()> {
        if self.n_max < 1 {
            return Err(HeartError::Config(format!(
                "n_max must be >= 1, got {}",
                self.n_max
            )));
        }
        if self.step < 1 {
            return Err(HeartError::Config(format!(
                "step must be >= 1, got {}",
                self.step
            )));
        }
        if self.z_lookback < 0 {
            return Err(HeartError::Config(format!(
                "z_lookback must be >= 0, got {}",
                self.z_lookback
            )));
        }
        if self.flat_prefix < 0 {
            return Err(HeartError::Config(format!(
                "flat_prefix must be >= 0, got {}",
                self.flat_prefix
            )));
        }
        for (name, value) in [
            ("x_scale", self.x_scale),
            ("y_scale", self.y_scale),
            ("z_scale", self.z_scale),
        ] {
            if !value.is_finite() {
                return Err(HeartError::Config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("x_limit", self.x_limit),
            ("y_limit", self.y_limit),
            ("z_limit", self.z_limit),
            ("camera_distance_factor", self.camera_distance_factor),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(HeartError::Config(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if !(self.correlation_threshold.is_finite() && self.correlation_threshold >= 0.0) {
            return Err(HeartError::Config(format!(
                "correlation_threshold must be finite and >= 0, got {}",
                self.correlation_threshold
            )));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> HeartResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| HeartError::Config(format!("JSON parse error: {e}")))
    }

    /// Serialise to JSON string.
    pub fn to_json(&self) -> HeartResult<String> {
        serde_json::to_string(self)
            .map_err(|e| HeartError::Serialization(format!("JSON encode error: {e}")))
    }
}
