// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Renderer Hand-off
// ─────────────────────────────────────────────────────────────────────
//! Flat, index-aligned buffers and JSON export of a generated cloud.
//! Buffers hold 3 floats per point in point order, which is the layout
//! GPU vertex attributes expect.

use hofstadter_types::{HeartError, HeartResult};

use crate::generator::PointCloud;

impl PointCloud {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// x0, y0, z0, x1, y1, z1, ...
    pub fn positions(&self) -> Vec<f64> {
        self.points
            .iter()
            .flat_map(|p| p.position.to_array())
            .collect()
    }

    /// r0, g0, b0, r1, g1, b1, ...
    pub fn colors(&self) -> Vec<f64> {
        self.points
            .iter()
            .flat_map(|p| p.color.to_array())
            .collect()
    }

    pub fn positions_f32(&self) -> Vec<f32> {
        self.positions().into_iter().map(|v| v as f32).collect()
    }

    pub fn colors_f32(&self) -> Vec<f32> {
        self.colors().into_iter().map(|v| v as f32).collect()
    }

    pub fn to_json(&self) -> HeartResult<String> {
        serde_json::to_string(self)
            .map_err(|e| HeartError::Serialization(format!("JSON encode error: {e}")))
    }

    pub fn from_json(json: &str) -> HeartResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| HeartError::Serialization(format!("JSON parse error: {e}")))
    }
}
