// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy shared by the
//! sequence engine, the point-cloud generator and the FFI layer.

pub mod config;
pub mod error;
pub mod geometry;
pub mod sequence;

pub use config::{CloudConfig, DEFAULT_N_MAX};
pub use error::{HeartError, HeartResult};
pub use geometry::{BoundingBox, GeneratedPoint, Rgb, Vec3, ViewSuggestion};
pub use sequence::Sequence;
