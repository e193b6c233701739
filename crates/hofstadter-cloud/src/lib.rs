// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Point-Cloud Generator
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Turns the a(n) and Q(n) tables into a filtered, colored 3D point
//! cloud plus the bounding box and camera framing a renderer needs.
//!
//! Architecture:
//!   - mapping: index → (x, y, z), correlation; outlier test
//!   - color: binary concordant/discordant classification, HSL → linear RGB
//!   - generator: CloudGenerator pass over the tables, PointCloud output
//!   - view: bounding-box camera suggestion and fixed presets
//!   - export: flat f32 buffers and JSON for the renderer

pub mod color;
pub mod export;
pub mod generator;
pub mod mapping;
pub mod view;

pub use color::{ColorClass, Hsl};
pub use generator::{generate, generate_with, CloudGenerator, GenerationStats, PointCloud};
pub use mapping::{is_outlier, map_index, MappedSample};
pub use view::{derive_view, ViewPreset, VIEW_DIRECTION};
