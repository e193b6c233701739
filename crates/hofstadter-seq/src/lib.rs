// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Sequence Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Memoized evaluator for the two self-referential sequences:
//!
//!   a(n) = a(a(n-1)) + a(n - a(n-1))
//!   Q(n) = Q(n - Q(n-1)) + Q(n - Q(n-2))
//!
//! Tables are dense, sized n_max + 1 and populated strictly left to
//! right. Every recursive reference is checked to land below n, so a
//! table can never read an uncomputed slot.

pub mod engine;
pub mod params;
pub mod table;

pub use engine::{EngineStats, SequenceEngine};
pub use params::{seeds, A_SEEDS, Q_SEEDS, SEED_COUNT};
pub use table::{SequenceTable, SequenceTables};
