// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Canonical Seeds
// ─────────────────────────────────────────────────────────────────────
//! Seed values for indices 1..=3. Both recurrences apply from n = 4.

use hofstadter_types::Sequence;

pub const SEED_COUNT: usize = 3;

/// a(1), a(2), a(3).
pub const A_SEEDS: [i64; SEED_COUNT] = [1, 1, 2];

/// Q(1), Q(2), Q(3).
pub const Q_SEEDS: [i64; SEED_COUNT] = [2, 2, 1];

pub fn seeds(sequence: Sequence) -> [i64; SEED_COUNT] {
    match sequence {
        Sequence::A => A_SEEDS,
        Sequence::Q => Q_SEEDS,
    }
}
