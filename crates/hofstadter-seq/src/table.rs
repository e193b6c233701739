// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Immutable Sequence Tables
// ─────────────────────────────────────────────────────────────────────
//! Read-only snapshots of the memo, indexed 0..=n_max.

use serde::{Deserialize, Serialize};

use hofstadter_types::Sequence;

/// Dense table of one sequence; slot 0 holds the base case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceTable {
    sequence: Sequence,
    values: Vec<i64>,
}

impl SequenceTable {
    /// Wrap precomputed values; `values[0]` must be the base case 0.
    pub fn new(sequence: Sequence, values: Vec<i64>) -> Self {
        debug_assert!(!values.is_empty() && values[0] == 0);
        Self { sequence, values }
    }

    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    /// Value at n: 0 for n ≤ 0, `None` past the end of the table.
    #[inline]
    pub fn get(&self, n: i64) -> Option<i64> {
        if n <= 0 {
            return Some(0);
        }
        usize::try_from(n)
            .ok()
            .and_then(|i| self.values.get(i).copied())
    }

    /// Highest index held.
    pub fn n_max(&self) -> i64 {
        self.values.len() as i64 - 1
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

/// Both tables over the same index range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceTables {
    pub a: SequenceTable,
    pub q: SequenceTable,
    pub n_max: i64,
}

impl SequenceTables {
    pub fn table(&self, sequence: Sequence) -> &SequenceTable {
        match sequence {
            Sequence::A => &self.a,
            Sequence::Q => &self.q,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequenceEngine;

    #[test]
    fn test_get_bounds() {
        let t = SequenceTable::new(Sequence::A, vec![0, 1, 1, 2]);
        assert_eq!(t.get(-7), Some(0));
        assert_eq!(t.get(0), Some(0));
        assert_eq!(t.get(3), Some(2));
        assert_eq!(t.get(4), None);
        assert_eq!(t.n_max(), 3);
    }

    #[test]
    fn test_tables_match_engine() {
        let mut e = SequenceEngine::new();
        let tables = e.build_tables(64).unwrap();
        assert_eq!(tables.n_max, 64);
        assert_eq!(tables.a.n_max(), 64);
        assert_eq!(tables.table(Sequence::Q).sequence(), Sequence::Q);

        let mut fresh = SequenceEngine::new();
        for n in 1..=64 {
            assert_eq!(tables.a.get(n), Some(fresh.evaluate_a(n).unwrap()));
            assert_eq!(tables.q.get(n), Some(fresh.evaluate_q(n).unwrap()));
        }
    }

    #[test]
    fn test_tables_are_snapshots() {
        let mut e = SequenceEngine::new();
        let small = e.build_tables(20).unwrap();
        e.evaluate_q(500).unwrap();
        assert_eq!(small.q.values().len(), 21);
    }
}
