// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Memoized Sequence Engine
// ─────────────────────────────────────────────────────────────────────
//! Dense, left-to-right memoization of a(n) and Q(n).
//!
//! Evaluating index n first extends the memo for that sequence up to n
//! in increasing order, so the recurrences never recurse: each step
//! only reads slots below the one being written. A reference at or
//! above the current index is reported as `HeartError::IndexOrder`
//! instead of being followed.

use std::collections::TryReserveError;

use serde::{Deserialize, Serialize};

use hofstadter_types::{HeartError, HeartResult, Sequence};

use crate::params::{seeds, SEED_COUNT};
use crate::table::{SequenceTable, SequenceTables};

/// Marker for a memo slot that has not been derived yet.
pub const UNCOMPUTED: i64 = i64::MIN;

/// Derivation counters. Seeds are never counted as derivations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Recurrence applications for a(n).
    pub derivations_a: u64,
    /// Recurrence applications for Q(n).
    pub derivations_q: u64,
    /// Lookups answered from an already-populated slot.
    pub memo_hits: u64,
}

impl EngineStats {
    pub fn derivations(&self, sequence: Sequence) -> u64 {
        match sequence {
            Sequence::A => self.derivations_a,
            Sequence::Q => self.derivations_q,
        }
    }
}

/// One sequence's memo: slot 0 is the base case, slots 1..=3 the seeds.
#[derive(Debug, Clone)]
struct Memo {
    values: Vec<i64>,
    /// Highest populated index.
    frontier: usize,
}

impl Memo {
    /// `n_max` is a sizing hint: if that many slots cannot be reserved
    /// the memo starts with the seeds only and grows on demand.
    fn seeded(seed: [i64; SEED_COUNT], n_max: usize) -> Self {
        let mut values = Vec::new();
        let hinted = n_max.max(SEED_COUNT).saturating_add(1);
        if values.try_reserve_exact(hinted).is_err() {
            log::warn!("Memo capacity hint of {hinted} slots not reservable; growing on demand");
        }
        values.push(0);
        values.extend_from_slice(&seed);
        Self {
            values,
            frontier: SEED_COUNT,
        }
    }

    /// Value at an index already known to be ≤ frontier; non-positive → 0.
    #[inline]
    fn at(&self, i: i64) -> i64 {
        if i <= 0 {
            0
        } else {
            self.values[i as usize]
        }
    }

    /// Grow to hold index `target`, failing instead of aborting when the
    /// allocation is impossible.
    fn reserve_to(&mut self, target: usize) -> Result<(), TryReserveError> {
        if self.values.len() <= target {
            let additional = target.saturating_add(1) - self.values.len();
            self.values.try_reserve_exact(additional)?;
            self.values.resize(target + 1, UNCOMPUTED);
        }
        Ok(())
    }
}

/// Memoized evaluator for a(n) and Q(n).
///
/// The engine owns both memo tables exclusively. Results depend only
/// on n: populating the memo never changes previously returned values.
#[derive(Debug, Clone)]
pub struct SequenceEngine {
    a: Memo,
    q: Memo,
    stats: EngineStats,
}

impl Default for SequenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceEngine {
    /// Engine holding only the seeds.
    pub fn new() -> Self {
        Self::with_capacity(SEED_COUNT)
    }

    /// Engine with both memo arrays pre-sized to `n_max + 1`.
    pub fn with_capacity(n_max: usize) -> Self {
        Self::with_seeds(seeds(Sequence::A), seeds(Sequence::Q), n_max)
    }

    fn with_seeds(a_seed: [i64; SEED_COUNT], q_seed: [i64; SEED_COUNT], n_max: usize) -> Self {
        Self {
            a: Memo::seeded(a_seed, n_max),
            q: Memo::seeded(q_seed, n_max),
            stats: EngineStats::default(),
        }
    }

    /// a(n); 0 for n ≤ 0.
    pub fn evaluate_a(&mut self, n: i64) -> HeartResult<i64> {
        self.evaluate(Sequence::A, n)
    }

    /// Q(n); 0 for n ≤ 0.
    pub fn evaluate_q(&mut self, n: i64) -> HeartResult<i64> {
        self.evaluate(Sequence::Q, n)
    }

    pub fn evaluate(&mut self, sequence: Sequence, n: i64) -> HeartResult<i64> {
        if n <= 0 {
            return Ok(0);
        }
        let idx = usize::try_from(n).map_err(|_| HeartError::Overflow { sequence, n })?;
        if idx <= self.memo(sequence).frontier {
            self.stats.memo_hits += 1;
            return Ok(self.memo(sequence).values[idx]);
        }
        self.extend(sequence, idx)?;
        Ok(self.memo(sequence).values[idx])
    }

    /// a(n) - Q(n).
    pub fn difference(&mut self, n: i64) -> HeartResult<i64> {
        let a = self.evaluate_a(n)?;
        let q = self.evaluate_q(n)?;
        a.checked_sub(q).ok_or_else(|| {
            HeartError::Numerical(format!("i64 overflow computing a({n}) - Q({n})"))
        })
    }

    /// Highest index populated for `sequence`.
    pub fn computed_len(&self, sequence: Sequence) -> usize {
        self.memo(sequence).frontier
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Populate both sequences over 1..=n_max and snapshot them.
    ///
    /// This is the preparatory pass the point-cloud generator relies
    /// on; afterwards every table lookup is a plain array read.
    pub fn build_tables(&mut self, n_max: i64) -> HeartResult<SequenceTables> {
        if n_max < 1 {
            return Err(HeartError::Config(format!(
                "n_max must be >= 1, got {n_max}"
            )));
        }
        let target = usize::try_from(n_max).map_err(|_| HeartError::Overflow {
            sequence: Sequence::A,
            n: n_max,
        })?;

        log::info!("Calculating a(n) and Q(n) for n = 1..={n_max}");
        for sequence in Sequence::ALL {
            if target > self.memo(sequence).frontier {
                self.extend(sequence, target)?;
            }
        }

        let tables = SequenceTables {
            a: SequenceTable::new(
                Sequence::A,
                snapshot(Sequence::A, &self.a.values[..=target], n_max)?,
            ),
            q: SequenceTable::new(
                Sequence::Q,
                snapshot(Sequence::Q, &self.q.values[..=target], n_max)?,
            ),
            n_max,
        };
        log::info!(
            "Sequences calculated: a({n_max}) = {}, Q({n_max}) = {}",
            self.a.values[target],
            self.q.values[target]
        );
        Ok(tables)
    }

    fn memo(&self, sequence: Sequence) -> &Memo {
        match sequence {
            Sequence::A => &self.a,
            Sequence::Q => &self.q,
        }
    }

    /// Derive every missing slot up to and including `target`.
    fn extend(&mut self, sequence: Sequence, target: usize) -> HeartResult<()> {
        let (memo, derivations) = match sequence {
            Sequence::A => (&mut self.a, &mut self.stats.derivations_a),
            Sequence::Q => (&mut self.q, &mut self.stats.derivations_q),
        };
        memo.reserve_to(target).map_err(|e| {
            log::error!("{sequence}: cannot grow memo to index {target}: {e}");
            HeartError::Capacity {
                sequence,
                n: i64::try_from(target).unwrap_or(i64::MAX),
            }
        })?;

        for k in (memo.frontier + 1)..=target {
            let n = k as i64;
            let value = match sequence {
                Sequence::A => derive_a(memo, n)?,
                Sequence::Q => derive_q(memo, n)?,
            };
            memo.values[k] = value;
            memo.frontier = k;
            *derivations += 1;
        }
        Ok(())
    }
}

/// Copy of a populated memo prefix, reporting allocation failure.
fn snapshot(sequence: Sequence, values: &[i64], n_max: i64) -> HeartResult<Vec<i64>> {
    let mut out = Vec::new();
    out.try_reserve_exact(values.len())
        .map_err(|_| HeartError::Capacity { sequence, n: n_max })?;
    out.extend_from_slice(values);
    Ok(out)
}

/// Reject any reference that is not strictly below n.
#[inline]
fn check_ref(sequence: Sequence, n: i64, referenced: i64) -> HeartResult<i64> {
    if referenced >= n {
        log::error!("{sequence}({n}) references index {referenced}: table order violated");
        return Err(HeartError::IndexOrder {
            sequence,
            n,
            referenced,
        });
    }
    Ok(referenced)
}

/// a(n) = a(a(n-1)) + a(n - a(n-1)).
fn derive_a(memo: &Memo, n: i64) -> HeartResult<i64> {
    let overflow = || HeartError::Overflow {
        sequence: Sequence::A,
        n,
    };
    let prev = memo.at(n - 1);
    let i = check_ref(Sequence::A, n, prev)?;
    let j = check_ref(Sequence::A, n, n.checked_sub(prev).ok_or_else(overflow)?)?;
    memo.at(i).checked_add(memo.at(j)).ok_or_else(overflow)
}

/// Q(n) = Q(n - Q(n-1)) + Q(n - Q(n-2)).
fn derive_q(memo: &Memo, n: i64) -> HeartResult<i64> {
    let overflow = || HeartError::Overflow {
        sequence: Sequence::Q,
        n,
    };
    let i = check_ref(
        Sequence::Q,
        n,
        n.checked_sub(memo.at(n - 1)).ok_or_else(overflow)?,
    )?;
    let j = check_ref(
        Sequence::Q,
        n,
        n.checked_sub(memo.at(n - 2)).ok_or_else(overflow)?,
    )?;
    memo.at(i).checked_add(memo.at(j)).ok_or_else(overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A_FIRST_20: [i64; 20] = [1, 1, 2, 2, 3, 4, 4, 4, 5, 6, 7, 7, 8, 8, 8, 8, 9, 10, 11, 12];
    const Q_FIRST_20: [i64; 20] = [2, 2, 1, 3, 5, 3, 5, 6, 4, 6, 10, 5, 7, 9, 9, 10, 11, 11, 12, 10];

    #[test]
    fn test_non_positive_is_zero() {
        let mut e = SequenceEngine::new();
        assert_eq!(e.evaluate_a(0).unwrap(), 0);
        assert_eq!(e.evaluate_a(-5).unwrap(), 0);
        assert_eq!(e.evaluate_q(0).unwrap(), 0);
        assert_eq!(e.evaluate_q(-1).unwrap(), 0);
        assert_eq!(e.evaluate_q(i64::MIN).unwrap(), 0);
        assert_eq!(e.stats(), EngineStats::default());
    }

    #[test]
    fn test_seeds() {
        let mut e = SequenceEngine::new();
        assert_eq!(e.evaluate_a(1).unwrap(), 1);
        assert_eq!(e.evaluate_a(2).unwrap(), 1);
        assert_eq!(e.evaluate_a(3).unwrap(), 2);
        assert_eq!(e.evaluate_q(1).unwrap(), 2);
        assert_eq!(e.evaluate_q(2).unwrap(), 2);
        assert_eq!(e.evaluate_q(3).unwrap(), 1);
        assert_eq!(e.stats().derivations_a, 0);
        assert_eq!(e.stats().derivations_q, 0);
    }

    #[test]
    fn test_spot_check_index_10() {
        let mut e = SequenceEngine::new();
        assert_eq!(e.evaluate_a(10).unwrap(), 6);
        assert_eq!(e.evaluate_q(10).unwrap(), 6);
    }

    #[test]
    fn test_first_twenty_terms() {
        let mut e = SequenceEngine::new();
        for (i, (&a, &q)) in A_FIRST_20.iter().zip(Q_FIRST_20.iter()).enumerate() {
            let n = i as i64 + 1;
            assert_eq!(e.evaluate_a(n).unwrap(), a, "a({n})");
            assert_eq!(e.evaluate_q(n).unwrap(), q, "Q({n})");
        }
    }

    #[test]
    fn test_a_powers_of_two() {
        // a(2^k) = 2^(k-1)
        let mut e = SequenceEngine::new();
        for k in 1..14 {
            let n = 1i64 << k;
            assert_eq!(e.evaluate_a(n).unwrap(), n / 2, "a({n})");
        }
    }

    #[test]
    fn test_out_of_order_queries_agree() {
        let mut forward = SequenceEngine::new();
        let fwd: Vec<i64> = (1..=200).map(|n| forward.evaluate_q(n).unwrap()).collect();

        let mut backward = SequenceEngine::new();
        let bwd: Vec<i64> = (1..=200).rev().map(|n| backward.evaluate_q(n).unwrap()).collect();
        let bwd: Vec<i64> = bwd.into_iter().rev().collect();

        assert_eq!(fwd, bwd);
    }

    #[test]
    fn test_memo_not_rederived() {
        let mut e = SequenceEngine::new();
        assert_eq!(e.evaluate_a(100).unwrap(), 57);
        assert_eq!(e.stats().derivations_a, 97);
        let hits = e.stats().memo_hits;

        assert_eq!(e.evaluate_a(100).unwrap(), 57);
        assert_eq!(e.evaluate_a(50).unwrap(), e.evaluate_a(50).unwrap());
        assert_eq!(e.stats().derivations_a, 97);
        assert_eq!(e.stats().memo_hits, hits + 3);
        assert_eq!(e.stats().derivations_q, 0);
    }

    #[test]
    fn test_computed_len_grows_monotonically() {
        let mut e = SequenceEngine::new();
        assert_eq!(e.computed_len(Sequence::Q), 3);
        e.evaluate_q(40).unwrap();
        assert_eq!(e.computed_len(Sequence::Q), 40);
        e.evaluate_q(10).unwrap();
        assert_eq!(e.computed_len(Sequence::Q), 40);
        assert_eq!(e.computed_len(Sequence::A), 3);
    }

    #[test]
    fn test_difference() {
        let mut e = SequenceEngine::new();
        assert_eq!(e.difference(3).unwrap(), 1);
        assert_eq!(e.difference(5).unwrap(), -2);
        assert_eq!(e.difference(0).unwrap(), 0);
    }

    #[test]
    fn test_capacity_grows_past_presize() {
        let mut e = SequenceEngine::with_capacity(10);
        assert_eq!(e.evaluate_a(1000).unwrap(), SequenceEngine::new().evaluate_a(1000).unwrap());
    }

    #[test]
    fn test_full_default_range_has_no_order_violation() {
        let mut e = SequenceEngine::with_capacity(10_750);
        let tables = e.build_tables(10_750).unwrap();
        assert_eq!(tables.a.get(10_750), Some(5809));
        assert_eq!(tables.q.get(10_750), Some(5380));
        assert!(tables.q.values()[1..].iter().all(|&v| v > 0));
        assert_eq!(e.stats().derivations_a, 10_747);
        assert_eq!(e.stats().derivations_q, 10_747);
    }

    #[test]
    fn test_build_tables_rejects_zero() {
        let mut e = SequenceEngine::new();
        assert!(matches!(e.build_tables(0), Err(HeartError::Config(_))));
    }

    #[test]
    fn test_build_tables_below_seed_range() {
        let mut e = SequenceEngine::new();
        let t = e.build_tables(1).unwrap();
        assert_eq!(t.a.values(), &[0, 1]);
        assert_eq!(t.q.values(), &[0, 2]);
        assert_eq!(e.stats().derivations_a, 0);
    }

    #[test]
    fn test_self_reference_is_reported() {
        // a(3) = 0 makes a(4) reference a(4 - 0).
        let mut e = SequenceEngine::with_seeds([1, 1, 0], [2, 2, 1], 8);
        let err = e.evaluate_a(4).unwrap_err();
        assert_eq!(
            err,
            HeartError::IndexOrder {
                sequence: Sequence::A,
                n: 4,
                referenced: 4,
            }
        );
        assert_eq!(e.computed_len(Sequence::A), 3);
    }

    #[test]
    fn test_forward_reference_in_q_is_reported() {
        let mut e = SequenceEngine::with_seeds([1, 1, 2], [0, -3, 0], 8);
        assert!(matches!(
            e.evaluate_q(4),
            Err(HeartError::IndexOrder { sequence: Sequence::Q, n: 4, .. })
        ));
    }

    #[test]
    fn test_overflow_is_reported() {
        // a(4) = a(a(3)) + a(4 - a(3)) = a(1) + a(3) = MAX + 1.
        let mut e = SequenceEngine::with_seeds([i64::MAX, 1, 1], [2, 2, 1], 8);
        assert_eq!(
            e.evaluate_a(4).unwrap_err(),
            HeartError::Overflow {
                sequence: Sequence::A,
                n: 4,
            }
        );
    }

    #[test]
    fn test_unallocatable_index_is_an_error() {
        let mut e = SequenceEngine::with_capacity(usize::MAX);
        assert_eq!(
            e.evaluate_a(i64::MAX).unwrap_err(),
            HeartError::Capacity {
                sequence: Sequence::A,
                n: i64::MAX,
            }
        );
        assert!(matches!(
            e.build_tables(i64::MAX),
            Err(HeartError::Capacity { .. })
        ));
        // The failed growth leaves the engine usable.
        assert_eq!(e.computed_len(Sequence::A), 3);
        assert_eq!(e.evaluate_a(10).unwrap(), 6);
    }

    #[test]
    fn test_difference_overflow_names_both_sequences() {
        let mut e = SequenceEngine::with_seeds([-i64::MAX, 1, 1], [2, 2, 1], 8);
        let err = e.difference(1).unwrap_err();
        assert!(matches!(err, HeartError::Numerical(_)));
        assert!(err.to_string().contains("a(1) - Q(1)"));
    }
}
