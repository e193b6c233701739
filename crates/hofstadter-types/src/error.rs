// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

use crate::sequence::Sequence;

/// Root error type for all kernel failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeartError {
    /// Invalid configuration (n_max, step, scales, thresholds).
    #[error("config error: {0}")]
    Config(String),

    /// Every candidate index was rejected by the outlier filter.
    #[error("empty result: all {rejected} indices rejected for n_max={n_max}, step={step}")]
    EmptyResult { n_max: i64, step: i64, rejected: usize },

    /// Checked i64 arithmetic failed while deriving a sequence value.
    #[error("arithmetic overflow computing {sequence}({n})")]
    Overflow { sequence: Sequence, n: i64 },

    /// The recurrence referenced an index that is not strictly below n.
    #[error("{sequence}({n}) references index {referenced}, which is not below {n}")]
    IndexOrder {
        sequence: Sequence,
        n: i64,
        referenced: i64,
    },

    /// Memo storage for indices 0..=n could not be allocated.
    #[error("cannot allocate memo for {sequence}(0..={n})")]
    Capacity { sequence: Sequence, n: i64 },

    /// A table lookup past the last computed index.
    #[error("{sequence}({n}) requested beyond table of n_max={n_max}")]
    OutOfRange {
        sequence: Sequence,
        n: i64,
        n_max: i64,
    },

    /// Non-finite coordinate or overflowing derived quantity during mapping.
    #[error("numerical error: {0}")]
    Numerical(String),

    /// JSON encode/decode failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type HeartResult<T> = Result<T, HeartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_order_message() {
        let e = HeartError::IndexOrder {
            sequence: Sequence::Q,
            n: 12,
            referenced: 12,
        };
        assert_eq!(
            e.to_string(),
            "Q(12) references index 12, which is not below 12"
        );
    }

    #[test]
    fn test_empty_result_message() {
        let e = HeartError::EmptyResult {
            n_max: 5,
            step: 1,
            rejected: 5,
        };
        assert!(e.to_string().contains("all 5 indices rejected"));
    }

    #[test]
    fn test_capacity_message() {
        let e = HeartError::Capacity {
            sequence: Sequence::A,
            n: i64::MAX,
        };
        assert_eq!(
            e.to_string(),
            format!("cannot allocate memo for a(0..={})", i64::MAX)
        );
    }
}
