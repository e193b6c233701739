// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Index → Point Mapping
// ─────────────────────────────────────────────────────────────────────
//! Per-index geometry:
//!
//!   x = (n - n_max/2) · x_scale
//!   y = (a(n) - Q(n)) · y_scale
//!   z = 0                                              for n ≤ flat_prefix
//!   z = (|a(n) - a(n-k)| + |Q(n) - Q(n-k)|) · z_scale  otherwise, k = z_lookback
//!
//! A sample outside the |x|, |y|, |z| limits is an outlier and yields
//! no point.

use serde::{Deserialize, Serialize};

use hofstadter_seq::{SequenceTable, SequenceTables};
use hofstadter_types::{CloudConfig, HeartError, HeartResult, Vec3};

/// Geometry and classification inputs derived for one index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappedSample {
    pub n: i64,
    pub position: Vec3,
    /// a(n) - Q(n).
    pub diff: i64,
    /// |diff| / (a(n) + Q(n) + 1).
    pub correlation: f64,
}

#[inline]
fn lookup(table: &SequenceTable, n: i64) -> HeartResult<i64> {
    table.get(n).ok_or_else(|| HeartError::OutOfRange {
        sequence: table.sequence(),
        n,
        n_max: table.n_max(),
    })
}

#[inline]
fn overflow(expr: &str, n: i64) -> HeartError {
    HeartError::Numerical(format!("i64 overflow computing {expr} at n={n}"))
}

/// Map index n to its position and correlation.
pub fn map_index(tables: &SequenceTables, config: &CloudConfig, n: i64) -> HeartResult<MappedSample> {
    let a = lookup(&tables.a, n)?;
    let q = lookup(&tables.q, n)?;
    let diff = a.checked_sub(q).ok_or_else(|| overflow("a(n) - Q(n)", n))?;

    let x = (n as f64 - config.n_max as f64 / 2.0) * config.x_scale;
    let y = diff as f64 * config.y_scale;
    let z = if n <= config.flat_prefix {
        0.0
    } else {
        let back = n.saturating_sub(config.z_lookback);
        let da = a
            .checked_sub(lookup(&tables.a, back)?)
            .and_then(i64::checked_abs)
            .ok_or_else(|| overflow("|a(n) - a(n-k)|", n))?;
        let dq = q
            .checked_sub(lookup(&tables.q, back)?)
            .and_then(i64::checked_abs)
            .ok_or_else(|| overflow("|Q(n) - Q(n-k)|", n))?;
        let local = da.checked_add(dq).ok_or_else(|| overflow("local variation", n))?;
        local as f64 * config.z_scale
    };

    let position = Vec3::new(x, y, z);
    if !position.is_finite() {
        return Err(HeartError::Numerical(format!(
            "non-finite position {position:?} at n={n}"
        )));
    }

    let denom = a
        .checked_add(q)
        .and_then(|s| s.checked_add(1))
        .ok_or_else(|| overflow("a(n) + Q(n) + 1", n))?;
    let correlation = diff.unsigned_abs() as f64 / denom as f64;

    Ok(MappedSample {
        n,
        position,
        diff,
        correlation,
    })
}

/// True when any coordinate exceeds its limit.
#[inline]
pub fn is_outlier(config: &CloudConfig, position: Vec3) -> bool {
    position.x.abs() > config.x_limit
        || position.y.abs() > config.y_limit
        || position.z.abs() > config.z_limit
}
