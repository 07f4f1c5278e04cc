//! Spark ("pity currency") adjustment of a hit-count distribution family.
//!
//! Every block of `hits_per_spark` pulls banks one spark, whether or not a
//! focus hit came up. Each spark stands in for one missing hit.

use serde::{Deserialize, Serialize};

/// When a completed block of pulls becomes a usable spark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SparkPolicy {
    /// `floor((i+1) / h)`: the spark is usable on the pull that completes the block.
    #[default]
    OnCompletion,
    /// `floor(i / h)`: the spark is usable from the pull after the block.
    Deferred,
}

impl SparkPolicy {
    /// Sparks banked at 0-based pull index `i`. A zero block size never sparks.
    #[inline]
    pub fn sparks_at(self, i: usize, hits_per_spark: usize) -> usize {
        if hits_per_spark == 0 {
            return 0;
        }
        match self {
            SparkPolicy::OnCompletion => (i + 1) / hits_per_spark,
            SparkPolicy::Deferred => i / hits_per_spark,
        }
    }
}

/// Remap a family of cumulative curves so banked sparks cover missing hits.
///
/// `base[r][i]` is `P(at least r+1 hits within i+1 pulls)`. With `s` sparks banked
/// at `i`, the adjusted value is 1 once `s >= r+1`, else `base[r-s][i]`. A lookup
/// past the end of a shorter curve saturates to 1. Never fails.
pub fn apply_sparks(
    base: &[Vec<f64>],
    hits_per_spark: usize,
    policy: SparkPolicy,
) -> Vec<Vec<f64>> {
    base.iter()
        .enumerate()
        .map(|(r, curve)| {
            (0..curve.len())
                .map(|i| {
                    let sparks = policy.sparks_at(i, hits_per_spark);
                    if sparks > r {
                        return 1.0;
                    }
                    base.get(r - sparks)
                        .and_then(|target| target.get(i))
                        .copied()
                        .unwrap_or(1.0)
                })
                .collect()
        })
        .collect()
}
