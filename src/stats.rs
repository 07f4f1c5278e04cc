//! Hit-count odds over a pull budget: the family of cumulative curves a
//! chart plots, plus the indexed reads a chart needs back from it.

use crate::config::StatsConfig;
use crate::error::DomainError;
use crate::negbinom::{check_probability, neg_binom_cdf};
use crate::rarity::Rarity;
use crate::rates::PullRates;
use crate::spark::{SparkPolicy, apply_sparks};

/// `curves[r][i]` = P(at least r+1 focus hits within i+1 pulls).
#[derive(Debug, Clone, PartialEq)]
pub struct Family {
    curves: Vec<Vec<f64>>,
    sparked: bool,
}

/// A single (pulls, probability) reading off one curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOfInterest {
    pub hits: usize,
    pub pulls: usize,
    pub probability: f64,
}

/// What a line chart consumes: one dataset per hit target, each a list of
/// `(pull_count, probability)` pairs, and which dataset is emphasised.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub datasets: Vec<Vec<(usize, f64)>>,
    pub highlighted: Option<usize>,
}

impl Family {
    pub fn curves(&self) -> &[Vec<f64>] {
        &self.curves
    }

    pub fn curve(&self, r: usize) -> Option<&[f64]> {
        self.curves.get(r).map(Vec::as_slice)
    }

    /// Number of tracked hit targets.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Whether spark substitution was applied.
    pub fn is_sparked(&self) -> bool {
        self.sparked
    }

    /// Indexed read of `curves[r][k]`: at least `r+1` hits by pull `k+1`.
    #[inline]
    pub fn probability(&self, r: usize, k: usize) -> Option<f64> {
        self.curves.get(r)?.get(k).copied()
    }

    /// Same read with 1-based counts; `None` for 0 or anything past the window.
    pub fn point(&self, hits: usize, pulls: usize) -> Option<PointOfInterest> {
        let probability = self.probability(hits.checked_sub(1)?, pulls.checked_sub(1)?)?;
        Some(PointOfInterest {
            hits,
            pulls,
            probability,
        })
    }

    /// `P(>= h hits)` for every tracked `h` at a fixed number of pulls.
    pub fn at_pulls(&self, pulls: usize) -> Option<Vec<f64>> {
        let k = pulls.checked_sub(1)?;
        self.curves.iter().map(|c| c.get(k).copied()).collect()
    }

    /// Chart feed with `highlight` clamped onto an existing dataset.
    pub fn chart(&self, highlight: usize) -> ChartData {
        let datasets = self
            .curves
            .iter()
            .map(|c| c.iter().enumerate().map(|(i, &p)| (i + 1, p)).collect())
            .collect();
        let highlighted = self.curves.len().checked_sub(1).map(|last| highlight.min(last));
        ChartData {
            datasets,
            highlighted,
        }
    }
}

/// Curves for 1..=`max_hits_tracked` hits over `max_pulls` pulls at the
/// single-pull focus rate, optionally spark-adjusted with
/// [`SparkPolicy::OnCompletion`].
///
/// Each curve opens with structural zeros (r+1 hits cannot come from fewer
/// than r+1 pulls) and is exactly `max_pulls` long.
///
/// # Errors
/// [`DomainError::InvalidProbability`] if `focus_probability` is outside `[0, 1]`.
pub fn compute_family(
    focus_probability: f64,
    max_hits_tracked: usize,
    max_pulls: usize,
    apply_sparks: bool,
    hits_per_spark: usize,
) -> Result<Family, DomainError> {
    build(
        focus_probability,
        max_hits_tracked,
        max_pulls,
        apply_sparks.then_some((hits_per_spark, SparkPolicy::OnCompletion)),
    )
}

/// [`compute_family`] driven by a [`StatsConfig`], honouring its spark policy.
pub fn compute_family_with(
    focus_probability: f64,
    config: &StatsConfig,
) -> Result<Family, DomainError> {
    build(
        focus_probability,
        config.max_hits_tracked,
        config.max_pulls,
        config
            .apply_sparks
            .then_some((config.hits_per_spark, config.spark_policy)),
    )
}

/// Single-pull rate of `focus`. Ten-pull pity slots do not feed hit-count odds.
pub fn focus_probability(rates: &PullRates, focus: Rarity) -> f64 {
    rates.single_rates().get(focus)
}

/// Family for `focus` under a banner's rates.
pub fn compute_for_rates(
    rates: &PullRates,
    focus: Rarity,
    config: &StatsConfig,
) -> Result<Family, DomainError> {
    compute_family_with(focus_probability(rates, focus), config)
}

fn build(
    p: f64,
    max_hits_tracked: usize,
    max_pulls: usize,
    sparks: Option<(usize, SparkPolicy)>,
) -> Result<Family, DomainError> {
    check_probability(p)?;
    log::debug!(
        "computing family: p = {p}, hits = {max_hits_tracked}, pulls = {max_pulls}, \
         sparks = {sparks:?}"
    );

    let mut curves = Vec::with_capacity(max_hits_tracked);
    for r in 0..max_hits_tracked {
        let hits = u32::try_from(r + 1).unwrap_or(u32::MAX);
        curves.push(neg_binom_cdf(hits, p, Some(max_pulls))?);
    }

    let sparked = sparks.is_some();
    if let Some((hits_per_spark, policy)) = sparks {
        curves = apply_sparks(&curves, hits_per_spark, policy);
    }
    Ok(Family { curves, sparked })
}

/// Parameter snapshot a [`FamilyCache`] is keyed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FamilyParams {
    pub focus_probability: f64,
    pub config: StatsConfig,
}

/// Holds the last computed family; recomputes it in full whenever the
/// parameters change.
#[derive(Debug, Clone, Default)]
pub struct FamilyCache {
    last: Option<(FamilyParams, Family)>,
}

impl FamilyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The family for `params`, computed only if they differ from the last call.
    /// A failed computation leaves the cache empty.
    pub fn get(&mut self, params: FamilyParams) -> Result<&Family, DomainError> {
        let entry = match self.last.take() {
            Some(entry) if entry.0 == params => {
                log::trace!("family cache hit");
                entry
            }
            _ => (
                params,
                compute_family_with(params.focus_probability, &params.config)?,
            ),
        };
        Ok(&self.last.insert(entry).1)
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
