use std::fmt;

use rand::Rng;

use crate::Categorical;
use crate::rarity::Rarity;
use crate::rates::{RarityRates, RateTable};

/// Anything that can be sampled for a pull outcome.
/// Implemented by [`RarityRates`] (one pull) and [`RateTable`] (a whole batch).
pub trait Draw {
    type Output;
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Output;
}

impl Draw for RarityRates {
    type Output = Rarity;

    /// Inverse-CDF walk over [`Rarity::ALL`].
    #[inline]
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Rarity {
        let u: f64 = rng.random();
        let mut cumulative = 0.0;
        for (rarity, p) in self.iter() {
            cumulative += p;
            if u < cumulative {
                return rarity;
            }
        }
        // rounding left the total short of u
        Rarity::ALL[Rarity::COUNT - 1]
    }
}

impl Draw for RateTable {
    type Output = PullResult;

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> PullResult {
        PullResult(self.positions().iter().map(|rates| rates.draw(rng)).collect())
    }
}

/// Draw one rarity from a single position's distribution.
///
/// Never fails: if floating point leaves the cumulative sum below the uniform
/// draw, the last category in the fixed order is returned.
pub fn draw<R: Rng + ?Sized>(rates: &RarityRates, rng: &mut R) -> Rarity {
    rates.draw(rng)
}

/// Draw every position of a batch independently.
pub fn draw_batch<R: Rng + ?Sized>(table: &RateTable, rng: &mut R) -> PullResult {
    table.draw(rng)
}

/// Outcomes of one batch, in position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullResult(Vec<Rarity>);

impl PullResult {
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[Rarity] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rarity> {
        self.0.iter()
    }

    /// Number of focus outcomes.
    pub fn hits(&self) -> usize {
        self.0.iter().filter(|r| r.is_focus()).count()
    }

    pub fn count(&self, rarity: Rarity) -> usize {
        self.0.iter().filter(|&&r| r == rarity).count()
    }

    /// Highest rarity pulled, by the fixed category order.
    pub fn best(&self) -> Option<Rarity> {
        self.0.iter().copied().min_by_key(|r| r.ordinal())
    }
}

impl fmt::Display for PullResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rarity) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{rarity}")?;
        }
        Ok(())
    }
}

impl IntoIterator for PullResult {
    type Item = Rarity;
    type IntoIter = std::vec::IntoIter<Rarity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Outcome counts over many simulated batches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: [u64; <Rarity as Categorical>::COUNT],
    pulls: u64,
    hits: u64,
}

impl Tally {
    pub fn record(&mut self, result: &PullResult) {
        for &rarity in result.iter() {
            self.counts[rarity.ordinal()] += 1;
        }
        self.pulls += result.len() as u64;
        self.hits += result.hits() as u64;
    }

    pub fn count(&self, rarity: Rarity) -> u64 {
        self.counts[rarity.ordinal()]
    }

    /// Empirical frequency of `rarity`; 0 before anything was recorded.
    pub fn frequency(&self, rarity: Rarity) -> f64 {
        if self.pulls == 0 {
            return 0.0;
        }
        self.count(rarity) as f64 / self.pulls as f64
    }

    pub fn pulls(&self) -> u64 {
        self.pulls
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }
}

/// Simulate `batches` draws of `table` and count what came out.
pub fn tally<R: Rng + ?Sized>(table: &RateTable, batches: usize, rng: &mut R) -> Tally {
    let mut tally = Tally::default();
    for _ in 0..batches {
        tally.record(&table.draw(rng));
    }
    tally
}
