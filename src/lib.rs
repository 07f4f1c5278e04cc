//! # gachastat
//!
//! Gacha rate tables, simulated pulls, and the odds of collecting focus hits.
//!
//! The crate covers three things:
//!
//! 1. **Rate tables**: per-position rarity distributions for single pulls and
//!    ten-pulls (where the last slot can be guaranteed), derived from four
//!    headline rates with [`build_single_and_batch`].
//! 2. **Pulls**: inverse-CDF sampling of a position ([`draw`]) or a whole batch
//!    ([`draw_batch`]) with any [`rand::Rng`].
//! 3. **Odds**: the probability of at least `r` focus hits within `n` pulls,
//!    computed through the regularized incomplete beta function, optionally
//!    adjusted for sparks (pity currency that substitutes for hits).
//!
//! ## Quick start (pulls)
//!
//! ```rust,ignore
//! use gachastat::{BatchSize, SimpleRates, build_single_and_batch, draw_batch};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rates = build_single_and_batch(SimpleRates {
//!     ssr: 0.0225,
//!     ssr_focus: 0.0075,
//!     sr: 0.1575,
//!     sr_focus: 0.0225,
//! })?;
//!
//! let mut rng = rand::rng();
//! let result = draw_batch(rates.table(BatchSize::Ten), &mut rng);
//! println!("{result} ({} hits)", result.hits());
//! # Ok(()) }
//! ```
//!
//! ## Quick start (odds)
//!
//! ```rust,ignore
//! use gachastat::compute_family;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // 5 hit targets over 1000 pulls at 0.75%, sparking every 200 pulls
//! let family = compute_family(0.0075, 5, 1000, true, 200)?;
//! let poi = family.point(2, 300).unwrap();
//! println!("P(>= 2 hits by pull 300) = {:.4}", poi.probability);
//! # Ok(()) }
//! ```
//!
//! ## Gotchas
//! * Only the single-pull focus rate drives the odds; ten-pull pity slots do not.
//! * Tables validate at construction. The numeric routines trust their inputs
//!   beyond the domain checks.
//! * The sampler never fails: a distribution that sums short of 1 falls back
//!   to the last category in [`Rarity::ALL`] order (`R`).

extern crate self as gachastat;

mod beta;
mod config;
mod error;
mod negbinom;
mod rarity;
mod rates;
mod sampler;
mod spark;
mod stats;

/// Closed, totally ordered set of outcome categories.
///
/// Implemented by the `Categorical` derive macro (from `gachastat_macros`);
/// the declaration order of the variants is the order of [`Categorical::ALL`].
pub trait Categorical: Copy + 'static {
    /// All variants in declaration order.
    const ALL: &'static [Self];
    const COUNT: usize;

    /// Position within [`ALL`](Self::ALL).
    fn ordinal(self) -> usize;

    /// Whether the variant was marked `#[focus]`.
    fn is_focus(self) -> bool;

    /// Display label, from `#[label("...")]` or the variant name.
    fn label(self) -> &'static str;
}

/// Derive macro imported from `gachastat_macros`.
pub use gachastat_macros::Categorical;

pub use beta::beta_inc;
pub use config::{DEFAULT_HITS_PER_SPARK, DEFAULT_MAX_HITS, DEFAULT_MAX_PULLS, StatsConfig};
pub use error::{ConfigError, DomainError, InvalidRateError};
pub use negbinom::{MAX_DEFAULT_SUPPORT, default_support, neg_binom_cdf, neg_binom_pmf};
pub use rarity::{BatchSize, Rarity};
pub use rates::{
    PullRates, RATE_TOLERANCE, RarityRates, RateTable, SimpleRates, build_single_and_batch,
};
pub use sampler::{Draw, PullResult, Tally, draw, draw_batch, tally};
pub use spark::{SparkPolicy, apply_sparks};
pub use stats::{
    ChartData, Family, FamilyCache, FamilyParams, PointOfInterest, compute_family,
    compute_family_with, compute_for_rates, focus_probability,
};
