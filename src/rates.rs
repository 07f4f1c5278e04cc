//! Per-position rate tables and their derivation from four headline rates.

use serde::{Deserialize, Serialize};

use crate::Categorical;
use crate::error::InvalidRateError;
use crate::rarity::{BatchSize, Rarity};

/// Allowed drift of a position's total away from exactly 1.
pub const RATE_TOLERANCE: f64 = 1e-9;

const RARITY_COUNT: usize = <Rarity as Categorical>::COUNT;

/// Category that absorbs whatever the declared tiers leave over.
const REMAINDER: Rarity = Rarity::R;
/// Tier the remainder is promoted into on the last pull of a batch.
const PITY_TIER: Rarity = Rarity::Sr;

/// Probability of each rarity at one pull position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RarityRates {
    rates: [f64; RARITY_COUNT],
}

impl RarityRates {
    /// Build from any `(rarity, probability)` iterator. Unlisted rarities get 0;
    /// a repeated rarity keeps its last value.
    ///
    /// Not validated; see [`validate`](Self::validate).
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Rarity, f64)>,
    {
        let mut rates = [0.0; RARITY_COUNT];
        for (rarity, p) in pairs {
            rates[rarity.ordinal()] = p;
        }
        Self { rates }
    }

    #[inline]
    pub fn get(&self, rarity: Rarity) -> f64 {
        self.rates[rarity.ordinal()]
    }

    /// A copy with one rarity's probability replaced.
    pub fn with(mut self, rarity: Rarity, p: f64) -> Self {
        self.rates[rarity.ordinal()] = p;
        self
    }

    /// `(rarity, probability)` pairs in the fixed category order.
    pub fn iter(&self) -> impl Iterator<Item = (Rarity, f64)> + '_ {
        Rarity::ALL.iter().map(|&r| (r, self.get(r)))
    }

    pub fn sum(&self) -> f64 {
        self.rates.iter().sum()
    }

    /// Combined probability of every focus rarity.
    pub fn focus_rate(&self) -> f64 {
        self.iter()
            .filter(|(r, _)| r.is_focus())
            .map(|(_, p)| p)
            .sum()
    }

    /// Check entries are finite and non-negative and that they sum to 1.
    ///
    /// # Errors
    /// * [`InvalidRateError::NotFinite`] / [`InvalidRateError::Negative`] for a bad entry.
    /// * [`InvalidRateError::NotNormalized`] if the total is off by more than
    ///   [`RATE_TOLERANCE`]; `position` is reported as given.
    pub fn validate(&self, position: usize) -> Result<(), InvalidRateError> {
        check_entries(self.iter())?;
        let sum = self.sum();
        if (sum - 1.0).abs() > RATE_TOLERANCE {
            return Err(InvalidRateError::NotNormalized { position, sum });
        }
        Ok(())
    }
}

fn check_entries<I>(entries: I) -> Result<(), InvalidRateError>
where
    I: IntoIterator<Item = (Rarity, f64)>,
{
    for (rarity, value) in entries {
        if !value.is_finite() {
            return Err(InvalidRateError::NotFinite { rarity });
        }
        if value < 0.0 {
            return Err(InvalidRateError::Negative { rarity, value });
        }
    }
    Ok(())
}

/// Validated, immutable rates for every position of one batch size.
///
/// Positions may differ; that is how a guaranteed final pull is expressed.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    batch: BatchSize,
    positions: Vec<RarityRates>,
}

impl RateTable {
    /// # Errors
    /// * [`InvalidRateError::WrongLength`] if `positions.len() != batch.len()`.
    /// * Any error from [`RarityRates::validate`].
    pub fn new(batch: BatchSize, positions: Vec<RarityRates>) -> Result<Self, InvalidRateError> {
        if positions.len() != batch.len() {
            return Err(InvalidRateError::WrongLength {
                batch,
                expected: batch.len(),
                got: positions.len(),
            });
        }
        for (i, rates) in positions.iter().enumerate() {
            rates.validate(i)?;
        }
        Ok(Self { batch, positions })
    }

    /// Same distribution at every position.
    pub fn uniform(batch: BatchSize, rates: RarityRates) -> Result<Self, InvalidRateError> {
        Self::new(batch, vec![rates; batch.len()])
    }

    /// A new table with one position replaced; `self` is left as is.
    pub fn with_position(
        &self,
        index: usize,
        rates: RarityRates,
    ) -> Result<Self, InvalidRateError> {
        if index >= self.positions.len() {
            return Err(InvalidRateError::PositionOutOfRange {
                index,
                len: self.positions.len(),
            });
        }
        rates.validate(index)?;
        let mut positions = self.positions.clone();
        positions[index] = rates;
        Ok(Self {
            batch: self.batch,
            positions,
        })
    }

    pub fn batch(&self) -> BatchSize {
        self.batch
    }

    pub fn position(&self, index: usize) -> Option<&RarityRates> {
        self.positions.get(index)
    }

    pub fn positions(&self) -> &[RarityRates] {
        &self.positions
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }
}

/// Headline rates for the top two tiers and their focus variants.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimpleRates {
    pub ssr: f64,
    pub ssr_focus: f64,
    pub sr: f64,
    pub sr_focus: f64,
}

impl SimpleRates {
    fn pairs(&self) -> [(Rarity, f64); 4] {
        [
            (Rarity::SsrFocus, self.ssr_focus),
            (Rarity::Ssr, self.ssr),
            (Rarity::SrFocus, self.sr_focus),
            (Rarity::Sr, self.sr),
        ]
    }

    pub fn declared_sum(&self) -> f64 {
        self.ssr + self.ssr_focus + self.sr + self.sr_focus
    }
}

/// Both tables a banner defines: single pulls and ten-pulls.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRates {
    one: RateTable,
    ten: RateTable,
}

impl PullRates {
    /// # Errors
    /// [`InvalidRateError::WrongLength`] if either table is built for the other batch size.
    pub fn new(one: RateTable, ten: RateTable) -> Result<Self, InvalidRateError> {
        for (table, want) in [(&one, BatchSize::One), (&ten, BatchSize::Ten)] {
            if table.batch() != want {
                return Err(InvalidRateError::WrongLength {
                    batch: want,
                    expected: want.len(),
                    got: table.len(),
                });
            }
        }
        Ok(Self { one, ten })
    }

    pub fn table(&self, batch: BatchSize) -> &RateTable {
        match batch {
            BatchSize::One => &self.one,
            BatchSize::Ten => &self.ten,
        }
    }

    /// Single-pull distribution; the generating rate for hit-count odds.
    pub fn single_rates(&self) -> &RarityRates {
        &self.one.positions[0]
    }

    /// Read the headline rates back off the single-pull table.
    pub fn simple_rates(&self) -> SimpleRates {
        let single = self.single_rates();
        SimpleRates {
            ssr: single.get(Rarity::Ssr),
            ssr_focus: single.get(Rarity::SsrFocus),
            sr: single.get(Rarity::Sr),
            sr_focus: single.get(Rarity::SrFocus),
        }
    }
}

/// Derive full single and ten-pull tables from headline rates.
///
/// Every position but the last of a batch gets `simple` plus an `R` remainder
/// of `1 - sum(simple)`. The last position moves that remainder into `SR`, so
/// the final pull of a ten-pull can never come up `R`.
///
/// # Errors
/// * [`InvalidRateError::Negative`] / [`InvalidRateError::NotFinite`] for a bad entry.
/// * [`InvalidRateError::ExceedsOne`] if the declared rates sum above 1.
pub fn build_single_and_batch(simple: SimpleRates) -> Result<PullRates, InvalidRateError> {
    check_entries(simple.pairs())?;
    let sum = simple.declared_sum();
    if sum > 1.0 + RATE_TOLERANCE {
        return Err(InvalidRateError::ExceedsOne { sum });
    }
    let remainder = (1.0 - sum).max(0.0);

    let declared = RarityRates::from_pairs(simple.pairs());
    let regular = declared.with(REMAINDER, remainder);
    let last = declared.with(PITY_TIER, declared.get(PITY_TIER) + remainder);

    let mut ten = vec![regular; BatchSize::Ten.len() - 1];
    ten.push(last);

    PullRates::new(
        RateTable::new(BatchSize::One, vec![regular])?,
        RateTable::new(BatchSize::Ten, ten)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn single_focus() -> SimpleRates {
        SimpleRates {
            ssr: 0.0225,
            ssr_focus: 0.0075,
            sr: 0.1575,
            sr_focus: 0.0225,
        }
    }

    #[test]
    fn derives_remainder_and_pity_slot() {
        let rates = build_single_and_batch(single_focus()).unwrap();

        // 0.0225 + 0.0075 + 0.1575 + 0.0225 = 0.21 declared, 0.79 left for R
        let first = rates.single_rates();
        assert_abs_diff_eq!(first.get(Rarity::R), 0.79, epsilon = 1e-12);
        assert_abs_diff_eq!(first.get(Rarity::SsrFocus), 0.0075, epsilon = 1e-12);

        let ten = rates.table(BatchSize::Ten);
        assert_eq!(ten.len(), 10);
        for pos in &ten.positions()[..9] {
            assert_eq!(pos, first);
        }
        let last = ten.position(9).unwrap();
        assert_eq!(last.get(Rarity::R), 0.0);
        assert_abs_diff_eq!(last.get(Rarity::Sr), 0.9475, epsilon = 1e-12);
        assert_abs_diff_eq!(last.get(Rarity::SrFocus), 0.0225, epsilon = 1e-12);
    }

    #[test]
    fn every_position_sums_to_one() {
        let inputs = [
            single_focus(),
            SimpleRates {
                ssr: 0.015,
                ssr_focus: 0.015,
                sr: 0.09,
                sr_focus: 0.09,
            },
            SimpleRates::default(),
            SimpleRates {
                ssr: 0.25,
                ssr_focus: 0.25,
                sr: 0.25,
                sr_focus: 0.25,
            },
        ];
        for simple in inputs {
            let rates = build_single_and_batch(simple).unwrap();
            for batch in [BatchSize::One, BatchSize::Ten] {
                for pos in rates.table(batch).positions() {
                    assert!((pos.sum() - 1.0).abs() <= RATE_TOLERANCE, "{pos:?}");
                }
            }
        }
    }

    #[test]
    fn rejects_excess_without_clamping() {
        let err = build_single_and_batch(SimpleRates {
            ssr: 0.5,
            ssr_focus: 0.3,
            sr: 0.2,
            sr_focus: 0.1,
        })
        .unwrap_err();
        assert!(matches!(err, InvalidRateError::ExceedsOne { sum } if sum > 1.0));

        let err = build_single_and_batch(SimpleRates {
            sr: -0.1,
            ..single_focus()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            InvalidRateError::Negative {
                rarity: Rarity::Sr,
                ..
            }
        ));

        assert!(matches!(
            build_single_and_batch(SimpleRates {
                ssr: f64::NAN,
                ..single_focus()
            }),
            Err(InvalidRateError::NotFinite {
                rarity: Rarity::Ssr
            })
        ));
    }

    #[test]
    fn simple_rates_round_trip() {
        let rates = build_single_and_batch(single_focus()).unwrap();
        assert_eq!(rates.simple_rates(), single_focus());
    }

    #[test]
    fn table_validation() {
        let ok = RarityRates::from_pairs([(Rarity::Ssr, 0.3), (Rarity::R, 0.7)]);
        let short = RarityRates::from_pairs([(Rarity::Ssr, 0.3), (Rarity::R, 0.6)]);

        assert!(RateTable::uniform(BatchSize::Ten, ok).is_ok());
        assert!(matches!(
            RateTable::new(BatchSize::Ten, vec![ok; 3]),
            Err(InvalidRateError::WrongLength {
                expected: 10,
                got: 3,
                ..
            })
        ));
        assert!(matches!(
            RateTable::new(BatchSize::One, vec![short]),
            Err(InvalidRateError::NotNormalized { position: 0, .. })
        ));

        // within tolerance
        let drift = ok.with(Rarity::R, 0.7 + 1e-12);
        assert!(RateTable::new(BatchSize::One, vec![drift]).is_ok());
    }

    #[test]
    fn edits_produce_new_tables() {
        let base = RarityRates::from_pairs([(Rarity::R, 1.0)]);
        let table = RateTable::uniform(BatchSize::Ten, base).unwrap();
        let pity = RarityRates::from_pairs([(Rarity::Sr, 1.0)]);

        let edited = table.with_position(9, pity).unwrap();
        assert_eq!(edited.position(9), Some(&pity));
        assert_eq!(table.position(9), Some(&base));

        assert!(matches!(
            table.with_position(10, pity),
            Err(InvalidRateError::PositionOutOfRange { index: 10, len: 10 })
        ));
        assert!(table.with_position(0, pity.with(Rarity::R, 0.5)).is_err());
    }

    #[test]
    fn pull_rates_checks_batch_sizes() {
        let base = RarityRates::from_pairs([(Rarity::R, 1.0)]);
        let one = RateTable::uniform(BatchSize::One, base).unwrap();
        let ten = RateTable::uniform(BatchSize::Ten, base).unwrap();
        assert!(PullRates::new(one.clone(), ten.clone()).is_ok());
        assert!(PullRates::new(ten, one).is_err());
    }

    #[test]
    fn focus_rate_sums_focus_variants() {
        let rates = build_single_and_batch(single_focus()).unwrap();
        assert_abs_diff_eq!(rates.single_rates().focus_rate(), 0.03, epsilon = 1e-12);
    }
}
