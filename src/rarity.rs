use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Categorical;

/// Rarity tiers, declared top-down.
///
/// Declaration order is the sampling order, so the base tier `R` is the
/// last category and doubles as the sampler's fallback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Categorical)]
pub enum Rarity {
    #[focus]
    #[label("SSR Focus")]
    SsrFocus,
    #[label("SSR")]
    Ssr,
    #[focus]
    #[label("SR Focus")]
    SrFocus,
    #[label("SR")]
    Sr,
    #[focus]
    #[label("R Focus")]
    RFocus,
    #[label("R")]
    R,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How many pulls are bought together.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchSize {
    One,
    Ten,
}

impl BatchSize {
    /// Number of pull positions in the batch.
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> usize {
        match self {
            BatchSize::One => 1,
            BatchSize::Ten => 10,
        }
    }
}
