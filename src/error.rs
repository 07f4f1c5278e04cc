use crate::rarity::{BatchSize, Rarity};

/// A rate table (or the simple rates it is derived from) failed validation.
///
/// Raised only at construction time; values are never clamped or renormalized.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidRateError {
    #[error("declared rates sum to {sum}, which exceeds 1")]
    ExceedsOne { sum: f64 },

    #[error("rate for {rarity} is negative: {value}")]
    Negative { rarity: Rarity, value: f64 },

    #[error("rate for {rarity} is not a finite number")]
    NotFinite { rarity: Rarity },

    #[error("rates at position {position} sum to {sum}, expected 1")]
    NotNormalized { position: usize, sum: f64 },

    #[error("{batch:?} table needs {expected} positions, got {got}")]
    WrongLength {
        batch: BatchSize,
        expected: usize,
        got: usize,
    },

    #[error("position {index} is out of range for a table of {len} positions")]
    PositionOutOfRange { index: usize, len: usize },
}

/// A numerical routine was called outside its valid domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("x = {x} is outside [0, 1]")]
    OutOfUnitInterval { x: f64 },

    #[error("shape parameters must be positive and finite (a = {a}, b = {b})")]
    NonPositiveShape { a: f64, b: f64 },

    #[error("probability {p} is outside [0, 1]")]
    InvalidProbability { p: f64 },

    #[error("a zero success probability needs an explicit support window")]
    UnboundedSupport,

    #[error("default support window of {n} trials is too large; pass one explicitly")]
    SupportTooLarge { n: f64 },
}

/// Loading a [`StatsConfig`](crate::StatsConfig) failed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("max_pulls must be at least 1")]
    NoPulls,
}
