use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::spark::SparkPolicy;

pub const DEFAULT_MAX_HITS: usize = 5;
pub const DEFAULT_HITS_PER_SPARK: usize = 200;
/// Five sparks always cover five hits.
pub const DEFAULT_MAX_PULLS: usize = DEFAULT_HITS_PER_SPARK * DEFAULT_MAX_HITS;

/// Parameters for computing a distribution family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Number of curves: targets of 1..=max_hits_tracked hits.
    pub max_hits_tracked: usize,
    /// Length of every curve, in pulls.
    pub max_pulls: usize,
    pub apply_sparks: bool,
    /// Pulls per banked spark.
    pub hits_per_spark: usize,
    pub spark_policy: SparkPolicy,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            max_hits_tracked: DEFAULT_MAX_HITS,
            max_pulls: DEFAULT_MAX_PULLS,
            apply_sparks: false,
            hits_per_spark: DEFAULT_HITS_PER_SPARK,
            spark_policy: SparkPolicy::default(),
        }
    }
}

impl StatsConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.max_pulls == 0 {
            return Err(ConfigError::NoPulls);
        }
        Ok(config)
    }

    pub fn with_sparks(mut self, apply: bool) -> Self {
        self.apply_sparks = apply;
        self
    }
}
