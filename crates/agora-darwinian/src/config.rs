//! Population configuration
//!
//! Plain structures passed to [`Population`](crate::Population) at creation.
//! Nothing here touches the filesystem; loading is the driver's job.

use std::collections::BTreeMap;

use agora_common::{AgoraError, Result, StrategyKind, StrategyParams};
use serde::{Deserialize, Serialize};

use crate::EvolutionConfig;

/// Payoff awarded to each side of a trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffConfig {
    /// Both sides agreed and nobody deceived
    pub cooperate: f64,
    /// Awarded to the deceiving side
    pub deceptive: f64,
    /// Either side declined; also what a deceived agent receives
    pub no_trade: f64,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            cooperate: crate::DEFAULT_COOPERATE_PAYOFF,
            deceptive: crate::DEFAULT_DECEPTIVE_PAYOFF,
            no_trade: crate::DEFAULT_NO_TRADE_PAYOFF,
        }
    }
}

impl PayoffConfig {
    /// Payoffs must be finite and non-negative so scores never go negative
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("cooperate", self.cooperate),
            ("deceptive", self.deceptive),
            ("no_trade", self.no_trade),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AgoraError::config(format!(
                    "{name} payoff must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Initial strategy mix: tag -> non-negative weight
///
/// Weights need not sum to one. Tags are parsed when the population is
/// created, so an unknown tag surfaces as [`AgoraError::InvalidStrategy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyDistribution(BTreeMap<String, f64>);

impl Default for StrategyDistribution {
    fn default() -> Self {
        Self::new()
            .with(StrategyKind::Trusting.as_str(), 0.34)
            .with(StrategyKind::Adaptive.as_str(), 0.33)
            .with(StrategyKind::Deceptive.as_str(), 0.33)
    }
}

impl StrategyDistribution {
    /// Empty distribution
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Distribution containing a single strategy
    pub fn only(kind: StrategyKind) -> Self {
        Self::new().with(kind.as_str(), 1.0)
    }

    /// Set the weight for a tag
    pub fn with(mut self, tag: impl Into<String>, weight: f64) -> Self {
        self.0.insert(tag.into(), weight);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(tag, weight)| (tag.as_str(), *weight))
    }

    /// Parse tags and check weights
    ///
    /// Aliases of the same strategy are merged. The result lists only
    /// strategies with a positive weight, in canonical order.
    pub fn resolve(&self) -> Result<Vec<(StrategyKind, f64)>> {
        let mut merged: BTreeMap<StrategyKind, f64> = BTreeMap::new();
        for (tag, weight) in self.iter() {
            let kind: StrategyKind = tag.parse()?;
            if !weight.is_finite() || weight < 0.0 {
                return Err(AgoraError::config(format!(
                    "weight for {tag} must be finite and non-negative, got {weight}"
                )));
            }
            *merged.entry(kind).or_default() += weight;
        }

        let weights: Vec<(StrategyKind, f64)> =
            merged.into_iter().filter(|(_, w)| *w > 0.0).collect();
        if weights.is_empty() {
            return Err(AgoraError::config(
                "strategy distribution needs at least one positive weight",
            ));
        }
        Ok(weights)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for StrategyDistribution {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(tag, w)| (tag.into(), w)).collect())
    }
}

/// Everything needed to build a population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Size the population is seeded at and the base for evolution counts
    pub target_size: usize,
    pub distribution: StrategyDistribution,
    pub payoffs: PayoffConfig,
    pub strategies: StrategyParams,
    pub evolution: EvolutionConfig,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            target_size: crate::DEFAULT_POPULATION_SIZE,
            distribution: StrategyDistribution::default(),
            payoffs: PayoffConfig::default(),
            strategies: StrategyParams::default(),
            evolution: EvolutionConfig::default(),
        }
    }
}

impl PopulationConfig {
    /// Validate every section; returns the resolved distribution
    pub fn validate(&self) -> Result<Vec<(StrategyKind, f64)>> {
        if self.target_size == 0 {
            return Err(AgoraError::config("target_size must be positive"));
        }
        self.payoffs.validate()?;
        self.strategies.validate()?;
        self.evolution.validate()?;
        self.distribution.resolve()
    }
}
