//! # Darwinian
//!
//! Population engine for the Agora trading simulation.
//!
//! ## Round
//!
//! ```text
//! shuffle -> pair (0,1) (2,3) ... -> resolve trades
//!         -> rank by score -> eliminate bottom -> reproduce from top half -> mutate
//! ```
//!
//! ## Evolution counts
//!
//! ```text
//! elim  = floor(target_size × elimination_threshold)
//! repro = floor(target_size × reproduction_rate)
//! ```
//!
//! With [`SizePolicy::Drift`] the population changes by `repro - elim` each
//! round. [`SizePolicy::Constant`] replaces exactly the eliminated agents.

pub mod config;
pub mod culling;
pub mod evolution;
pub mod fitness;
pub mod mutation;
pub mod population;
pub mod reproduction;
pub mod telemetry;
pub mod trade;

use agora_common::{AgoraError, Result};
use serde::{Deserialize, Serialize};

pub use config::{PayoffConfig, PopulationConfig, StrategyDistribution};
pub use evolution::EvolutionTally;
pub use population::Population;
pub use telemetry::{
    metrics::SimulationMetrics,
    stats::{DetailedReport, RoundReport, StrategyDetail, StrategySummary},
};
pub use trade::{TradeOutcome, TradeTally};

/// Default population size
pub const DEFAULT_POPULATION_SIZE: usize = 100;

/// Default number of rounds a driver runs
pub const DEFAULT_ROUNDS: u64 = 1000;

/// Payoff for a cooperative trade
pub const DEFAULT_COOPERATE_PAYOFF: f64 = 1.0;

/// Payoff for the deceiving side
pub const DEFAULT_DECEPTIVE_PAYOFF: f64 = 2.0;

/// Payoff when no trade happens
pub const DEFAULT_NO_TRADE_PAYOFF: f64 = 0.0;

/// How population size evolves when elimination and reproduction differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizePolicy {
    /// Remove exactly `elim`, add exactly `repro`
    #[default]
    Drift,
    /// Add as many offspring as agents were eliminated
    Constant,
}

/// Evolution configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Fraction of target size eliminated each round
    pub elimination_threshold: f64,
    /// Fraction of target size reproduced each round
    pub reproduction_rate: f64,
    /// Per-agent chance of switching strategy each round
    pub mutation_rate: f64,
    pub size_policy: SizePolicy,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            elimination_threshold: 0.1,
            reproduction_rate: 0.05,
            mutation_rate: 0.01,
            size_policy: SizePolicy::Drift,
        }
    }
}

impl EvolutionConfig {
    /// No selection, reproduction or mutation
    pub fn frozen() -> Self {
        Self {
            elimination_threshold: 0.0,
            reproduction_rate: 0.0,
            mutation_rate: 0.0,
            size_policy: SizePolicy::Drift,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("elimination_threshold", self.elimination_threshold),
            ("reproduction_rate", self.reproduction_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(AgoraError::config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Net size change per round under [`SizePolicy::Drift`]
    pub fn drift_per_round(&self, target_size: usize) -> i64 {
        let elim = culling::CullingPolicy::new(self.elimination_threshold)
            .elimination_count(target_size);
        let repro = reproduction::ReproductionPolicy::new(self.reproduction_rate)
            .offspring_count(target_size);
        repro as i64 - elim as i64
    }
}
