//! Population - the live agent set and the round driver
//!
//! A round is atomic from the caller's point of view: it runs on a copy of
//! the agent set and commits only if every step succeeds. On error the
//! population keeps its previous snapshot and round counter.

use agora_common::{Agent, AgentId, AgoraError, Result, StrategyKind};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

use crate::config::PopulationConfig;
use crate::evolution;
use crate::telemetry::stats::{self, DetailedReport, RoundReport, StrategySummary};
use crate::trade;
use crate::SizePolicy;

/// Evolving population of trading agents
///
/// The random stream is owned by the population so that a seeded run
/// replays exactly.
#[derive(Debug, Clone)]
pub struct Population<R = StdRng> {
    config: PopulationConfig,
    agents: Vec<Agent>,
    round: u64,
    rng: R,
}

impl Population<StdRng> {
    /// Create a population seeded from `seed`, or from OS entropy when `None`
    pub fn create(config: PopulationConfig, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Population<R> {
    /// Create a population drawing initial strategies from the configured
    /// distribution
    pub fn with_rng(config: PopulationConfig, mut rng: R) -> Result<Self> {
        let weights = config.validate()?;
        let index = WeightedIndex::new(weights.iter().map(|(_, w)| *w))
            .map_err(|e| AgoraError::config(format!("strategy distribution: {e}")))?;

        let agents = (0..config.target_size)
            .map(|_| {
                let kind = weights[index.sample(&mut rng)].0;
                Agent::new(AgentId::generate(&mut rng), kind, &config.strategies)
            })
            .collect();

        Ok(Self::assemble(config, agents, rng))
    }

    /// Create a population with an exact strategy composition
    ///
    /// `kinds.len()` must equal the configured target size. The configured
    /// distribution is still validated but not sampled.
    pub fn with_composition(config: PopulationConfig, kinds: &[StrategyKind], mut rng: R) -> Result<Self> {
        config.validate()?;
        if kinds.len() != config.target_size {
            return Err(AgoraError::config(format!(
                "composition has {} agents, target_size is {}",
                kinds.len(),
                config.target_size
            )));
        }
        let agents = kinds
            .iter()
            .map(|&kind| Agent::new(AgentId::generate(&mut rng), kind, &config.strategies))
            .collect();
        Ok(Self::assemble(config, agents, rng))
    }

    fn assemble(config: PopulationConfig, agents: Vec<Agent>, rng: R) -> Self {
        let drift = config.evolution.drift_per_round(config.target_size);
        if drift != 0 && config.evolution.size_policy == SizePolicy::Drift {
            warn!(
                drift,
                "Elimination and reproduction counts differ, population size will drift every round"
            );
        }

        let population = Self {
            config,
            agents,
            round: 0,
            rng,
        };
        info!(
            target_size = population.config.target_size,
            summary = %population.describe(),
            "Population created"
        );
        population
    }

    /// Execute one full round: pairing, trades, then evolution
    #[instrument(skip(self), fields(round = self.round + 1))]
    pub fn advance_round(&mut self) -> Result<RoundReport> {
        let round = self.round + 1;
        let mut agents = self.agents.clone();

        agents.shuffle(&mut self.rng);
        let trades = trade::run_pairings(
            &mut agents,
            &self.config.payoffs,
            &self.config.strategies,
            &mut self.rng,
        )?;

        let evolution = evolution::evolve(
            &mut agents,
            &self.config.evolution,
            self.config.target_size,
            round,
            &self.config.strategies,
            &mut self.rng,
        );

        self.agents = agents;
        self.round = round;

        let report = RoundReport {
            round,
            total_agents: self.agents.len(),
            strategies: stats::summarize(&self.agents),
            trades,
            evolution,
        };
        debug!(
            agents = report.total_agents,
            cooperated = trades.cooperated,
            deceived = trades.deceived,
            declined = trades.declined,
            eliminated = evolution.eliminated,
            born = evolution.born,
            mutated = evolution.mutated,
            "Round complete"
        );
        Ok(report)
    }

    /// Advance `rounds` rounds, returning the last report
    pub fn run(&mut self, rounds: u64) -> Result<Option<RoundReport>> {
        let mut last = None;
        for _ in 0..rounds {
            last = Some(self.advance_round()?);
        }
        Ok(last)
    }
}

impl<R> Population<R> {
    /// Extended per-strategy statistics. Does not touch the population.
    pub fn detailed_stats(&self) -> DetailedReport {
        DetailedReport {
            round: self.round,
            total_agents: self.agents.len(),
            strategies: stats::detail(&self.agents),
        }
    }

    /// Count and score per strategy for the current snapshot
    pub fn summary(&self) -> std::collections::BTreeMap<StrategyKind, StrategySummary> {
        stats::summarize(&self.agents)
    }

    /// One-line human readable summary, e.g. `trusting=34 adaptive=33 deceptive=33`
    pub fn describe(&self) -> String {
        self.summary()
            .iter()
            .map(|(kind, s)| format!("{kind}={}", s.count))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn target_size(&self) -> usize {
        self.config.target_size
    }

    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }
}
