//! Reproduction from the top half of the ranking
//!
//! Offspring copy a parent's strategy tag only. Counters start at zero and
//! variant state (Adaptive trust) starts from the configured initial value.

use agora_common::{Agent, AgentId, StrategyKind, StrategyParams};
use rand::seq::SliceRandom;
use rand::Rng;

pub struct ReproductionPolicy {
    rate: f64,
}

impl ReproductionPolicy {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Number of offspring for a given target size
    pub fn offspring_count(&self, target_size: usize) -> usize {
        (target_size as f64 * self.rate).floor() as usize
    }

    /// Parents eligible to reproduce: the top `target_size / 2` of a ranking
    ///
    /// Takes a ranking computed before elimination.
    pub fn parent_pool(ranked: &[Agent], target_size: usize) -> Vec<(AgentId, StrategyKind)> {
        let half = (target_size / 2).min(ranked.len());
        ranked[..half].iter().map(|a| (a.id(), a.kind())).collect()
    }

    /// Create `count` offspring, each from a uniformly drawn parent
    ///
    /// Returns an empty vector if the pool is empty.
    pub fn spawn<R: Rng + ?Sized>(
        pool: &[(AgentId, StrategyKind)],
        count: usize,
        born_round: u64,
        params: &StrategyParams,
        rng: &mut R,
    ) -> Vec<Agent> {
        let mut offspring = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(&parent) = pool.choose(rng) else {
                break;
            };
            offspring.push(Agent::offspring(
                AgentId::generate(rng),
                parent,
                born_round,
                params,
            ));
        }
        offspring
    }
}
