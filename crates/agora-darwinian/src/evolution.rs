//! Evolutionary update: rank -> eliminate -> reproduce -> mutate

use agora_common::{Agent, StrategyParams};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::culling::CullingPolicy;
use crate::fitness::rank_by_score;
use crate::mutation::MutationPolicy;
use crate::reproduction::ReproductionPolicy;
use crate::{EvolutionConfig, SizePolicy};

/// Counts from one evolutionary update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionTally {
    pub eliminated: usize,
    pub born: usize,
    pub mutated: usize,
}

/// Run one evolutionary update over `agents`
///
/// `agents` comes back ranked (survivors by score), followed by offspring.
pub fn evolve<R: Rng + ?Sized>(
    agents: &mut Vec<Agent>,
    config: &EvolutionConfig,
    target_size: usize,
    round: u64,
    params: &StrategyParams,
    rng: &mut R,
) -> EvolutionTally {
    rank_by_score(agents);
    let pool = ReproductionPolicy::parent_pool(agents, target_size);

    let eliminated = CullingPolicy::new(config.elimination_threshold)
        .cull(agents, target_size)
        .len();

    let wanted = match config.size_policy {
        SizePolicy::Drift => {
            ReproductionPolicy::new(config.reproduction_rate).offspring_count(target_size)
        }
        SizePolicy::Constant => eliminated,
    };
    if wanted > 0 && pool.is_empty() {
        warn!(round, wanted, "No eligible parents, skipping reproduction");
    }
    let offspring = ReproductionPolicy::spawn(&pool, wanted, round, params, rng);
    let born = offspring.len();
    agents.extend(offspring);

    let mutated = MutationPolicy::new(config.mutation_rate).apply(agents, params, rng);

    EvolutionTally {
        eliminated,
        born,
        mutated,
    }
}
