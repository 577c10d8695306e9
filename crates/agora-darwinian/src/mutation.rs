//! Random strategy mutation

use agora_common::{Agent, StrategyKind, StrategyParams};
use rand::Rng;

pub struct MutationPolicy {
    rate: f64,
}

impl MutationPolicy {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Give every agent an independent chance to switch strategy
    ///
    /// A firing mutation draws uniformly from the full strategy set. Drawing
    /// the agent's current tag leaves it untouched. Returns how many agents
    /// actually changed strategy.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        agents: &mut [Agent],
        params: &StrategyParams,
        rng: &mut R,
    ) -> usize {
        let mut changed = 0;
        for agent in agents.iter_mut() {
            if !rng.gen_bool(self.rate) {
                continue;
            }
            let kind = StrategyKind::ALL[rng.gen_range(0..StrategyKind::ALL.len())];
            if kind != agent.kind() {
                agent.mutate_into(kind, params);
                changed += 1;
            }
        }
        changed
    }
}
