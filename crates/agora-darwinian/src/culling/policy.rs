//! Culling policy: drop the bottom `floor(target_size × threshold)` by rank

use agora_common::Agent;

pub struct CullingPolicy {
    threshold: f64,
}

impl CullingPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Number of agents to eliminate for a given target size
    pub fn elimination_count(&self, target_size: usize) -> usize {
        (target_size as f64 * self.threshold).floor() as usize
    }

    /// Remove the lowest ranked agents from a ranked vector
    ///
    /// Never removes more agents than exist. Returns the eliminated agents,
    /// best first.
    pub fn cull(&self, ranked: &mut Vec<Agent>, target_size: usize) -> Vec<Agent> {
        let count = self.elimination_count(target_size).min(ranked.len());
        ranked.split_off(ranked.len() - count)
    }
}
