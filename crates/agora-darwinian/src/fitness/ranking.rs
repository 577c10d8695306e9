//! Score ranking: highest score first, stable on ties

use agora_common::Agent;

/// Sort agents by score, descending
///
/// The sort is stable, so on equal scores the agent that came earlier in
/// the input ranks higher. Scores are compared with `total_cmp`.
pub fn rank_by_score(agents: &mut [Agent]) {
    agents.sort_by(|a, b| b.score().total_cmp(&a.score()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_common::{AgentId, StrategyKind, StrategyParams};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scored(rng: &mut StdRng, score: f64) -> Agent {
        let mut agent = Agent::new(
            AgentId::generate(rng),
            StrategyKind::Trusting,
            &StrategyParams::default(),
        );
        agent.record_trade(score);
        agent
    }

    #[test]
    fn test_descending_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut agents: Vec<Agent> = [1.0, 3.0, 0.0, 2.0]
            .into_iter()
            .map(|s| scored(&mut rng, s))
            .collect();
        rank_by_score(&mut agents);
        let scores: Vec<f64> = agents.iter().map(|a| a.score()).collect();
        assert_eq!(scores, vec![3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut agents: Vec<Agent> = [1.0, 2.0, 1.0, 2.0]
            .into_iter()
            .map(|s| scored(&mut rng, s))
            .collect();
        let ids: Vec<AgentId> = agents.iter().map(|a| a.id()).collect();
        rank_by_score(&mut agents);
        let ranked: Vec<AgentId> = agents.iter().map(|a| a.id()).collect();
        assert_eq!(ranked, vec![ids[1], ids[3], ids[0], ids[2]]);
    }
}
