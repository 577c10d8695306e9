//! Property tests for round invariants

use agora_common::{Agent, AgentId, StrategyKind, StrategyParams};
use agora_darwinian::culling::CullingPolicy;
use agora_darwinian::fitness::rank_by_score;
use agora_darwinian::trade::run_pairings;
use agora_darwinian::{
    EvolutionConfig, PayoffConfig, Population, PopulationConfig, StrategyDistribution,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn kind_strategy() -> impl Strategy<Value = StrategyKind> {
    prop_oneof![
        Just(StrategyKind::Trusting),
        Just(StrategyKind::Adaptive),
        Just(StrategyKind::Deceptive),
    ]
}

fn params_strategy() -> impl Strategy<Value = StrategyParams> {
    (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0).prop_map(
        |(accept, trust, penalty, scam)| StrategyParams {
            trusting_accept_chance: accept,
            adaptive_initial_trust: trust,
            adaptive_penalty: penalty,
            deceptive_scam_chance: scam,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn strategy_counts_sum_to_population(
        seed in any::<u64>(),
        target_size in 1usize..200,
        weights in (0.0f64..5.0, 0.0f64..5.0, 0.1f64..5.0),
        elimination in 0.0f64..0.5,
        reproduction in 0.0f64..0.5,
        mutation in 0.0f64..0.2,
        rounds in 1u64..6,
    ) {
        let config = PopulationConfig {
            target_size,
            distribution: StrategyDistribution::new()
                .with("trusting", weights.0)
                .with("adaptive", weights.1)
                .with("deceptive", weights.2),
            evolution: EvolutionConfig {
                elimination_threshold: elimination,
                reproduction_rate: reproduction,
                mutation_rate: mutation,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut population = Population::create(config, Some(seed)).unwrap();
        let before: usize = population.summary().values().map(|s| s.count).sum();
        prop_assert_eq!(before, population.len());

        for _ in 0..rounds {
            let report = population.advance_round().unwrap();
            let counted: usize = report.strategies.values().map(|s| s.count).sum();
            prop_assert_eq!(counted, report.total_agents);
            prop_assert_eq!(report.total_agents, population.len());
        }
    }

    #[test]
    fn trade_deltas_are_payoffs(
        seed in any::<u64>(),
        kinds in prop::collection::vec(kind_strategy(), 2..40),
        params in params_strategy(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let payoffs = PayoffConfig { cooperate: 1.0, deceptive: 3.0, no_trade: 0.5 };
        let mut agents: Vec<Agent> = kinds
            .iter()
            .map(|&k| Agent::new(AgentId::generate(&mut rng), k, &params))
            .collect();
        let before: Vec<(f64, u64)> = agents.iter().map(|a| (a.score(), a.trades_made())).collect();

        let tally = run_pairings(&mut agents, &payoffs, &params, &mut rng).unwrap();
        prop_assert_eq!(tally.pairs, kinds.len() / 2);

        for (i, agent) in agents.iter().enumerate() {
            let (score, trades) = before[i];
            let paired = i < tally.pairs * 2;
            if paired {
                let delta = agent.score() - score;
                prop_assert!([payoffs.no_trade, payoffs.cooperate, payoffs.deceptive].contains(&delta));
                prop_assert_eq!(agent.trades_made(), trades + 1);
            } else {
                prop_assert_eq!(agent.trades_made(), trades);
            }
            if let Some(trust) = agent.strategy().trust() {
                prop_assert!((0.0..=1.0).contains(&trust));
            }
        }
    }

    #[test]
    fn eliminated_never_outscore_survivors(
        seed in any::<u64>(),
        scores in prop::collection::vec(0u8..10, 1..120),
        threshold in 0.0f64..=1.0,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut agents: Vec<Agent> = scores
            .iter()
            .map(|&s| {
                let mut agent = Agent::new(
                    AgentId::generate(&mut rng),
                    StrategyKind::Trusting,
                    &StrategyParams::default(),
                );
                agent.record_trade(f64::from(s));
                agent
            })
            .collect();
        let target_size = agents.len();

        rank_by_score(&mut agents);
        let eliminated = CullingPolicy::new(threshold).cull(&mut agents, target_size);

        let best_eliminated = eliminated.iter().map(|a| a.score()).fold(f64::NEG_INFINITY, f64::max);
        let worst_survivor = agents.iter().map(|a| a.score()).fold(f64::INFINITY, f64::min);
        prop_assert!(best_eliminated <= worst_survivor);
        prop_assert_eq!(eliminated.len() + agents.len(), target_size);
    }
}
