//! Agent - one trading individual and its history
//!
//! An agent owns its [`Strategy`] and a set of monotone counters. Counters
//! survive mutation; only the strategy block is swapped out.

use std::collections::BTreeSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::strategy::{Strategy, StrategyKind, StrategyParams};
use crate::error::{AgoraError, Result};

/// Stable agent identity
///
/// Built from bytes of the simulation's RNG stream so that seeded runs
/// produce the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(Uuid);

impl AgentId {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bytes: [u8; 16] = rng.gen();
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent-{}", &self.0.simple().to_string()[..8])
    }
}

/// One simulated trader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,
    /// Parent id for offspring created during reproduction
    parent: Option<AgentId>,
    /// Round the agent was created in (0 for initial seeding)
    born_round: u64,
    strategy: Strategy,
    score: f64,
    trades_made: u64,
    successful_trades: u64,
    times_victimized: u64,
    times_deceived_others: u64,
    victimized_by: BTreeSet<AgentId>,
}

impl Agent {
    /// Create a fresh agent with zeroed counters
    pub fn new(id: AgentId, kind: StrategyKind, params: &StrategyParams) -> Self {
        Self {
            id,
            parent: None,
            born_round: 0,
            strategy: Strategy::new(kind, params),
            score: 0.0,
            trades_made: 0,
            successful_trades: 0,
            times_victimized: 0,
            times_deceived_others: 0,
            victimized_by: BTreeSet::new(),
        }
    }

    /// Create an agent from a textual strategy tag
    pub fn from_tag(id: AgentId, tag: &str, params: &StrategyParams) -> Result<Self> {
        let kind: StrategyKind = tag.parse()?;
        Ok(Self::new(id, kind, params))
    }

    /// Create offspring sharing the parent's tag but none of its state
    pub fn offspring(
        id: AgentId,
        parent: (AgentId, StrategyKind),
        born_round: u64,
        params: &StrategyParams,
    ) -> Self {
        let mut child = Self::new(id, parent.1, params);
        child.parent = Some(parent.0);
        child.born_round = born_round;
        child
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn parent(&self) -> Option<AgentId> {
        self.parent
    }

    pub fn born_round(&self) -> u64 {
        self.born_round
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn trades_made(&self) -> u64 {
        self.trades_made
    }

    pub fn successful_trades(&self) -> u64 {
        self.successful_trades
    }

    pub fn times_victimized(&self) -> u64 {
        self.times_victimized
    }

    pub fn times_deceived_others(&self) -> u64 {
        self.times_deceived_others
    }

    pub fn victimized_by(&self) -> &BTreeSet<AgentId> {
        &self.victimized_by
    }

    /// Decide whether to trade with `counterpart`
    ///
    /// The counterpart is visible but no current variant inspects it.
    pub fn decide_to_trade<R: Rng + ?Sized>(
        &self,
        _counterpart: &Agent,
        params: &StrategyParams,
        rng: &mut R,
    ) -> bool {
        self.strategy.accepts(params, rng)
    }

    /// Record a trade attempt and its payoff
    pub fn record_trade(&mut self, payoff: f64) {
        self.score += payoff;
        self.trades_made += 1;
        if payoff > 0.0 {
            self.successful_trades += 1;
        }
    }

    /// Record having been deceived by `by`; applies any trust penalty
    pub fn record_victimization(&mut self, by: AgentId, params: &StrategyParams) {
        self.times_victimized += 1;
        self.victimized_by.insert(by);
        self.strategy.on_victimized(params);
    }

    /// Record a deception this agent carried out
    pub fn record_deception(&mut self) -> Result<()> {
        if self.kind() != StrategyKind::Deceptive {
            return Err(AgoraError::Consistency(format!(
                "{} recorded a deception while {}",
                self.id,
                self.kind()
            )));
        }
        self.times_deceived_others += 1;
        Ok(())
    }

    /// Swap strategy in place; counters and identity are kept
    pub fn mutate_into(&mut self, kind: StrategyKind, params: &StrategyParams) {
        self.strategy = Strategy::new(kind, params);
    }

    /// Serializable per-agent stats view
    pub fn snapshot(&self) -> AgentStats {
        AgentStats {
            id: self.id,
            strategy: self.kind(),
            score: self.score,
            trust: self.strategy.trust(),
            trades_made: self.trades_made,
            successful_trades: self.successful_trades,
            times_victimized: self.times_victimized,
            times_deceived_others: self.times_deceived_others,
            distinct_victimizers: self.victimized_by.len(),
        }
    }
}

/// Point-in-time stats for one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub id: AgentId,
    pub strategy: StrategyKind,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust: Option<f64>,
    pub trades_made: u64,
    pub successful_trades: u64,
    pub times_victimized: u64,
    pub times_deceived_others: u64,
    pub distinct_victimizers: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn id(rng: &mut StdRng) -> AgentId {
        AgentId::generate(rng)
    }

    #[test]
    fn test_ids_follow_seed() {
        let a = AgentId::generate(&mut StdRng::seed_from_u64(1));
        let b = AgentId::generate(&mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
        assert!(a.to_string().starts_with("agent-"));
    }

    #[test]
    fn test_from_unknown_tag_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = Agent::from_tag(id(&mut rng), "GOOD", &StrategyParams::default()).unwrap_err();
        assert!(matches!(err, AgoraError::InvalidStrategy(_)));
    }

    #[test]
    fn test_record_trade_counters() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut agent = Agent::new(id(&mut rng), StrategyKind::Trusting, &StrategyParams::default());
        agent.record_trade(0.0);
        agent.record_trade(2.0);
        assert_eq!(agent.score(), 2.0);
        assert_eq!(agent.trades_made(), 2);
        assert_eq!(agent.successful_trades(), 1);
    }

    #[test]
    fn test_victimization_attributes_counterpart() {
        let mut rng = StdRng::seed_from_u64(1);
        let params = StrategyParams {
            adaptive_penalty: 0.25,
            ..Default::default()
        };
        let scammer = id(&mut rng);
        let mut agent = Agent::new(id(&mut rng), StrategyKind::Adaptive, &params);
        agent.record_victimization(scammer, &params);
        agent.record_victimization(scammer, &params);
        assert_eq!(agent.times_victimized(), 2);
        assert_eq!(agent.victimized_by().len(), 1);
        assert!(agent.victimized_by().contains(&scammer));
        assert_eq!(agent.strategy().trust(), Some(0.5));
    }

    #[test]
    fn test_record_deception_requires_deceptive() {
        let mut rng = StdRng::seed_from_u64(1);
        let params = StrategyParams::default();
        let mut honest = Agent::new(id(&mut rng), StrategyKind::Trusting, &params);
        assert!(matches!(honest.record_deception(), Err(AgoraError::Consistency(_))));

        let mut cheat = Agent::new(id(&mut rng), StrategyKind::Deceptive, &params);
        cheat.record_deception().unwrap();
        assert_eq!(cheat.times_deceived_others(), 1);
    }

    #[test]
    fn test_mutation_keeps_counters_and_resets_trust() {
        let mut rng = StdRng::seed_from_u64(1);
        let params = StrategyParams {
            adaptive_initial_trust: 0.9,
            adaptive_penalty: 0.5,
            ..Default::default()
        };
        let mut agent = Agent::new(id(&mut rng), StrategyKind::Adaptive, &params);
        agent.record_trade(1.0);
        agent.record_victimization(id(&mut rng), &params);
        assert!((agent.strategy().trust().unwrap() - 0.4).abs() < 1e-12);

        agent.mutate_into(StrategyKind::Deceptive, &params);
        assert_eq!(agent.kind(), StrategyKind::Deceptive);
        agent.mutate_into(StrategyKind::Adaptive, &params);
        assert_eq!(agent.strategy().trust(), Some(0.9));
        assert_eq!(agent.score(), 1.0);
        assert_eq!(agent.trades_made(), 1);
        assert_eq!(agent.times_victimized(), 1);
    }

    #[test]
    fn test_offspring_is_fresh() {
        let mut rng = StdRng::seed_from_u64(1);
        let params = StrategyParams::default();
        let parent = id(&mut rng);
        let child = Agent::offspring(id(&mut rng), (parent, StrategyKind::Adaptive), 3, &params);
        assert_eq!(child.parent(), Some(parent));
        assert_eq!(child.born_round(), 3);
        assert_eq!(child.score(), 0.0);
        assert_eq!(child.strategy().trust(), Some(params.adaptive_initial_trust));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut rng = StdRng::seed_from_u64(1);
        let agent = Agent::new(id(&mut rng), StrategyKind::Deceptive, &StrategyParams::default());
        let json = serde_json::to_value(agent.snapshot()).unwrap();
        assert_eq!(json["strategy"], "deceptive");
        assert!(json.get("trust").is_none());
    }
}
