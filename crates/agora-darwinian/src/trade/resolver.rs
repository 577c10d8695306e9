//! Trade resolution between two paired agents
//!
//! Both sides decide simultaneously. If both agree, the first agent gets the
//! first chance to deceive, then the second; at most one side deceives.

use agora_common::{Agent, AgoraError, Result, StrategyKind, StrategyParams};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::PayoffConfig;

/// Position of an agent within a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    First,
    Second,
}

/// What happened in one trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeOutcome {
    /// At least one side declined
    Declined,
    /// Both agreed and nobody deceived
    Cooperated,
    /// Both agreed and one side deceived the other
    Deceived { by: Side },
}

/// Outcome counts for a full pairing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeTally {
    pub pairs: usize,
    pub declined: usize,
    pub cooperated: usize,
    pub deceived: usize,
    /// Agents left without a partner (0 or 1)
    pub unpaired: usize,
}

impl TradeTally {
    fn record(&mut self, outcome: TradeOutcome) {
        self.pairs += 1;
        match outcome {
            TradeOutcome::Declined => self.declined += 1,
            TradeOutcome::Cooperated => self.cooperated += 1,
            TradeOutcome::Deceived { .. } => self.deceived += 1,
        }
    }
}

/// Resolve one trade, updating both agents in place
pub fn resolve_trade<R: Rng + ?Sized>(
    first: &mut Agent,
    second: &mut Agent,
    payoffs: &PayoffConfig,
    params: &StrategyParams,
    rng: &mut R,
) -> Result<TradeOutcome> {
    if first.id() == second.id() {
        return Err(AgoraError::Consistency(format!(
            "{} paired with itself",
            first.id()
        )));
    }

    let first_agrees = first.decide_to_trade(second, params, rng);
    let second_agrees = second.decide_to_trade(first, params, rng);

    let outcome = if !(first_agrees && second_agrees) {
        first.record_trade(payoffs.no_trade);
        second.record_trade(payoffs.no_trade);
        TradeOutcome::Declined
    } else if deceives(first, params, rng)? {
        settle_deception(first, second, payoffs, params)?;
        TradeOutcome::Deceived { by: Side::First }
    } else if deceives(second, params, rng)? {
        settle_deception(second, first, payoffs, params)?;
        TradeOutcome::Deceived { by: Side::Second }
    } else {
        first.record_trade(payoffs.cooperate);
        second.record_trade(payoffs.cooperate);
        TradeOutcome::Cooperated
    };

    trace!(
        first = %first.id(),
        second = %second.id(),
        ?outcome,
        "Trade resolved"
    );
    Ok(outcome)
}

/// Pair agents in slice order, (0,1), (2,3), ..., and trade each pair
///
/// The caller shuffles first. An odd trailing agent is left untouched.
pub fn run_pairings<R: Rng + ?Sized>(
    agents: &mut [Agent],
    payoffs: &PayoffConfig,
    params: &StrategyParams,
    rng: &mut R,
) -> Result<TradeTally> {
    let mut tally = TradeTally::default();
    let mut pairs = agents.chunks_exact_mut(2);
    for pair in pairs.by_ref() {
        let (first, second) = pair.split_at_mut(1);
        let outcome = resolve_trade(&mut first[0], &mut second[0], payoffs, params, rng)?;
        tally.record(outcome);
    }
    tally.unpaired = pairs.into_remainder().len();
    Ok(tally)
}

fn deceives<R: Rng + ?Sized>(agent: &Agent, params: &StrategyParams, rng: &mut R) -> Result<bool> {
    if agent.kind() != StrategyKind::Deceptive {
        return Ok(false);
    }
    agent.strategy().attempt_deception(params, rng)
}

fn settle_deception(
    deceiver: &mut Agent,
    victim: &mut Agent,
    payoffs: &PayoffConfig,
    params: &StrategyParams,
) -> Result<()> {
    deceiver.record_trade(payoffs.deceptive);
    deceiver.record_deception()?;
    victim.record_trade(payoffs.no_trade);
    victim.record_victimization(deceiver.id(), params);
    Ok(())
}
