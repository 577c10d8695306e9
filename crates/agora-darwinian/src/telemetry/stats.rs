//! Per-strategy statistics
//!
//! Pure functions of a population snapshot. Every strategy variant appears
//! in the output, with zeros when no agent holds it.

use std::collections::BTreeMap;

use agora_common::{Agent, Result, StrategyKind};
use serde::{Deserialize, Serialize};

use crate::evolution::EvolutionTally;
use crate::trade::TradeTally;

/// Count and score totals for one strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub count: usize,
    pub total_score: f64,
    pub average_score: f64,
}

/// Extended per-strategy averages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyDetail {
    pub count: usize,
    pub total_score: f64,
    pub average_score: f64,
    pub avg_trades: f64,
    pub avg_successful_trades: f64,
    pub avg_times_victimized: f64,
    pub avg_times_deceived_others: f64,
}

/// Result of one call to [`Population::advance_round`](crate::Population::advance_round)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u64,
    pub total_agents: usize,
    pub strategies: BTreeMap<StrategyKind, StrategySummary>,
    pub trades: TradeTally,
    pub evolution: EvolutionTally,
}

/// Read-only extended statistics for a population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedReport {
    pub round: u64,
    pub total_agents: usize,
    pub strategies: BTreeMap<StrategyKind, StrategyDetail>,
}

impl DetailedReport {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Count and score per strategy
pub fn summarize(agents: &[Agent]) -> BTreeMap<StrategyKind, StrategySummary> {
    let mut out: BTreeMap<StrategyKind, StrategySummary> = StrategyKind::ALL
        .iter()
        .map(|kind| (*kind, StrategySummary::default()))
        .collect();

    for agent in agents {
        let entry = out.entry(agent.kind()).or_default();
        entry.count += 1;
        entry.total_score += agent.score();
    }
    for summary in out.values_mut() {
        summary.average_score = mean(summary.total_score, summary.count);
    }
    out
}

/// Extended averages per strategy
pub fn detail(agents: &[Agent]) -> BTreeMap<StrategyKind, StrategyDetail> {
    let mut totals: BTreeMap<StrategyKind, (usize, f64, u64, u64, u64, u64)> = StrategyKind::ALL
        .iter()
        .map(|kind| (*kind, Default::default()))
        .collect();

    for agent in agents {
        let t = totals.entry(agent.kind()).or_default();
        t.0 += 1;
        t.1 += agent.score();
        t.2 += agent.trades_made();
        t.3 += agent.successful_trades();
        t.4 += agent.times_victimized();
        t.5 += agent.times_deceived_others();
    }

    totals
        .into_iter()
        .map(|(kind, (count, score, trades, successful, victimized, deceived))| {
            let detail = StrategyDetail {
                count,
                total_score: score,
                average_score: mean(score, count),
                avg_trades: mean(trades as f64, count),
                avg_successful_trades: mean(successful as f64, count),
                avg_times_victimized: mean(victimized as f64, count),
                avg_times_deceived_others: mean(deceived as f64, count),
            };
            (kind, detail)
        })
        .collect()
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
