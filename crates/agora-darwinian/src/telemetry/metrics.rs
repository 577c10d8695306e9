//! Prometheus collectors for a running simulation

use prometheus::{GaugeVec, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry};

use super::stats::RoundReport;

/// Prometheus metrics for the population engine
pub struct SimulationMetrics {
    pub rounds_total: IntCounter,
    pub population_agents: IntGauge,
    pub strategy_agents: IntGaugeVec,
    pub strategy_average_score: GaugeVec,
    pub trades_total: IntCounterVec,
    pub eliminated_total: IntCounter,
    pub born_total: IntCounter,
    pub mutated_total: IntCounter,
}

impl SimulationMetrics {
    pub fn new() -> prometheus::Result<Self> {
        Ok(Self {
            rounds_total: IntCounter::new("agora_rounds_total", "Rounds completed")?,
            population_agents: IntGauge::new("agora_population_agents", "Current population size")?,
            strategy_agents: IntGaugeVec::new(
                Opts::new("agora_strategy_agents", "Agents per strategy"),
                &["strategy"],
            )?,
            strategy_average_score: GaugeVec::new(
                Opts::new("agora_strategy_average_score", "Average score per strategy"),
                &["strategy"],
            )?,
            trades_total: IntCounterVec::new(
                Opts::new("agora_trades_total", "Trades resolved by outcome"),
                &["outcome"],
            )?,
            eliminated_total: IntCounter::new(
                "agora_agents_eliminated_total",
                "Agents removed by elimination",
            )?,
            born_total: IntCounter::new("agora_agents_born_total", "Offspring created")?,
            mutated_total: IntCounter::new(
                "agora_agents_mutated_total",
                "Agents whose strategy changed by mutation",
            )?,
        })
    }

    pub fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        registry.register(Box::new(self.rounds_total.clone()))?;
        registry.register(Box::new(self.population_agents.clone()))?;
        registry.register(Box::new(self.strategy_agents.clone()))?;
        registry.register(Box::new(self.strategy_average_score.clone()))?;
        registry.register(Box::new(self.trades_total.clone()))?;
        registry.register(Box::new(self.eliminated_total.clone()))?;
        registry.register(Box::new(self.born_total.clone()))?;
        registry.register(Box::new(self.mutated_total.clone()))?;
        Ok(())
    }

    /// Fold one round report into the collectors
    pub fn observe(&self, report: &RoundReport) {
        self.rounds_total.inc();
        self.population_agents.set(report.total_agents as i64);

        for (kind, summary) in &report.strategies {
            self.strategy_agents
                .with_label_values(&[kind.as_str()])
                .set(summary.count as i64);
            self.strategy_average_score
                .with_label_values(&[kind.as_str()])
                .set(summary.average_score);
        }

        for (outcome, count) in [
            ("declined", report.trades.declined),
            ("cooperated", report.trades.cooperated),
            ("deceived", report.trades.deceived),
        ] {
            self.trades_total
                .with_label_values(&[outcome])
                .inc_by(count as u64);
        }

        self.eliminated_total.inc_by(report.evolution.eliminated as u64);
        self.born_total.inc_by(report.evolution.born as u64);
        self.mutated_total.inc_by(report.evolution.mutated as u64);
    }
}
