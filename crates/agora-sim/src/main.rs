//! Agora simulation driver
//!
//! Runs the population engine for a fixed number of rounds and prints the
//! final detailed report as JSON.
//!
//! ```text
//! agora-sim [CONFIG_FILE]
//! ```

mod settings;

use anyhow::{Context, Result};
use chrono::Utc;
use prometheus::{Encoder, Registry, TextEncoder};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agora_darwinian::{DetailedReport, Population, SimulationMetrics};

use crate::settings::SimConfig;

#[derive(Serialize)]
struct RunSummary {
    version: &'static str,
    seed: Option<u64>,
    started_at: chrono::DateTime<Utc>,
    finished_at: chrono::DateTime<Utc>,
    report: DetailedReport,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Agora simulation v{}", agora_common::VERSION);

    let path = std::env::args().nth(1);
    let config = SimConfig::load(path.as_deref())?;
    info!(
        rounds = config.rounds,
        seed = ?config.seed,
        target_size = config.population.target_size,
        "Loaded configuration"
    );

    let registry = Registry::new();
    let metrics = SimulationMetrics::new().context("Failed to build metrics")?;
    metrics
        .register(&registry)
        .context("Failed to register metrics")?;

    let started_at = Utc::now();
    let mut population = Population::create(config.population.clone(), config.seed)
        .context("Failed to create population")?;

    for _ in 0..config.rounds {
        let report = population
            .advance_round()
            .with_context(|| format!("Round {} failed", population.round() + 1))?;
        metrics.observe(&report);

        if config.report_every > 0 && report.round % config.report_every == 0 {
            info!(
                round = report.round,
                agents = report.total_agents,
                summary = %population.describe(),
                "Progress"
            );
        }
        if population.is_empty() {
            info!(round = report.round, "Population died out, stopping early");
            break;
        }
    }

    let summary = RunSummary {
        version: agora_common::VERSION,
        seed: config.seed,
        started_at,
        finished_at: Utc::now(),
        report: population.detailed_stats(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if config.emit_metrics {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        println!("{}", String::from_utf8(buffer)?);
    }

    info!(
        rounds = population.round(),
        agents = population.len(),
        "Simulation finished"
    );
    Ok(())
}
