//! Driver configuration
//!
//! Layers, lowest priority first: built-in defaults, an optional config file
//! (`AGORA_CONFIG`, default `agora.{toml,json,yaml}`), then `AGORA__`
//! environment variables such as `AGORA__POPULATION__TARGET_SIZE=200`.

use agora_darwinian::{PopulationConfig, DEFAULT_ROUNDS};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Default config file stem, resolved against known extensions
pub const DEFAULT_CONFIG_FILE: &str = "agora";

/// Simulation run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Rounds to run
    pub rounds: u64,
    /// RNG seed; a fresh entropy seed is used when absent
    pub seed: Option<u64>,
    /// Log a strategy summary every N rounds (0 disables)
    pub report_every: u64,
    /// Print Prometheus text exposition after the run
    pub emit_metrics: bool,
    pub population: PopulationConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            seed: None,
            report_every: 100,
            emit_metrics: false,
            population: PopulationConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from `.env`, the config file, and the environment
    pub fn load(path: Option<&str>) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let path = path
            .map(str::to_string)
            .or_else(|| std::env::var("AGORA_CONFIG").ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("AGORA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {path}"))?;

        settings
            .try_deserialize()
            .context("Invalid simulation configuration")
    }
}
