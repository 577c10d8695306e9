//! # Agora Common
//!
//! Agent model for the Agora evolutionary trading simulation.
//!
//! ## Core Types
//!
//! - [`StrategyKind`]: closed set of strategy tags (Trusting, Adaptive, Deceptive)
//! - [`Strategy`]: a tag together with its variant-specific state
//! - [`Agent`]: one trader with its score, trade counters, and victimization record
//! - [`AgoraError`]: error taxonomy shared by every crate
//!
//! This crate has no knowledge of populations or rounds.

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{AgoraError, Result};
pub use types::{
    agent::{Agent, AgentId, AgentStats},
    strategy::{Strategy, StrategyKind, StrategyParams},
};

/// Agora version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Probability a Trusting agent agrees to trade
pub const DEFAULT_TRUSTING_ACCEPT_CHANCE: f64 = 1.0;

/// Starting trust level of an Adaptive agent
pub const DEFAULT_ADAPTIVE_INITIAL_TRUST: f64 = 1.0;

/// Trust removed from an Adaptive agent per victimization
pub const DEFAULT_ADAPTIVE_PENALTY: f64 = 1.0;

/// Probability a Deceptive agent deceives in an agreed trade
pub const DEFAULT_DECEPTIVE_SCAM_CHANCE: f64 = 1.0;
