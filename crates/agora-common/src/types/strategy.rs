//! Strategy variants - the closed set of trading policies
//!
//! Every agent carries one [`Strategy`]: a tag plus whatever state that
//! variant needs. Behaviour is dispatched by `match`, so adding a variant
//! means extending [`StrategyKind`], [`Strategy`], and the dispatch methods
//! below.
//!
//! | Variant   | Agrees to trade            | On victimization         |
//! |-----------|----------------------------|--------------------------|
//! | Trusting  | with `trusting_accept_chance` | nothing               |
//! | Adaptive  | with its current trust     | trust -= penalty (>= 0)  |
//! | Deceptive | always                     | nothing                  |

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AgoraError, Result};

/// Strategy tag, without variant state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Trusting,
    Adaptive,
    Deceptive,
}

impl StrategyKind {
    /// Full strategy set, in canonical order. Mutation draws from this.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Trusting,
        StrategyKind::Adaptive,
        StrategyKind::Deceptive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Trusting => "trusting",
            StrategyKind::Adaptive => "adaptive",
            StrategyKind::Deceptive => "deceptive",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = AgoraError;

    /// Accepts canonical names and the legacy `naive`/`adapt`/`bad` tags
    fn from_str(tag: &str) -> Result<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "trusting" | "naive" => Ok(StrategyKind::Trusting),
            "adaptive" | "adapt" => Ok(StrategyKind::Adaptive),
            "deceptive" | "bad" => Ok(StrategyKind::Deceptive),
            _ => Err(AgoraError::InvalidStrategy(tag.to_string())),
        }
    }
}

/// Tunable behaviour of each strategy variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    /// Probability a Trusting agent agrees to trade
    pub trusting_accept_chance: f64,
    /// Trust level an Adaptive agent starts with
    pub adaptive_initial_trust: f64,
    /// Trust lost by an Adaptive agent each time it is deceived
    pub adaptive_penalty: f64,
    /// Probability a Deceptive agent deceives in an agreed trade
    pub deceptive_scam_chance: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            trusting_accept_chance: crate::DEFAULT_TRUSTING_ACCEPT_CHANCE,
            adaptive_initial_trust: crate::DEFAULT_ADAPTIVE_INITIAL_TRUST,
            adaptive_penalty: crate::DEFAULT_ADAPTIVE_PENALTY,
            deceptive_scam_chance: crate::DEFAULT_DECEPTIVE_SCAM_CHANCE,
        }
    }
}

impl StrategyParams {
    /// Check every probability lies in [0, 1]
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("trusting_accept_chance", self.trusting_accept_chance),
            ("adaptive_initial_trust", self.adaptive_initial_trust),
            ("adaptive_penalty", self.adaptive_penalty),
            ("deceptive_scam_chance", self.deceptive_scam_chance),
        ];
        for (name, value) in fields {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(AgoraError::config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Strategy tag together with its variant-specific state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    Trusting,
    Adaptive { trust: f64 },
    Deceptive,
}

impl Strategy {
    /// Fresh strategy state for a tag
    pub fn new(kind: StrategyKind, params: &StrategyParams) -> Self {
        match kind {
            StrategyKind::Trusting => Strategy::Trusting,
            StrategyKind::Adaptive => Strategy::Adaptive {
                trust: params.adaptive_initial_trust.clamp(0.0, 1.0),
            },
            StrategyKind::Deceptive => Strategy::Deceptive,
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Trusting => StrategyKind::Trusting,
            Strategy::Adaptive { .. } => StrategyKind::Adaptive,
            Strategy::Deceptive => StrategyKind::Deceptive,
        }
    }

    /// Current trust level (Adaptive only)
    pub fn trust(&self) -> Option<f64> {
        match self {
            Strategy::Adaptive { trust } => Some(*trust),
            _ => None,
        }
    }

    /// Roll whether this side agrees to trade. No side effects.
    ///
    /// Deceptive agents always agree and do not consume a draw.
    pub fn accepts<R: Rng + ?Sized>(&self, params: &StrategyParams, rng: &mut R) -> bool {
        match self {
            Strategy::Trusting => rng.gen_bool(params.trusting_accept_chance),
            Strategy::Adaptive { trust } => rng.gen_bool(trust.clamp(0.0, 1.0)),
            Strategy::Deceptive => true,
        }
    }

    /// Roll whether a Deceptive agent deceives in an agreed trade
    ///
    /// Any other variant reaching this is a caller bug and fails with
    /// [`AgoraError::Consistency`].
    pub fn attempt_deception<R: Rng + ?Sized>(
        &self,
        params: &StrategyParams,
        rng: &mut R,
    ) -> Result<bool> {
        match self {
            Strategy::Deceptive => Ok(rng.gen_bool(params.deceptive_scam_chance)),
            other => Err(AgoraError::Consistency(format!(
                "{} strategy cannot attempt deception",
                other.kind()
            ))),
        }
    }

    /// React to having been deceived in a completed trade
    pub fn on_victimized(&mut self, params: &StrategyParams) {
        if let Strategy::Adaptive { trust } = self {
            *trust = (*trust - params.adaptive_penalty).clamp(0.0, 1.0);
        }
    }
}
