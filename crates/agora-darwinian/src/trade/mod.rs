//! Pairwise trading
pub mod resolver;

pub use self::resolver::{resolve_trade, run_pairings, Side, TradeOutcome, TradeTally};
