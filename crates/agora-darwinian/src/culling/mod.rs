//! Elimination of the lowest ranked agents
pub mod policy;

pub use self::policy::CullingPolicy;
