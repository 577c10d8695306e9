//! Core data types for the agent model

pub mod agent;
pub mod strategy;
