//! Move selection for Quantum Squares
//!
//! This crate provides:
//! - Agent trait and RandomAgent
//! - GreedyAgent: one-ply search over cloned states with tactical adjustments
//! - Match runner and win/tie tallies for pitting agents against each other

mod agent;
mod arena;
mod greedy;

pub use agent::*;
pub use arena::*;
pub use greedy::*;
