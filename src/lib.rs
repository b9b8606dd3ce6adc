//! Quantum Squares
//!
//! A two-player chain-reaction territory game: engine, move search, and a
//! terminal client.
//!
//! This crate re-exports the engine and agent crates for convenience.

pub mod display;
pub mod view;

pub use quantum_squares_agent as agent;
pub use quantum_squares_engine::*;
