//! Morris rule engine library.
//!
//! Exposes the board representation, game history, move generation, and
//! protocol modules for use by integration tests and the binary entry point.

pub mod board;
pub mod config;
pub mod engine;
pub mod game;
pub mod movegen;
pub mod protocol;
