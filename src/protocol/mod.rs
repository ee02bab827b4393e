//! Driver protocol handling.
//!
//! This module implements the JSON snapshot format used to store and load
//! boards, and the command parser for the binary's main loop.

pub mod parser;
pub mod snapshot;

pub use parser::{parse_command, Command};
pub use snapshot::{
    encode_history, encode_snapshot, parse_history, parse_snapshot, Snapshot, SnapshotError,
};
