//! Board representation and game-state types.
//!
//! Contains the position graph and its fixed topology, the two teams, and
//! the board snapshot that drives the turn/phase state machine.

pub mod position;
pub mod state;
pub mod team;
pub mod topology;

pub use position::{Mill, Position, PositionGraph};
pub use state::{Board, Phase};
pub use team::{Player, Team, ALL_PLAYERS};
pub use topology::{
    build_graph, standard_graph, Axis, Direction, Edge, ALL_DIRECTIONS, EDGES,
    EDGE_COUNT, POSITION_COUNT,
};
