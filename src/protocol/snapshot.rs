//! JSON board snapshots.
//!
//! A snapshot is the stored form of one board:
//!
//! ```text
//! { "teams": [{ "player", "numUnplacedTokens", "numAliveTokens" }, ..],
//!   "currentPlayer": 0, "positions": [{ "player": 0 } | {}, ..],
//!   "gamePhase": 1, "pickUpPosition": 4 }
//! ```
//!
//! Players and phases are integers. `pickUpPosition` is optional. Mill
//! counters are not stored; they are rebuilt from occupancy on load. Only
//! the shape is checked when decoding: counters and occupancy are trusted.
//!
//! A game history is stored as one snapshot per line, oldest first.

use serde::{Deserialize, Serialize};

use crate::board::{standard_graph, Board, Phase, Player, PositionGraph, Team, POSITION_COUNT};
use crate::game::Game;

/// Errors that can occur while reading or decoding snapshots.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected 2 teams, got {0}")]
    WrongTeamCount(usize),

    #[error("expected 24 positions, got {0}")]
    WrongPositionCount(usize),

    #[error("invalid current player: {0}")]
    InvalidCurrentPlayer(u8),

    #[error("invalid game phase: {0}")]
    InvalidPhase(u8),

    #[error("pick-up position {0} is off the board")]
    PickUpOutOfRange(usize),

    #[error("history line {line}: {message}")]
    InvalidLine { line: usize, message: String },

    #[error("history contains no boards")]
    EmptyHistory,

    #[error("history file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSnapshot {
    pub player: Player,
    pub num_unplaced_tokens: u8,
    pub num_alive_tokens: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<Player>,
}

/// The stored form of a `Board`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub teams: Vec<TeamSnapshot>,
    pub current_player: u8,
    pub positions: Vec<PositionSnapshot>,
    pub game_phase: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick_up_position: Option<usize>,
}

impl Snapshot {
    pub fn from_board(board: &Board) -> Self {
        Snapshot {
            teams: board
                .teams()
                .iter()
                .map(|t| TeamSnapshot {
                    player: t.player(),
                    num_unplaced_tokens: t.num_unplaced_tokens(),
                    num_alive_tokens: t.num_alive_tokens(),
                })
                .collect(),
            current_player: board.current_player_index() as u8,
            positions: board
                .graph()
                .positions()
                .iter()
                .map(|p| PositionSnapshot {
                    player: p.occupant(),
                })
                .collect(),
            game_phase: board.phase() as u8,
            pick_up_position: board.pick_up_position(),
        }
    }

    /// Builds a board on the standard topology.
    pub fn to_board(&self) -> Result<Board, SnapshotError> {
        self.to_board_on(standard_graph())
    }

    /// Builds a board on a caller-supplied, already wired graph.
    ///
    /// Any tokens already on `graph` are replaced by the snapshot's.
    pub fn to_board_on(&self, mut graph: PositionGraph) -> Result<Board, SnapshotError> {
        let teams: [Team; 2] = match self.teams.as_slice() {
            [a, b] => [team_from(a), team_from(b)],
            other => return Err(SnapshotError::WrongTeamCount(other.len())),
        };
        if self.positions.len() != POSITION_COUNT {
            return Err(SnapshotError::WrongPositionCount(self.positions.len()));
        }
        if self.current_player > 1 {
            return Err(SnapshotError::InvalidCurrentPlayer(self.current_player));
        }
        let phase =
            Phase::from_index(self.game_phase).ok_or(SnapshotError::InvalidPhase(self.game_phase))?;
        if let Some(i) = self.pick_up_position {
            if i >= POSITION_COUNT {
                return Err(SnapshotError::PickUpOutOfRange(i));
            }
        }

        for (i, p) in self.positions.iter().enumerate() {
            match p.player {
                Some(player) => graph.place_token(i, player),
                None => graph.remove_token(i),
            }
        }

        Ok(Board::from_parts(
            teams,
            self.current_player as usize,
            graph,
            phase,
            self.pick_up_position,
        ))
    }
}

fn team_from(t: &TeamSnapshot) -> Team {
    Team::with_counts(t.player, t.num_unplaced_tokens, t.num_alive_tokens)
}

/// Parses a single-line JSON snapshot into a board.
pub fn parse_snapshot(json: &str) -> Result<Board, SnapshotError> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    snapshot.to_board()
}

/// Encodes a board as a single-line JSON snapshot.
pub fn encode_snapshot(board: &Board) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&Snapshot::from_board(board))?)
}

/// Parses a stored history, one snapshot per line. Blank lines are skipped.
pub fn parse_history(text: &str) -> Result<Game, SnapshotError> {
    let mut boards = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let board = parse_snapshot(line).map_err(|e| SnapshotError::InvalidLine {
            line: n + 1,
            message: e.to_string(),
        })?;
        boards.push(board);
    }
    Game::from_history(boards).ok_or(SnapshotError::EmptyHistory)
}

/// Encodes every board of `game`, one snapshot per line.
pub fn encode_history(game: &Game) -> Result<String, SnapshotError> {
    let mut out = String::new();
    for board in game.history() {
        out.push_str(&encode_snapshot(board)?);
        out.push('\n');
    }
    Ok(out)
}
