//! Game history, undo, and end-of-game detection.
//!
//! A `Game` keeps every board it has passed through. Boards are never
//! changed once stored: each accepted action clones the current board,
//! applies the action to the clone, and appends it. Undo drops the tail.

use log::{debug, info};

use crate::board::{Board, Phase, Player};
use crate::config::{GameConfig, MIN_TOKENS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    name: Option<String>,
    /// Never empty; the last entry is the current board.
    history: Vec<Board>,
}

impl Game {
    /// Starts a new game from `config`.
    pub fn new(config: &GameConfig) -> Self {
        info!(
            "new game: {} tokens per team, {} first",
            config.tokens_per_team,
            config.first_player.name()
        );
        Self::from_board(Board::new(config))
    }

    /// Starts a game whose history holds only `board`.
    pub fn from_board(board: Board) -> Self {
        Game {
            name: None,
            history: vec![board],
        }
    }

    /// Resumes a game from stored boards, oldest first.
    ///
    /// Returns `None` for an empty history.
    pub fn from_history(history: Vec<Board>) -> Option<Self> {
        if history.is_empty() {
            return None;
        }
        Some(Game {
            name: None,
            history,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn current(&self) -> &Board {
        // `history` is never empty.
        &self.history[self.history.len() - 1]
    }

    pub fn history(&self) -> &[Board] {
        &self.history
    }

    /// Applies the current phase's action at `index`.
    ///
    /// On success the resulting board is appended to the history and true is
    /// returned; otherwise nothing changes.
    pub fn action(&mut self, index: usize) -> bool {
        let mut next = self.current().clone();
        if !next.action(index) {
            return false;
        }
        debug!("action at {} accepted, history length {}", index, self.history.len() + 1);
        self.history.push(next);
        if let Some(winner) = self.winner() {
            info!("{} wins", winner.name());
        }
        true
    }

    /// Drops the most recent board. A game with a single board is left as is.
    ///
    /// Returns true if a board was dropped.
    pub fn undo(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        info!("undo, history length {}", self.history.len());
        true
    }

    /// True if the team to move on `board` has lost.
    ///
    /// The team loses with fewer than three tokens left, or when it has
    /// nothing in hand at the start of a moving turn and every token it has
    /// on the board is stuck.
    pub fn check_victory(board: &Board) -> bool {
        let team = board.playing_team();
        if team.num_alive_tokens() < MIN_TOKENS {
            return true;
        }
        !team.has_unplaced_tokens() && board.phase() == Phase::PickUp && board.all_tokens_stuck()
    }

    pub fn is_over(&self) -> bool {
        Self::check_victory(self.current())
    }

    /// The winner, if the game has ended: the team not to move.
    pub fn winner(&self) -> Option<Player> {
        if self.is_over() {
            Some(self.current().non_playing_team().player())
        } else {
            None
        }
    }
}
