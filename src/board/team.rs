//! Players and per-team token inventories.

use serde::{Deserialize, Serialize};

/// The two sides of a game.
///
/// Serialized as its integer discriminant, matching the snapshot format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Player {
    Cat = 0,
    Dog = 1,
}

/// Both players in seat order.
pub const ALL_PLAYERS: [Player; 2] = [Player::Cat, Player::Dog];

impl Player {
    pub const fn opponent(self) -> Player {
        match self {
            Player::Cat => Player::Dog,
            Player::Dog => Player::Cat,
        }
    }

    /// Returns the single-character board notation.
    pub const fn board_char(self) -> char {
        match self {
            Player::Cat => 'c',
            Player::Dog => 'd',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Player::Cat => "cat",
            Player::Dog => "dog",
        }
    }

    /// Parses a player from its lowercase name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Player> {
        match s.to_ascii_lowercase().as_str() {
            "cat" => Some(Player::Cat),
            "dog" => Some(Player::Dog),
            _ => None,
        }
    }

    pub fn from_index(i: u8) -> Option<Player> {
        match i {
            0 => Some(Player::Cat),
            1 => Some(Player::Dog),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Player::from_index(value).ok_or_else(|| format!("invalid player index {}", value))
    }
}

impl From<Player> for u8 {
    fn from(p: Player) -> u8 {
        p as u8
    }
}

/// Token inventory for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    player: Player,
    num_unplaced_tokens: u8,
    num_alive_tokens: u8,
}

impl Team {
    /// A fresh team with all `tokens` still in hand.
    pub fn new(player: Player, tokens: u8) -> Self {
        Team {
            player,
            num_unplaced_tokens: tokens,
            num_alive_tokens: tokens,
        }
    }

    /// Restores a team from stored counters.
    pub fn with_counts(player: Player, num_unplaced_tokens: u8, num_alive_tokens: u8) -> Self {
        Team {
            player,
            num_unplaced_tokens,
            num_alive_tokens,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn num_unplaced_tokens(&self) -> u8 {
        self.num_unplaced_tokens
    }

    pub fn num_alive_tokens(&self) -> u8 {
        self.num_alive_tokens
    }

    pub fn has_unplaced_tokens(&self) -> bool {
        self.num_unplaced_tokens > 0
    }

    /// Takes one token from hand. No-op once the hand is empty.
    pub fn place_token(&mut self) {
        self.num_unplaced_tokens = self.num_unplaced_tokens.saturating_sub(1);
    }

    /// Records one token lost to the opponent.
    ///
    /// Not clamped to the loss threshold; callers check victory afterwards.
    /// Floors at 0 only to stay inside `u8`.
    pub fn remove_token(&mut self) {
        self.num_alive_tokens = self.num_alive_tokens.saturating_sub(1);
    }
}
