//! New-game configuration.
//!
//! The token count per team varies between rule sets, so it is a parameter
//! of each new game rather than a constant.

use std::collections::HashMap;

use crate::board::{Player, POSITION_COUNT};

/// Default number of tokens per team (the classic nine).
pub const DEFAULT_TOKENS: u8 = 9;

/// Fewest tokens that can still form a mill.
pub const MIN_TOKENS: u8 = 3;

/// Most tokens that fit when both teams place everything.
pub const MAX_TOKENS: u8 = (POSITION_COUNT / 2) as u8;

/// Errors from building a configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("token count {0} is below the minimum of 3")]
    TooFewTokens(u8),

    #[error("token count {0} exceeds the maximum of 12")]
    TooManyTokens(u8),

    #[error("invalid token count: '{0}'")]
    InvalidTokens(String),

    #[error("unknown player: '{0}'")]
    UnknownPlayer(String),
}

/// Parameters for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub tokens_per_team: u8,
    pub first_player: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tokens_per_team: DEFAULT_TOKENS,
            first_player: Player::Cat,
        }
    }
}

impl GameConfig {
    /// Creates a config with `tokens` per team and Cat to move first.
    pub fn new(tokens: u8) -> Result<Self, ConfigError> {
        if tokens < MIN_TOKENS {
            return Err(ConfigError::TooFewTokens(tokens));
        }
        if tokens > MAX_TOKENS {
            return Err(ConfigError::TooManyTokens(tokens));
        }
        Ok(Self {
            tokens_per_team: tokens,
            ..Self::default()
        })
    }

    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }

    /// Builds a config from driver options (`Tokens`, `FirstPlayer`).
    ///
    /// Missing options keep their defaults.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = match options.get("Tokens") {
            Some(v) => {
                let tokens = v
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| ConfigError::InvalidTokens(v.clone()))?;
                Self::new(tokens)?
            }
            None => Self::default(),
        };
        if let Some(v) = options.get("FirstPlayer") {
            let player =
                Player::from_name(v.trim()).ok_or_else(|| ConfigError::UnknownPlayer(v.clone()))?;
            config = config.with_first_player(player);
        }
        Ok(config)
    }
}
