//! Driver command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the binary's main loop can dispatch on.

use crate::board::POSITION_COUNT;

/// A parsed driver-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Morris,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game from the current options.
    NewGame,

    /// Act on a board position in the current phase.
    Action { index: usize },

    /// Step back one board.
    Undo,

    /// List the positions that would accept an action.
    Legal,

    /// Print the current board as a JSON snapshot.
    Snapshot,

    /// Replace the game with a single board decoded from a JSON snapshot.
    Load { json: String },

    /// Print every board of the game as JSON snapshots.
    History,

    /// Write the game's history to a file, one snapshot per line.
    SaveHistory { path: String },

    /// Replace the game with a history read from a file.
    LoadHistory { path: String },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "morris" => Some(Command::Morris),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "undo" => Some(Command::Undo),
        "legal" => Some(Command::Legal),
        "snapshot" => Some(Command::Snapshot),
        "history" => Some(Command::History),

        "setoption" => parse_setoption(&tokens),
        "action" => parse_action(&tokens),
        "load" => rest_of_line(&tokens, trimmed, "json").map(|json| Command::Load { json }),
        "savehistory" => {
            rest_of_line(&tokens, trimmed, "path").map(|path| Command::SaveHistory { path })
        }
        "loadhistory" => {
            rest_of_line(&tokens, trimmed, "path").map(|path| Command::LoadHistory { path })
        }

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    // Minimum: setoption name <id>
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                eprintln!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `action <index>`, rejecting indices off the board.
fn parse_action(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        eprintln!("malformed action: expected 'action <index>'");
        return None;
    }
    match tokens[1].parse::<usize>() {
        Ok(index) if index < POSITION_COUNT => Some(Command::Action { index }),
        Ok(index) => {
            eprintln!("action index {} out of range 0..{}", index, POSITION_COUNT);
            None
        }
        Err(_) => {
            eprintln!("invalid action index: '{}'", tokens[1]);
            None
        }
    }
}

/// Captures everything after the command word, spaces included.
fn rest_of_line(tokens: &[&str], full_line: &str, what: &str) -> Option<String> {
    if tokens.len() < 2 {
        eprintln!("malformed {}: expected '{} <{}>'", tokens[0], tokens[0], what);
        return None;
    }
    let rest = full_line.strip_prefix(tokens[0]).unwrap_or("").trim();
    Some(rest.to_string())
}
