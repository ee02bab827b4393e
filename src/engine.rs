//! Engine state management.
//!
//! The `Engine` is the one context object the binary builds at startup and
//! feeds every command to. It owns the options and the game in progress;
//! the rules themselves hold no global state.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::config::GameConfig;
use crate::game::Game;
use crate::movegen::legal_actions;
use crate::protocol::snapshot::{
    encode_history, encode_snapshot, parse_history, parse_snapshot, SnapshotError,
};

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: Option<Game>,
    pub options: HashMap<String, String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a new engine with no game and no options set.
    pub fn new() -> Self {
        Engine {
            game: None,
            options: HashMap::new(),
        }
    }

    /// Sets an engine option. Takes effect at the next `newgame`.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// The configuration for the next game, falling back to the default if
    /// the options do not form a valid one.
    pub fn config(&self) -> GameConfig {
        match GameConfig::from_options(&self.options) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("invalid options, using defaults: {}", e);
                GameConfig::default()
            }
        }
    }

    /// Handles the handshake: writes id, options, and `morrisok`.
    pub fn handle_morris<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name morris")?;
        writeln!(out, "id author morris")?;
        writeln!(out, "option name Tokens type spin default 9 min 3 max 12")?;
        writeln!(out, "option name FirstPlayer type combo default cat var cat var dog")?;
        writeln!(out, "morrisok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Starts a new game from the current options and prints its board.
    pub fn handle_newgame<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.game = Some(Game::new(&self.config()));
        self.write_board(out)
    }

    /// Handles `action <index>`: `ok` or `illegal`, the board, and the
    /// winner once the game has ended.
    pub fn handle_action<W: Write>(&mut self, index: usize, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            eprintln!("action: no game in progress");
            return Ok(());
        };
        if game.is_over() {
            writeln!(out, "illegal")?;
        } else if game.action(index) {
            writeln!(out, "ok")?;
        } else {
            writeln!(out, "illegal")?;
        }
        self.write_board(out)
    }

    /// Handles `undo`, printing the board that is current afterwards.
    pub fn handle_undo<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            eprintln!("undo: no game in progress");
            return Ok(());
        };
        game.undo();
        self.write_board(out)
    }

    /// Handles `legal`: the indices that would accept an action.
    pub fn handle_legal<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_ref() else {
            eprintln!("legal: no game in progress");
            return Ok(());
        };
        let mut line = String::from("legal");
        if !game.is_over() {
            for i in legal_actions(game.current()) {
                line.push(' ');
                line.push_str(&i.to_string());
            }
        }
        writeln!(out, "{}", line)?;
        out.flush()
    }

    /// Handles `snapshot`: the current board as one JSON line.
    pub fn handle_snapshot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_ref() else {
            eprintln!("snapshot: no game in progress");
            return Ok(());
        };
        match encode_snapshot(game.current()) {
            Ok(json) => writeln!(out, "{}", json)?,
            Err(e) => eprintln!("snapshot: {}", e),
        }
        out.flush()
    }

    /// Handles `history`: every board in order, then `historyok`.
    pub fn handle_history<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_ref() else {
            eprintln!("history: no game in progress");
            return Ok(());
        };
        match encode_history(game) {
            Ok(text) => write!(out, "{}", text)?,
            Err(e) => eprintln!("history: {}", e),
        }
        writeln!(out, "historyok")?;
        out.flush()
    }

    /// Replaces the game with one loaded from a JSON snapshot.
    ///
    /// On failure the current game is kept.
    pub fn load(&mut self, json: &str) -> Result<(), SnapshotError> {
        let board = parse_snapshot(json)?;
        self.game = Some(Game::from_board(board));
        Ok(())
    }

    /// Handles `load <json>`, printing the loaded board.
    pub fn handle_load<W: Write>(&mut self, json: &str, out: &mut W) -> io::Result<()> {
        match self.load(json) {
            Ok(()) => self.write_board(out),
            Err(e) => {
                eprintln!("load: {}", e);
                Ok(())
            }
        }
    }

    /// Writes the current game's history to `path`, one snapshot per line.
    pub fn save_history(&self, path: &Path) -> Result<(), SnapshotError> {
        let Some(game) = self.game.as_ref() else {
            return Err(SnapshotError::EmptyHistory);
        };
        fs::write(path, encode_history(game)?)?;
        Ok(())
    }

    /// Replaces the game with the history stored at `path`, named after the
    /// file. Undo walks back through the stored boards.
    ///
    /// On failure the current game is kept.
    pub fn load_history(&mut self, path: &Path) -> Result<(), SnapshotError> {
        let text = fs::read_to_string(path)?;
        let mut game = parse_history(&text)?;
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            game = game.with_name(stem);
        }
        self.game = Some(game);
        Ok(())
    }

    /// Handles `savehistory <path>`: `historysaved <boards>` on success.
    pub fn handle_savehistory<W: Write>(&self, path: &str, out: &mut W) -> io::Result<()> {
        match self.save_history(Path::new(path)) {
            Ok(()) => {
                let boards = self.game.as_ref().map_or(0, |g| g.history().len());
                writeln!(out, "historysaved {}", boards)?;
            }
            Err(e) => eprintln!("savehistory: {}", e),
        }
        out.flush()
    }

    /// Handles `loadhistory <path>`: `game <name>`, then the current board.
    pub fn handle_loadhistory<W: Write>(&mut self, path: &str, out: &mut W) -> io::Result<()> {
        if let Err(e) = self.load_history(Path::new(path)) {
            eprintln!("loadhistory: {}", e);
            return Ok(());
        }
        if let Some(name) = self.game.as_ref().and_then(|g| g.name()) {
            writeln!(out, "game {}", name)?;
        }
        self.write_board(out)
    }

    /// Writes the board line, plus `victory <player>` if the game is over.
    fn write_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(game) = &self.game {
            writeln!(out, "{}", game.current())?;
            if let Some(winner) = game.winner() {
                writeln!(out, "victory {}", winner.name())?;
            }
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Phase, Player};

    fn output_of(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn new_engine_has_no_state() {
        let engine = Engine::new();
        assert!(engine.game.is_none());
        assert!(engine.options.is_empty());
    }

    #[test]
    fn handshake_ends_with_morrisok() {
        let engine = Engine::new();
        let s = output_of(|o| engine.handle_morris(o));
        assert!(s.contains("id name morris"));
        assert!(s.contains("option name Tokens"));
        assert_eq!(s.lines().last(), Some("morrisok"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        assert_eq!(output_of(|o| engine.handle_isready(o)).trim(), "readyok");
    }

    #[test]
    fn options_shape_new_game() {
        let mut engine = Engine::new();
        engine.set_option("Tokens".to_string(), Some("5".to_string()));
        engine.set_option("FirstPlayer".to_string(), Some("dog".to_string()));
        let s = output_of(|o| engine.handle_newgame(o));
        assert!(s.contains("turn dog phase place"));
        let board = engine.game.as_ref().unwrap().current();
        assert_eq!(board.playing_team().player(), Player::Dog);
        assert_eq!(board.team(0).num_unplaced_tokens(), 5);
    }

    #[test]
    fn bad_options_fall_back_to_default() {
        let mut engine = Engine::new();
        engine.set_option("Tokens".to_string(), Some("99".to_string()));
        assert_eq!(engine.config(), GameConfig::default());
    }

    #[test]
    fn action_reports_ok_and_illegal() {
        let mut engine = Engine::new();
        output_of(|o| engine.handle_newgame(o));
        let s = output_of(|o| engine.handle_action(0, o));
        assert!(s.starts_with("ok\nboard c"));
        let s = output_of(|o| engine.handle_action(0, o));
        assert!(s.starts_with("illegal\n"));
    }

    #[test]
    fn action_without_game_is_silent() {
        let mut engine = Engine::new();
        assert_eq!(output_of(|o| engine.handle_action(0, o)), "");
    }

    #[test]
    fn undo_and_legal() {
        let mut engine = Engine::new();
        output_of(|o| engine.handle_newgame(o));
        output_of(|o| engine.handle_action(7, o));
        let legal = output_of(|o| engine.handle_legal(o));
        assert_eq!(legal.split_whitespace().count(), 1 + 23);
        output_of(|o| engine.handle_undo(o));
        assert_eq!(engine.game.as_ref().unwrap().history().len(), 1);
    }

    #[test]
    fn snapshot_load_round_trip() {
        let mut engine = Engine::new();
        output_of(|o| engine.handle_newgame(o));
        for i in [1, 3, 4, 5, 7] {
            output_of(|o| engine.handle_action(i, o));
        }
        let json = output_of(|o| engine.handle_snapshot(o));
        let before = engine.game.as_ref().unwrap().current().clone();

        let mut other = Engine::new();
        let s = output_of(|o| other.handle_load(json.trim(), o));
        assert!(s.contains("phase remove"));
        let loaded = other.game.as_ref().unwrap();
        assert_eq!(loaded.current(), &before);
        assert_eq!(loaded.current().phase(), Phase::RemoveOpponent);
    }

    #[test]
    fn failed_load_keeps_game() {
        let mut engine = Engine::new();
        output_of(|o| engine.handle_newgame(o));
        output_of(|o| engine.handle_action(2, o));
        assert!(engine.load("{}").is_err());
        assert_eq!(engine.game.as_ref().unwrap().history().len(), 2);
    }

    fn temp_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("morris-engine-{}-{}.txt", std::process::id(), name))
    }

    #[test]
    fn saved_history_loads_back_with_undo() {
        let path = temp_file("roundtrip");
        let mut engine = Engine::new();
        output_of(|o| engine.handle_newgame(o));
        for i in [0, 9, 1] {
            output_of(|o| engine.handle_action(i, o));
        }
        let s = output_of(|o| engine.handle_savehistory(path.to_str().unwrap(), o));
        assert_eq!(s, "historysaved 4\n");
        let saved = engine.game.as_ref().unwrap().history().to_vec();

        let mut other = Engine::new();
        let s = output_of(|o| other.handle_loadhistory(path.to_str().unwrap(), o));
        let stem = path.file_stem().unwrap().to_str().unwrap();
        assert!(s.starts_with(&format!("game {}\nboard cc", stem)), "got {}", s);
        let game = other.game.as_mut().unwrap();
        assert_eq!(game.name(), Some(stem));
        assert_eq!(game.history(), &saved[..]);
        while game.undo() {}
        assert_eq!(game.current(), &saved[0]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_history_file_keeps_game() {
        let mut engine = Engine::new();
        output_of(|o| engine.handle_newgame(o));
        output_of(|o| engine.handle_action(4, o));
        let path = temp_file("missing");
        assert!(matches!(engine.load_history(&path), Err(SnapshotError::Io(_))));
        assert_eq!(output_of(|o| engine.handle_loadhistory(path.to_str().unwrap(), o)), "");
        assert_eq!(engine.game.as_ref().unwrap().history().len(), 2);
    }

    #[test]
    fn save_without_game_writes_nothing() {
        let engine = Engine::new();
        let path = temp_file("nogame");
        assert!(engine.save_history(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn history_lists_every_board() {
        let mut engine = Engine::new();
        output_of(|o| engine.handle_newgame(o));
        output_of(|o| engine.handle_action(2, o));
        output_of(|o| engine.handle_action(3, o));
        let s = output_of(|o| engine.handle_history(o));
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "historyok");
        assert!(lines[0].starts_with('{'));
    }
}
