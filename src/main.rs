//! morris -- a Nine Men's Morris rule engine driven over stdin/stdout.
//!
//! This binary reads one command per line from stdin and writes responses
//! to stdout. Diagnostics go to stderr.

use std::io::{self, BufRead};

use morris::engine::Engine;
use morris::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Morris => engine.handle_morris(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame => engine.handle_newgame(&mut out)?,
            Command::Action { index } => engine.handle_action(index, &mut out)?,
            Command::Undo => engine.handle_undo(&mut out)?,
            Command::Legal => engine.handle_legal(&mut out)?,
            Command::Snapshot => engine.handle_snapshot(&mut out)?,
            Command::Load { json } => engine.handle_load(&json, &mut out)?,
            Command::History => engine.handle_history(&mut out)?,
            Command::SaveHistory { path } => engine.handle_savehistory(&path, &mut out)?,
            Command::LoadHistory { path } => engine.handle_loadhistory(&path, &mut out)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
