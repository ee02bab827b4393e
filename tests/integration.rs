//! Integration tests for the morris engine binary.
//!
//! Tests full protocol sessions by spawning the engine process, sending
//! commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_morris");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start morris");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

#[test]
fn handshake_lists_options() {
    let lines = run_engine(&["morris", "quit"]);

    assert!(lines.iter().any(|l| l == "id name morris"));
    let option_lines: Vec<&String> = lines.iter().filter(|l| l.starts_with("option ")).collect();
    assert_eq!(option_lines.len(), 2);
    for opt in &option_lines {
        assert!(opt.contains("type "), "option line missing type: {}", opt);
    }
    assert_eq!(lines.last().map(String::as_str), Some("morrisok"));
}

#[test]
fn unknown_and_empty_lines_are_ignored() {
    let lines = run_engine(&["foobar", "", "  ", "action 99", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn commands_before_newgame_produce_nothing() {
    let lines = run_engine(&["action 0", "undo", "legal", "snapshot", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn newgame_prints_empty_board() {
    let lines = run_engine(&["newgame", "quit"]);
    assert_eq!(
        lines,
        vec![format!("board {} turn cat phase place", ".".repeat(24))]
    );
}

#[test]
fn placing_a_mill_enters_remove_phase() {
    let lines = run_engine(&[
        "setoption name Tokens value 4",
        "newgame",
        "action 0",
        "action 3",
        "action 9",
        "action 4",
        "action 21",
        "quit",
    ]);
    let last = lines.last().unwrap();
    assert!(last.ends_with("turn cat phase remove"), "got {}", last);
    assert_eq!(lines.iter().filter(|l| *l == "ok").count(), 5);
}

#[test]
fn illegal_action_is_reported() {
    let lines = run_engine(&["newgame", "action 5", "action 5", "quit"]);
    assert_eq!(lines[1], "ok");
    assert_eq!(lines[3], "illegal");
    assert_eq!(lines[2], lines[4]);
}

#[test]
fn undo_restores_board_line() {
    let lines = run_engine(&["newgame", "action 5", "undo", "undo", "quit"]);
    assert_eq!(lines[0], lines[3]);
    assert_eq!(lines[3], lines[4]);
}

#[test]
fn snapshot_then_load_reproduces_board() {
    let first = run_engine(&["newgame", "action 0", "action 23", "snapshot", "quit"]);
    let json = first.last().unwrap().clone();
    assert!(json.starts_with('{'));

    let load = format!("load {}", json);
    let second = run_engine(&[&load, "quit"]);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0], first[4]);
}

#[test]
fn victory_is_announced() {
    // Dog is down to three tokens and Cat completes a mill: removing one
    // more leaves Dog with two.
    let mut positions = vec![r#"{}"#.to_string(); 24];
    for i in [0, 1] {
        positions[i] = r#"{"player":0}"#.to_string();
    }
    for i in [21, 22, 20] {
        positions[i] = r#"{"player":1}"#.to_string();
    }
    let json = format!(
        r#"{{"teams":[{{"player":0,"numUnplacedTokens":1,"numAliveTokens":4}},{{"player":1,"numUnplacedTokens":0,"numAliveTokens":3}}],"currentPlayer":0,"positions":[{}],"gamePhase":1}}"#,
        positions.join(",")
    );
    let load = format!("load {}", json);
    let lines = run_engine(&[&load, "action 2", "action 20", "legal", "quit"]);
    assert!(lines.contains(&"victory cat".to_string()), "got {:?}", lines);
    assert_eq!(lines.last().map(String::as_str), Some("legal"));
}

#[test]
fn history_dumps_every_board() {
    let lines = run_engine(&["newgame", "action 1", "action 2", "history", "quit"]);
    let start = lines.iter().position(|l| l.starts_with('{')).unwrap();
    assert_eq!(lines[start..].len(), 4);
    assert_eq!(lines.last().map(String::as_str), Some("historyok"));
}

#[test]
fn saved_history_reloads_with_undo() {
    let path = std::env::temp_dir().join(format!("morris-session-{}.txt", std::process::id()));
    let save = format!("savehistory {}", path.display());
    let first = run_engine(&["newgame", "action 0", "action 23", "action 1", &save, "quit"]);
    assert_eq!(first.last().map(String::as_str), Some("historysaved 4"));

    let load = format!("loadhistory {}", path.display());
    let second = run_engine(&[&load, "undo", "undo", "undo", "undo", "quit"]);
    let stem = path.file_stem().unwrap().to_str().unwrap();
    assert_eq!(second[0], format!("game {}", stem));
    assert_eq!(second[1], first[6]);
    assert_eq!(second[2], first[4]);
    assert_eq!(second[4], first[0]);
    assert_eq!(second[5], first[0]);
    std::fs::remove_file(&path).unwrap();
}
