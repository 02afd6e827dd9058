#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable
//! End-to-end runs of the `parley` binary.

use std::fs;
use std::net::TcpListener;

use assert_cmd::Command;
use axum::Router;
use axum::http::header;
use axum::routing::post;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use predicates::prelude::*;
use tempfile::TempDir;

/// A catalog whose word chain has exactly one word, so scripts are deterministic.
const TINY_CATALOG: &str = r#"{
  "variants": [
    {
      "name": "Word Chain",
      "description": "Guess the hidden word by guessing letters.",
      "pointsPerUnit": 15,
      "timeLimitSeconds": 3,
      "rules": {
        "kind": "word-chain",
        "maxGuesses": 2,
        "levels": [
          { "name": "Tiny", "category": "Animals", "words": ["CAT"] }
        ]
      }
    }
  ]
}"#;

fn parley() -> Command {
    let mut cmd = Command::cargo_bin("parley").unwrap();
    cmd.env_remove("PARLEY_CATALOG")
        .env_remove("PARLEY_EMOTION_ENDPOINT")
        .env_remove("PARLEY_LOG");
    cmd
}

fn tiny_catalog() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("catalog.json"), TINY_CATALOG).unwrap();
    dir
}

/// Parse `script` output into one JSON value per line.
fn records(output: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// list / show
// ---------------------------------------------------------------------------

#[test]
fn list_shows_builtin_games() {
    parley()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trivia Battle"))
        .stdout(predicate::str::contains("word-chain"))
        .stdout(predicate::str::contains("Emoji Pictionary"))
        .stdout(predicate::str::contains("3 games"));
}

#[test]
fn list_json() {
    let output = parley().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let games = value.as_array().unwrap();
    assert_eq!(games.len(), 3);
    assert_eq!(games[1]["id"], "word-chain");
    assert_eq!(games[1]["requiresLevel"], true);
    assert_eq!(games[1]["maxGuesses"], 6);
    assert!(games[0].get("maxGuesses").is_none());
    assert_eq!(games[2]["timeLimitSeconds"], 45);
}

#[test]
fn list_custom_catalog() {
    let dir = tiny_catalog();
    parley()
        .arg("list")
        .arg("--catalog")
        .arg(dir.path().join("catalog.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("1 games"))
        .stdout(predicate::str::contains("Trivia").not());
}

#[test]
fn invalid_catalog_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, r#"{ "variants": [ { "name": "Broken" } ] }"#).unwrap();
    parley()
        .arg("list")
        .arg("--catalog")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: invalid catalog JSON"));
}

#[test]
fn missing_catalog_fails() {
    parley()
        .args(["list", "--catalog", "/nonexistent/catalog.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read catalog"));
}

#[test]
fn show_word_chain_levels() {
    parley()
        .args(["show", "word-chain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Word Chain"))
        .stdout(predicate::str::contains("max wrong:  6"))
        .stdout(predicate::str::contains("Easy"))
        .stdout(predicate::str::contains("Countries"))
        .stdout(predicate::str::contains("Programming"));
}

#[test]
fn show_accepts_legacy_names() {
    parley()
        .args(["show", "EMOJI_PICTO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("phrases:    4"));
}

#[test]
fn show_unknown_game() {
    parley()
        .args(["show", "chess"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("game not found: \"chess\""));
}

// ---------------------------------------------------------------------------
// play (argument checks only; the terminal UI needs a tty)
// ---------------------------------------------------------------------------

#[test]
fn play_rejects_unknown_level() {
    parley()
        .args(["play", "--variant", "word-chain", "--level", "Impossible"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown level \"Impossible\""));
}

#[test]
fn play_rejects_level_for_trivia() {
    parley()
        .args(["play", "--variant", "trivia", "--level", "Easy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("trivia has no difficulty levels"));
}

#[test]
fn play_level_requires_variant() {
    parley().args(["play", "--level", "Easy"]).assert().failure();
}

// ---------------------------------------------------------------------------
// script
// ---------------------------------------------------------------------------

#[test]
fn script_trivia_perfect_round() {
    let output = parley()
        .arg("script")
        .write_stdin(
            "# all three right\n\
             select trivia\n\
             start\n\
             answer Kotlin\n\
             answer Mars\n\
             answer RM(Kim Namjoon)\n",
        )
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = records(&output.stdout);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0]["line"], 2);
    assert_eq!(lines[0]["snapshot"]["status"], "ready-to-start");
    assert_eq!(lines[1]["reply"]["reply"], "started");
    assert_eq!(lines[1]["snapshot"]["timeRemaining"], 30);

    let last = &lines[4];
    assert_eq!(last["ok"], true);
    assert_eq!(last["reply"]["verdict"], "correct");
    assert_eq!(last["snapshot"]["status"], "over");
    assert_eq!(last["snapshot"]["outcome"], "won");
    assert_eq!(last["snapshot"]["score"], 30);
}

#[test]
fn script_reports_rejected_commands() {
    let output = parley()
        .arg("script")
        .write_stdin("select word-chain\nstart\ndance\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = records(&output.stdout);
    assert_eq!(lines[0]["snapshot"]["status"], "awaiting-level");
    assert_eq!(lines[1]["ok"], false);
    assert_eq!(lines[1]["error"], "please select a level for word-chain");
    assert_eq!(lines[1]["snapshot"]["status"], "awaiting-level");
    assert_eq!(lines[2]["error"], "unknown command: dance");
}

#[test]
fn script_strict_fails_on_rejection() {
    parley()
        .args(["script", "--strict", "-"])
        .write_stdin("start\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 command was rejected"));
}

#[test]
fn script_word_chain_from_file() {
    let dir = tiny_catalog();
    let script = dir.path().join("play.txt");
    fs::write(
        &script,
        "select word-chain\nlevel tiny\nstart\nguess c\nguess z\nguess a\nguess t\ntick\n",
    )
    .unwrap();

    let output = parley()
        .arg("--catalog")
        .arg(dir.path().join("catalog.json"))
        .arg("script")
        .arg(&script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = records(&output.stdout);
    assert_eq!(lines[3]["snapshot"]["view"]["masked"], "C__");
    assert_eq!(lines[4]["reply"]["verdict"], "incorrect");
    assert_eq!(lines[4]["snapshot"]["view"]["guessesLeft"], 1);

    let solved = &lines[6];
    assert_eq!(solved["snapshot"]["outcome"], "won");
    assert_eq!(solved["snapshot"]["score"], 15);
    assert_eq!(solved["snapshot"]["revealedWord"], "CAT");

    // The countdown was cancelled by the win.
    assert_eq!(lines[7]["reply"]["tick"], "stale");
    assert_eq!(lines[7]["snapshot"]["outcome"], "won");
}

#[test]
fn script_timeout_loses() {
    let dir = tiny_catalog();
    let output = parley()
        .arg("--catalog")
        .arg(dir.path().join("catalog.json"))
        .arg("script")
        .write_stdin("select word-chain\nlevel Tiny\nstart\ntick\ntick\ntick\nguess c\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = records(&output.stdout);
    assert_eq!(lines[3]["reply"]["remaining"], 2);
    assert_eq!(lines[5]["reply"]["tick"], "expired");
    assert_eq!(lines[5]["snapshot"]["outcome"], "lost");
    assert_eq!(lines[6]["ok"], false);
}

#[test]
fn script_stops_after_close() {
    let output = parley()
        .arg("script")
        .write_stdin("select trivia\nclose\nstart\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = records(&output.stdout);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["reply"]["reply"], "closed");
}

#[test]
fn script_missing_file() {
    parley()
        .args(["script", "/nonexistent/commands.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

const HAPPY: &str = r#"{"emotions":{"happy":0.75,"sad":0.0,"angry":0.0,"surprised":0.0,"neutral":0.25},"dominantEmotion":"happy","suggestions":["That's wonderful!","Keep spreading that joy!"]}"#;

/// A local emotion service answering every analyze call with `HAPPY`.
///
/// The server lives on its own runtime for as long as the value is held.
struct EmotionService {
    endpoint: String,
    requests: mpsc::UnboundedReceiver<String>,
    _runtime: Runtime,
}

impl EmotionService {
    fn start() -> Self {
        let runtime = Runtime::new().unwrap();
        let (tx, requests) = mpsc::unbounded_channel();
        let router = Router::new().route(
            "/analyze",
            post(move |request: String| {
                let tx = tx.clone();
                async move {
                    tx.send(request).ok();
                    ([(header::CONTENT_TYPE, "application/json")], HAPPY)
                }
            }),
        );
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        runtime.spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        Self {
            endpoint,
            requests,
            _runtime: runtime,
        }
    }
}

#[test]
fn analyze_prints_report() {
    let mut service = EmotionService::start();
    parley()
        .args(["analyze", "I am so happy today!", "--endpoint", &service.endpoint])
        .assert()
        .success()
        .stdout(predicate::str::contains("happy"))
        .stdout(predicate::str::contains("0.75"))
        .stdout(predicate::str::contains("2. Keep spreading that joy!"));
    assert_eq!(
        service.requests.try_recv().unwrap(),
        r#"{"text":"I am so happy today!"}"#
    );
}

#[test]
fn analyze_reply_sends_suggestion() {
    let service = EmotionService::start();
    parley()
        .args(["analyze", "yay", "--endpoint", &service.endpoint, "--reply", "2"])
        .assert()
        .success()
        .stdout(predicate::str::diff("{\"text\":\"Keep spreading that joy!\"}\n"));
}

#[test]
fn analyze_reply_out_of_range() {
    let service = EmotionService::start();
    parley()
        .args(["analyze", "yay", "--endpoint", &service.endpoint, "--reply", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no suggestion #5 (2 available)"));
}

#[test]
fn analyze_unreachable_service() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    parley()
        .args(["analyze", "hello", "--endpoint", &endpoint])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: network error"));
}

#[test]
fn analyze_empty_text() {
    parley()
        .args(["analyze", "   ", "--endpoint", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no message to analyze"));
}
