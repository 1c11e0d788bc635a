//! CLI Integration Tests
//!
//! These tests verify the CLI commands work correctly end-to-end.
//! They test the "wiring" between the CLI and the core library, using a
//! small in-process HTTP server where a backend is needed.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a CLI command with no backend configuration leaking in from the
/// environment
fn cli_cmd() -> Command {
    let mut cmd = Command::cargo_bin("referral").expect("Failed to find referral binary");
    cmd.env_remove("REFERRAL_API_URL")
        .env_remove("REFERRAL_TOKI_ID")
        .env_remove("REFERRAL_MSISDN")
        .env_remove("REFERRAL_TIMEOUT_SECS")
        .env_remove("RUST_LOG");
    cmd
}

/// Minimal backend answering each path with a fixed JSON body
struct Backend {
    url: String,
    paths: Arc<Mutex<Vec<String>>>,
}

impl Backend {
    fn start(routes: HashMap<&'static str, String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        let paths = Arc::new(Mutex::new(Vec::new()));
        let log = paths.clone();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                respond(stream, &routes, &log);
            }
        });

        Self { url, paths }
    }

    fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

/// Answer one request, logging its path before the reply goes out.
fn respond(
    mut stream: TcpStream,
    routes: &HashMap<&'static str, String>,
    log: &Mutex<Vec<String>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let path = head
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .trim_start_matches('/')
        .to_string();
    let (status, body) = match routes.get(path.as_str()) {
        Some(body) => ("200 OK", body.clone()),
        None => ("404 Not Found", "not found".to_string()),
    };
    log.lock().unwrap().push(path);
    let reply = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(reply.as_bytes());
}

fn info_body() -> String {
    json!({
        "result": true,
        "message": "",
        "data": {
            "referrals": [
                {
                    "id": 41,
                    "invitedNumber": "88112233",
                    "status": "SUCCESS",
                    "operatorName": "Unitel",
                    "expireDate": "2026-01-01 00:00:00"
                },
                {
                    "id": 42,
                    "invitedNumber": "99001122",
                    "status": "EXPIRED",
                    "operatorName": "Mobicom",
                    "expireDate": "2026-01-01 00:00:00"
                }
            ],
            "hasActiveEntitlement": false,
            "successReferralsCount": 1
        }
    })
    .to_string()
}

fn backend() -> Backend {
    Backend::start(HashMap::from([
        (
            "login",
            json!({"result": true, "data": {"token": "jwt"}}).to_string(),
        ),
        ("getInfo", info_body()),
        (
            "sendInvitation",
            json!({"result": true, "message": "Урилга илгээлээ"}).to_string(),
        ),
        (
            "deleteInvitation",
            json!({"result": false, "message": "Cannot delete"}).to_string(),
        ),
    ]))
}

fn logged_in(backend: &Backend) -> Command {
    let mut cmd = cli_cmd();
    cmd.args(["--api-url", &backend.url])
        .args(["--toki-id", "toki-1"])
        .args(["--msisdn", "99112233"]);
    cmd
}

// ============================================================================
// Help / Entry
// ============================================================================

#[test]
fn test_help_lists_commands() {
    cli_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("send"))
        .stdout(predicate::str::contains("resend"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_entry_parses_query() {
    cli_cmd()
        .args(["entry", "?tokiId=abc&msisdn=%2B97699112233"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tokiId: abc"))
        .stdout(predicate::str::contains("msisdn: +97699112233"));
}

#[test]
fn test_entry_missing_msisdn_fails() {
    cli_cmd()
        .args(["entry", "tokiId=abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing entry parameter: msisdn"));
}

// ============================================================================
// Entry parameter validation
// ============================================================================

#[test]
fn test_missing_toki_id_fails_without_network() {
    let backend = backend();

    cli_cmd()
        .args(["--api-url", &backend.url, "--msisdn", "99112233", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing entry parameter: tokiId"));

    assert!(backend.paths().is_empty());
}

#[test]
fn test_entry_params_from_env() {
    let backend = backend();

    cli_cmd()
        .env("REFERRAL_API_URL", &backend.url)
        .env("REFERRAL_TOKI_ID", "toki-1")
        .env("REFERRAL_MSISDN", "99112233")
        .arg("info")
        .assert()
        .success();
}

#[test]
fn test_invalid_api_url_is_rejected() {
    cli_cmd()
        .args(["--api-url", "ftp://example.com", "--toki-id", "a", "--msisdn", "1", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_unreachable_backend_reports_authentication_failure() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    cli_cmd()
        .args(["--api-url", &format!("http://127.0.0.1:{port}/")])
        .args(["--toki-id", "a", "--msisdn", "1", "--timeout-secs", "5", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));
}

// ============================================================================
// Commands against a backend
// ============================================================================

#[test]
fn test_info_prints_five_slots() {
    let backend = backend();

    let output = logged_in(&backend).arg("info").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("Entitlement: inactive (1 joined)"));
    assert!(stdout.contains("joined"));
    assert!(stdout.contains("Mobicom"));
    assert_eq!(stdout.matches("invite").count(), 3);
    assert_eq!(backend.paths(), vec!["login", "getInfo"]);
}

#[test]
fn test_send_strips_non_digits_and_refreshes() {
    let backend = backend();

    logged_in(&backend)
        .args(["send", "8800-11 22"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Урилга илгээлээ"));

    assert_eq!(
        backend.paths(),
        vec!["login", "getInfo", "sendInvitation", "getInfo"]
    );
}

#[test]
fn test_send_without_digits_makes_no_request() {
    let backend = backend();

    logged_in(&backend)
        .args(["send", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Phone number is empty"));

    assert_eq!(backend.paths(), vec!["login", "getInfo"]);
}

#[test]
fn test_resend_unknown_id_fails() {
    let backend = backend();

    logged_in(&backend)
        .args(["resend", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invitation not found: 999"));

    assert!(!backend.paths().contains(&"resendInvitation".to_string()));
}

#[test]
fn test_delete_rejection_is_reported() {
    let backend = backend();

    logged_in(&backend)
        .args(["delete", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot delete"));
}

#[test]
fn test_watch_stops_after_ticks() {
    let backend = backend();

    logged_in(&backend)
        .args(["watch", "--ticks", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STATUS"));
}
