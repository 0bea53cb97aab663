// chkdomain/tests/cli_integration.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::collections::HashSet;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use tempfile::TempDir;

/// Start a WHOIS server thread answering "No match for" for `available`
/// and a registration record for everything else.
fn start_stub_server(available: &[&str]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let addr = listener.local_addr().unwrap().to_string();
    let available: HashSet<String> = available.iter().map(|s| s.to_string()).collect();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            let available = available.clone();
            thread::spawn(move || {
                let mut reader = BufReader::new(stream);
                let mut line = String::new();
                if reader.read_line(&mut line).is_err() {
                    return;
                }
                let domain = line.trim_end();
                let body = if available.contains(domain) {
                    format!("No match for \"{}\".\r\n", domain.to_uppercase())
                } else {
                    format!("Domain Name: {}\r\nRegistrar: Example\r\n", domain.to_uppercase())
                };
                let _ = reader.get_mut().write_all(body.as_bytes());
            });
        }
    });

    addr
}

/// Address nobody listens on.
fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().to_string()
}

/// The binary with config discovery and `CHKDOMAIN_*` variables pointed
/// away from the developer's machine.
fn chkdomain(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("chkdomain").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("CHKDOMAIN_CONCURRENCY")
        .env_remove("CHKDOMAIN_TIMEOUT")
        .env_remove("CHKDOMAIN_SERVER")
        .env_remove("CHKDOMAIN_DEBUG")
        .env_remove("CHKDOMAIN_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    lines.sort();
    lines
}

#[test]
fn test_no_domains_prints_usage_and_fails() {
    let home = TempDir::new().unwrap();
    chkdomain(home.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"))
        .stderr(predicate::str::contains("no domains to check"));
}

#[test]
fn test_help_succeeds_without_lookups() {
    let home = TempDir::new().unwrap();
    chkdomain(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--debug"))
        .stdout(predicate::str::contains("--concurrency"))
        .stdout(predicate::str::contains("--server"));
}

#[test]
fn test_empty_stdin_fails() {
    let home = TempDir::new().unwrap();
    chkdomain(home.path())
        .arg("-")
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_prints_only_available_domains() {
    let home = TempDir::new().unwrap();
    let server = start_stub_server(&["uqbar.io", "kjczr.com"]);

    let output = chkdomain(home.path())
        .args(["--server", &server])
        .args(["tlon.com", "uqbar.io", "kjczr.com", "google.com"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["kjczr.com", "uqbar.io"]);
}

#[test]
fn test_reads_domains_from_stdin() {
    let home = TempDir::new().unwrap();
    let server = start_stub_server(&["uqbar.io"]);

    chkdomain(home.path())
        .args(["-s", &server, "-"])
        .write_stdin("uqbar.io\ntlon.com  -foo.com\n")
        .assert()
        .success()
        .stdout("uqbar.io\n")
        .stderr(predicate::str::contains("-foo.com: invalid domain: -foo.com"));
}

#[test]
fn test_debug_annotates_every_domain() {
    let home = TempDir::new().unwrap();
    let server = start_stub_server(&["uqbar.io"]);

    chkdomain(home.path())
        .args(["--debug", "--server", &server, "uqbar.io", "tlon.com"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^\[\d+\]\tAVAILABLE\tuqbar\.io$").unwrap())
        .stdout(predicate::str::is_match(r"(?m)^\[\d+\]\tUNAVAILABLE\ttlon\.com$").unwrap());
}

#[test]
fn test_lookup_failures_do_not_change_exit_code() {
    let home = TempDir::new().unwrap();
    let server = closed_port();

    chkdomain(home.path())
        .args(["--server", &server, "tlon.com", "uqbar.io"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("tlon.com: error connecting to"))
        .stderr(predicate::str::contains("uqbar.io: error connecting to"));
}

#[test]
fn test_invalid_concurrency_rejected() {
    let home = TempDir::new().unwrap();
    chkdomain(home.path())
        .args(["-c", "0", "tlon.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("concurrency must be between 1 and 100"));
}

#[test]
fn test_invalid_timeout_rejected() {
    let home = TempDir::new().unwrap();
    chkdomain(home.path())
        .args(["--timeout", "later", "tlon.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid timeout"));
}

#[test]
fn test_local_config_file_is_discovered() {
    let home = TempDir::new().unwrap();
    let server = start_stub_server(&["uqbar.io"]);
    std::fs::write(
        home.path().join("chkdomain.toml"),
        format!("[defaults]\nserver = \"{}\"\ndebug = true\n", server),
    )
    .unwrap();

    chkdomain(home.path())
        .args(["uqbar.io", "tlon.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\tAVAILABLE\tuqbar.io"))
        .stdout(predicate::str::contains("\tUNAVAILABLE\ttlon.com"));
}

#[test]
fn test_env_server_and_cli_precedence() {
    let home = TempDir::new().unwrap();
    let server = start_stub_server(&["uqbar.io"]);

    chkdomain(home.path())
        .env("CHKDOMAIN_SERVER", closed_port())
        .args(["--server", &server, "uqbar.io"])
        .assert()
        .success()
        .stdout("uqbar.io\n");

    chkdomain(home.path())
        .env("CHKDOMAIN_SERVER", &server)
        .arg("uqbar.io")
        .assert()
        .success()
        .stdout("uqbar.io\n");
}

#[test]
fn test_missing_explicit_config_is_fatal() {
    let home = TempDir::new().unwrap();
    chkdomain(home.path())
        .args(["--config", "missing.toml", "tlon.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to load config file 'missing.toml'"));
}

#[test]
fn test_verbose_prints_summary() {
    let home = TempDir::new().unwrap();
    let server = start_stub_server(&["uqbar.io"]);

    chkdomain(home.path())
        .args(["-v", "-s", &server, "uqbar.io", "tlon.com", "no-tld"])
        .assert()
        .success()
        .stdout("uqbar.io\n")
        .stderr(predicate::str::contains(
            "checked 3 domains: 1 available, 1 unavailable, 1 failed",
        ));
}
