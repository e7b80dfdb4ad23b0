use assert_cmd::Command;
use predicates::prelude::*;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::tempdir;

const LIBRARIES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MediaContainer size="2">
  <Directory key="1" type="show" title="TV Shows"/>
  <Directory key="2" type="movie" title="Movies"/>
</MediaContainer>"#;

const WATCHED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MediaContainer size="3">
  <Video ratingKey="100" grandparentTitle="Foo" parentIndex="1" index="1" viewCount="1" lastViewedAt="1700000000"/>
  <Video ratingKey="101" grandparentTitle="Foo" parentIndex="1" index="2" viewCount="3"/>
  <Video ratingKey="102" grandparentTitle="Foo" parentIndex="1" index="3"/>
</MediaContainer>"#;

/// Minimal stand-in for a media server, answering one request per connection
struct FakePlex {
    port: u16,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakePlex {
    fn start(delete_status: u16) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, delete_status, &log);
            }
        });

        Self { port, requests }
    }

    fn port(&self) -> String {
        self.port.to_string()
    }

    fn deletes(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.starts_with("DELETE "))
            .cloned()
            .collect()
    }
}

fn handle(stream: TcpStream, delete_status: u16, log: &Mutex<Vec<String>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header) {
            Ok(0) | Err(_) => break,
            Ok(_) if header == "\r\n" || header == "\n" => break,
            Ok(_) => {}
        }
    }

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default();
    let path = target.split('?').next().unwrap_or_default().to_string();
    let has_token = target.contains("X-Plex-Token=secret");

    log.lock().unwrap().push(format!("{} {}", method, path));

    let (status, body) = if !has_token {
        (401, String::new())
    } else {
        match (method.as_str(), path.as_str()) {
            ("GET", "/library/sections") => (200, LIBRARIES_XML.to_string()),
            ("GET", "/library/sections/1/all") => (200, WATCHED_XML.to_string()),
            ("DELETE", p) if p.starts_with("/library/metadata/") => (delete_status, String::new()),
            _ => (404, String::new()),
        }
    };

    let response = format!(
        "HTTP/1.1 {} Status\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let mut stream = stream;
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn plex_delete(port: &str, config: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("plex-delete").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("PLEX_TOKEN")
        .args(["--server", "127.0.0.1", "--port", port, "--token", "secret"])
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("plex-delete")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plex libraries"))
        .stdout(predicate::str::contains("--delete-watched"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("plex-delete")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_token() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("plex-delete")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("PLEX_TOKEN")
        .arg("--list-libraries")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--token"));
}

#[test]
fn test_no_mode_prints_usage() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    plex_delete("1", &config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));

    assert!(!config.exists());
}

#[test]
fn test_two_modes_prints_usage() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    plex_delete("1", &config)
        .args(["--list-libraries", "--delete-watched"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_malformed_config_is_fatal() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, "{ not json").unwrap();

    plex_delete("1", &config)
        .arg("--list-libraries")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_unreachable_server() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    // Bind and drop to get a port nothing listens on
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port().to_string()
    };

    plex_delete(&port, &config)
        .arg("--list-libraries")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Could not reach the server"));
}

#[test]
fn test_list_libraries() {
    let dir = tempdir().unwrap();
    let server = FakePlex::start(200);

    plex_delete(&server.port(), &dir.path().join("config.json"))
        .arg("--list-libraries")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plex Libraries:"))
        .stdout(predicate::str::contains("1) TV Shows"))
        .stdout(predicate::str::contains("2) Movies"));
}

#[test]
fn test_list_watched() {
    let dir = tempdir().unwrap();
    let server = FakePlex::start(200);

    plex_delete(&server.port(), &dir.path().join("config.json"))
        .arg("--list-watched")
        .assert()
        .success()
        .stdout(predicate::str::contains("Watched in Library: 1"))
        .stdout(predicate::str::contains("- Foo: S1,E1 (watched 2023-11-14)"))
        .stdout(predicate::str::contains("- Foo: S1,E2"))
        .stdout(predicate::str::contains("S1,E3").not());
}

#[test]
fn test_unknown_library() {
    let dir = tempdir().unwrap();
    let server = FakePlex::start(200);

    plex_delete(&server.port(), &dir.path().join("config.json"))
        .args(["--list-watched", "--target-library", "9"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("404"));
}

#[test]
fn test_delete_watched_remove_all() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let server = FakePlex::start(200);

    plex_delete(&server.port(), &config)
        .arg("--delete-watched")
        .write_stdin("r\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Show: Foo"))
        .stdout(predicate::str::contains("(r)emove all 2 watched files from Foo"))
        .stdout(predicate::str::contains(" - Removing \"Foo\" S1,E1..."))
        .stdout(predicate::str::contains(" - Removing \"Foo\" S1,E2..."));

    assert_eq!(
        server.deletes(),
        vec!["DELETE /library/metadata/100", "DELETE /library/metadata/101"]
    );
    assert!(!config.exists());
}

#[test]
fn test_delete_watched_always_delete_persists() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let server = FakePlex::start(200);

    plex_delete(&server.port(), &config)
        .arg("--delete-watched")
        .write_stdin("a\n")
        .assert()
        .success();

    assert_eq!(server.deletes().len(), 2);
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved["always_delete"], serde_json::json!(["Foo"]));
    assert_eq!(saved["always_ignore"], serde_json::json!([]));
}

#[test]
fn test_delete_watched_respects_always_ignore() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"always_ignore": ["Foo"]}"#).unwrap();
    let server = FakePlex::start(200);

    plex_delete(&server.port(), &config)
        .arg("--delete-watched")
        .assert()
        .success()
        .stdout(predicate::str::contains("In always ignore list, skipping"));

    assert!(server.deletes().is_empty());
}

#[test]
fn test_delete_watched_quit() {
    let dir = tempdir().unwrap();
    let server = FakePlex::start(200);

    plex_delete(&server.port(), &dir.path().join("config.json"))
        .arg("--delete-watched")
        .write_stdin("q\n")
        .assert()
        .success();

    assert!(server.deletes().is_empty());
}

#[test]
fn test_delete_watched_closed_stdin() {
    let dir = tempdir().unwrap();
    let server = FakePlex::start(200);

    plex_delete(&server.port(), &dir.path().join("config.json"))
        .arg("--delete-watched")
        .write_stdin("")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("--force"));

    assert!(server.deletes().is_empty());
}

#[test]
fn test_force_with_deletion_disabled() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let server = FakePlex::start(403);

    plex_delete(&server.port(), &config)
        .args(["--delete-watched", "--force"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Client delete disabled on Plex server"));

    // Halted on the first refusal
    assert_eq!(server.deletes(), vec!["DELETE /library/metadata/100"]);
    assert!(!config.exists());
}

#[test]
fn test_force_deletes_without_prompting() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"always_ignore": ["Foo"]}"#).unwrap();
    let server = FakePlex::start(200);

    plex_delete(&server.port(), &config)
        .args(["--delete-watched", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would you like").not());

    assert_eq!(server.deletes().len(), 2);
    assert_eq!(
        std::fs::read_to_string(&config).unwrap(),
        r#"{"always_ignore": ["Foo"]}"#
    );
}
