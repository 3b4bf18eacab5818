use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::tempdir;

fn invoke(storage: &Path, vars: &[(&str, &str)], stdin: &str) -> String {
    let mut cmd = Command::cargo_bin("patrick-db-cgi").unwrap();
    cmd.env_clear()
        .env("STORAGE_DIR", storage)
        .env("RUST_LOG", "off")
        .write_stdin(stdin);
    for (key, value) in vars {
        cmd.env(key, value);
    }

    let output = cmd.output().expect("run patrick-db-cgi");
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn get_root_is_framed_as_cgi_response() {
    let tmp = tempdir().unwrap();
    let stdout = invoke(&tmp.path().join("storage"), &[("REQUEST_METHOD", "GET")], "");

    assert_eq!(
        stdout,
        "Status: 200 OK\r\n\
         Content-Type: text/plain; charset=utf-8\r\n\
         Content-Length: 34\r\n\
         \r\n\
         Welcome to the Go CGI application!"
    );
}

#[test]
fn post_stores_value_under_storage_dir() {
    let tmp = tempdir().unwrap();
    let storage = tmp.path().join("storage");
    let stdout = invoke(
        &storage,
        &[
            ("REQUEST_METHOD", "POST"),
            ("PATH_INFO", "/k1"),
            ("CONTENT_LENGTH", "7"),
            ("CONTENT_TYPE", "text/plain"),
        ],
        " hello ",
    );

    assert!(stdout.starts_with("Status: 201 Created\r\n"), "{}", stdout);
    assert!(stdout.ends_with("\r\n\r\nBytes received: 7\nStored key: k1"), "{}", stdout);
    assert_eq!(fs::read_to_string(storage.join("k1")).unwrap(), "hello");

    let stdout = invoke(&storage, &[("REQUEST_METHOD", "GET"), ("PATH_INFO", "/k1")], "");
    assert!(stdout.starts_with("Status: 200 OK\r\n"), "{}", stdout);
    assert!(stdout.contains("Content-Length: 5\r\n"), "{}", stdout);
    assert!(stdout.ends_with("\r\n\r\nhello"), "{}", stdout);
}

#[test]
fn error_outcomes_are_still_framed() {
    let tmp = tempdir().unwrap();
    let storage = tmp.path().join("storage");

    let stdout = invoke(&storage, &[("REQUEST_METHOD", "POST"), ("PATH_INFO", "/k1")], "hello");
    assert!(stdout.starts_with("Status: 411 Length Required\r\n"), "{}", stdout);
    assert!(stdout.ends_with("\r\n\r\nLength Required"), "{}", stdout);

    let stdout = invoke(&storage, &[("REQUEST_METHOD", "DELETE"), ("PATH_INFO", "/k1")], "");
    assert!(stdout.starts_with("Status: 405 Method Not Allowed\r\n"), "{}", stdout);

    let stdout = invoke(&storage, &[("REQUEST_METHOD", "GET"), ("PATH_INFO", "/nope")], "");
    assert!(stdout.starts_with("Status: 404 Not Found\r\n"), "{}", stdout);
}

#[test]
fn truncated_body_is_rejected() {
    let tmp = tempdir().unwrap();
    let storage = tmp.path().join("storage");
    let stdout = invoke(
        &storage,
        &[("REQUEST_METHOD", "POST"), ("PATH_INFO", "/k1"), ("CONTENT_LENGTH", "50")],
        "short",
    );

    assert!(stdout.starts_with("Status: 400 Bad Request\r\n"), "{}", stdout);
    assert!(stdout.ends_with("incomplete body: got 5, expected 50"), "{}", stdout);
    assert!(!storage.join("k1").exists());
}

#[test]
fn stray_arguments_do_not_corrupt_the_response() {
    let tmp = tempdir().unwrap();
    let output = Command::cargo_bin("patrick-db-cgi")
        .unwrap()
        .env_clear()
        .env("STORAGE_DIR", tmp.path())
        .env("RUST_LOG", "off")
        .env("REQUEST_METHOD", "GET")
        .arg("search")
        .arg("words")
        .output()
        .expect("run patrick-db-cgi");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Status: 200 OK\r\n"));
}
