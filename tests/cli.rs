//
//  chatbridge
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Command-line smoke tests.

use std::io::Write;

use assert_cmd::Command;
use mockito::{Matcher, Server, ServerGuard};
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

/// A `chatbridge` command isolated from the caller's environment and config.
fn chatbridge(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chatbridge").unwrap();
    cmd.env_remove("CHATBRIDGE_API_TOKEN")
        .env_remove("CHATBRIDGE_BASE_URL")
        .env_remove("CHATBRIDGE_LOG")
        .env("CHATBRIDGE_CONFIG", config_dir.path().join("config.toml"))
        .env("NO_COLOR", "1");
    cmd
}

fn against(server: &ServerGuard, config_dir: &TempDir) -> Command {
    let mut cmd = chatbridge(config_dir);
    cmd.env("CHATBRIDGE_API_TOKEN", "cli-token")
        .env("CHATBRIDGE_BASE_URL", server.url());
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    chatbridge(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("contacts"))
        .stdout(predicate::str::contains("whatsapp"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    chatbridge(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_token_exits_with_auth_code() {
    let dir = TempDir::new().unwrap();
    chatbridge(&dir)
        .args(["contacts", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No API token"));
}

#[test]
fn test_contacts_list_json() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/contacts")
        .match_header("authorization", "Bearer cli-token")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(r#"{"success":true,"data":[{"id":1,"name":"John Doe"}]}"#)
        .create();

    let assert = against(&server, &dir)
        .args(["--json", "contacts", "list", "-q", "page=1"])
        .assert()
        .success();

    let stdout: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(stdout, json!([{"id": 1, "name": "John Doe"}]));
    mock.assert();
}

#[test]
fn test_not_found_exits_with_not_found_code() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/campaigns/404")
        .with_status(404)
        .with_body(r#"{"message":"Campaign not found"}"#)
        .create();

    against(&server, &dir)
        .args(["campaigns", "get", "404"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("Campaign not found"));
}

#[test]
fn test_validation_error_lists_fields() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("POST", "/audiences")
        .with_status(422)
        .with_body(r#"{"message":"The given data was invalid.","errors":{"name":["The name field is required."]}}"#)
        .create();

    against(&server, &dir)
        .args(["audiences", "create", "-F", "tag=vip"])
        .assert()
        .code(9)
        .stderr(predicate::str::contains("name: The name field is required."));
}

#[test]
fn test_send_template_builds_parameters() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/whatsapp/u-1/send-template")
        .match_body(Matcher::Json(json!({
            "to": "6281234567890",
            "template_id": 5,
            "parameters": {"name": "John Doe", "order_id": "ORD-12345"}
        })))
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"message_quota_remaining":7}}"#)
        .create();

    against(&server, &dir)
        .args([
            "whatsapp",
            "send-template",
            "u-1",
            "--to",
            "6281234567890",
            "--template-id",
            "5",
            "-P",
            "name=John Doe",
            "-P",
            "order_id=ORD-12345",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quota remaining: 7"));
    mock.assert();
}

#[test]
fn test_import_counts_outcomes() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("contacts.csv");
    let mut csv = std::fs::File::create(&csv_path).unwrap();
    writeln!(csv, "Name,Phone,Email,Company,Position").unwrap();
    writeln!(csv, "John Doe,6281234567890,john@example.com,PT Example,Manager").unwrap();
    writeln!(csv, "Jane Smith,6287654321098,jane@example.com,PT Demo,Director").unwrap();
    writeln!(csv, "No Phone,,nobody@example.com,,").unwrap();
    drop(csv);

    let mut server = Server::new();
    server
        .mock("POST", "/contacts")
        .match_body(Matcher::PartialJson(json!({"phone": "6281234567890"})))
        .with_status(201)
        .with_body(r#"{"success":true,"data":{"id":1,"name":"John Doe","phone":"6281234567890"}}"#)
        .create();
    server
        .mock("POST", "/contacts")
        .match_body(Matcher::PartialJson(json!({"phone": "6287654321098"})))
        .with_status(422)
        .with_body(r#"{"message":"Contact with this phone already exists","errors":{}}"#)
        .create();

    let assert = against(&server, &dir)
        .args(["--json", "import"])
        .arg(&csv_path)
        .args(["--delay-ms", "0"])
        .assert()
        .success();

    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["created"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["duplicates"], json!(["6287654321098"]));
    assert_eq!(report["failed"], json!([]));
    assert_eq!(report["skipped"], json!(1));
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();

    chatbridge(&dir)
        .args(["config", "set", "timeout", "45"])
        .assert()
        .success();

    chatbridge(&dir)
        .args(["config", "get", "timeout"])
        .assert()
        .success()
        .stdout("45\n");

    chatbridge(&dir)
        .args(["config", "set", "timeout", "soon"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("timeout"));
}

#[test]
fn test_import_retries_server_errors_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "max_retries = 2\nretry_delay = 10\n",
    )
    .unwrap();

    let csv_path = dir.path().join("contacts.csv");
    std::fs::write(
        &csv_path,
        "Name,Phone,Email,Company,Position\nJohn Doe,6281234567890,john@example.com,PT Example,Manager\n",
    )
    .unwrap();

    let mut server = Server::new();
    let unavailable = server
        .mock("POST", "/contacts")
        .with_status(503)
        .with_body(r#"{"message":"Service Unavailable"}"#)
        .expect(1)
        .create();
    let created = server
        .mock("POST", "/contacts")
        .with_status(201)
        .with_body(r#"{"success":true,"data":{"id":1,"name":"John Doe","phone":"6281234567890"}}"#)
        .expect(1)
        .create();

    let assert = against(&server, &dir)
        .args(["--json", "import"])
        .arg(&csv_path)
        .args(["--delay-ms", "0"])
        .assert()
        .success();

    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["created"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["failed"], json!([]));
    unavailable.assert();
    created.assert();
}

#[test]
fn test_debug_in_config_file_logs_wire_traffic() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "debug = true\n").unwrap();

    let mut server = Server::new();
    server
        .mock("GET", "/contacts")
        .with_status(200)
        .with_body(r#"{"success":true,"data":[]}"#)
        .create();

    against(&server, &dir)
        .args(["--json", "contacts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains("> request"))
        .stderr(predicate::str::contains("< response"))
        .stderr(predicate::str::contains("Bearer ***"))
        .stderr(predicate::str::contains("cli-token").not());
}

#[test]
fn test_wire_traffic_is_quiet_without_debug() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/contacts")
        .with_status(200)
        .with_body(r#"{"success":true,"data":[]}"#)
        .create();

    against(&server, &dir)
        .args(["--json", "contacts", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("> request").not());
}

#[test]
fn test_table_view_accepts_numeric_phone_and_string_id() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/contacts")
        .with_status(200)
        .with_body(r#"{"success":true,"data":[{"id":"12","name":"John Doe","phone":6281234567890}]}"#)
        .create();

    against(&server, &dir)
        .args(["contacts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6281234567890"))
        .stdout(predicate::str::contains("12"));
}

#[test]
fn test_whatsapp_table_views_decode_instances() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/whatsapp")
        .with_status(200)
        .with_body(
            r#"{"data":[{"instance_uuid":"u-1","status":"connected","logged_number":628111}]}"#,
        )
        .create();
    server
        .mock("GET", "/whatsapp/u-2")
        .with_status(200)
        .with_body(r#"{"data":{"instance_uuid":"u-2","status":"disconnected"}}"#)
        .create();

    against(&server, &dir)
        .args(["whatsapp", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("u-1"))
        .stdout(predicate::str::contains("628111"));

    against(&server, &dir)
        .args(["whatsapp", "get", "u-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Instance u-2"));
}
