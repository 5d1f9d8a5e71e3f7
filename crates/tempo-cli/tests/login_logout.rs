//! Integration tests for register/login/logout commands.


use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{can_bind_localhost, seed_token, temp_tempo_home, write_config};
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_stores_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_tempo_home();
    let server = MockServer::start().await;
    write_config(home.path(), &server);

    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "T1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("tempo")
        .env("TEMPO_HOME", home.path())
        .args(["login", "--email", "a@b.com", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as a@b.com"));

    let token_path = home.path().join("token.json");
    assert!(token_path.exists(), "token.json should exist");
    let contents = fs::read_to_string(&token_path).unwrap();
    assert!(contents.contains("T1"), "token should be in token.json");
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_tempo_home();
    let server = MockServer::start().await;
    write_config(home.path(), &server);

    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "invalid credentials"
        })))
        .mount(&server)
        .await;

    cargo_bin_cmd!("tempo")
        .env("TEMPO_HOME", home.path())
        .args(["login", "--email", "a@b.com", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid credentials"));

    assert!(!home.path().join("token.json").exists());
}

#[tokio::test]
async fn test_register_chains_into_login() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_tempo_home();
    let server = MockServer::start().await;
    write_config(home.path(), &server);

    Mock::given(method("POST"))
        .and(path("/users/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "T-new"
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("tempo")
        .env("TEMPO_HOME", home.path())
        .args([
            "register",
            "--username",
            "ana",
            "--email",
            "a@b.com",
            "--password",
            "pw",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered and logged in as a@b.com"));

    let contents = fs::read_to_string(home.path().join("token.json")).unwrap();
    assert!(contents.contains("T-new"));
}

#[tokio::test]
async fn test_register_failure_never_attempts_login() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_tempo_home();
    let server = MockServer::start().await;
    write_config(home.path(), &server);

    Mock::given(method("POST"))
        .and(path("/users/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "message": "email already registered"
        })))
        .expect(1)
        .mount(&server)
        .await;
    // The chained login must be short-circuited.
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "T1"
        })))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("tempo")
        .env("TEMPO_HOME", home.path())
        .args([
            "register",
            "--username",
            "ana",
            "--email",
            "a@b.com",
            "--password",
            "pw",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("email already registered"));

    assert!(!home.path().join("token.json").exists());
}

#[test]
fn test_logout_when_not_logged_in() {
    let home = temp_tempo_home();

    cargo_bin_cmd!("tempo")
        .env("TEMPO_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_logout_removes_token_file() {
    let home = temp_tempo_home();
    seed_token(home.path(), "T1");

    cargo_bin_cmd!("tempo")
        .env("TEMPO_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    assert!(!home.path().join("token.json").exists());
}
