use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::process::Command;

use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::json;

fn ihub(server: &MockServer, session: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ihub"));
    cmd.env("IHUB_API_BASE_URL", server.base_url())
        .env("IHUB_SESSION_FILE", session)
        .env_remove("IHUB_EMAIL")
        .env_remove("IHUB_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn login_persists_private_session_and_logout_forgets_it() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/login")
            .json_body(json!({"email": "ana@example.com", "password": "s3cret"}));
        then.status(200)
            .json_body(json!({"token": "tok-42", "type": "Bearer"}));
    });
    let me = server.mock(|when, then| {
        when.method(GET)
            .path("/api/permission")
            .header("authorization", "Bearer tok-42");
        then.status(200).json_body(json!({
            "userId": 3,
            "userName": "Ana",
            "userEmail": "ana@example.com",
            "permissions": ["api-manager"]
        }));
    });

    let dir = tempfile::tempdir().expect("tempdir");
    let session = dir.path().join("ihub").join("session.toml");

    let output = ihub(&server, &session)
        .args(["login", "--email", "ana@example.com"])
        .env("IHUB_PASSWORD", "s3cret")
        .output()
        .expect("run login");
    assert!(
        output.status.success(),
        "login should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "logged in as Ana <ana@example.com>"
    );
    login.assert();
    me.assert();

    let mode = fs::metadata(&session).expect("session file").permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    let raw = fs::read_to_string(&session).expect("read session");
    assert!(raw.contains("tok-42"));

    let output = ihub(&server, &session)
        .args(["whoami"])
        .output()
        .expect("run whoami");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("email: ana@example.com"), "{stdout}");
    assert_eq!(me.hits(), 1, "whoami should use the cached user");

    let output = ihub(&server, &session)
        .args(["logout"])
        .output()
        .expect("run logout");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "logged out");
    let raw = fs::read_to_string(&session).expect("read session");
    assert!(!raw.contains("tok-42"));
}

#[test]
fn rejected_login_stores_nothing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(401).body("bad credentials");
    });

    let dir = tempfile::tempdir().expect("tempdir");
    let session = dir.path().join("session.toml");

    let output = ihub(&server, &session)
        .args(["login", "--email", "ana@example.com", "--password", "wrong"])
        .output()
        .expect("run login");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: invalid credentials"), "{stderr}");
    assert!(!session.exists());
}

#[test]
fn expired_token_gets_login_hint() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/owner");
        then.status(401);
    });

    let dir = tempfile::tempdir().expect("tempdir");
    let session = dir.path().join("session.toml");
    fs::write(&session, "[entries]\nauth_token = \"stale\"\n").expect("write session");
    fs::set_permissions(&session, fs::Permissions::from_mode(0o600)).expect("chmod");

    let output = ihub(&server, &session)
        .args(["owners", "list"])
        .output()
        .expect("run owners list");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("list owners failed with status 401"), "{stderr}");
    assert!(stderr.contains("hint: run `ihub login`"), "{stderr}");
}

#[test]
fn prints_binary_name_and_version() {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("ihub"))
        .arg("--version")
        .output()
        .expect("run --version");

    assert!(output.status.success(), "--version should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("ihub {}", env!("CARGO_PKG_VERSION"))
    );
}
