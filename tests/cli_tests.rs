use assert_cmd::Command;
use predicates::prelude::*;

// Every test points BIBLIO_DATA_DIR at its own tempdir so nothing leaks
// between tests or into the real user profile. The unreachable-server tests
// use a discard-port URL so they fail fast without a backend running.
const DEAD_SERVER: &str = "http://127.0.0.1:9/api";

fn biblio(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("biblio").unwrap();
    cmd.env("BIBLIO_DATA_DIR", data_dir);
    cmd.env_remove("BIBLIO_API_URL");
    cmd
}

#[test]
fn help_lists_the_catalog_commands() {
    let dir = tempfile::tempdir().unwrap();
    biblio(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("borrow"))
        .stdout(predicates::str::contains("login"));
}

#[test]
fn whoami_reports_anonymous_without_a_session() {
    let dir = tempfile::tempdir().unwrap();
    biblio(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicates::str::contains("Not logged in."));
}

#[test]
fn logout_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();

    biblio(dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicates::str::contains("Logged out."));

    // A second logout from the already-anonymous state behaves identically.
    biblio(dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicates::str::contains("Logged out."));

    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn config_set_then_show_round_trips() {
    let dir = tempfile::tempdir().unwrap();

    biblio(dir.path())
        .args(["config", "api-url", "http://books.local/api"])
        .assert()
        .success()
        .stdout(predicates::str::contains("api-url set to http://books.local/api"));

    biblio(dir.path())
        .args(["config", "api-url"])
        .assert()
        .success()
        .stdout(predicates::str::contains("api-url = http://books.local/api"));
}

#[test]
fn config_rejects_unknown_keys_gracefully() {
    let dir = tempfile::tempdir().unwrap();
    biblio(dir.path())
        .args(["config", "color-scheme", "dark"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Unknown config key: color-scheme"));
}

#[test]
fn list_against_an_unreachable_server_fails_with_an_error() {
    let dir = tempfile::tempdir().unwrap();
    biblio(dir.path())
        .args(["--api-url", DEAD_SERVER, "list"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Error:"));
}

#[test]
fn failed_login_persists_no_session() {
    let dir = tempfile::tempdir().unwrap();
    biblio(dir.path())
        .args(["--api-url", DEAD_SERVER, "login", "alice", "pw"])
        .assert()
        .failure();

    assert!(!dir.path().join("session.json").exists());

    biblio(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicates::str::contains("Not logged in."));
}

#[test]
fn whoami_reads_the_persisted_session() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path()).unwrap();
    std::fs::write(
        dir.path().join("session.json"),
        r#"{"username":"alice","token":"a.b.c"}"#,
    )
    .unwrap();

    biblio(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicates::str::contains("alice"));
}

#[test]
fn corrupt_session_file_restores_as_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("session.json"), "{not json").unwrap();

    biblio(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicates::str::contains("Not logged in."));
}
