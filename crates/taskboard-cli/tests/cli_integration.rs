use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// A `taskboard` command pointed at a local backend inside `dir`.
fn taskboard(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("taskboard").unwrap();
    cmd.env("TASKBOARD_BACKEND", "local")
        .env("TASKBOARD_CONFIG", dir.join("config.toml"))
        .env("TASKBOARD_DATA_FILE", dir.join("local.json"))
        .env("TASKBOARD_STATE_FILE", dir.join("state.json"))
        .env_remove("TASKBOARD_DEBUG_LOG")
        .env_remove("TASKBOARD_PASSWORD");
    cmd
}

fn run_ok(dir: &Path, args: &[&str]) -> Value {
    let output = taskboard(dir)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value =
        serde_json::from_str(&String::from_utf8_lossy(&output)).expect("Failed to parse JSON output");
    assert!(json["success"].as_bool().unwrap());
    json
}

fn signed_in() -> TempDir {
    let dir = tempdir().unwrap();
    run_ok(
        dir.path(),
        &[
            "signup",
            "--full-name",
            "Asha Rao",
            "--email",
            "asha@example.com",
            "--password",
            "secret1",
        ],
    );
    run_ok(
        dir.path(),
        &["login", "--email", "asha@example.com", "--password", "secret1"],
    );
    dir
}

fn create(dir: &Path, title: &str, notes: &str, priority: &str) -> String {
    let json = run_ok(
        dir,
        &[
            "task",
            "create",
            "--title",
            title,
            "--notes",
            notes,
            "--priority",
            priority,
        ],
    );
    json["data"]["id"].as_str().unwrap().to_string()
}

mod auth_tests {
    use super::*;

    #[test]
    fn test_signup_points_to_login() {
        let dir = tempdir().unwrap();
        let json = run_ok(
            dir.path(),
            &[
                "signup",
                "--full-name",
                "Asha Rao",
                "--email",
                "asha@example.com",
                "--password",
                "secret1",
            ],
        );
        assert_eq!(json["data"]["status"], "registered");
        assert_eq!(json["data"]["next"], "/login");
    }

    #[test]
    fn test_signup_with_blank_name_fails() {
        let dir = tempdir().unwrap();
        taskboard(dir.path())
            .args([
                "signup",
                "--full-name",
                " ",
                "--email",
                "asha@example.com",
                "--password",
                "secret1",
            ])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("All fields are required"));
    }

    #[test]
    fn test_duplicate_signup_is_reported() {
        let dir = signed_in();
        taskboard(dir.path())
            .args([
                "signup",
                "--full-name",
                "Someone Else",
                "--email",
                "asha@example.com",
                "--password",
                "another1",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("This email is already registered"));
    }

    #[test]
    fn test_login_with_wrong_password() {
        let dir = signed_in();
        taskboard(dir.path())
            .args(["login", "--email", "asha@example.com", "--password", "nope123"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid email or password"));
    }

    #[test]
    fn test_whoami_shows_profile() {
        let dir = signed_in();
        let json = run_ok(dir.path(), &["whoami"]);
        assert_eq!(json["data"]["email"], "asha@example.com");
        assert_eq!(json["data"]["full_name"], "Asha Rao");
        assert_eq!(json["data"]["initials"], "AR");
    }

    #[test]
    fn test_logout_forgets_session() {
        let dir = signed_in();
        let json = run_ok(dir.path(), &["logout"]);
        assert_eq!(json["data"]["signed_out"], true);

        taskboard(dir.path())
            .args(["task", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not signed in"));
    }
}

mod task_tests {
    use super::*;

    #[test]
    fn test_task_requires_login() {
        let dir = tempdir().unwrap();
        taskboard(dir.path())
            .args(["task", "list"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("\"success\":false"));
    }

    #[test]
    fn test_create_lands_in_todo() {
        let dir = signed_in();
        let json = run_ok(
            dir.path(),
            &[
                "task",
                "create",
                "--title",
                "Buy milk",
                "--notes",
                "2%",
                "--priority",
                "low",
            ],
        );
        assert_eq!(json["data"]["title"], "Buy milk");
        assert_eq!(json["data"]["status"], "todo");
        assert_eq!(json["data"]["priority"], "low");
        assert!(json["data"]["created_display"].is_string());

        let list = run_ok(dir.path(), &["task", "list"]);
        assert_eq!(list["data"]["count"], 1);
    }

    #[test]
    fn test_create_with_blank_notes_fails() {
        let dir = signed_in();
        taskboard(dir.path())
            .args(["task", "create", "--title", "Buy milk", "--notes", "  "])
            .assert()
            .failure()
            .stderr(predicate::str::contains("All fields are required"));

        let list = run_ok(dir.path(), &["task", "list"]);
        assert_eq!(list["data"]["count"], 0);
    }

    #[test]
    fn test_newest_first() {
        let dir = signed_in();
        create(dir.path(), "First", "one", "low");
        create(dir.path(), "Second", "two", "high");

        let list = run_ok(dir.path(), &["task", "list"]);
        assert_eq!(list["data"]["items"][0]["title"], "Second");
        assert_eq!(list["data"]["items"][1]["title"], "First");
    }

    #[test]
    fn test_move_to_completed() {
        let dir = signed_in();
        let id = create(dir.path(), "Write report", "Quarterly", "high");

        let json = run_ok(
            dir.path(),
            &["task", "move", "--id", &id, "--status", "completed"],
        );
        assert_eq!(json["data"]["status"], "completed");
        assert!(json["data"]["updated_at"].is_string());

        let done = run_ok(dir.path(), &["task", "list", "--status", "completed"]);
        assert_eq!(done["data"]["count"], 1);
        let todo = run_ok(dir.path(), &["task", "list", "--status", "todo"]);
        assert_eq!(todo["data"]["count"], 0);
    }

    #[test]
    fn test_status_change() {
        let dir = signed_in();
        let id = create(dir.path(), "Write report", "Quarterly", "high");

        let json = run_ok(
            dir.path(),
            &["task", "status", "--id", &id, "--status", "in-progress"],
        );
        assert_eq!(json["data"]["status"], "in-progress");
    }

    #[test]
    fn test_edit_keeps_unspecified_fields() {
        let dir = signed_in();
        let id = create(dir.path(), "Write report", "Quarterly", "high");

        let json = run_ok(
            dir.path(),
            &["task", "edit", "--id", &id, "--title", "Write summary"],
        );
        assert_eq!(json["data"]["title"], "Write summary");
        assert_eq!(json["data"]["notes"], "Quarterly");
        assert_eq!(json["data"]["priority"], "high");
    }

    #[test]
    fn test_edit_with_blank_notes_leaves_task_unchanged() {
        let dir = signed_in();
        let id = create(dir.path(), "Write report", "Quarterly", "high");

        taskboard(dir.path())
            .args(["task", "edit", "--id", &id, "--notes", ""])
            .assert()
            .failure();

        let json = run_ok(dir.path(), &["task", "get", "--id", &id]);
        assert_eq!(json["data"]["notes"], "Quarterly");
    }

    #[test]
    fn test_search_and_priority_filters() {
        let dir = signed_in();
        create(dir.path(), "Buy milk", "2%", "low");
        create(dir.path(), "Walk dog", "Around the park", "high");

        let json = run_ok(dir.path(), &["task", "list", "--search", "MILK"]);
        assert_eq!(json["data"]["count"], 1);
        assert_eq!(json["data"]["items"][0]["title"], "Buy milk");

        let json = run_ok(dir.path(), &["task", "list", "--priority", "high"]);
        assert_eq!(json["data"]["count"], 1);
        assert_eq!(json["data"]["items"][0]["title"], "Walk dog");
    }

    #[test]
    fn test_invalid_date_filter() {
        let dir = signed_in();
        taskboard(dir.path())
            .args(["task", "list", "--date", "tomorrow"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_deleted_task_stays_deleted() {
        let dir = signed_in();
        let id = create(dir.path(), "Temporary", "Remove me", "medium");

        let json = run_ok(dir.path(), &["task", "delete", "--id", &id]);
        assert_eq!(json["data"]["deleted"], id.as_str());

        let list = run_ok(dir.path(), &["task", "list"]);
        assert_eq!(list["data"]["count"], 0);

        taskboard(dir.path())
            .args(["task", "get", "--id", &id])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not found").or(predicate::str::contains("task")));
    }
}

mod lang_tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        let dir = tempdir().unwrap();
        let json = run_ok(dir.path(), &["lang", "get"]);
        assert_eq!(json["data"]["code"], "en");
    }

    #[test]
    fn test_set_persists() {
        let dir = tempdir().unwrap();
        run_ok(dir.path(), &["lang", "set", "hi"]);
        let json = run_ok(dir.path(), &["lang", "get"]);
        assert_eq!(json["data"]["code"], "hi");
    }

    #[test]
    fn test_unknown_language_rejected() {
        let dir = tempdir().unwrap();
        taskboard(dir.path())
            .args(["lang", "set", "fr"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown language"));
    }

    #[test]
    fn test_messages_follow_language() {
        let dir = signed_in();
        run_ok(dir.path(), &["lang", "set", "hi"]);
        taskboard(dir.path())
            .args(["task", "create", "--title", "x", "--notes", ""])
            .assert()
            .failure()
            .stderr(predicate::str::contains("सभी फ़ील्ड आवश्यक हैं"));
    }
}

#[test]
fn test_completions() {
    let dir = tempdir().unwrap();
    taskboard(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("taskboard"));
}
