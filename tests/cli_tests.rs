mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use uuid::Uuid;

fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fintrack_cli").expect("binary exists");
    cmd.env("FINTRACK_HOME", home)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn help_lists_commands() {
    let home = common::temp_root();
    cli(&home)
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("restore <backup-id>"));
}

#[test]
fn version_reports_package_version() {
    let home = common::temp_root();
    cli(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn summary_without_user_fails() {
    let home = common::temp_root();
    cli(&home)
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user selected"));
}

#[test]
fn unknown_command_suggests_alternative() {
    let home = common::temp_root();
    cli(&home)
        .arg("sumary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Did you mean `summary`?"));
}

#[test]
fn add_then_summarize_all_time() {
    let home = common::temp_root();
    let user = Uuid::new_v4().to_string();

    cli(&home)
        .args(["add", "income", "--user", &user, "--description", "Salary"])
        .args(["--amount", "5000", "--date", "2025-06-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 5.000,00"));
    cli(&home)
        .args(["add", "expense", "--description", "Market", "--amount", "395,50"])
        .args(["--date", "2025-06-10", "--payment", "pix", "--category", "Food"])
        .assert()
        .success();
    cli(&home)
        .args(["add", "bill", "--description", "Rent", "--amount", "1500"])
        .args(["--due-day", "5"])
        .assert()
        .success();
    cli(&home)
        .args(["add", "reserve", "--description", "Fund", "--amount", "250"])
        .args(["--date", "2025-06-06", "--reserve-kind", "goal"])
        .assert()
        .success();

    cli(&home)
        .args(["summary", "--period", "all", "--name", "Ana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, Ana!"))
        .stdout(predicate::str::contains("R$ 5.000,00"))
        .stdout(predicate::str::contains("R$ 395,50"))
        .stdout(predicate::str::contains("R$ 250,00"))
        .stdout(predicate::str::contains("R$ 3.104,50"));

    cli(&home)
        .args(["summary", "--from", "2025-06-01", "--to", "2025-06-30", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"custom\""))
        .stdout(predicate::str::contains("\"balance\": 310450"));

    cli(&home)
        .args(["categories", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"));
}

#[test]
fn backups_follow_each_overwrite() {
    let home = common::temp_root();
    let user = Uuid::new_v4().to_string();

    cli(&home)
        .args(["backups", "--user", &user])
        .assert()
        .success()
        .stdout(predicate::str::contains("No backups yet."));

    for description in ["Coffee", "Lunch"] {
        cli(&home)
            .args(["add", "expense", "--description", description])
            .args(["--amount", "10", "--date", "2025-02-01"])
            .assert()
            .success();
    }

    cli(&home)
        .arg("backups")
        .assert()
        .success()
        .stdout(predicate::str::contains("records_"));
}

#[test]
fn delete_unknown_record_fails() {
    let home = common::temp_root();
    let user = Uuid::new_v4().to_string();
    let missing = Uuid::new_v4().to_string();

    cli(&home)
        .args(["delete", "expense", &missing, "--user", &user])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
