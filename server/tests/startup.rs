//! `captain` binary startup tests.
//!
//! ## Exit Codes
//! - 0: configuration resolved (or `--help`)
//! - 2: bad flag or flag value; usage printed to stderr

use anyhow::Result;
use predicates::prelude::*;

const SETTING_VARS: [&str; 7] = [
    "REDIS_HOST",
    "REDIS_PORT",
    "LOG_THRESHOLD",
    "SERVER_HOST",
    "SERVER_PORT",
    "MISSION_CONTROL_HOST",
    "MISSION_CONTROL_PORT",
];

/// `captain` with no setting variables inherited from the test environment.
fn captain_command() -> Result<assert_cmd::Command> {
    let mut cmd = assert_cmd::Command::cargo_bin("captain")?;
    for var in SETTING_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    Ok(cmd)
}

#[test]
fn starts_with_compiled_in_defaults() -> Result<()> {
    captain_command()?
        .assert()
        .success()
        .stdout(predicate::str::contains("localhost:6379"))
        .stdout(predicate::str::contains("0.0.0.0:8080"))
        .stdout(predicate::str::contains("localhost:8888"));
    Ok(())
}

#[test]
fn env_overrides_default() -> Result<()> {
    captain_command()?
        .env("SERVER_PORT", "9090")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0.0.0:9090"));
    Ok(())
}

#[test]
fn flag_overrides_env() -> Result<()> {
    captain_command()?
        .env("SERVER_PORT", "9090")
        .arg("--server-port=7070")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0.0.0:7070"))
        .stdout(predicate::str::contains("0.0.0.0:9090").not());
    Ok(())
}

#[test]
fn malformed_env_port_warns_and_keeps_default() -> Result<()> {
    captain_command()?
        .env("REDIS_PORT", "notanumber")
        .assert()
        .success()
        .stdout(predicate::str::contains("not a base-10 integer"))
        .stdout(predicate::str::contains("localhost:6379"));
    Ok(())
}

#[test]
fn unknown_flag_exits_with_usage() -> Result<()> {
    captain_command()?
        .arg("--bogus-flag=1")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("configuration resolved").not())
        .stderr(predicate::str::contains("--bogus-flag"))
        .stderr(predicate::str::contains("Usage:"));
    Ok(())
}

#[test]
fn malformed_flag_value_exits_with_usage() -> Result<()> {
    captain_command()?
        .args(["--redis-port", "abc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'abc'"));
    Ok(())
}

#[test]
fn help_lists_every_flag_with_its_description() -> Result<()> {
    let assert = captain_command()?.arg("--help").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    for (flag, description) in [
        ("--redis-host", "Redis Host"),
        ("--redis-port", "Redis Port"),
        ("--log-threshold", "Log level threshold"),
        ("--server-host", "Server Host"),
        ("--server-port", "Server Port"),
        ("--mission-control-host", "Mission Control Host"),
        ("--mission-control-port", "Mission Control Port"),
    ] {
        assert!(stdout.contains(flag), "missing {flag} in:\n{stdout}");
        assert!(
            stdout.contains(description),
            "missing {description:?} in:\n{stdout}"
        );
    }
    Ok(())
}

#[test]
fn threshold_hides_info_logs() -> Result<()> {
    captain_command()?
        .env("LOG_THRESHOLD", "ERROR")
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration resolved").not());
    Ok(())
}
