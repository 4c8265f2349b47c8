use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fmt::Write as _;
use std::fs;
use tempfile::tempdir;

/// The binary with logging silenced, so stderr only carries rejected lines.
fn capable() -> Command {
    let mut cmd = cargo_bin_cmd!("capable");
    cmd.env_remove("RUST_LOG").env("CAPABLE__LOGGING__LEVEL", "off");
    cmd
}

#[test]
fn prints_every_posted_status_and_exits_cleanly() {
    capable()
        .write_stdin("# start\nvoice_over enabled\n\nbold_text disabled\nlarger_text accessibility_large\n")
        .assert()
        .success()
        .stdout("voice_over=enabled\nbold_text=disabled\nlarger_text=accessibility_large\n")
        .stderr("");
}

#[test]
fn rejected_lines_go_to_stderr_and_the_rest_still_posts() {
    capable()
        .write_stdin("teleport on\nvoice_over\nbold_text enabled\n")
        .assert()
        .success()
        .stdout("bold_text=enabled\n")
        .stderr(
            "Unknown feature: teleport\n\
             Malformed line (Expected '<feature> <status>'): 'voice_over'\n",
        );
}

#[test]
fn disabled_notifications_from_the_environment_print_nothing() {
    capable()
        .env("CAPABLE__NOTIFICATIONS__ENABLED", "false")
        .write_stdin("voice_over enabled\nbold_text enabled\n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn feature_filter_from_the_environment_is_applied() {
    capable()
        .env("CAPABLE__NOTIFICATIONS__FEATURES", "bold_text,larger_text")
        .write_stdin("voice_over enabled\nbold_text enabled\nlarger_text large\n")
        .assert()
        .success()
        .stdout("bold_text=enabled\nlarger_text=large\n");
}

#[test]
fn numeric_environment_values_are_accepted() {
    capable()
        .env("CAPABLE__LOGGING__JSON", "false")
        .env("CAPABLE__NOTIFICATIONS__OBSERVER_CAPACITY", "16")
        .env("CAPABLE__STATUSES__TRACKED", "2")
        .write_stdin("bold_text enabled\n")
        .assert()
        .success()
        .stdout("bold_text=enabled\n");
}

#[test]
fn config_file_restricts_tracked_features() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("capable.toml");
    fs::write(
        &path,
        "[statuses]\ntracked = [\"voice_over\"]\n\n[statuses.initial]\nvoice_over = \"disabled\"\n",
    )?;

    capable()
        .arg("--config")
        .arg(&path)
        .write_stdin("switch_control enabled\nvoice_over enabled\n")
        .assert()
        .success()
        .stdout("voice_over=enabled\n")
        .stderr("Status error: Feature not tracked: switch_control\n");
    Ok(())
}

#[test]
fn fast_input_beyond_observer_capacity_is_not_lost() {
    let (input, expected) = (1..=500).fold((String::new(), String::new()), |(mut i, mut o), n| {
        let _ = writeln!(i, "larger_text size{n}");
        let _ = writeln!(o, "larger_text=size{n}");
        (i, o)
    });

    capable()
        .env("CAPABLE__NOTIFICATIONS__OBSERVER_CAPACITY", "4")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn log_level_flag_overrides_configuration() {
    capable()
        .args(["--log-level", "loud"])
        .write_stdin("voice_over enabled\n")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Unknown log level 'loud'"));
}

#[test]
fn malformed_environment_value_fails_startup() {
    capable()
        .env("CAPABLE__NOTIFICATIONS__OBSERVER_CAPACITY", "plenty")
        .write_stdin("voice_over enabled\n")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Configuration is malformed"));
}

#[test]
fn missing_config_file_fails_startup() {
    capable()
        .args(["--config", "/nonexistent/capable.toml"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration is malformed"));
}
