//! End-to-end runs of the `logread` and `logread-timeshift` binaries.

use logmock_core::{format_calendar, reconcile_str};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const T0: f64 = 1_700_000_000.0;

fn source_line(ts: f64, msg: &str) -> String {
    format!("{} [{:.3}] {}", format_calendar(ts).unwrap(), ts, msg)
}

fn write_log(dir: &Path, lines: &[String]) -> std::path::PathBuf {
    let path = dir.join("router.log");
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

fn logread(log: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_logread"))
        .arg("--log-file")
        .arg(log)
        .args(extra)
        .env_remove("LOGREAD_MAX_CYCLES")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_last_two_lines_with_persisted_baseline() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(
        dir.path(),
        &[
            source_line(T0, "a: first"),
            source_line(T0 + 5.0, "a: second"),
            source_line(T0 + 10.0, "a: third"),
        ],
    );
    fs::write(format!("{}.state", log.display()), format!("{}\n", T0 + 3600.0)).unwrap();

    let output = logread(&log, &["-t", "-l", "2"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            source_line(T0 + 3605.0, "a: second"),
            source_line(T0 + 3610.0, "a: third"),
        ]
    );
}

#[test]
fn test_first_run_creates_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &[source_line(T0, "a: only")]);

    let output = logread(&log, &["-t"]);
    assert!(output.status.success());

    let state: f64 = fs::read_to_string(format!("{}.state", log.display()))
        .unwrap()
        .trim()
        .parse()
        .unwrap();
    assert_eq!(stdout_lines(&output), vec![source_line(state, "a: only")]);
}

#[test]
fn test_invalid_first_line_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &[String::new(), source_line(T0, "a: late")]);

    let output = logread(&log, &[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!Path::new(&format!("{}.state", log.display())).exists());
}

#[test]
fn test_missing_log_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = logread(&dir.path().join("absent.log"), &[]);
    assert!(!output.status.success());
}

#[test]
fn test_follow_with_cycle_cap_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &[source_line(T0, "a: tail me")]);
    fs::write(format!("{}.state", log.display()), format!("{}\n", T0)).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_logread"))
        .arg("--log-file")
        .arg(&log)
        .args(["-f", "-t", "--follow-interval", "0"])
        .env("LOGREAD_MAX_CYCLES", "3")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            source_line(T0 + 1.0, "a: tail me (MOCK)"),
            source_line(T0 + 2.0, "a: tail me (MOCK)"),
            source_line(T0 + 3.0, "a: tail me (MOCK)"),
        ]
    );
}

#[test]
fn test_timeshift_is_seed_stable() {
    let dir = tempfile::tempdir().unwrap();
    let lines: Vec<String> = (0..12u32)
        .map(|i| source_line(T0 + f64::from(i), &format!("a: line {i}")))
        .collect();
    let log = write_log(dir.path(), &lines);

    let run = || {
        Command::new(env!("CARGO_BIN_EXE_logread-timeshift"))
            .arg("--log-file")
            .arg(&log)
            .args(["--seed", "9"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let out = stdout_lines(&first);
    assert_eq!(out.len(), 12);
    // third = 4, so lines 0..8 are always shifted back by at least 180 days
    for (i, line) in out.iter().enumerate().take(8) {
        let shifted = reconcile_str(line, 0.0).unwrap();
        assert!(shifted <= T0 + i as f64 - 180.0 * 86_400.0);
    }
    assert_eq!(out[11], lines[11]);
}
