//! End-to-end tests running the `treport` binary against JSON fixtures.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn treport_binary() -> String {
    env!("CARGO_BIN_EXE_treport").to_string()
}

/// Runs treport with HOME pointed at `temp` so no user config leaks in.
fn treport(temp: &Path, args: &[&str]) -> Output {
    Command::new(treport_binary())
        .env("HOME", temp)
        .env("XDG_CONFIG_HOME", temp.join(".config"))
        .env_remove("TREPORT_DURATION_FORMAT")
        .env_remove("TREPORT_TIMEZONE_OFFSET_MINUTES")
        .env_remove("TREPORT_OUTPUT_DIR")
        .args(args)
        .output()
        .expect("failed to run treport")
}

fn write_fixture(temp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const RECORDS: &str = r#"[
    {
        "start_datetime": "2025-03-11T09:00:00Z",
        "end_datetime": "2025-03-11T10:30:00Z",
        "issue": "Login page",
        "project": {"name": "Atlas"},
        "user": {"email": "ann@example.com", "username": "ann"}
    },
    {
        "start_datetime": "2025-03-10T14:00:00Z",
        "end_datetime": "2025-03-10T14:45:00Z",
        "issue": "Login page",
        "project": {"name": "Atlas"},
        "user": {"email": "ann@example.com", "username": "ann"}
    },
    {
        "start_datetime": "2025-03-12T23:00:00Z",
        "end_datetime": "2025-03-13T01:00:00Z",
        "project": {"name": "Borealis"},
        "user": {"email": "bob@example.com", "username": "bob"}
    }
]"#;

#[test]
fn test_report_csv_end_to_end() {
    let temp = TempDir::new().unwrap();
    let input = write_fixture(&temp, "records.json", RECORDS);

    let output = treport(
        temp.path(),
        &[
            "report",
            "--input",
            input.to_str().unwrap(),
            "--start",
            "2025-03-10T00:00:00Z",
            "--end",
            "2025-03-14T00:00:00Z",
            "--format",
            "decimal",
        ],
    );

    assert!(
        output.status.success(),
        "report should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "User name,Project name,Issue,Time,Start date,End date",
            "bob,Borealis,\"Untitled issue\",2.00 h,2025-03-12 23:00:00,2025-03-13 00:00:00",
            "ann,Atlas,\"Login page\",2.25 h,2025-03-10 14:00:00,2025-03-11 10:30:00",
        ]
    );
}

#[test]
fn test_report_reads_format_from_config_file() {
    let temp = TempDir::new().unwrap();
    let input = write_fixture(&temp, "records.json", RECORDS);
    let config = write_fixture(
        &temp,
        "treport.toml",
        "duration_format = \"classic\"\ntimezone_offset_minutes = -60\n",
    );

    let output = treport(
        temp.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "report",
            "--input",
            input.to_str().unwrap(),
            "--start",
            "2025-03-10",
            "--end",
            "2025-03-14",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("ann,Atlas,\"Login page\",02:15:00,2025-03-10 15:00:00"));
}

#[test]
fn test_report_rejects_unknown_format() {
    let temp = TempDir::new().unwrap();
    let input = write_fixture(&temp, "records.json", RECORDS);

    let output = treport(
        temp.path(),
        &[
            "report",
            "--input",
            input.to_str().unwrap(),
            "--start",
            "2025-03-10",
            "--end",
            "2025-03-14",
            "--format",
            "fancy",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported duration format"), "stderr: {stderr}");
}

#[test]
fn test_report_rejects_out_of_range_offset() {
    let temp = TempDir::new().unwrap();
    let input = write_fixture(&temp, "records.json", RECORDS);

    let output = treport(
        temp.path(),
        &[
            "report",
            "--input",
            input.to_str().unwrap(),
            "--start",
            "2025-03-10",
            "--end",
            "2025-03-11",
            "--tz-offset",
            "200000000000",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("timezone offset out of range"), "stderr: {stderr}");
}

#[test]
fn test_report_rejects_malformed_timestamp() {
    let temp = TempDir::new().unwrap();
    let input = write_fixture(
        &temp,
        "records.json",
        r#"[{"start": "soon", "end": "2025-03-10T10:00:00Z",
             "project": {"name": "Atlas"},
             "user": {"email": "ann@example.com", "username": "ann"}}]"#,
    );

    let output = treport(
        temp.path(),
        &[
            "report",
            "--input",
            input.to_str().unwrap(),
            "--start",
            "2025-03-10",
            "--end",
            "2025-03-14",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid date/time"), "stderr: {stderr}");
}

#[test]
fn test_plan_json_end_to_end() {
    let temp = TempDir::new().unwrap();
    let input = write_fixture(
        &temp,
        "allocations.json",
        r#"[{"start_date": "2020-12-28", "end_date": "2021-01-10", "total_duration": 10}]"#,
    );

    let output = treport(
        temp.path(),
        &["plan", "--input", input.to_str().unwrap(), "--json"],
    );

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["2020-W53"], 5.0);
    assert_eq!(parsed["2021-W01"], 5.0);
}

#[test]
fn test_week_end_to_end() {
    let temp = TempDir::new().unwrap();
    let output = treport(temp.path(), &["week", "2020-12-31"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "53\t2020-W53\n");
}
