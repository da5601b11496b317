//! End-to-end tests: run the built binary against a scripted stand-in for `deface`.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write an executable shell script named `deface` into `dir`.
fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("deface");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn wrap() -> Command {
    let mut cmd = Command::cargo_bin("deface-wrap").unwrap();
    cmd.env_remove("DEFACE_BIN").env_remove("RUST_LOG");
    cmd
}

fn wrap_with(tool: &Path, positionals: [&str; 6]) -> Command {
    let mut cmd = wrap();
    cmd.arg("--executable").arg(tool).args(positionals);
    cmd
}

const DEFAULT_ARGS: [&str; 6] = ["in.mp4", "out.mp4", "blur", "true", "25", "720p"];

#[test]
fn too_few_arguments_is_usage_error() {
    wrap()
        .args(["in.mp4", "out.mp4", "blur", "true", "25"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn no_arguments_is_usage_error() {
    wrap().assert().code(1).stderr(predicate::str::contains("Usage"));
}

#[test]
fn too_many_arguments_is_usage_error() {
    wrap()
        .args(DEFAULT_ARGS)
        .arg("extra")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_exits_zero() {
    wrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("<RESOLUTION>"));
}

#[test]
fn success_relays_stdout_after_command_line() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), "printf done");

    let output = wrap_with(&tool, DEFAULT_ARGS).output().unwrap();
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Running command: "), "{stdout}");
    let echo_end = stdout.find('\n').unwrap();
    assert!(stdout[..echo_end].contains("--replacewith blur --mask-scale 1.3"));
    assert_eq!(&stdout[echo_end + 1..], "done");
    assert!(output.stderr.is_empty());
}

#[test]
fn failure_mirrors_exit_code_and_stderr() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), "printf tool-stdout; printf boom >&2; exit 3");

    wrap_with(&tool, DEFAULT_ARGS)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("boom"))
        .stdout(predicate::str::contains("tool-stdout").not());
}

#[test]
fn arguments_reach_the_tool_in_order() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), r#"printf '%s\n' "$@""#);

    let output = wrap_with(
        &tool,
        ["my clip.mp4", "out.mp4", "mosaic", "TRUE", "30", "1080p"],
    )
    .output()
    .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let forwarded: Vec<&str> = stdout.lines().skip(1).collect();
    assert_eq!(
        forwarded,
        [
            "my clip.mp4",
            "-o",
            "out.mp4",
            "-k",
            "--replacewith",
            "mosaic",
            "--mask-scale",
            "1.3",
            "--ffmpeg-config",
            r#"{"fps":30}"#,
        ]
    );
}

#[test]
fn keep_audio_other_than_true_omits_flag() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), r#"printf '%s\n' "$@""#);

    for value in ["false", "yes", "1"] {
        let output = wrap_with(&tool, ["in.mp4", "out.mp4", "blur", value, "25", "720p"])
            .output()
            .unwrap();
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(!stdout.lines().skip(1).any(|l| l == "-k"), "{value}: {stdout}");
    }
}

#[test]
fn thresh_and_mask_scale_overrides() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), r#"printf '%s\n' "$@""#);

    wrap_with(&tool, DEFAULT_ARGS)
        .args(["--thresh", "0.19", "--mask-scale", "1.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--mask-scale 1.5 --thresh 0.19 --ffmpeg-config"));
}

#[test]
fn invalid_fps_fails_before_spawning() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("ran");
    let tool = fake_tool(dir.path(), &format!("touch '{}'", marker.display()));

    wrap_with(&tool, ["in.mp4", "out.mp4", "blur", "true", "abc", "720p"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Invalid frame rate 'abc'"));
    assert!(!marker.exists());
}

#[test]
fn negative_fps_is_invalid() {
    wrap()
        .args(["in.mp4", "out.mp4", "blur", "true", "-5", "720p"])
        .assert()
        .code(2);
}

#[test]
fn missing_tool_exits_127() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope").join("deface");

    wrap_with(&missing, DEFAULT_ARGS)
        .assert()
        .code(127)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn non_executable_tool_exits_126() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deface");
    fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    wrap_with(&path, DEFAULT_ARGS).assert().code(126);
}

#[test]
fn json_error_envelope() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("deface");

    let output = wrap_with(&missing, DEFAULT_ARGS)
        .arg("--json")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(127));

    let value: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["ok"], false);
    assert_eq!(value["error"]["code"], "tool_not_found");
}

#[test]
fn timeout_kills_hung_tool() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), "exec sleep 30");

    wrap_with(&tool, DEFAULT_ARGS)
        .args(["--timeout", "1"])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .code(124)
        .stderr(predicate::str::contains("did not finish within 1s"));
}

#[test]
fn dry_run_prints_plan_without_spawning() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("ran");
    let tool = fake_tool(dir.path(), &format!("touch '{}'", marker.display()));

    let output = wrap_with(&tool, DEFAULT_ARGS)
        .args(["--dry-run", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(!marker.exists());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["ffmpeg_config"], r#"{"fps":25}"#);
    assert_eq!(plan["request"]["resolution"], "720p");
    assert_eq!(plan["request"]["keep_audio"], true);
    assert_eq!(plan["args"][3], "-k");
    assert_eq!(plan["program"], tool.to_str().unwrap());
}

#[test]
fn executable_from_environment() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), "printf from-env");

    wrap()
        .env("DEFACE_BIN", &tool)
        .args(DEFAULT_ARGS)
        .assert()
        .success()
        .stdout(predicate::str::contains("from-env"));
}

#[test]
fn unknown_mask_style_is_forwarded_with_warning() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), r#"printf '%s\n' "$@""#);

    wrap_with(&tool, ["in.mp4", "out.mp4", "blr", "false", "25", "720p"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--replacewith blr"))
        .stderr(predicate::str::contains("did you mean 'blur'"));
}

#[test]
fn huge_timeout_waits_without_limit() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), "printf done");

    wrap_with(&tool, DEFAULT_ARGS)
        .args(["--timeout", "18446744073709551615"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("done"));
}

#[test]
fn non_finite_mask_scale_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("ran");
    let tool = fake_tool(dir.path(), &format!("touch '{}'", marker.display()));

    for (flag, value) in [("--mask-scale", "NaN"), ("--mask-scale", "-1.3"), ("--thresh", "inf")] {
        wrap_with(&tool, DEFAULT_ARGS)
            .args([flag, value])
            .assert()
            .code(1)
            .stdout("")
            .stderr(predicate::str::contains(value));
    }
    assert!(!marker.exists());
}

#[test]
fn dry_run_table_output() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), "exit 0");

    wrap_with(&tool, DEFAULT_ARGS)
        .args(["--dry-run", "--output", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FIELD"))
        .stdout(predicate::str::contains("720p (not forwarded)"))
        .stdout(predicate::str::contains(r#"{"fps":25}"#))
        .stdout(predicate::str::contains("Running command").not());
}

#[test]
fn dry_run_compact_output() {
    let dir = TempDir::new().unwrap();
    let tool = fake_tool(dir.path(), "exit 0");

    let output = wrap_with(&tool, DEFAULT_ARGS)
        .args(["--dry-run", "--output", "compact"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1, "{stdout}");
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["request"]["fps"], 25);
    assert_eq!(plan["args"][7], "1.3");
}
