//! CLI tests for mlx_cockpit: argument handling and one-shot SVG output.
use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;

const ONE_LLM: &str = r#"{"services":[{"port":8080,"type":"LLM","metrics":{
    "summary":{"total_requests":3,"total_prompt_tokens":120,"total_completion_tokens":45,"avg_tokens_per_sec":12.4},
    "requests":[{"model":"org/model-a","latency":1.8}]}}]}"#;

fn output_text(out: &std::process::Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    )
}

#[test]
fn help_mentions_short_and_long_flags() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = Command::new(env!("CARGO_BIN_EXE_mlx_cockpit"))
        .env("XDG_CONFIG_HOME", tmp.path())
        .arg("--help")
        .output()
        .expect("run mlx_cockpit --help");
    assert!(out.status.success());
    let text = output_text(&out);
    for flag in ["Usage:", "--command", "-c", "--file", "-f", "--theme", "-T", "--interval", "--svg"] {
        assert!(text.contains(flag), "help text missing {flag}\n{text}");
    }
}

#[test]
fn unexpected_argument_prints_usage() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = Command::cargo_bin("mlx_cockpit")
        .expect("binary")
        .env("XDG_CONFIG_HOME", tmp.path())
        .arg("--bogus")
        .output()
        .expect("run");
    let text = output_text(&out);
    assert!(text.contains("Unexpected argument '--bogus'"), "{text}");
    assert!(text.contains("Usage:"));
}

#[test]
fn svg_snapshot_from_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let fixture = tmp.path().join("services.json");
    fs::write(&fixture, ONE_LLM).expect("write fixture");

    let out = Command::cargo_bin("mlx_cockpit")
        .expect("binary")
        .env("XDG_CONFIG_HOME", tmp.path())
        .args(["--file", fixture.to_str().expect("utf8 path"), "--svg"])
        .output()
        .expect("run");
    assert!(out.status.success());
    let svg = String::from_utf8_lossy(&out.stdout);
    assert!(svg.starts_with("<svg"), "{svg}");
    assert!(svg.contains(">model-a<"));
    assert!(svg.contains(">12.4<"));
    assert!(svg.contains(r#"data-theme="default""#));
}

#[test]
fn theme_flag_is_persisted_and_applied() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let fixture = tmp.path().join("services.json");
    fs::write(&fixture, ONE_LLM).expect("write fixture");

    let out = Command::cargo_bin("mlx_cockpit")
        .expect("binary")
        .env("XDG_CONFIG_HOME", tmp.path())
        .args(["-T", "ocean", "-f", fixture.to_str().expect("utf8 path"), "--svg"])
        .output()
        .expect("run");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(r#"data-theme="ocean""#));

    let saved = fs::read_to_string(tmp.path().join("mlx-cockpit").join("settings.json"))
        .expect("settings written");
    assert!(saved.contains("ocean"), "{saved}");

    // a later run without the flag keeps the saved theme
    let out = Command::cargo_bin("mlx_cockpit")
        .expect("binary")
        .env("XDG_CONFIG_HOME", tmp.path())
        .args(["--file", fixture.to_str().expect("utf8 path"), "--svg"])
        .output()
        .expect("run");
    assert!(String::from_utf8_lossy(&out.stdout).contains(r#"data-theme="ocean""#));
}

#[test]
fn unknown_theme_is_rejected_without_saving() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = Command::cargo_bin("mlx_cockpit")
        .expect("binary")
        .env("XDG_CONFIG_HOME", tmp.path())
        .args(["--theme", "nonexistent", "--svg"])
        .output()
        .expect("run");
    let text = output_text(&out);
    assert!(text.contains("Unknown theme 'nonexistent'"), "{text}");
    assert!(text.contains("ocean"));
    assert!(!tmp.path().join("mlx-cockpit").join("settings.json").exists());
}

#[test]
fn empty_service_list_renders_offline() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let fixture = tmp.path().join("services.json");
    fs::write(&fixture, r#"{"services":[]}"#).expect("write fixture");

    let out = Command::cargo_bin("mlx_cockpit")
        .expect("binary")
        .env("XDG_CONFIG_HOME", tmp.path())
        .args(["--file", fixture.to_str().expect("utf8 path"), "--svg"])
        .output()
        .expect("run");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("MLX SERVERS OFFLINE"));
}

#[cfg(unix)]
#[test]
fn svg_snapshot_from_command() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = Command::cargo_bin("mlx_cockpit")
        .expect("binary")
        .env("XDG_CONFIG_HOME", tmp.path())
        .args([
            "--command",
            r#"echo '{"services":[{"port":9001,"type":"STT","metrics":{"busy":true}}]}'"#,
            "--svg",
        ])
        .output()
        .expect("run");
    assert!(out.status.success());
    let svg = String::from_utf8_lossy(&out.stdout);
    assert!(svg.contains(r#"data-port="9001""#), "{svg}");
    assert!(svg.contains("Generating..."));
}
