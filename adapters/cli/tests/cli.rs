use std::{fs, path::PathBuf, process::Command};

fn snake() -> Command {
    Command::new(env!("CARGO_BIN_EXE_snake"))
}

fn scratch_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("snake-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("scratch directory");
    let path = dir.join(name);
    let _ = fs::remove_file(&path);
    path
}

#[test]
fn list_ops_prints_every_variant() {
    let output = snake().arg("list-ops").output().expect("run snake list-ops");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    let listing = stdout.trim_end();
    assert!(listing.ends_with('.'));
    let names: Vec<_> = listing.trim_end_matches('.').split(", ").collect();
    assert_eq!(names.len(), 16);
    assert!(names.contains(&"separator3"));
}

#[test]
fn invalid_settings_are_reported() {
    let config = scratch_file("narrow.json");
    fs::write(&config, r#"{ "GridWidth": 5 }"#).expect("write config");

    let output = snake()
        .args(["play", "--config"])
        .arg(&config)
        .output()
        .expect("run snake play");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("grid width"), "stderr: {stderr}");
}

#[test]
fn missing_config_is_created_with_defaults() {
    let config = scratch_file("created.json");

    let output = snake()
        .args(["--ops", "labyrinth", "--config"])
        .arg(&config)
        .output()
        .expect("run snake");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("labyrinth"), "stderr: {stderr}");

    let written = fs::read_to_string(&config).expect("config created");
    assert!(written.contains("\"GridWidth\": 21"));
    assert!(written.contains("\"TickRate\": 60"));
}

#[test]
fn final_growth_beyond_the_free_cells_is_rejected() {
    let config = scratch_file("crowded.json");
    fs::write(&config, r#"{ "FinalSnakeGrowth": 315 }"#).expect("write config");

    let output = snake()
        .args(["play", "--ops", "enclosure", "--seed", "1", "--config"])
        .arg(&config)
        .output()
        .expect("run snake play");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("free cells"), "stderr: {stderr}");
}
