mod common;
use common::cli::{GpWorkspace, run_gp};

use predicates::prelude::*;

const SEED: &str = r#"{"id":10,"title":"Сломанный светофор","description":"Не работает с утра","category":"Дороги","status":"resolved","votes":3,"location":"пр. Мира, 1","lat":55.78,"lng":37.63,"date":"2026-02-01"}

{"id":12,"title":"Мусор во дворе","description":"Контейнеры переполнены","location":"ул. Садовая, 7","date":"2026-02-03"}
"#;

#[test]
fn test_workspace_config_is_discovered() {
    let workspace = GpWorkspace::new();
    workspace.write(
        "gorodplus.yaml",
        "profile_limit: 3\ndefault_category: Дороги\nmap:\n  zoom: 14\n",
    );

    let profile = run_gp(&workspace, ["profile", "--json"], "profile").json();
    assert_eq!(profile.as_array().unwrap().len(), 3);

    let map = run_gp(&workspace, ["map", "--json"], "map").json();
    assert_eq!(map["settings"]["zoom"], 14);

    let submit = run_gp(
        &workspace,
        ["submit", "-t", "Яма", "-d", "Глубокая", "-l", "ул. Мира", "--json"],
        "submit",
    )
    .json();
    assert_eq!(submit["issue"]["category"], "Дороги");
}

#[test]
fn test_env_overrides_config_file() {
    let workspace = GpWorkspace::new();
    workspace.write("gorodplus.yaml", "map:\n  zoom: 14\n");

    let output = assert_cmd::Command::cargo_bin("gp")
        .unwrap()
        .current_dir(workspace.root())
        .env("HOME", workspace.root())
        .env("XDG_CONFIG_HOME", workspace.path("xdg"))
        .env("GORODPLUS_MAP_ZOOM", "9")
        .args(["map", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).into_owned();
    assert!(stdout.contains("\"zoom\": 9"));
}

#[test]
fn test_explicit_config_must_exist() {
    let workspace = GpWorkspace::new();
    let output = run_gp(&workspace, ["--config", "missing.yaml", "list"], "missing_config");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stderr.contains("File not found: missing.yaml"));
}

#[test]
fn test_unknown_config_key_is_rejected() {
    let workspace = GpWorkspace::new();
    let path = workspace.write("custom.yaml", "theme: dark\n");
    let output = run_gp(
        &workspace,
        ["--config", path.to_str().unwrap(), "stats"],
        "bad_key",
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stderr.contains("Configuration error"));
    assert!(output.stderr.contains("theme"));
}

#[test]
fn test_out_of_range_zoom_is_rejected() {
    let workspace = GpWorkspace::new();
    workspace.write("gorodplus.yaml", "map:\n  zoom: 25\n");
    let output = run_gp(&workspace, ["map"], "bad_zoom");
    assert!(!output.status.success());
    assert!(output.stderr.contains("map.zoom"));
}

#[test]
fn test_user_config_under_xdg() {
    let workspace = GpWorkspace::new();
    std::fs::create_dir_all(workspace.path("xdg/gorodplus")).unwrap();
    workspace.write("xdg/gorodplus/config.yaml", "profile_limit: 1\n");

    let profile = run_gp(&workspace, ["profile", "--json"], "xdg_profile").json();
    assert_eq!(profile.as_array().unwrap().len(), 1);
}

#[test]
fn test_seed_file_replaces_demo_data() {
    let workspace = GpWorkspace::new();
    workspace.write("issues.jsonl", SEED);

    let stats = run_gp(&workspace, ["--seed", "issues.jsonl", "stats", "--json"], "seed_stats").json();
    assert_eq!(stats["statistics"]["total"], 2);
    assert_eq!(stats["statistics"]["resolved"], 1);

    let submit = run_gp(
        &workspace,
        ["--seed", "issues.jsonl", "submit", "-t", "a", "-d", "b", "-l", "c", "--json"],
        "seed_submit",
    )
    .json();
    assert_eq!(submit["issue"]["id"], 13);

    let map = run_gp(&workspace, ["--seed", "issues.jsonl", "map", "--json"], "seed_map").json();
    assert_eq!(map["markers"].as_array().unwrap().len(), 1);
}

#[test]
fn test_seed_file_from_config() {
    let workspace = GpWorkspace::new();
    workspace.write("issues.jsonl", SEED);
    workspace.write("gorodplus.yaml", "seed_file: issues.jsonl\n");

    let list = run_gp(&workspace, ["list", "--json"], "config_seed").json();
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[1]["category"], "Общее");
}

#[test]
fn test_malformed_seed_reports_line() {
    let workspace = GpWorkspace::new();
    workspace.write("bad.jsonl", "\n{\"id\": 1}\n");

    assert_cmd::Command::cargo_bin("gp")
        .unwrap()
        .current_dir(workspace.root())
        .env("HOME", workspace.root())
        .env("XDG_CONFIG_HOME", workspace.path("xdg"))
        .args(["--seed", "bad.jsonl", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_duplicate_seed_ids_are_rejected() {
    let workspace = GpWorkspace::new();
    let line = r#"{"id":3,"title":"t","description":"d","location":"l","date":"2026-02-01"}"#;
    workspace.write("dup.jsonl", &format!("{line}\n{line}\n"));

    let output = run_gp(&workspace, ["--seed", "dup.jsonl", "list"], "dup_seed");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stderr.contains("Issue ID collision: #3"));
}

#[test]
fn test_empty_conflicts_with_seed() {
    let workspace = GpWorkspace::new();
    let output = run_gp(&workspace, ["--empty", "--seed", "x.jsonl", "list"], "conflict");
    assert!(!output.status.success());
    assert!(output.stderr.contains("cannot be used with"));
}

#[test]
fn test_submit_after_max_seed_id_fails() {
    let workspace = GpWorkspace::new();
    let line = r#"{"id":18446744073709551615,"title":"t","description":"d","location":"l","date":"2026-02-01"}"#;
    workspace.write("max.jsonl", &format!("{line}\n"));

    let output = run_gp(
        &workspace,
        ["--seed", "max.jsonl", "submit", "-t", "a", "-d", "b", "-l", "c"],
        "max_submit",
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stderr.contains("Issue IDs exhausted"));
    assert!(output.stderr.contains("submission rejected"));
}
