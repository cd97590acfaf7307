//! Integration tests for the `catalog` binary.

use std::{fs, path::Path};

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const LAMP: &str = r#"{
    "pId": "b12fcc08-b480-46da-9373-10a91a045627",
    "name": "Desk Lamp - Brass",
    "description": "Adjustable brass desk lamp with linen shade",
    "price": "49.95",
    "imageURL": "https://cdn.example.com/lamp.jpeg",
    "quantity": 40,
    "colors": [
        {
            "cId": "f7d83629-2b86-4250-b22e-db879ec2c2c7",
            "color": "Brushed Nickel",
            "price": 54.95,
            "imageURL": "lamp-nickel.jpg",
            "quantity": 12
        }
    ]
}"#;

const BROKEN: &str = r#"
name = "Lamp"
description = "Adjustable brass desk lamp with linen shade"
price = 10000.01
imageURL = "lamp.psd"
quantity = 3
"#;

/// A command isolated from the user's config and environment.
fn catalog(temp: &TempDir) -> Command {
    let config = temp.path().join("catalog.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = cargo::cargo_bin_cmd!("catalog");
    cmd.current_dir(temp.path())
        .env("CATALOG_CONFIG", &config)
        .env_remove("RUST_LOG")
        .env_remove("CATALOG__VALIDATION__MAX_QUANTITY")
        .arg("--no-color");
    cmd
}

fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

// ── global ──────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    catalog(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("submit"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    catalog(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let temp = TempDir::new().unwrap();
    catalog(&temp).arg("frobnicate").assert().code(2);
}

// ── validate ────────────────────────────────────────────────────────────────

#[test]
fn test_validate_valid_draft() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "lamp.json", LAMP);

    catalog(&temp)
        .args(["validate", "lamp.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lamp.json"))
        .stdout(predicate::str::contains("All 1 drafts are valid"));
}

#[test]
fn test_validate_reports_each_failed_field() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "broken.toml", BROKEN);

    catalog(&temp)
        .args(["validate", "broken.toml"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "name: Enter a product name with >7 characters",
        ))
        .stdout(predicate::str::contains(
            "price: Price must be less than or equal to $10,000",
        ))
        .stdout(predicate::str::contains("imageURL: Enter image file name"))
        .stderr(predicate::str::contains("1 of 1 drafts rejected"));
}

#[test]
fn test_validate_json_output() {
    let temp = TempDir::new().unwrap();
    let drafts = temp.path().join("drafts");
    fs::create_dir(&drafts).unwrap();
    write(&drafts, "a.json", LAMP);
    write(&drafts, "b.toml", BROKEN);

    let out = catalog(&temp)
        .args(["--output-format", "json", "validate", "drafts"])
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let reports: Value = serde_json::from_slice(&out).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["valid"], true);
    assert_eq!(reports[1]["valid"], false);
    assert_eq!(reports[1]["errors"]["price"]["code"], "max");
    assert_eq!(reports[1]["errors"]["id"]["kind"], "required_missing");
}

#[test]
fn test_validate_max_quantity_override() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "lamp.json", &LAMP.replace("40", "10000"));

    catalog(&temp)
        .args(["validate", "lamp.json"])
        .assert()
        .success();

    catalog(&temp)
        .args(["validate", "lamp.json", "--max-quantity", "9999"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Current max-quantity is 9,999 units"));
}

#[test]
fn test_validate_missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    catalog(&temp)
        .args(["validate", "nope.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn test_validate_malformed_json() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "bad.json", "{ \"name\": ");
    catalog(&temp).args(["validate", "bad.json"]).assert().code(2);
}

#[test]
fn test_validate_empty_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("drafts")).unwrap();
    catalog(&temp)
        .args(["validate", "drafts"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No drafts found"));
}

// ── submit ──────────────────────────────────────────────────────────────────

#[test]
fn test_submit_json_replaces_ids() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "lamp.json", LAMP);

    let out = catalog(&temp)
        .args(["submit", "lamp.json", "--json", "--seed", "42"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let summary: Value = serde_json::from_slice(&out).unwrap();
    let accepted = summary["accepted"].as_array().unwrap();
    assert_eq!(accepted.len(), 1);
    assert!(summary["rejected"].as_array().unwrap().is_empty());

    let product = &accepted[0]["product"];
    assert_eq!(product["name"], "Desk Lamp - Brass");
    assert_eq!(product["price"], 49.95);
    assert_ne!(product["id"], "b12fcc08-b480-46da-9373-10a91a045627");
    assert_ne!(
        product["colors"][0]["id"],
        "f7d83629-2b86-4250-b22e-db879ec2c2c7"
    );
    assert!(accepted[0]["accepted_at"].is_string());
}

#[test]
fn test_submit_seed_is_reproducible() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "lamp.json", LAMP);

    let id = |temp: &TempDir| {
        let out = catalog(temp)
            .args(["submit", "lamp.json", "--json", "--seed", "7"])
            .output()
            .unwrap();
        let summary: Value = serde_json::from_slice(&out.stdout).unwrap();
        summary["accepted"][0]["product"]["id"].clone()
    };
    assert_eq!(id(&temp), id(&temp));
}

#[test]
fn test_submit_partial_batch() {
    let temp = TempDir::new().unwrap();
    let drafts = temp.path().join("drafts");
    fs::create_dir(&drafts).unwrap();
    write(&drafts, "a.json", LAMP);
    write(&drafts, "b.toml", BROKEN);

    catalog(&temp)
        .args(["submit", "drafts"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Desk Lamp - Brass (49.95) as"))
        .stdout(predicate::str::contains("Submitted 1 of 2 drafts"))
        .stderr(predicate::str::contains("1 of 2 drafts rejected"));
}

// ── rules ───────────────────────────────────────────────────────────────────

#[test]
fn test_rules_table() {
    let temp = TempDir::new().unwrap();
    catalog(&temp)
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation Rules:"))
        .stdout(predicate::str::contains("colors.quantity"))
        .stdout(predicate::str::contains("Price must be a multiple of 0.01"));
}

#[test]
fn test_rules_single_field_list() {
    let temp = TempDir::new().unwrap();
    catalog(&temp)
        .args(["rules", "--field", "colors.0.price", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("colors.price cent_multiple"))
        .stdout(predicate::str::contains("name").not());
}

#[test]
fn test_rules_unknown_field() {
    let temp = TempDir::new().unwrap();
    catalog(&temp)
        .args(["rules", "--field", "weight"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("weight"));
}

#[test]
fn test_rules_follow_configured_limit() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "catalog.toml",
        "[validation]\nmax_quantity = 9999\n",
    );
    catalog(&temp)
        .args(["rules", "--field", "quantity", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("field,type,kind,code,constraint,message"))
        .stdout(predicate::str::contains("Current max-quantity is 9,999 units"));
}

// ── init / config ───────────────────────────────────────────────────────────

#[test]
fn test_init_writes_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("conf/new.toml");

    catalog(&temp)
        .arg("init")
        .arg("--config")
        .arg(&path)
        .assert()
        .success();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("max_quantity = 10000"));

    catalog(&temp)
        .arg("init")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_config_get_reads_env_override() {
    let temp = TempDir::new().unwrap();
    catalog(&temp)
        .env("CATALOG__VALIDATION__MAX_QUANTITY", "9999")
        .args(["config", "get", "validation.max_quantity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("validation.max_quantity = 9999"));
}

#[test]
fn test_config_unknown_key() {
    let temp = TempDir::new().unwrap();
    catalog(&temp)
        .args(["config", "get", "nope"])
        .assert()
        .code(4);
}

#[test]
fn test_missing_explicit_config_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    catalog(&temp)
        .args(["--config", "missing.toml", "rules"])
        .assert()
        .code(4);
}

// ── completions ─────────────────────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let temp = TempDir::new().unwrap();
    catalog(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog"));
}
