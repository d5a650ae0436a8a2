//! Integration tests for the `ds` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ds() -> Command {
    let mut cmd = Command::cargo_bin("ds").unwrap();
    cmd.env_remove("DS_RULES").env_remove("DS_CHARACTER");
    cmd
}

/// A temp directory holding a freshly initialized character.
fn character() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("thangrim.json");
    ds().args(["init", "-f", file.to_str().unwrap()])
        .assert()
        .success();
    (dir, file)
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_character_file() {
    let dir = TempDir::new().unwrap();
    ds().args(["init", "--name", "Brunhild"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created character 'Brunhild'"));

    let json = read_json(&dir.path().join("character.json"));
    assert_eq!(json["name"], "Brunhild");
    assert_eq!(json["hit_points"]["max"], 34);
}

#[test]
fn init_refuses_to_overwrite() {
    let (_dir, file) = character();
    ds().args(["init", "-f", arg(&file)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    ds().args(["init", "--force", "-f", arg(&file)])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// sheet
// ---------------------------------------------------------------------------

#[test]
fn sheet_shows_derived_numbers() {
    let (_dir, file) = character();
    ds().args(["sheet", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Thangrim")
                .and(predicate::str::contains("AC 20"))
                .and(predicate::str::contains("athletics"))
                .and(predicate::str::contains("Second Wind: 3/3")),
        );
}

#[test]
fn sheet_json_output() {
    let (_dir, file) = character();
    let output = ds()
        .args(["sheet", "--json", "-f", arg(&file)])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["armor_class"], 20);
    assert_eq!(stats["proficiency_bonus"], 3);
    assert_eq!(stats["saves"]["strength"], 7);
    assert_eq!(stats["skills"].as_array().unwrap().len(), 18);
}

#[test]
fn sheet_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    ds().args(["sheet"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ds init"));
}

#[test]
fn sheet_with_rules_file() {
    let (dir, file) = character();
    let rules = dir.path().join("rules.json");
    fs::write(
        &rules,
        r#"{ "name": "Homebrew", "skills": { "Brewing": "wis" } }"#,
    )
    .unwrap();

    ds().args(["sheet", "-f", arg(&file), "--rules", arg(&rules)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Homebrew").and(predicate::str::contains("brewing")));
}

#[test]
fn rules_from_environment() {
    let (_dir, file) = character();
    ds().args(["sheet", "-f", arg(&file)])
        .env("DS_RULES", "no-such-preset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no rules file or preset"));
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_formula_with_seed_is_repeatable() {
    let first = ds()
        .args(["roll", "4d6+2", "--seed", "7"])
        .output()
        .unwrap();
    let second = ds()
        .args(["roll", "4d6+2", "--seed", "7"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert!(String::from_utf8_lossy(&first.stdout).contains("4d6+2"));
}

#[test]
fn roll_static_formula() {
    ds().args(["roll", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[] +5 = 5"));
}

#[test]
fn roll_rejects_bad_formula() {
    ds().args(["roll", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized dice formula"));
}

#[test]
fn roll_rejects_bad_bonus_die() {
    ds().args(["roll", "1d8", "--bonus", "x6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid bonus die"));
}

#[test]
fn roll_with_advantage_shows_both_dice() {
    ds().args(["roll", "d20", "--adv", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(").and(predicate::str::contains("advantage")));
}

// ---------------------------------------------------------------------------
// check / attack
// ---------------------------------------------------------------------------

#[test]
fn skill_check() {
    let (_dir, file) = character();
    ds().args(["check", "athletics", "--seed", "1", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Athletics:").and(predicate::str::contains("+7")));
}

#[test]
fn saving_throw_with_active_effect_rolls_advantage() {
    let (_dir, file) = character();
    ds().args(["effect", "giant's might", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("is active"));

    ds().args(["check", "str", "--save", "--seed", "1", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Strength save").and(predicate::str::contains("advantage")));
}

#[test]
fn check_unknown_skill_fails() {
    let (_dir, file) = character();
    ds().args(["check", "basket weaving", "-f", arg(&file)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown skill"));
}

#[test]
fn save_needs_an_ability() {
    let (_dir, file) = character();
    ds().args(["check", "stealth", "--save", "-f", arg(&file)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an ability"));
}

#[test]
fn attack_with_equipped_weapon() {
    let (_dir, file) = character();
    ds().args(["attack", "--seed", "5", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Warhammer attack")
                .and(predicate::str::contains("Damage:"))
                .and(predicate::str::contains("Bludgeoning")),
        );
}

#[test]
fn attack_with_non_weapon_fails() {
    let (_dir, file) = character();
    ds().args(["attack", "Shield", "-f", arg(&file)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a weapon"));
}

// ---------------------------------------------------------------------------
// hp / resources / rests
// ---------------------------------------------------------------------------

#[test]
fn damage_then_long_rest_restores() {
    let (_dir, file) = character();
    ds().args(["hp", "temp", "5", "-f", arg(&file)]).assert().success();
    ds().args(["hp", "damage", "12", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("HP 27/34"));
    ds().args(["spend", "second wind", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Second Wind: 2/3"));

    ds().args(["rest", "long", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("regained 7 HP")
                .and(predicate::str::contains("Second Wind"))
                .and(predicate::str::contains("HP 34/34")),
        );
}

#[test]
fn damage_to_zero_is_down() {
    let (_dir, file) = character();
    ds().args(["hp", "damage", "100", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("HP 0/34").and(predicate::str::contains("DOWN")));
}

#[test]
fn lowering_max_hp_lowers_current() {
    let (_dir, file) = character();
    ds().args(["hp", "max", "20", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("HP 20/20"));
}

#[test]
fn loaded_hit_points_are_clamped() {
    let (_dir, file) = character();
    let mut json = read_json(&file);
    json["hit_points"] = serde_json::json!({ "current": 99, "max": 34, "temp": -4 });
    fs::write(&file, serde_json::to_string(&json).unwrap()).unwrap();

    ds().args(["hp", "heal", "0", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("HP 34/34"));
}

#[test]
fn short_rest_leaves_long_rest_resources() {
    let (_dir, file) = character();
    ds().args(["spend", "action surge", "-f", arg(&file)]).assert().success();
    ds().args(["spend", "second wind", "-f", arg(&file)]).assert().success();

    ds().args(["rest", "short", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Action Surge"));

    let json = read_json(&file);
    let resources = json["resources"].as_array().unwrap();
    let find = |name: &str| {
        resources
            .iter()
            .find(|r| r["name"] == name)
            .map(|r| r["current"].as_u64().unwrap())
            .unwrap()
    };
    assert_eq!(find("Action Surge"), 1);
    assert_eq!(find("Second Wind"), 2);
}

#[test]
fn spending_empty_resource_fails() {
    let (_dir, file) = character();
    ds().args(["spend", "fire rune", "-f", arg(&file)]).assert().success();
    ds().args(["spend", "fire rune", "-f", arg(&file)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("remaining"));
}

// ---------------------------------------------------------------------------
// coins / equipment
// ---------------------------------------------------------------------------

#[test]
fn coin_add_and_remove_with_change() {
    let (_dir, file) = character();
    ds().args(["coin", "add", "2pp", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 pp, 15 gp, 8 sp"));
    ds().args(["coin", "remove", "20gp", "-f", arg(&file)])
        .assert()
        .success();

    let json = read_json(&file);
    let coins = &json["coins"];
    let copper = coins["pp"].as_u64().unwrap() * 1000
        + coins["gp"].as_u64().unwrap() * 100
        + coins["ep"].as_u64().unwrap() * 50
        + coins["sp"].as_u64().unwrap() * 10
        + coins["cp"].as_u64().unwrap();
    assert_eq!(copper, 2000 + 1500 + 80 - 2000);
}

#[test]
fn coin_remove_too_much_fails() {
    let (_dir, file) = character();
    ds().args(["coin", "remove", "1pp", "-f", arg(&file)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient funds"));
}

#[test]
fn equip_toggles_item() {
    let (_dir, file) = character();
    ds().args(["equip", "shield", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unequipped Shield"));
    ds().args(["sheet", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("AC 18"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_passes_template() {
    let (_dir, file) = character();
    ds().args(["validate", "-f", arg(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn validate_flags_double_armor() {
    let (_dir, file) = character();
    let mut json = read_json(&file);
    let inventory = json["inventory"].as_array_mut().unwrap();
    let mut second = inventory
        .iter()
        .find(|i| i["type"] == "armor")
        .unwrap()
        .clone();
    second["id"] = serde_json::Value::String("00000000-0000-4000-8000-000000000000".to_string());
    second["name"] = serde_json::Value::String("Chain Mail".to_string());
    inventory.push(second);
    fs::write(&file, serde_json::to_string(&json).unwrap()).unwrap();

    ds().args(["validate", "-f", arg(&file)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than one armor equipped"));
}

#[test]
fn malformed_character_file_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("broken.json");
    fs::write(&file, "{ not json").unwrap();
    ds().args(["sheet", "-f", arg(&file)]).assert().failure();
}
