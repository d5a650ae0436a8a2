//! Consistency checks for a character record against a ruleset.
//!
//! Nothing here rejects a record outright. Issues are reported so the
//! caller can show them next to the sheet.

use std::fmt;

use ds_core::CharacterRecord;
use serde::Serialize;

use crate::dice::DiceFormula;
use crate::rules::RuleSet;

/// Lowest ability score the rules allow.
pub const MIN_SCORE: i32 = 1;

/// Highest ability score the rules allow.
pub const MAX_SCORE: i32 = 30;

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Unusual but usable.
    Warning,
    /// The sheet will compute something wrong.
    Error,
}

/// A warning or error found in a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Which part of the record, e.g. "skills" or "inventory".
    pub section: String,
    /// A human-readable description.
    pub message: String,
    /// Warning or error.
    pub severity: Severity,
}

impl ValidationIssue {
    fn warning(section: &str, message: String) -> Self {
        Self {
            section: section.to_string(),
            message,
            severity: Severity::Warning,
        }
    }

    fn error(section: &str, message: String) -> Self {
        Self {
            section: section.to_string(),
            message,
            severity: Severity::Error,
        }
    }

    /// Returns true for errors.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{level}: {}: {}", self.section, self.message)
    }
}

/// Check a record against a ruleset. An empty list means the record is
/// clean.
pub fn validate_record(record: &CharacterRecord, ruleset: &RuleSet) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (ability, score) in record.abilities.iter() {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            issues.push(ValidationIssue::warning(
                "abilities",
                format!("{ability} score {score} is outside {MIN_SCORE}-{MAX_SCORE}"),
            ));
        }
    }

    for skill in record.skill_proficiencies.keys() {
        if !ruleset.skills.contains(skill) {
            issues.push(ValidationIssue::warning(
                "skills",
                format!("unknown skill '{skill}' in ruleset '{}'", ruleset.name),
            ));
        }
    }

    if record.hit_points.max < 1 {
        issues.push(ValidationIssue::warning(
            "hit_points",
            format!("max HP is {}", record.hit_points.max),
        ));
    }

    validate_inventory(record, &mut issues);

    tracing::debug!(
        character = %record.name,
        issues = issues.len(),
        "validated record"
    );
    issues
}

fn validate_inventory(record: &CharacterRecord, issues: &mut Vec<ValidationIssue>) {
    let worn: Vec<&str> = record
        .equipped_items()
        .filter(|i| i.as_armor().is_some())
        .map(|i| i.name.as_str())
        .collect();
    if worn.len() > 1 {
        issues.push(ValidationIssue::error(
            "inventory",
            format!("more than one armor equipped: {}", worn.join(", ")),
        ));
    }

    let shields = record.equipped_items().filter(|i| i.is_shield()).count();
    if shields > 1 {
        issues.push(ValidationIssue::warning(
            "inventory",
            format!("{shields} shields equipped; only one counts"),
        ));
    }

    for item in &record.inventory {
        let Some(weapon) = item.as_weapon() else {
            continue;
        };
        if let Err(e) = DiceFormula::parse(&weapon.damage) {
            issues.push(ValidationIssue::error(
                "inventory",
                format!("weapon '{}' has bad damage: {e}", item.name),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use ds_core::{Ability, HitPoints, Item, ItemKind, Proficiency};

    use super::*;
    use crate::rules::preset;

    fn make_record() -> CharacterRecord {
        let mut record = CharacterRecord::new("Thangrim");
        record.hit_points = HitPoints::new(34);
        record
            .skill_proficiencies
            .insert("Athletics".to_string(), Proficiency::Proficient);
        record.add_item(Item::weapon_template("Warhammer").equipped(true));
        record.add_item(Item::armor_template("Plate").equipped(true));
        record
    }

    #[test]
    fn clean_record_has_no_issues() {
        let issues = validate_record(&make_record(), &preset::srd_5e());
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn unknown_skill_warns() {
        let mut record = make_record();
        record
            .skill_proficiencies
            .insert("Basket Weaving".to_string(), Proficiency::Proficient);
        let issues = validate_record(&record, &preset::srd_5e());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].message.contains("Basket Weaving"));
    }

    #[test]
    fn out_of_range_scores_warn() {
        let mut record = make_record();
        record.abilities.set(Ability::Strength, 0);
        record.abilities.set(Ability::Charisma, 31);
        let issues = validate_record(&record, &preset::srd_5e());
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| !i.is_error()));
    }

    #[test]
    fn second_equipped_armor_errors() {
        let mut record = make_record();
        record.add_item(Item::armor_template("Chain Mail").equipped(true));
        let issues = validate_record(&record, &preset::srd_5e());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(
            issues[0].to_string(),
            "error: inventory: more than one armor equipped: Plate, Chain Mail"
        );
    }

    #[test]
    fn bad_weapon_formula_errors() {
        let mut record = make_record();
        let mut sword = Item::weapon_template("Sword");
        if let ItemKind::Weapon(props) = &mut sword.kind {
            props.damage = "2x6".to_string();
        }
        record.add_item(sword);
        let issues = validate_record(&record, &preset::srd_5e());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("Sword"));
    }

    #[test]
    fn zero_max_hp_warns() {
        let mut record = make_record();
        record.hit_points = HitPoints::new(0);
        let issues = validate_record(&record, &preset::srd_5e());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].section, "hit_points");
    }

    #[test]
    fn extra_shield_warns() {
        let mut record = make_record();
        record.add_item(Item::new("Shield", ItemKind::Shield).equipped(true));
        record.add_item(Item::new("Tower Shield", ItemKind::Shield).equipped(true));
        let issues = validate_record(&record, &preset::srd_5e());
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }
}
