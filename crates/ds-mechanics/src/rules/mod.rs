//! Rules configuration: the skill table and house rules.
//!
//! A [`RuleSet`] is either one of the built-in presets in [`preset`] or
//! loaded from JSON with [`RuleSet::from_json`]. Loading a file only needs
//! to name what differs from the SRD: missing skills fall back to the
//! standard table and missing house rules to their defaults.

pub mod preset;

use std::collections::BTreeMap;
use std::path::Path;

use ds_core::Ability;
use serde::{Deserialize, Serialize};

use crate::dice::resolve::DEFAULT_CRITICAL_RANGE;
use crate::error::{MechError, MechResult};
use crate::stats::skill_key;

/// Skills and the ability each one is rolled with.
///
/// Keys are normalized to lowercase snake_case on insert and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Ability>", into = "BTreeMap<String, Ability>")]
pub struct SkillTable {
    skills: BTreeMap<String, Ability>,
}

impl SkillTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a skill.
    pub fn insert(&mut self, name: &str, ability: Ability) {
        self.skills.insert(skill_key(name), ability);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: &str, ability: Ability) -> Self {
        self.insert(name, ability);
        self
    }

    /// Governing ability for a skill.
    pub fn ability_for(&self, skill: &str) -> Option<Ability> {
        self.skills.get(&skill_key(skill)).copied()
    }

    /// Governing ability for a skill, or [`MechError::UnknownSkill`].
    pub fn require(&self, skill: &str) -> MechResult<Ability> {
        self.ability_for(skill)
            .ok_or_else(|| MechError::UnknownSkill(skill.to_string()))
    }

    /// True if the skill is in the table.
    pub fn contains(&self, skill: &str) -> bool {
        self.ability_for(skill).is_some()
    }

    /// All skills in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Ability)> {
        self.skills.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of skills.
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// True if there are no skills.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl From<BTreeMap<String, Ability>> for SkillTable {
    fn from(raw: BTreeMap<String, Ability>) -> Self {
        let mut table = Self::new();
        for (name, ability) in raw {
            table.insert(&name, ability);
        }
        table
    }
}

impl From<SkillTable> for BTreeMap<String, Ability> {
    fn from(table: SkillTable) -> Self {
        table.skills
    }
}

/// Table-level tweaks to the core rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseRules {
    /// Weapon damage dice at or below this are rerolled once.
    pub reroll_threshold: Option<u32>,
    /// Lowest natural d20 that scores a critical hit.
    pub critical_range: u32,
    /// Track encumbrance by weight against strength.
    pub variant_encumbrance: bool,
}

impl Default for HouseRules {
    fn default() -> Self {
        Self {
            reroll_threshold: None,
            critical_range: DEFAULT_CRITICAL_RANGE,
            variant_encumbrance: false,
        }
    }
}

/// A complete rules configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Display name.
    pub name: String,
    /// Skill table.
    #[serde(default = "preset::srd_skills")]
    pub skills: SkillTable,
    /// Optional rule changes.
    #[serde(default)]
    pub house_rules: HouseRules,
}

impl Default for RuleSet {
    fn default() -> Self {
        preset::srd_5e()
    }
}

impl RuleSet {
    /// Parse a ruleset from JSON and check it for consistency.
    pub fn from_json(json: &str) -> MechResult<Self> {
        let ruleset: Self = serde_json::from_str(json)
            .map_err(|e| MechError::InvalidConfig(e.to_string()))?;
        ruleset.check()?;
        tracing::debug!(
            name = %ruleset.name,
            skills = ruleset.skills.len(),
            "loaded ruleset"
        );
        Ok(ruleset)
    }

    /// Read and parse a ruleset file.
    pub fn from_path(path: &Path) -> MechResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            MechError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> MechResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MechError::InvalidConfig(e.to_string()))
    }

    /// The governing ability for a skill.
    pub fn skill_ability(&self, skill: &str) -> MechResult<Ability> {
        self.skills.require(skill)
    }

    fn check(&self) -> MechResult<()> {
        if self.name.trim().is_empty() {
            return Err(MechError::InvalidConfig(
                "ruleset name is empty".to_string(),
            ));
        }
        let range = self.house_rules.critical_range;
        if !(2..=20).contains(&range) {
            return Err(MechError::InvalidConfig(format!(
                "critical_range must be between 2 and 20, got {range}"
            )));
        }
        if let Some(threshold) = self.house_rules.reroll_threshold.filter(|t| *t >= 20) {
            return Err(MechError::InvalidConfig(format!(
                "reroll_threshold {threshold} would reroll every die"
            )));
        }
        Ok(())
    }
}
