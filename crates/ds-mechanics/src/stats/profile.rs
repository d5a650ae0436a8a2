//! The slice of a character that stat derivation reads.

use std::collections::BTreeMap;

use ds_core::{Ability, AbilityScores, CharacterRecord, Proficiency};
use serde::{Deserialize, Serialize};

use super::proficiency_bonus_for_level;

/// Scores and proficiencies for one character.
///
/// Skill keys are stored normalized (see [`skill_key`]) so `"Sleight of
/// Hand"`, `"sleight_of_hand"` and `"sleightOfHand"` all refer to the same
/// skill.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilityProfile {
    /// The six ability scores.
    pub scores: AbilityScores,
    /// Flat bonus added for proficiency.
    pub proficiency_bonus: i32,
    /// Saving throw proficiency tiers. Missing entries are untrained.
    #[serde(default)]
    pub save_proficiencies: BTreeMap<Ability, Proficiency>,
    /// Skill proficiency tiers by normalized key.
    #[serde(default)]
    pub skill_proficiencies: BTreeMap<String, Proficiency>,
}

impl AbilityProfile {
    /// A profile with the given scores, bonus, and no proficiencies.
    pub fn new(scores: AbilityScores, proficiency_bonus: i32) -> Self {
        Self {
            scores,
            proficiency_bonus,
            ..Self::default()
        }
    }

    /// Build the profile for a stored character.
    ///
    /// An explicit proficiency bonus on the record wins over the one
    /// derived from level.
    pub fn from_record(record: &CharacterRecord) -> Self {
        let proficiency_bonus = record
            .proficiency_bonus
            .unwrap_or_else(|| proficiency_bonus_for_level(record.level));

        Self {
            scores: record.abilities,
            proficiency_bonus,
            save_proficiencies: record.save_proficiencies.clone(),
            skill_proficiencies: record
                .skill_proficiencies
                .iter()
                .map(|(k, v)| (skill_key(k), *v))
                .collect(),
        }
    }

    /// Set a saving throw proficiency.
    pub fn with_save(mut self, ability: Ability, tier: Proficiency) -> Self {
        self.save_proficiencies.insert(ability, tier);
        self
    }

    /// Set a skill proficiency.
    pub fn with_skill(mut self, skill: &str, tier: Proficiency) -> Self {
        self.skill_proficiencies.insert(skill_key(skill), tier);
        self
    }

    /// Saving throw tier for an ability.
    pub fn save_proficiency(&self, ability: Ability) -> Proficiency {
        self.save_proficiencies
            .get(&ability)
            .copied()
            .unwrap_or_default()
    }

    /// Skill tier, looked up by normalized key.
    pub fn skill_proficiency(&self, skill: &str) -> Proficiency {
        self.skill_proficiencies
            .get(&skill_key(skill))
            .copied()
            .unwrap_or_default()
    }
}

/// Normalize a skill name to a lowercase snake_case key.
///
/// Word breaks are spaces, punctuation, or a lowercase-to-uppercase
/// transition.
pub fn skill_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut prev_lower = false;

    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() && prev_lower {
                key.push('_');
            }
            key.extend(c.to_lowercase());
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        } else {
            if !key.is_empty() && !key.ends_with('_') {
                key.push('_');
            }
            prev_lower = false;
        }
    }

    while key.ends_with('_') {
        key.pop();
    }
    key
}
