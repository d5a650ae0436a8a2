//! Derived character sheet.
//!
//! A [`CharacterSheet`] borrows a stored record and a ruleset and computes
//! every displayed number up front. Rebuild it whenever the record changes.

use std::collections::BTreeMap;

use ds_core::{Ability, CharacterRecord, Item, Proficiency};
use serde::Serialize;

use crate::dice::{Die, RollMode};
use crate::error::{MechError, MechResult};
use crate::rules::RuleSet;
use crate::stats::{
    self, AbilityProfile, ArmorClassInput, Encumbrance, EquippedArmor, ability_modifier,
    armor_class, encumbrance_status, passive_score,
};

/// One row of the skill list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillLine {
    /// Normalized skill key.
    pub key: String,
    /// Governing ability.
    pub ability: Ability,
    /// Proficiency tier.
    pub proficiency: Proficiency,
    /// Total bonus.
    pub bonus: i32,
}

/// Every number derived from a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedStats {
    /// Proficiency bonus in effect.
    pub proficiency_bonus: i32,
    /// Ability modifiers.
    pub modifiers: BTreeMap<Ability, i32>,
    /// Saving throw bonuses.
    pub saves: BTreeMap<Ability, i32>,
    /// Every skill in the ruleset, in key order.
    pub skills: Vec<SkillLine>,
    /// Passive Wisdom (Perception).
    pub passive_perception: i32,
    /// Passive Intelligence (Investigation).
    pub passive_investigation: i32,
    /// Passive Wisdom (Insight).
    pub passive_insight: i32,
    /// Initiative bonus.
    pub initiative: i32,
    /// Armor class from equipped armor and shield.
    pub armor_class: i32,
    /// Whether worn armor imposes disadvantage on Stealth.
    pub stealth_disadvantage: bool,
    /// Items plus coins, in pounds.
    pub carried_weight: f64,
    /// Maximum carry weight in pounds.
    pub carrying_capacity: i32,
    /// Always `Normal` unless the ruleset enables variant encumbrance.
    pub encumbrance: Encumbrance,
}

/// A record, its ruleset, and the stats derived from them.
#[derive(Debug, Clone)]
pub struct CharacterSheet<'a> {
    record: &'a CharacterRecord,
    ruleset: &'a RuleSet,
    /// Scores and proficiencies the stats were derived from.
    pub profile: AbilityProfile,
    /// The derived numbers.
    pub stats: DerivedStats,
}

impl<'a> CharacterSheet<'a> {
    /// Derive a sheet for `record` under `ruleset`.
    pub fn from_record(record: &'a CharacterRecord, ruleset: &'a RuleSet) -> Self {
        let profile = AbilityProfile::from_record(record);
        let stats = derive(record, ruleset, &profile);
        Self {
            record,
            ruleset,
            profile,
            stats,
        }
    }

    /// The underlying record.
    pub fn record(&self) -> &'a CharacterRecord {
        self.record
    }

    /// The ruleset in effect.
    pub fn ruleset(&self) -> &'a RuleSet {
        self.ruleset
    }

    /// Modifier for an ability.
    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.profile.scores.get(ability))
    }

    /// Saving throw bonus for an ability.
    pub fn save(&self, ability: Ability) -> i32 {
        stats::saving_throw_bonus(&self.profile, ability)
    }

    /// Bonus and governing ability for a skill in the ruleset.
    pub fn skill(&self, name: &str) -> MechResult<(Ability, i32)> {
        let ability = self.ruleset.skill_ability(name)?;
        Ok((ability, stats::skill_bonus(&self.profile, name, ability)))
    }

    /// The roll mode for a d20 test of `ability`, given what the caller asked
    /// for.
    ///
    /// An active effect granting advantage on the ability upgrades the roll.
    /// Advantage and disadvantage from any sources cancel out.
    pub fn roll_mode_for(&self, ability: Ability, requested: RollMode) -> RollMode {
        let from_effects = if self
            .record
            .active_effects()
            .any(|e| e.grants_advantage(ability))
        {
            RollMode::Advantage
        } else {
            RollMode::Normal
        };
        requested.combine(from_effects)
    }

    /// The largest bonus damage die granted by active effects.
    pub fn bonus_damage_die(&self) -> Option<Die> {
        self.record
            .active_effects()
            .filter_map(|e| e.bonus_damage_die)
            .max()
            .and_then(Die::from_sides)
    }

    /// Equipped weapons, falling back to every weapon if none are equipped.
    pub fn weapons(&self) -> Vec<&'a Item> {
        let equipped: Vec<&Item> = self
            .record
            .equipped_items()
            .filter(|i| i.as_weapon().is_some())
            .collect();
        if equipped.is_empty() {
            self.record
                .inventory
                .iter()
                .filter(|i| i.as_weapon().is_some())
                .collect()
        } else {
            equipped
        }
    }

    /// Find a weapon by name (case-insensitive).
    pub fn weapon(&self, name: &str) -> MechResult<&'a Item> {
        let item = self
            .record
            .find_item(name)
            .ok_or_else(|| MechError::NotAWeapon(name.to_string()))?;
        if item.as_weapon().is_none() {
            return Err(MechError::NotAWeapon(item.name.clone()));
        }
        Ok(item)
    }
}

fn derive(record: &CharacterRecord, ruleset: &RuleSet, profile: &AbilityProfile) -> DerivedStats {
    let modifier = |ability: Ability| ability_modifier(profile.scores.get(ability));

    let modifiers = Ability::ALL.iter().map(|a| (*a, modifier(*a))).collect();
    let saves = Ability::ALL
        .iter()
        .map(|a| (*a, stats::saving_throw_bonus(profile, *a)))
        .collect();

    let skills: Vec<SkillLine> = ruleset
        .skills
        .iter()
        .map(|(key, ability)| SkillLine {
            key: key.to_string(),
            ability,
            proficiency: profile.skill_proficiency(key),
            bonus: stats::skill_bonus(profile, key, ability),
        })
        .collect();

    let passive = |skill: &str, fallback: Ability| {
        let bonus = skills
            .iter()
            .find(|s| s.key == skill)
            .map_or_else(|| modifier(fallback), |s| s.bonus);
        passive_score(bonus)
    };

    let body_armor = record.equipped_items().find_map(Item::as_armor);
    let ac_input = ArmorClassInput {
        armor: body_armor.map(EquippedArmor::from),
        dex_modifier: modifier(Ability::Dexterity),
        shield: record.equipped_items().any(Item::is_shield),
    };

    let strength = profile.scores.get(Ability::Strength);
    let carried_weight = record.item_weight() + record.coins.weight();
    let encumbrance = if ruleset.house_rules.variant_encumbrance {
        encumbrance_status(carried_weight, strength)
    } else {
        Encumbrance::Normal
    };

    DerivedStats {
        proficiency_bonus: profile.proficiency_bonus,
        modifiers,
        saves,
        passive_perception: passive("perception", Ability::Wisdom),
        passive_investigation: passive("investigation", Ability::Intelligence),
        passive_insight: passive("insight", Ability::Wisdom),
        skills,
        initiative: modifier(Ability::Dexterity),
        armor_class: armor_class(&ac_input),
        stealth_disadvantage: body_armor.is_some_and(|a| a.stealth_disadvantage),
        carried_weight,
        carrying_capacity: stats::carrying_capacity(strength),
        encumbrance,
    }
}
