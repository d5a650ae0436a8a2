//! Checks, saves, and attacks for a derived sheet.
//!
//! These glue the two halves of the engine together: the sheet supplies a
//! bonus and a roll mode, the dice resolver rolls it.

use std::fmt;

use ds_core::{Ability, AttackType, Item};
use serde::Serialize;

use crate::dice::{DiceFormula, RollMode, RollOutcome, RollRequest, RollSource, resolve};
use crate::error::{MechError, MechResult};
use crate::sheet::CharacterSheet;

/// A resolved d20 test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// What was rolled, e.g. "Athletics" or "Strength save".
    pub label: String,
    /// The ability the roll used.
    pub ability: Ability,
    /// Bonus added to the d20.
    pub bonus: i32,
    /// The mode actually rolled after effects were applied.
    pub mode: RollMode,
    /// The dice.
    pub outcome: RollOutcome,
}

impl CheckResult {
    /// Final total.
    pub fn total(&self) -> i32 {
        self.outcome.total
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.outcome)?;
        if self.mode != RollMode::Normal {
            write!(f, " ({})", self.mode)?;
        }
        if self.outcome.is_critical_high {
            write!(f, " CRITICAL")?;
        } else if self.outcome.is_critical_low {
            write!(f, " FUMBLE")?;
        }
        Ok(())
    }
}

/// A weapon attack: the to-hit roll and its damage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackResult {
    /// Weapon name.
    pub weapon: String,
    /// The attack roll.
    pub to_hit: CheckResult,
    /// The damage roll, with dice doubled on a critical.
    pub damage: RollOutcome,
    /// Damage type, e.g. "Slashing".
    pub damage_type: String,
}

impl AttackResult {
    /// True when the attack roll was a critical hit.
    pub fn is_critical(&self) -> bool {
        self.to_hit.outcome.is_critical_high
    }
}

impl fmt::Display for AttackResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.to_hit)?;
        write!(f, "Damage: {} {}", self.damage, self.damage_type)
    }
}

/// Roll a raw ability check.
///
/// Active effects granting advantage on the ability apply.
pub fn ability_check(
    sheet: &CharacterSheet<'_>,
    ability: Ability,
    mode: RollMode,
    source: &mut impl RollSource,
) -> CheckResult {
    d20_test(
        sheet,
        format!("{ability} check"),
        ability,
        sheet.modifier(ability),
        sheet.roll_mode_for(ability, mode),
        source,
    )
}

/// Roll a saving throw.
pub fn saving_throw(
    sheet: &CharacterSheet<'_>,
    ability: Ability,
    mode: RollMode,
    source: &mut impl RollSource,
) -> CheckResult {
    d20_test(
        sheet,
        format!("{ability} save"),
        ability,
        sheet.save(ability),
        sheet.roll_mode_for(ability, mode),
        source,
    )
}

/// Roll a skill check. Fails if the ruleset has no such skill.
pub fn skill_check(
    sheet: &CharacterSheet<'_>,
    skill: &str,
    mode: RollMode,
    source: &mut impl RollSource,
) -> MechResult<CheckResult> {
    let (ability, bonus) = sheet.skill(skill)?;
    Ok(d20_test(
        sheet,
        display_name(skill),
        ability,
        bonus,
        sheet.roll_mode_for(ability, mode),
        source,
    ))
}

/// Roll an attack with a weapon, then its damage.
///
/// Melee weapons use Strength, ranged weapons Dexterity, and finesse
/// weapons whichever is higher. On a critical hit the weapon's dice are
/// doubled; the ability modifier is not. The ruleset's reroll threshold
/// and any bonus die from active effects apply to damage.
pub fn attack(
    sheet: &CharacterSheet<'_>,
    weapon: &Item,
    mode: RollMode,
    source: &mut impl RollSource,
) -> MechResult<AttackResult> {
    let props = weapon
        .as_weapon()
        .ok_or_else(|| MechError::NotAWeapon(weapon.name.clone()))?;

    let ability = if props.has_property("finesse") {
        if sheet.modifier(Ability::Dexterity) > sheet.modifier(Ability::Strength) {
            Ability::Dexterity
        } else {
            Ability::Strength
        }
    } else {
        match props.attack_type {
            AttackType::Melee => Ability::Strength,
            AttackType::Ranged => Ability::Dexterity,
        }
    };
    let modifier = sheet.modifier(ability);
    let proficiency = if props.proficient {
        sheet.profile.proficiency_bonus
    } else {
        0
    };

    let damage_formula = DiceFormula::parse(&props.damage)?;

    let to_hit = d20_test(
        sheet,
        format!("{} attack", weapon.name),
        ability,
        modifier.saturating_add(proficiency),
        mode,
        source,
    );

    let mut formula = damage_formula.with_extra_modifier(modifier);
    if to_hit.outcome.is_critical_high {
        formula = formula.with_doubled_dice();
    }

    let request = RollRequest::new(formula)
        .with_reroll_threshold(sheet.ruleset().house_rules.reroll_threshold)
        .with_bonus_die(sheet.bonus_damage_die());
    let damage = resolve(&request, source);

    tracing::debug!(
        weapon = %weapon.name,
        to_hit = to_hit.total(),
        damage = damage.total,
        critical = to_hit.outcome.is_critical_high,
        "resolved attack"
    );

    Ok(AttackResult {
        weapon: weapon.name.clone(),
        to_hit,
        damage,
        damage_type: props.damage_type.clone(),
    })
}

fn d20_test(
    sheet: &CharacterSheet<'_>,
    label: String,
    ability: Ability,
    bonus: i32,
    mode: RollMode,
    source: &mut impl RollSource,
) -> CheckResult {
    let formula = DiceFormula::Dice {
        count: 1,
        sides: 20,
        modifier: bonus,
    };
    let request = RollRequest::new(formula)
        .with_mode(mode)
        .with_critical_range(sheet.ruleset().house_rules.critical_range);

    CheckResult {
        label,
        ability,
        bonus,
        mode,
        outcome: resolve(&request, source),
    }
}

/// "sleight_of_hand" -> "Sleight Of Hand"
fn display_name(skill: &str) -> String {
    crate::stats::skill_key(skill)
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
