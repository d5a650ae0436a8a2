//! Derived character statistics.
//!
//! Pure functions over an [`AbilityProfile`]: modifiers, save and skill
//! bonuses, passive scores, armor class and encumbrance. None of them fail
//! and none of them overflow; arithmetic saturates.

pub mod armor;
pub mod encumbrance;
pub mod profile;

pub use armor::{ArmorClassInput, EquippedArmor, armor_class};
pub use encumbrance::{Encumbrance, encumbrance_status};
pub use profile::{AbilityProfile, skill_key};

use ds_core::Ability;

/// Base of every passive score.
pub const PASSIVE_BASE: i32 = 10;

/// Pounds of carrying capacity per point of strength.
pub const CAPACITY_PER_STRENGTH: i32 = 15;

/// `floor((score - 10) / 2)`, rounding toward negative infinity.
///
/// ```
/// use ds_mechanics::stats::ability_modifier;
/// assert_eq!(ability_modifier(9), -1);
/// assert_eq!(ability_modifier(16), 3);
/// ```
pub fn ability_modifier(score: i32) -> i32 {
    // i64 keeps score - 10 from overflowing near i32::MIN
    (i64::from(score) - 10).div_euclid(2) as i32
}

/// Modifier for a saving throw, adding the proficiency bonus when trained.
pub fn saving_throw_bonus(profile: &AbilityProfile, ability: Ability) -> i32 {
    let modifier = ability_modifier(profile.scores.get(ability));
    let tier = profile.save_proficiency(ability).multiplier();
    modifier.saturating_add(tier.saturating_mul(profile.proficiency_bonus))
}

/// Modifier for a skill check: the governing ability's modifier plus
/// 0, 1, or 2 times the proficiency bonus.
pub fn skill_bonus(profile: &AbilityProfile, skill: &str, governing: Ability) -> i32 {
    let modifier = ability_modifier(profile.scores.get(governing));
    let tier = profile.skill_proficiency(skill).multiplier();
    modifier.saturating_add(tier.saturating_mul(profile.proficiency_bonus))
}

/// `10 + bonus`.
pub fn passive_score(bonus: i32) -> i32 {
    PASSIVE_BASE.saturating_add(bonus)
}

/// Proficiency bonus by character level: +2 at 1-4, +3 at 5-8, up to +6.
pub fn proficiency_bonus_for_level(level: u32) -> i32 {
    let steps = level.max(1).saturating_sub(1) / 4;
    2i32.saturating_add(i32::try_from(steps).unwrap_or(i32::MAX))
}

/// Pounds a character can carry before they can't move at all.
pub fn carrying_capacity(strength: i32) -> i32 {
    strength.saturating_mul(CAPACITY_PER_STRENGTH)
}

#[cfg(test)]
mod tests {
    use ds_core::{AbilityScores, Proficiency};
    use proptest::prelude::*;

    use super::*;

    fn fighter() -> AbilityProfile {
        let scores = AbilityScores::uniform(10)
            .with(Ability::Strength, 16)
            .with(Ability::Dexterity, 14)
            .with(Ability::Wisdom, 12);
        AbilityProfile::new(scores, 2)
            .with_save(Ability::Strength, Proficiency::Proficient)
            .with_skill("athletics", Proficiency::Proficient)
            .with_skill("perception", Proficiency::Expertise)
    }

    #[test]
    fn modifier_spot_values() {
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(16), 3);
        assert_eq!(ability_modifier(20), 5);
        assert_eq!(ability_modifier(30), 10);
    }

    #[test]
    fn modifier_extremes_do_not_overflow() {
        assert_eq!(ability_modifier(i32::MIN), (i32::MIN / 2) - 5);
        assert_eq!(ability_modifier(i32::MAX), (i32::MAX - 10) / 2);
    }

    #[test]
    fn save_bonus() {
        let profile = fighter();
        assert_eq!(saving_throw_bonus(&profile, Ability::Strength), 5);
        assert_eq!(saving_throw_bonus(&profile, Ability::Dexterity), 2);
    }

    #[test]
    fn untrained_save_is_the_modifier() {
        let profile = AbilityProfile::new(AbilityScores::uniform(10).with(Ability::Wisdom, 16), 3);
        assert_eq!(saving_throw_bonus(&profile, Ability::Wisdom), 3);
    }

    #[test]
    fn skill_bonus_tiers() {
        let profile = fighter();
        assert_eq!(skill_bonus(&profile, "athletics", Ability::Strength), 5);
        assert_eq!(skill_bonus(&profile, "stealth", Ability::Dexterity), 2);
        assert_eq!(skill_bonus(&profile, "Perception", Ability::Wisdom), 5);
    }

    #[test]
    fn passive() {
        assert_eq!(passive_score(3), 13);
        assert_eq!(passive_score(-1), 9);
        assert_eq!(passive_score(i32::MAX), i32::MAX);
    }

    #[test]
    fn proficiency_by_level() {
        assert_eq!(proficiency_bonus_for_level(0), 2);
        assert_eq!(proficiency_bonus_for_level(1), 2);
        assert_eq!(proficiency_bonus_for_level(4), 2);
        assert_eq!(proficiency_bonus_for_level(5), 3);
        assert_eq!(proficiency_bonus_for_level(9), 4);
        assert_eq!(proficiency_bonus_for_level(17), 6);
        assert_eq!(proficiency_bonus_for_level(20), 6);
    }

    #[test]
    fn capacity() {
        assert_eq!(carrying_capacity(15), 225);
        assert_eq!(carrying_capacity(i32::MAX), i32::MAX);
    }

    proptest! {
        #[test]
        fn modifier_is_floor_of_half(score in -1000i32..1000) {
            let expected = ((f64::from(score) - 10.0) / 2.0).floor() as i32;
            prop_assert_eq!(ability_modifier(score), expected);
        }

        #[test]
        fn modifier_is_monotonic(score in -1000i32..1000) {
            prop_assert!(ability_modifier(score) <= ability_modifier(score + 1));
        }

        #[test]
        fn expertise_never_below_proficient(score in 1i32..=30, bonus in 0i32..=6) {
            let scores = AbilityScores::uniform(score);
            let proficient = AbilityProfile::new(scores, bonus).with_skill("stealth", Proficiency::Proficient);
            let expert = AbilityProfile::new(scores, bonus).with_skill("stealth", Proficiency::Expertise);
            let untrained = AbilityProfile::new(scores, bonus);
            let p = skill_bonus(&proficient, "stealth", Ability::Dexterity);
            let e = skill_bonus(&expert, "stealth", Ability::Dexterity);
            let u = skill_bonus(&untrained, "stealth", Ability::Dexterity);
            prop_assert!(u <= p && p <= e);
            prop_assert_eq!(e - u, 2 * bonus);
        }
    }
}
