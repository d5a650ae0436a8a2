//! Built-in rulesets.

use ds_core::Ability;

use crate::rules::{HouseRules, RuleSet, SkillTable};

/// The eighteen SRD skills and their governing abilities.
pub const SRD_SKILLS: [(&str, Ability); 18] = [
    ("acrobatics", Ability::Dexterity),
    ("animal_handling", Ability::Wisdom),
    ("arcana", Ability::Intelligence),
    ("athletics", Ability::Strength),
    ("deception", Ability::Charisma),
    ("history", Ability::Intelligence),
    ("insight", Ability::Wisdom),
    ("intimidation", Ability::Charisma),
    ("investigation", Ability::Intelligence),
    ("medicine", Ability::Wisdom),
    ("nature", Ability::Intelligence),
    ("perception", Ability::Wisdom),
    ("performance", Ability::Charisma),
    ("persuasion", Ability::Charisma),
    ("religion", Ability::Intelligence),
    ("sleight_of_hand", Ability::Dexterity),
    ("stealth", Ability::Dexterity),
    ("survival", Ability::Wisdom),
];

/// Skill table with the SRD skills.
pub fn srd_skills() -> SkillTable {
    SRD_SKILLS
        .iter()
        .fold(SkillTable::new(), |table, (name, ability)| {
            table.with(name, *ability)
        })
}

/// Fifth edition SRD rules with no house rules.
pub fn srd_5e() -> RuleSet {
    RuleSet {
        name: "SRD 5e".to_string(),
        skills: srd_skills(),
        house_rules: HouseRules::default(),
    }
}

/// SRD rules with Great Weapon Fighting rerolls on 1s and 2s and variant
/// encumbrance.
pub fn srd_5e_gwf() -> RuleSet {
    RuleSet {
        name: "SRD 5e (Great Weapon Fighting)".to_string(),
        skills: srd_skills(),
        house_rules: HouseRules {
            reroll_threshold: Some(2),
            variant_encumbrance: true,
            ..HouseRules::default()
        },
    }
}

/// Look up a preset by name.
pub fn by_name(name: &str) -> Option<RuleSet> {
    match name.to_lowercase().as_str() {
        "srd" | "srd5e" | "srd_5e" | "5e" => Some(srd_5e()),
        "gwf" | "srd_5e_gwf" => Some(srd_5e_gwf()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srd_has_eighteen_skills() {
        let ruleset = srd_5e();
        assert_eq!(ruleset.skills.len(), 18);
        assert_eq!(ruleset.skill_ability("Athletics").unwrap(), Ability::Strength);
        assert_eq!(
            ruleset.skill_ability("Sleight of Hand").unwrap(),
            Ability::Dexterity
        );
        assert_eq!(ruleset.skill_ability("perception").unwrap(), Ability::Wisdom);
    }

    #[test]
    fn every_ability_but_constitution_governs_a_skill() {
        let table = srd_skills();
        for ability in Ability::ALL {
            let governs = table.iter().any(|(_, a)| a == ability);
            assert_eq!(governs, ability != Ability::Constitution, "{ability}");
        }
    }

    #[test]
    fn gwf_preset() {
        let ruleset = srd_5e_gwf();
        assert_eq!(ruleset.house_rules.reroll_threshold, Some(2));
        assert_eq!(ruleset.house_rules.critical_range, 20);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("SRD").map(|r| r.name), Some("SRD 5e".to_string()));
        assert!(by_name("gwf").is_some());
        assert!(by_name("pathfinder").is_none());
    }
}
