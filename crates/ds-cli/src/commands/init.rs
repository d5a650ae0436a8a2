use std::path::Path;

use ds_core::{
    Ability, AbilityScores, CharacterRecord, Coins, HitPoints, Item, ItemKind, Proficiency,
    Recharge, Resource, StatusEffect,
};

pub fn run(path: &Path, name: &str, force: bool) -> Result<(), String> {
    if path.exists() && !force {
        return Err(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        ));
    }

    let mut record = template(name);
    super::save_record(path, &mut record)?;

    println!("Created character '{}' in {}", name, path.display());
    println!();
    println!("Get started:");
    println!("  ds sheet              # Show the full sheet");
    println!("  ds check athletics    # Roll a skill check");
    println!("  ds attack             # Attack with your equipped weapon");
    println!("  ds rest long          # Recover HP and resources");

    Ok(())
}

/// A 5th-level rune knight fighter.
fn template(name: &str) -> CharacterRecord {
    let mut record = CharacterRecord::new(name);
    record.level = 5;
    record.abilities = AbilityScores {
        strength: 18,
        dexterity: 12,
        constitution: 16,
        intelligence: 10,
        wisdom: 13,
        charisma: 8,
    };
    for ability in [Ability::Strength, Ability::Constitution] {
        record
            .save_proficiencies
            .insert(ability, Proficiency::Proficient);
    }
    for skill in ["athletics", "intimidation", "perception", "survival"] {
        record
            .skill_proficiencies
            .insert(skill.to_string(), Proficiency::Proficient);
    }

    record.hit_points = HitPoints::new(34);
    record.resources = vec![
        Resource::new("Second Wind", 3, Recharge::LongRest),
        Resource::new("Action Surge", 1, Recharge::ShortRest),
        Resource::new("Giant's Might", 2, Recharge::LongRest),
        Resource::new("Fire Rune", 1, Recharge::ShortRest),
        Resource::new("Cloud Rune", 1, Recharge::ShortRest),
        Resource::new("Tactical Mind", 3, Recharge::LongRest),
    ];
    record.effects = vec![
        StatusEffect::new("Giant's Might")
            .with_advantage_on(Ability::Strength)
            .with_advantage_on(Ability::Constitution)
            .with_bonus_damage_die(6),
    ];

    record.add_item(Item::weapon_template("Warhammer").equipped(true));
    record.add_item(Item::armor_template("Plate Armor").equipped(true));
    let mut shield = Item::new("Shield", ItemKind::Shield).equipped(true);
    shield.weight = 6.0;
    shield.cost = 10.0;
    record.add_item(shield);

    record.coins = Coins {
        gp: 15,
        sp: 8,
        ..Coins::default()
    };
    record
}

#[cfg(test)]
mod tests {
    use ds_mechanics::{CharacterSheet, rules::preset, validate_record};

    use super::*;

    #[test]
    fn template_is_valid() {
        let record = template("Thangrim");
        assert!(validate_record(&record, &preset::srd_5e()).is_empty());
    }

    #[test]
    fn template_sheet_numbers() {
        let record = template("Thangrim");
        let rules = preset::srd_5e();
        let sheet = CharacterSheet::from_record(&record, &rules);
        assert_eq!(sheet.stats.armor_class, 20);
        assert_eq!(sheet.stats.proficiency_bonus, 3);
        assert_eq!(sheet.stats.passive_perception, 14);
    }
}
