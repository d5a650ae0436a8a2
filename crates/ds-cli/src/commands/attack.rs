use std::path::Path;

use colored::Colorize;
use ds_mechanics::{CharacterSheet, attack};

use super::RollFlags;

pub fn run(
    path: &Path,
    rules: Option<&Path>,
    weapon: Option<&str>,
    flags: &RollFlags,
) -> Result<(), String> {
    let record = super::load_record(path)?;
    let ruleset = super::load_rules(rules)?;
    let sheet = CharacterSheet::from_record(&record, &ruleset);

    let item = match weapon {
        Some(name) => sheet.weapon(name).map_err(|e| e.to_string())?,
        None => sheet
            .weapons()
            .first()
            .copied()
            .ok_or("no weapons in inventory")?,
    };

    let result = attack(&sheet, item, flags.mode(), &mut flags.rng()).map_err(|e| e.to_string())?;

    super::check::print_check(&result.to_hit);
    println!(
        "  Damage: {} {}",
        result.damage.to_string().bold(),
        result.damage_type
    );
    Ok(())
}
