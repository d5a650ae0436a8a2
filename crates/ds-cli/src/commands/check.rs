use std::path::Path;

use ds_core::Ability;
use ds_mechanics::{CharacterSheet, CheckResult, ability_check, saving_throw, skill_check};

use super::RollFlags;

pub fn run(
    path: &Path,
    rules: Option<&Path>,
    name: &str,
    save: bool,
    flags: &RollFlags,
) -> Result<(), String> {
    let record = super::load_record(path)?;
    let ruleset = super::load_rules(rules)?;
    let sheet = CharacterSheet::from_record(&record, &ruleset);
    let mut rng = flags.rng();

    let result = match name.parse::<Ability>() {
        Ok(ability) if save => saving_throw(&sheet, ability, flags.mode(), &mut rng),
        Ok(ability) => ability_check(&sheet, ability, flags.mode(), &mut rng),
        Err(_) if save => return Err(format!("'{name}' is not an ability; saves need one")),
        Err(_) => skill_check(&sheet, name, flags.mode(), &mut rng).map_err(|e| e.to_string())?,
    };

    print_check(&result);
    Ok(())
}

pub fn print_check(result: &CheckResult) {
    println!("  {}", super::paint(&result.outcome, result.to_string()));
}
