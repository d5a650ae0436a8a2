use std::path::Path;

use colored::Colorize;

pub fn spend(path: &Path, name: &str) -> Result<(), String> {
    let mut record = super::load_record(path)?;

    let resource = record.resource_mut(name).map_err(|e| e.to_string())?;
    resource.spend().map_err(|e| e.to_string())?;
    let line = resource.to_string();

    super::save_record(path, &mut record)?;
    println!("  {line}");
    Ok(())
}

pub fn toggle_effect(path: &Path, name: &str) -> Result<(), String> {
    let mut record = super::load_record(path)?;

    let lower = name.to_lowercase();
    let effect = record
        .effects
        .iter_mut()
        .find(|e| e.name.to_lowercase() == lower)
        .ok_or_else(|| format!("no effect named '{name}'"))?;
    effect.active = !effect.active;
    let status = if effect.active {
        format!("{} is active", effect.name).yellow().to_string()
    } else {
        format!("{} has ended", effect.name)
    };

    super::save_record(path, &mut record)?;
    println!("  {status}");
    Ok(())
}
