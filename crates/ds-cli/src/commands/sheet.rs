use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use ds_core::{Ability, Proficiency};
use ds_mechanics::{CharacterSheet, Encumbrance};

pub fn run(path: &Path, rules: Option<&Path>, json: bool) -> Result<(), String> {
    let record = super::load_record(path)?;
    let ruleset = super::load_rules(rules)?;
    let sheet = CharacterSheet::from_record(&record, &ruleset);
    let stats = &sheet.stats;

    if json {
        let out = serde_json::to_string_pretty(stats).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "  {} [{}]",
        record.name.bold(),
        format!("level {}, {}", record.level, ruleset.name).dimmed()
    );
    println!();
    println!(
        "  HP {}   AC {}   Initiative {}   Proficiency {}",
        record.hit_points,
        stats.armor_class,
        signed(stats.initiative),
        signed(stats.proficiency_bonus)
    );
    println!(
        "  Passive Perception {}   Investigation {}   Insight {}",
        stats.passive_perception, stats.passive_investigation, stats.passive_insight
    );
    println!();

    let mut abilities = Table::new();
    abilities.set_content_arrangement(ContentArrangement::Dynamic);
    abilities.set_header(vec!["Ability", "Score", "Mod", "Save"]);
    for ability in Ability::ALL {
        let save = stats.saves.get(&ability).copied().unwrap_or_default();
        let trained = if sheet.profile.save_proficiency(ability).is_trained() {
            "*"
        } else {
            ""
        };
        abilities.add_row(vec![
            ability.to_string(),
            sheet.profile.scores.get(ability).to_string(),
            signed(stats.modifiers.get(&ability).copied().unwrap_or_default()),
            format!("{}{trained}", signed(save)),
        ]);
    }
    println!("{abilities}");
    println!();

    let mut skills = Table::new();
    skills.set_content_arrangement(ContentArrangement::Dynamic);
    skills.set_header(vec!["Skill", "Ability", "Bonus"]);
    for line in &stats.skills {
        let marker = match line.proficiency {
            Proficiency::None => "",
            Proficiency::Proficient => " *",
            Proficiency::Expertise => " **",
        };
        skills.add_row(vec![
            format!("{}{marker}", line.key),
            line.ability.abbreviation().to_string(),
            signed(line.bonus),
        ]);
    }
    println!("{skills}");

    if !record.resources.is_empty() {
        println!();
        println!("  {}", "Resources".bold().underline());
        for resource in &record.resources {
            let line = resource.to_string();
            if resource.is_empty() {
                println!("  {}", line.dimmed());
            } else {
                println!("  {line}");
            }
        }
    }

    let active: Vec<&str> = record.active_effects().map(|e| e.name.as_str()).collect();
    if !active.is_empty() {
        println!();
        println!("  {} {}", "Active:".bold(), active.join(", ").yellow());
    }

    if !record.inventory.is_empty() {
        println!();
        let mut items = Table::new();
        items.set_content_arrangement(ContentArrangement::Dynamic);
        items.set_header(vec!["Item", "Equipped", "Weight", "Notes"]);
        for item in &record.inventory {
            let detail = match (item.as_weapon(), item.as_armor()) {
                (Some(w), _) => format!("{} {}", w.damage, w.damage_type),
                (_, Some(a)) => format!("AC {} ({})", a.base_ac, a.category),
                _ if item.is_shield() => "+2 AC".to_string(),
                _ => item.notes.clone(),
            };
            items.add_row(vec![
                item.name.clone(),
                if item.equipped { "yes" } else { "" }.to_string(),
                format!("{} lb", item.weight),
                detail,
            ]);
        }
        println!("{items}");
    }

    println!();
    println!("  Coins: {}", record.coins);
    let load = format!(
        "{:.1} / {} lb",
        stats.carried_weight, stats.carrying_capacity
    );
    match stats.encumbrance {
        Encumbrance::Normal => println!("  Load:  {load}"),
        other => println!("  Load:  {load} {}", other.to_string().yellow().bold()),
    }
    if stats.stealth_disadvantage {
        println!("  {}", "Stealth at disadvantage (armor)".dimmed());
    }

    Ok(())
}

fn signed(n: i32) -> String {
    if n >= 0 { format!("+{n}") } else { n.to_string() }
}
