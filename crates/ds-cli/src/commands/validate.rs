use std::path::Path;

use colored::Colorize;
use ds_mechanics::validate_record;

pub fn run(path: &Path, rules: Option<&Path>) -> Result<(), String> {
    let record = super::load_record(path)?;
    let ruleset = super::load_rules(rules)?;
    let issues = validate_record(&record, &ruleset);

    if issues.is_empty() {
        println!("  All checks passed for '{}'.", record.name);
        return Ok(());
    }

    for issue in &issues {
        let line = issue.to_string();
        if issue.is_error() {
            eprintln!("  {}", line.red());
        } else {
            eprintln!("  {}", line.yellow());
        }
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    let warnings = issues.len() - errors;
    eprintln!(
        "  {} error{}, {} warning{}",
        errors,
        if errors == 1 { "" } else { "s" },
        warnings,
        if warnings == 1 { "" } else { "s" },
    );

    if errors > 0 {
        Err("validation failed with errors".into())
    } else {
        Ok(())
    }
}
