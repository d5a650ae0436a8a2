use ds_mechanics::{Die, RollRequest, resolve};

use super::RollFlags;

pub fn run(
    formula: &str,
    reroll: Option<u32>,
    bonus: Option<&str>,
    crit_range: u32,
    flags: &RollFlags,
) -> Result<(), String> {
    let bonus_die = bonus
        .map(|tag| Die::from_str_tag(tag).ok_or_else(|| format!("invalid bonus die: {tag}")))
        .transpose()?;

    let request = RollRequest::parse(formula)
        .map_err(|e| e.to_string())?
        .with_mode(flags.mode())
        .with_reroll_threshold(reroll)
        .with_bonus_die(bonus_die)
        .with_critical_range(crit_range);

    let outcome = resolve(&request, &mut flags.rng());

    let mut line = format!("{}: {outcome}", request.formula);
    if outcome.is_critical_high {
        line.push_str(" CRITICAL");
    } else if outcome.is_critical_low {
        line.push_str(" FUMBLE");
    }
    println!(
        "  {}{}",
        super::paint(&outcome, line),
        super::mode_tag(request.mode)
    );

    Ok(())
}
