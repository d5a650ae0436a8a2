use std::path::Path;

use colored::Colorize;

use super::HpAction;

pub fn run(path: &Path, action: HpAction, amount: u32) -> Result<(), String> {
    let mut record = super::load_record(path)?;
    let value = i32::try_from(amount).map_err(|_| format!("{amount} is too large"))?;
    let hp = &mut record.hit_points;

    match action {
        HpAction::Damage => {
            hp.damage(amount);
        }
        HpAction::Heal => {
            hp.heal(amount);
        }
        HpAction::Temp => {
            hp.set_temp(value);
        }
        HpAction::Set => {
            hp.set_current(value);
        }
        HpAction::Max => {
            hp.set_max(value);
        }
    }

    let line = format!("HP {}", record.hit_points);
    if record.hit_points.is_down() {
        println!("  {} {}", line, "DOWN".red().bold());
    } else {
        println!("  {line}");
    }

    super::save_record(path, &mut record)
}
