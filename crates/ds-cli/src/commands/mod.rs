pub mod attack;
pub mod check;
pub mod coin;
pub mod equip;
pub mod hp;
pub mod init;
pub mod resource;
pub mod rest;
pub mod roll;
pub mod sheet;
pub mod validate;

use std::fs;
use std::path::Path;

use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use ds_core::CharacterRecord;
use ds_mechanics::rules::preset;
use ds_mechanics::{RollMode, RollOutcome, RuleSet};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Flags shared by every command that rolls a d20.
#[derive(Args, Debug, Clone, Default)]
pub struct RollFlags {
    /// Roll with advantage
    #[arg(short = 'a', long = "adv")]
    pub advantage: bool,

    /// Roll with disadvantage
    #[arg(short = 'd', long = "dis")]
    pub disadvantage: bool,

    /// Seed the dice for a repeatable roll
    #[arg(long)]
    pub seed: Option<u64>,
}

impl RollFlags {
    pub fn mode(&self) -> RollMode {
        RollMode::from_flags(self.advantage, self.disadvantage)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestArg {
    Short,
    Long,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpAction {
    /// Take damage (temporary HP first)
    Damage,
    /// Regain hit points
    Heal,
    /// Set temporary hit points
    Temp,
    /// Set current hit points
    Set,
    /// Set maximum hit points
    Max,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CoinAction {
    /// Add coins, e.g. 15gp
    Add {
        /// Amount with denomination (cp, sp, ep, gp, pp)
        amount: String,
    },
    /// Pay coins, making change from larger coins if needed
    Remove {
        /// Amount with denomination (cp, sp, ep, gp, pp)
        amount: String,
    },
    /// Exchange coins for the fewest possible
    Consolidate,
    /// Show the purse
    Show,
}

/// Read a character file.
pub fn load_record(path: &Path) -> Result<CharacterRecord, String> {
    let json = fs::read_to_string(path).map_err(|e| {
        format!(
            "cannot read {}: {e} (run `ds init` to create one)",
            path.display()
        )
    })?;
    CharacterRecord::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}

/// Stamp and write a character file.
pub fn save_record(path: &Path, record: &mut CharacterRecord) -> Result<(), String> {
    record.touch();
    let json = record.to_json_pretty().map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))
}

/// Rules from a file, a preset name, or the SRD default.
pub fn load_rules(rules: Option<&Path>) -> Result<RuleSet, String> {
    let Some(path) = rules else {
        return Ok(preset::srd_5e());
    };
    if path.is_file() {
        return RuleSet::from_path(path).map_err(|e| e.to_string());
    }
    path.to_str()
        .and_then(preset::by_name)
        .ok_or_else(|| format!("no rules file or preset named '{}'", path.display()))
}

/// Color a roll by its critical flags.
pub fn paint(outcome: &RollOutcome, text: String) -> String {
    if outcome.is_critical_high {
        text.green().bold().to_string()
    } else if outcome.is_critical_low {
        text.red().bold().to_string()
    } else {
        text
    }
}

/// Print a dimmed mode tag after a roll when it isn't a normal roll.
pub fn mode_tag(mode: RollMode) -> String {
    match mode {
        RollMode::Normal => String::new(),
        other => format!(" ({other})").dimmed().to_string(),
    }
}
