//! CLI frontend for the dragonsheet character sheet.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use commands::{CoinAction, HpAction, RestArg, RollFlags};

#[derive(Parser)]
#[command(
    name = "ds",
    about = "dragonsheet: a D&D 5e character sheet for the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Character file
    #[arg(
        short,
        long,
        global = true,
        default_value = "character.json",
        env = "DS_CHARACTER"
    )]
    file: PathBuf,

    /// Rules JSON file (default: built-in SRD 5e)
    #[arg(long, global = true, env = "DS_RULES")]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new character file from the fighter template
    Init {
        /// Character name
        #[arg(short, long, default_value = "Thangrim")]
        name: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the derived character sheet
    Sheet {
        /// Print derived stats as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Roll a dice formula such as 2d6+3 or d20
    Roll {
        /// Dice formula
        formula: String,

        /// Reroll dice at or below this value once
        #[arg(long)]
        reroll: Option<u32>,

        /// Add a bonus die, e.g. d6
        #[arg(long)]
        bonus: Option<String>,

        /// Lowest natural d20 that counts as a critical
        #[arg(long, default_value_t = 20)]
        crit_range: u32,

        #[command(flatten)]
        flags: RollFlags,
    },

    /// Roll a skill check, ability check, or saving throw
    Check {
        /// Skill (e.g. athletics) or ability (e.g. str)
        name: String,

        /// Roll a saving throw instead of a check (abilities only)
        #[arg(short, long)]
        save: bool,

        #[command(flatten)]
        flags: RollFlags,
    },

    /// Attack with a weapon from the inventory
    Attack {
        /// Weapon name (default: first equipped weapon)
        weapon: Option<String>,

        #[command(flatten)]
        flags: RollFlags,
    },

    /// Take a short or long rest
    Rest {
        /// Which rest
        #[arg(value_enum)]
        kind: RestArg,
    },

    /// Change hit points
    Hp {
        /// What to do
        #[arg(value_enum)]
        action: HpAction,

        /// How much
        amount: u32,
    },

    /// Spend one use of a resource such as Second Wind
    Spend {
        /// Resource name
        resource: String,
    },

    /// Toggle a status effect on or off
    Effect {
        /// Effect name
        name: String,
    },

    /// Equip or unequip an item
    Equip {
        /// Item name
        item: String,
    },

    /// Manage the coin purse
    Coin {
        #[command(subcommand)]
        action: CoinAction,
    },

    /// Check the character file for problems
    Validate,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file = cli.file.as_path();
    let rules = cli.rules.as_deref();

    let result = match cli.command {
        Commands::Init { name, force } => commands::init::run(file, &name, force),
        Commands::Sheet { json } => commands::sheet::run(file, rules, json),
        Commands::Roll {
            formula,
            reroll,
            bonus,
            crit_range,
            flags,
        } => commands::roll::run(&formula, reroll, bonus.as_deref(), crit_range, &flags),
        Commands::Check { name, save, flags } => {
            commands::check::run(file, rules, &name, save, &flags)
        }
        Commands::Attack { weapon, flags } => {
            commands::attack::run(file, rules, weapon.as_deref(), &flags)
        }
        Commands::Rest { kind } => commands::rest::run(file, kind),
        Commands::Hp { action, amount } => commands::hp::run(file, action, amount),
        Commands::Spend { resource } => commands::resource::spend(file, &resource),
        Commands::Effect { name } => commands::resource::toggle_effect(file, &name),
        Commands::Equip { item } => commands::equip::run(file, &item),
        Commands::Coin { action } => commands::coin::run(file, action),
        Commands::Validate => commands::validate::run(file, rules),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
