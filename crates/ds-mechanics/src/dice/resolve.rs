//! Turning a roll request into an outcome.
//!
//! Resolution order:
//! 1. roll every formula die;
//! 2. for a lone d20 with advantage or disadvantage, roll an alternate d20;
//! 3. reroll each of those dice once if it landed at or below the reroll
//!    threshold, keeping the second face whatever it is;
//! 4. keep the higher (advantage) or lower (disadvantage) d20;
//! 5. roll the bonus die, which is never rerolled;
//! 6. total the kept dice, the modifier, and the bonus die.
//!
//! Critical flags only apply to a formula of exactly one d20 and read the
//! kept die.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::formula::DiceFormula;
use super::roll::{DieResult, RollOutcome};
use super::source::RollSource;
use super::{DiceTag, Die};
use crate::error::FormulaError;

/// Lowest natural value that counts as a critical high by default.
pub const DEFAULT_CRITICAL_RANGE: u32 = 20;

/// Whether a lone d20 is rolled once or twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollMode {
    /// Roll once.
    #[default]
    Normal,
    /// Roll twice, keep the higher.
    Advantage,
    /// Roll twice, keep the lower.
    Disadvantage,
}

impl RollMode {
    /// Mode from a pair of flags. Both together cancel out.
    pub fn from_flags(advantage: bool, disadvantage: bool) -> Self {
        match (advantage, disadvantage) {
            (true, false) => Self::Advantage,
            (false, true) => Self::Disadvantage,
            _ => Self::Normal,
        }
    }

    /// Combine two sources of advantage/disadvantage.
    ///
    /// Any advantage and any disadvantage together roll normally.
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Normal, m) | (m, Self::Normal) => m,
            (a, b) if a == b => a,
            _ => Self::Normal,
        }
    }
}

impl fmt::Display for RollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Advantage => write!(f, "advantage"),
            Self::Disadvantage => write!(f, "disadvantage"),
        }
    }
}

/// A dice formula plus the flags that control how it resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    /// What to roll.
    pub formula: DiceFormula,
    /// Advantage or disadvantage; only affects a lone d20.
    #[serde(default)]
    pub mode: RollMode,
    /// Dice landing at or below this value are rerolled once.
    #[serde(default)]
    pub reroll_threshold: Option<u32>,
    /// An extra die added to the total, never rerolled.
    #[serde(default)]
    pub bonus_die: Option<Die>,
    /// Lowest natural d20 that counts as a critical high (clamped to 2..=20).
    #[serde(default = "default_critical_range")]
    pub critical_range: u32,
}

impl RollRequest {
    /// A plain request for an already-parsed formula.
    pub fn new(formula: DiceFormula) -> Self {
        Self {
            formula,
            mode: RollMode::Normal,
            reroll_threshold: None,
            bonus_die: None,
            critical_range: DEFAULT_CRITICAL_RANGE,
        }
    }

    /// Parse a formula string into a plain request.
    pub fn parse(formula: &str) -> Result<Self, FormulaError> {
        DiceFormula::parse(formula).map(Self::new)
    }

    /// Set the roll mode.
    pub fn with_mode(mut self, mode: RollMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the reroll threshold.
    pub fn with_reroll_threshold(mut self, threshold: Option<u32>) -> Self {
        self.reroll_threshold = threshold;
        self
    }

    /// Set the bonus die.
    pub fn with_bonus_die(mut self, die: Option<Die>) -> Self {
        self.bonus_die = die;
        self
    }

    /// Set the critical range.
    pub fn with_critical_range(mut self, range: u32) -> Self {
        self.critical_range = range;
        self
    }
}

fn default_critical_range() -> u32 {
    DEFAULT_CRITICAL_RANGE
}

/// Resolve a request against a source of die faces.
///
/// Given the same request and the same sequence of faces, the outcome is
/// always the same.
pub fn resolve(request: &RollRequest, source: &mut impl RollSource) -> RollOutcome {
    let mut dice = Vec::new();

    if let DiceFormula::Dice { count, sides, .. } = request.formula {
        let die = Die::from_sides(sides).unwrap_or(Die::Custom(sides));

        for _ in 0..count {
            dice.push(DieResult::new(
                die,
                DiceTag::Primary,
                source.roll_die(die.sides()),
            ));
        }

        let contested = request.formula.is_single_d20() && request.mode != RollMode::Normal;
        if contested {
            dice.push(DieResult::new(
                die,
                DiceTag::Alternate,
                source.roll_die(die.sides()),
            ));
        } else if request.mode != RollMode::Normal {
            tracing::debug!(
                formula = %request.formula,
                mode = %request.mode,
                "roll mode ignored: not a lone d20"
            );
        }

        if let Some(threshold) = request.reroll_threshold {
            for result in &mut dice {
                if result.value <= threshold {
                    result.rerolled_from = Some(result.value);
                    result.value = source.roll_die(die.sides());
                }
            }
        }

        if contested {
            let (primary, alternate) = (dice[0].value, dice[1].value);
            let keep_alternate = match request.mode {
                RollMode::Advantage => alternate > primary,
                RollMode::Disadvantage => alternate < primary,
                RollMode::Normal => false,
            };
            if keep_alternate {
                dice[0].kept = false;
            } else {
                dice[1].kept = false;
            }
        }
    }

    // a zero-sided die has no faces to add
    if let Some(bonus) = request.bonus_die.filter(|d| d.sides() > 0) {
        dice.push(DieResult::new(
            bonus,
            DiceTag::Bonus,
            source.roll_die(bonus.sides()),
        ));
    }

    let modifier = request.formula.modifier();
    let mut outcome = RollOutcome {
        individual_rolls: dice,
        modifier,
        total: 0,
        is_critical_high: false,
        is_critical_low: false,
    };
    outcome.total = (outcome.dice_total() + i64::from(modifier))
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;

    let natural = outcome
        .natural()
        .filter(|_| request.formula.is_single_d20());
    if let Some(natural) = natural {
        let range = request.critical_range.clamp(2, 20);
        outcome.is_critical_high = natural >= range;
        outcome.is_critical_low = natural == 1;
    }

    tracing::debug!(
        formula = %request.formula,
        mode = %request.mode,
        total = outcome.total,
        crit = outcome.is_critical_high,
        fumble = outcome.is_critical_low,
        "resolved roll"
    );

    outcome
}

/// Parse and resolve a formula string in one step.
///
/// Malformed formulas come back as an error rather than a panic.
pub fn resolve_formula(
    formula: &str,
    mode: RollMode,
    source: &mut impl RollSource,
) -> Result<RollOutcome, FormulaError> {
    let request = RollRequest::parse(formula)?.with_mode(mode);
    Ok(resolve(&request, source))
}
