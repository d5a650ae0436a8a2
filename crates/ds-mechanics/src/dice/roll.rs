//! Roll results.

use serde::{Deserialize, Serialize};

use super::{DiceTag, Die};

/// The result of rolling a single die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The type of die that was rolled.
    pub die: Die,
    /// Where this die came from.
    pub tag: DiceTag,
    /// The face that stands (after any reroll).
    pub value: u32,
    /// The first face, when it was rerolled.
    pub rerolled_from: Option<u32>,
    /// Whether this die counts toward the total.
    pub kept: bool,
}

impl DieResult {
    /// A kept die with no reroll history.
    pub fn new(die: Die, tag: DiceTag, value: u32) -> Self {
        Self {
            die,
            tag,
            value,
            rerolled_from: None,
            kept: true,
        }
    }
}

/// The resolved outcome of a [`RollRequest`](super::RollRequest).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Every die rolled, in roll order. Dropped advantage dice are included
    /// with `kept == false`.
    pub individual_rolls: Vec<DieResult>,
    /// The formula's fixed modifier.
    pub modifier: i32,
    /// Kept dice plus modifier plus bonus dice.
    pub total: i32,
    /// Natural high on a lone d20.
    pub is_critical_high: bool,
    /// Natural 1 on a lone d20.
    pub is_critical_low: bool,
}

impl RollOutcome {
    /// Dice that count toward the total.
    pub fn kept(&self) -> impl Iterator<Item = &DieResult> {
        self.individual_rolls.iter().filter(|d| d.kept)
    }

    /// The kept formula die, for lone-d20 rolls.
    pub fn natural(&self) -> Option<u32> {
        self.kept()
            .find(|d| d.tag != DiceTag::Bonus)
            .map(|d| d.value)
    }

    /// Sum of kept dice, excluding the modifier.
    pub fn dice_total(&self) -> i64 {
        self.kept().map(|d| i64::from(d.value)).sum()
    }

    /// Get all die results with a specific tag.
    pub fn by_tag(&self, tag: DiceTag) -> Vec<&DieResult> {
        self.individual_rolls
            .iter()
            .filter(|d| d.tag == tag)
            .collect()
    }

    /// Number of dice rolled, including dropped ones.
    pub fn count(&self) -> usize {
        self.individual_rolls.len()
    }
}

impl std::fmt::Display for RollOutcome {
    /// Renders like `[14, (3)] +5 = 19`. Dropped dice are parenthesized,
    /// rerolled dice show their first face as `1>4`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self
            .individual_rolls
            .iter()
            .map(|d| {
                let face = match d.rerolled_from {
                    Some(first) => format!("{first}>{}", d.value),
                    None => d.value.to_string(),
                };
                if d.kept { face } else { format!("({face})") }
            })
            .collect();
        write!(f, "[{}]", values.join(", "))?;
        if self.modifier > 0 {
            write!(f, " +{}", self.modifier)?;
        } else if self.modifier < 0 {
            write!(f, " {}", self.modifier)?;
        }
        write!(f, " = {}", self.total)
    }
}
