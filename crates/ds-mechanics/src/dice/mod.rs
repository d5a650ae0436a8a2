//! Dice formulas, roll sources, and resolution.
//!
//! A formula like `"2d6+3"` parses into a [`DiceFormula`]. A [`RollRequest`]
//! pairs it with advantage, reroll, and bonus-die options, and [`resolve`]
//! turns that into a [`RollOutcome`] using an injected [`RollSource`].

pub mod formula;
pub mod resolve;
pub mod roll;
pub mod source;

pub use formula::DiceFormula;
pub use resolve::{RollMode, RollRequest, resolve, resolve_formula};
pub use roll::{DieResult, RollOutcome};
pub use source::{RollSource, ScriptedRolls};

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
///
/// Serializes as its tag (`"d20"`). A zero-sided die is rejected on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// The die with the given number of sides, or `None` for zero.
    pub fn from_sides(sides: u32) -> Option<Self> {
        match sides {
            0 => None,
            4 => Some(Self::D4),
            6 => Some(Self::D6),
            8 => Some(Self::D8),
            10 => Some(Self::D10),
            12 => Some(Self::D12),
            20 => Some(Self::D20),
            100 => Some(Self::D100),
            n => Some(Self::Custom(n)),
        }
    }

    /// Parse a die from a string like "d20", "d6", "d100".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let sides = s.strip_prefix('d')?.parse::<u32>().ok()?;
        Self::from_sides(sides)
    }
}

impl TryFrom<String> for Die {
    type Error = String;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        Self::from_str_tag(&tag).ok_or_else(|| format!("invalid die: \"{tag}\""))
    }
}

impl From<Die> for String {
    fn from(die: Die) -> Self {
        die.to_string()
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// Where a die in a roll came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiceTag {
    /// One of the dice named by the formula.
    #[default]
    Primary,
    /// The second d20 rolled for advantage or disadvantage.
    Alternate,
    /// An extra die from a temporary buff.
    Bonus,
}

impl std::fmt::Display for DiceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Alternate => write!(f, "alternate"),
            Self::Bonus => write!(f, "bonus"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_sides() {
        assert_eq!(Die::D4.sides(), 4);
        assert_eq!(Die::D6.sides(), 6);
        assert_eq!(Die::D8.sides(), 8);
        assert_eq!(Die::D10.sides(), 10);
        assert_eq!(Die::D12.sides(), 12);
        assert_eq!(Die::D20.sides(), 20);
        assert_eq!(Die::D100.sides(), 100);
        assert_eq!(Die::Custom(30).sides(), 30);
    }

    #[test]
    fn die_from_sides() {
        assert_eq!(Die::from_sides(20), Some(Die::D20));
        assert_eq!(Die::from_sides(3), Some(Die::Custom(3)));
        assert_eq!(Die::from_sides(0), None);
    }

    #[test]
    fn die_from_str() {
        assert_eq!(Die::from_str_tag("d20"), Some(Die::D20));
        assert_eq!(Die::from_str_tag("D6"), Some(Die::D6));
        assert_eq!(Die::from_str_tag("d100"), Some(Die::D100));
        assert_eq!(Die::from_str_tag("d30"), Some(Die::Custom(30)));
        assert_eq!(Die::from_str_tag("d0"), None);
        assert_eq!(Die::from_str_tag("foo"), None);
    }

    #[test]
    fn die_display() {
        assert_eq!(Die::D20.to_string(), "d20");
        assert_eq!(Die::Custom(30).to_string(), "d30");
    }

    #[test]
    fn die_serializes_as_tag() {
        assert_eq!(serde_json::to_string(&Die::D6).unwrap(), "\"d6\"");
        let die: Die = serde_json::from_str("\"d12\"").unwrap();
        assert_eq!(die, Die::D12);
        assert!(serde_json::from_str::<Die>("\"d0\"").is_err());
    }

    #[test]
    fn dice_tag_display() {
        assert_eq!(DiceTag::Primary.to_string(), "primary");
        assert_eq!(DiceTag::Alternate.to_string(), "alternate");
        assert_eq!(DiceTag::Bonus.to_string(), "bonus");
    }
}
