//! Dice formula parsing.
//!
//! Grammar: `[count]d<sides>[(+|-)modifier]`, or a bare integer for a
//! static value. Whitespace is ignored and `d` is case-insensitive, so
//! `"2d6+3"`, `"d20"`, `"1D8 - 1"` and `"5"` all parse.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormulaError;

/// Largest dice count a formula may name.
pub const MAX_DICE: u32 = 1000;

/// A parsed dice formula.
///
/// Serializes as its string form (`"2d6+3"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DiceFormula {
    /// A fixed value with no dice.
    Static(i32),
    /// `count` dice of `sides` sides plus a fixed modifier.
    Dice {
        /// Number of dice to roll (at least 1).
        count: u32,
        /// Sides per die (at least 1).
        sides: u32,
        /// Added to the sum of the dice.
        modifier: i32,
    },
}

impl DiceFormula {
    /// Parse a formula string.
    pub fn parse(input: &str) -> Result<Self, FormulaError> {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        if compact.is_empty() {
            return Err(FormulaError::Empty);
        }

        if is_signed_integer(&compact) {
            return compact
                .parse()
                .map(Self::Static)
                .map_err(|_| FormulaError::Unrecognized(input.to_string()));
        }

        let unrecognized = || FormulaError::Unrecognized(input.to_string());

        let (count_str, rest) = compact.split_once('d').ok_or_else(unrecognized)?;

        let count = if count_str.is_empty() {
            1
        } else if is_digits(count_str) {
            count_str.parse::<u32>().map_err(|_| unrecognized())?
        } else {
            return Err(unrecognized());
        };
        if count == 0 {
            return Err(FormulaError::ZeroCount(input.to_string()));
        }
        if count > MAX_DICE {
            return Err(FormulaError::TooManyDice {
                count,
                max: MAX_DICE,
            });
        }

        // "d-6" names a negative side count rather than a modifier
        if let Some(negative) = rest.strip_prefix('-') {
            let digits_end = negative
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(negative.len());
            return if digits_end > 0 {
                Err(FormulaError::NonPositiveSides(input.to_string()))
            } else {
                Err(unrecognized())
            };
        }

        let split = rest.find(['+', '-']).unwrap_or(rest.len());
        let (sides_str, modifier_str) = rest.split_at(split);

        if !is_digits(sides_str) {
            return Err(unrecognized());
        }
        let sides = sides_str.parse::<u32>().map_err(|_| unrecognized())?;
        if sides == 0 {
            return Err(FormulaError::NonPositiveSides(input.to_string()));
        }

        let modifier = if modifier_str.is_empty() {
            0
        } else if is_signed_integer(modifier_str) {
            modifier_str.parse::<i32>().map_err(|_| unrecognized())?
        } else {
            return Err(unrecognized());
        };

        Ok(Self::Dice {
            count,
            sides,
            modifier,
        })
    }

    /// Parse a formula, treating anything malformed as a static zero.
    pub fn parse_or_zero(input: &str) -> Self {
        Self::parse(input).unwrap_or_else(|e| {
            tracing::warn!(formula = input, error = %e, "falling back to static zero");
            Self::Static(0)
        })
    }

    /// True for exactly one d20, the only formula that can crit.
    pub fn is_single_d20(&self) -> bool {
        matches!(
            self,
            Self::Dice {
                count: 1,
                sides: 20,
                ..
            }
        )
    }

    /// The fixed part of the formula.
    pub fn modifier(&self) -> i32 {
        match self {
            Self::Static(n) => *n,
            Self::Dice { modifier, .. } => *modifier,
        }
    }

    /// Same formula with `extra` added to the modifier.
    pub fn with_extra_modifier(self, extra: i32) -> Self {
        match self {
            Self::Static(n) => Self::Static(n.saturating_add(extra)),
            Self::Dice {
                count,
                sides,
                modifier,
            } => Self::Dice {
                count,
                sides,
                modifier: modifier.saturating_add(extra),
            },
        }
    }

    /// Same formula with the dice count doubled (critical hit damage).
    pub fn with_doubled_dice(self) -> Self {
        match self {
            Self::Dice {
                count,
                sides,
                modifier,
            } => Self::Dice {
                count: count.saturating_mul(2),
                sides,
                modifier,
            },
            fixed => fixed,
        }
    }

    /// Lowest possible total.
    pub fn min(&self) -> i64 {
        match *self {
            Self::Static(n) => i64::from(n),
            Self::Dice {
                count, modifier, ..
            } => i64::from(count) + i64::from(modifier),
        }
    }

    /// Highest possible total.
    pub fn max(&self) -> i64 {
        match *self {
            Self::Static(n) => i64::from(n),
            Self::Dice {
                count,
                sides,
                modifier,
            } => i64::from(count) * i64::from(sides) + i64::from(modifier),
        }
    }

    /// Expected total.
    pub fn average(&self) -> f64 {
        match *self {
            Self::Static(n) => f64::from(n),
            Self::Dice {
                count,
                sides,
                modifier,
            } => f64::from(count) * (1.0 + f64::from(sides)) / 2.0 + f64::from(modifier),
        }
    }
}

impl FromStr for DiceFormula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DiceFormula {
    type Error = FormulaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DiceFormula> for String {
    fn from(f: DiceFormula) -> Self {
        f.to_string()
    }
}

impl std::fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Static(n) => write!(f, "{n}"),
            Self::Dice {
                count,
                sides,
                modifier,
            } => {
                write!(f, "{count}d{sides}")?;
                if modifier > 0 {
                    write!(f, "+{modifier}")
                } else if modifier < 0 {
                    write!(f, "{modifier}")
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_signed_integer(s: &str) -> bool {
    is_digits(s.strip_prefix(['+', '-']).unwrap_or(s))
}
