//! Variant encumbrance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pounds per point of strength before becoming encumbered.
pub const ENCUMBERED_PER_STRENGTH: f64 = 5.0;

/// Pounds per point of strength before becoming heavily encumbered.
pub const HEAVILY_ENCUMBERED_PER_STRENGTH: f64 = 10.0;

/// How weighed down a character is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encumbrance {
    /// No penalty.
    #[default]
    Normal,
    /// Speed drops by 10 feet.
    Encumbered,
    /// Speed drops by 20 feet and physical rolls have disadvantage.
    HeavilyEncumbered,
}

impl fmt::Display for Encumbrance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Encumbered => write!(f, "Encumbered"),
            Self::HeavilyEncumbered => write!(f, "Heavily Encumbered"),
        }
    }
}

/// Encumbrance for a carried weight in pounds.
///
/// Thresholds are strict: carrying exactly `strength × 5` is still normal.
pub fn encumbrance_status(weight: f64, strength: i32) -> Encumbrance {
    let strength = f64::from(strength);
    if weight > strength * HEAVILY_ENCUMBERED_PER_STRENGTH {
        Encumbrance::HeavilyEncumbered
    } else if weight > strength * ENCUMBERED_PER_STRENGTH {
        Encumbrance::Encumbered
    } else {
        Encumbrance::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_at_strength_fifteen() {
        assert_eq!(encumbrance_status(75.0, 15), Encumbrance::Normal);
        assert_eq!(encumbrance_status(76.0, 15), Encumbrance::Encumbered);
        assert_eq!(encumbrance_status(150.0, 15), Encumbrance::Encumbered);
        assert_eq!(encumbrance_status(151.0, 15), Encumbrance::HeavilyEncumbered);
    }

    #[test]
    fn thresholds_at_strength_ten() {
        assert_eq!(encumbrance_status(50.0, 10), Encumbrance::Normal);
        assert_eq!(encumbrance_status(51.0, 10), Encumbrance::Encumbered);
        assert_eq!(encumbrance_status(100.0, 10), Encumbrance::Encumbered);
        assert_eq!(encumbrance_status(101.0, 10), Encumbrance::HeavilyEncumbered);
    }

    #[test]
    fn nothing_carried() {
        assert_eq!(encumbrance_status(0.0, 10), Encumbrance::Normal);
    }

    #[test]
    fn display() {
        assert_eq!(
            Encumbrance::HeavilyEncumbered.to_string(),
            "Heavily Encumbered"
        );
    }
}
