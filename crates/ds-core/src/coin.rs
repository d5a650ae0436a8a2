//! Coin purse with denomination conversion.
//!
//! Values are compared in copper pieces: 1 pp = 10 gp = 20 ep = 100 sp =
//! 1000 cp. Paying an amount spends matching coins first and breaks larger
//! coins for change only when a denomination runs short.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Fifty coins weigh one pound.
pub const COINS_PER_POUND: u64 = 50;

/// A coin denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    /// Copper piece.
    Cp,
    /// Silver piece.
    Sp,
    /// Electrum piece.
    Ep,
    /// Gold piece.
    Gp,
    /// Platinum piece.
    Pp,
}

impl Denomination {
    /// Smallest to largest.
    pub const ASCENDING: [Denomination; 5] = [Self::Cp, Self::Sp, Self::Ep, Self::Gp, Self::Pp];

    /// Value of one coin in copper pieces.
    pub fn copper_value(self) -> u64 {
        match self {
            Self::Cp => 1,
            Self::Sp => 10,
            Self::Ep => 50,
            Self::Gp => 100,
            Self::Pp => 1000,
        }
    }

    /// Lowercase abbreviation.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Cp => "cp",
            Self::Sp => "sp",
            Self::Ep => "ep",
            Self::Gp => "gp",
            Self::Pp => "pp",
        }
    }
}

impl FromStr for Denomination {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ASCENDING
            .into_iter()
            .find(|d| d.suffix() == lower)
            .ok_or_else(|| CoreError::InvalidCoins(s.to_string()))
    }
}

/// A pile of coins, one count per denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Coins {
    /// Platinum pieces.
    pub pp: u64,
    /// Gold pieces.
    pub gp: u64,
    /// Electrum pieces.
    pub ep: u64,
    /// Silver pieces.
    pub sp: u64,
    /// Copper pieces.
    pub cp: u64,
}

impl Coins {
    /// A pile holding `count` coins of one denomination.
    pub fn of(denomination: Denomination, count: u64) -> Self {
        let mut coins = Self::default();
        *coins.slot(denomination) = count;
        coins
    }

    /// Parse an amount like `"15gp"`, `"3 sp"` or `"12"` (copper).
    pub fn parse(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, suffix) = trimmed.split_at(split);
        let count: u64 = digits
            .parse()
            .map_err(|_| CoreError::InvalidCoins(s.to_string()))?;
        let denomination = if suffix.trim().is_empty() {
            Denomination::Cp
        } else {
            suffix
                .parse()
                .map_err(|_| CoreError::InvalidCoins(s.to_string()))?
        };
        Ok(Self::of(denomination, count))
    }

    /// Coin count for one denomination.
    pub fn get(&self, denomination: Denomination) -> u64 {
        match denomination {
            Denomination::Cp => self.cp,
            Denomination::Sp => self.sp,
            Denomination::Ep => self.ep,
            Denomination::Gp => self.gp,
            Denomination::Pp => self.pp,
        }
    }

    fn slot(&mut self, denomination: Denomination) -> &mut u64 {
        match denomination {
            Denomination::Cp => &mut self.cp,
            Denomination::Sp => &mut self.sp,
            Denomination::Ep => &mut self.ep,
            Denomination::Gp => &mut self.gp,
            Denomination::Pp => &mut self.pp,
        }
    }

    /// Total value in copper pieces.
    pub fn total_copper(&self) -> u64 {
        Denomination::ASCENDING
            .into_iter()
            .map(|d| self.get(d).saturating_mul(d.copper_value()))
            .fold(0u64, u64::saturating_add)
    }

    /// Number of physical coins.
    pub fn count(&self) -> u64 {
        Denomination::ASCENDING
            .into_iter()
            .map(|d| self.get(d))
            .fold(0u64, u64::saturating_add)
    }

    /// Weight in pounds.
    pub fn weight(&self) -> f64 {
        self.count() as f64 / COINS_PER_POUND as f64
    }

    /// Add another pile coin-for-coin.
    pub fn add(&mut self, other: &Coins) {
        for d in Denomination::ASCENDING {
            let slot = self.slot(d);
            *slot = slot.saturating_add(other.get(d));
        }
    }

    /// Pay `amount` out of this purse.
    ///
    /// Matching coins are spent first. Any shortfall is covered by breaking
    /// the smallest remaining coins and taking change in gold, silver, and
    /// copper. Leaves the purse untouched on failure.
    pub fn remove(&mut self, amount: &Coins) -> CoreResult<()> {
        let needed = amount.exact_copper();
        let available = self.exact_copper();
        if needed > available {
            return Err(CoreError::InsufficientFunds {
                needed: u64::try_from(needed).unwrap_or(u64::MAX),
                available: u64::try_from(available).unwrap_or(u64::MAX),
            });
        }

        let mut deficit = 0u128;
        for d in Denomination::ASCENDING {
            let want = amount.get(d);
            let slot = self.slot(d);
            let paid = want.min(*slot);
            *slot -= paid;
            deficit += u128::from(want - paid) * u128::from(d.copper_value());
        }

        for d in Denomination::ASCENDING {
            if deficit == 0 {
                break;
            }
            let value = u128::from(d.copper_value());
            let held = self.get(d);
            let broken = u64::try_from(deficit.div_ceil(value)).map_or(held, |n| n.min(held));
            *self.slot(d) -= broken;

            let paid = u128::from(broken) * value;
            if paid >= deficit {
                // change is always less than one coin of `d`
                let change = u64::try_from(paid - deficit).unwrap_or(0);
                self.add(&Coins::change_for(change));
                deficit = 0;
            } else {
                deficit -= paid;
            }
        }
        Ok(())
    }

    /// Total value without saturation.
    fn exact_copper(&self) -> u128 {
        Denomination::ASCENDING
            .into_iter()
            .map(|d| u128::from(self.get(d)) * u128::from(d.copper_value()))
            .sum()
    }

    /// Express a copper value in gold, silver, and copper.
    pub fn change_for(copper: u64) -> Self {
        Self {
            gp: copper / 100,
            sp: (copper % 100) / 10,
            cp: copper % 10,
            ..Self::default()
        }
    }

    /// Re-denominate to the fewest coins without electrum.
    pub fn consolidate(&mut self) {
        let total = self.total_copper();
        *self = Self {
            pp: total / 1000,
            ..Self::change_for(total % 1000)
        };
    }

    /// Returns true when the purse is empty.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Denomination::ASCENDING
            .into_iter()
            .rev()
            .filter(|&d| self.get(d) > 0)
            .map(|d| format!("{} {}", self.get(d), d.suffix()))
            .collect();
        if parts.is_empty() {
            write!(f, "0 cp")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}
