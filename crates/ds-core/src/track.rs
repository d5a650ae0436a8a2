//! Hit points and limited-use resources.
//!
//! Both are clamped counters: hit points between 0 and max (plus a
//! separate temporary pool), resources between 0 and their use count.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Current, maximum, and temporary hit points.
///
/// Loading clamps the stored values, so a hand-edited file with
/// `current > max` or negative temp HP comes back consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawHitPoints")]
pub struct HitPoints {
    /// Current hit points, clamped to `0..=max`.
    pub current: i32,
    /// Hit point maximum.
    pub max: i32,
    /// Temporary hit points, never negative.
    #[serde(default)]
    pub temp: i32,
}

#[derive(Deserialize)]
struct RawHitPoints {
    current: i32,
    max: i32,
    #[serde(default)]
    temp: i32,
}

impl From<RawHitPoints> for HitPoints {
    fn from(raw: RawHitPoints) -> Self {
        let mut hp = Self::new(raw.max);
        hp.set_current(raw.current);
        hp.set_temp(raw.temp);
        hp
    }
}

impl Default for HitPoints {
    fn default() -> Self {
        Self::new(1)
    }
}

impl HitPoints {
    /// Full hit points with no temporary pool.
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: max,
            max,
            temp: 0,
        }
    }

    /// Set current hit points, clamping to `0..=max`. Returns the stored value.
    pub fn set_current(&mut self, value: i32) -> i32 {
        self.current = value.clamp(0, self.max.max(0));
        self.current
    }

    /// Set maximum hit points, flooring at zero and pulling current down
    /// if it is now above the maximum. Returns the stored maximum.
    pub fn set_max(&mut self, value: i32) -> i32 {
        self.max = value.max(0);
        self.current = self.current.min(self.max);
        self.max
    }

    /// Set temporary hit points, flooring at zero. Returns the stored value.
    pub fn set_temp(&mut self, value: i32) -> i32 {
        self.temp = value.max(0);
        self.temp
    }

    /// Adjust current hit points by a delta, ignoring the temporary pool.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.set_current(self.current.saturating_add(delta))
    }

    /// Take damage. Temporary hit points absorb it first. Returns current HP.
    pub fn damage(&mut self, amount: u32) -> i32 {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        let absorbed = amount.min(self.temp);
        self.temp -= absorbed;
        self.adjust(-(amount - absorbed))
    }

    /// Regain hit points up to the maximum. Returns current HP.
    pub fn heal(&mut self, amount: u32) -> i32 {
        self.adjust(i32::try_from(amount).unwrap_or(i32::MAX))
    }

    /// Restore to maximum and drop temporary hit points.
    pub fn restore(&mut self) {
        self.current = self.max.max(0);
        self.temp = 0;
    }

    /// Returns true at zero hit points.
    pub fn is_down(&self) -> bool {
        self.current <= 0
    }
}

impl std::fmt::Display for HitPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)?;
        if self.temp > 0 {
            write!(f, " (+{} temp)", self.temp)?;
        }
        Ok(())
    }
}

/// When a resource's uses come back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recharge {
    /// Refilled by a short or long rest.
    ShortRest,
    /// Refilled only by a long rest.
    #[default]
    LongRest,
}

/// A named limited-use feature (Second Wind, Action Surge, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Display name of the feature.
    pub name: String,
    /// Uses remaining.
    pub current: u32,
    /// Uses per recharge.
    pub max: u32,
    /// Which rest refills it.
    #[serde(default)]
    pub recharge: Recharge,
}

impl Resource {
    /// Create a resource starting with all uses available.
    pub fn new(name: impl Into<String>, max: u32, recharge: Recharge) -> Self {
        Self {
            name: name.into(),
            current: max,
            max,
            recharge,
        }
    }

    /// Spend one use. Fails without changing anything when empty.
    pub fn spend(&mut self) -> CoreResult<u32> {
        if self.current == 0 {
            return Err(CoreError::ResourceExhausted(self.name.clone()));
        }
        self.current -= 1;
        Ok(self.current)
    }

    /// Adjust uses by a delta, clamping to `0..=max`. Returns the new value.
    pub fn adjust(&mut self, delta: i64) -> u32 {
        let next = (i64::from(self.current) + delta).clamp(0, i64::from(self.max));
        self.current = next as u32;
        self.current
    }

    /// Refill every use.
    pub fn restore(&mut self) {
        self.current = self.max;
    }

    /// Returns true when no uses remain.
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Returns true when every use is available.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}/{}", self.name, self.current, self.max)
    }
}
