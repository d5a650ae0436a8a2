//! Randomness injection for dice rolls.
//!
//! Every roll draws from a [`RollSource`] passed in by the caller. Any
//! `rand` RNG works; [`ScriptedRolls`] replays a fixed sequence for tests
//! and replays.

use rand::Rng;

/// Produces one die face at a time.
pub trait RollSource {
    /// Roll one die with `sides` faces. Must return a value in `1..=sides`.
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl<R: Rng> RollSource for R {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides.max(1))
    }
}

/// A deterministic source that replays a fixed sequence of faces.
///
/// The sequence cycles when exhausted. Values are clamped into `1..=sides`
/// so a script written for d20s stays valid on smaller dice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedRolls {
    values: Vec<u32>,
    position: usize,
}

impl ScriptedRolls {
    /// Replay `values` in order.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            position: 0,
        }
    }

    /// How many faces have been drawn so far.
    pub fn drawn(&self) -> usize {
        self.position
    }
}

impl RollSource for ScriptedRolls {
    fn roll_die(&mut self, sides: u32) -> u32 {
        let raw = if self.values.is_empty() {
            1
        } else {
            self.values[self.position % self.values.len()]
        };
        self.position += 1;
        raw.clamp(1, sides.max(1))
    }
}
