use serde::{Deserialize, Serialize};

use crate::ability::Ability;

/// A temporary buff that changes how rolls resolve while active.
///
/// Giant's Might, for example, grants advantage on Strength checks and
/// saves and adds a d6 to weapon damage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Display name.
    pub name: String,
    /// Whether the effect currently applies.
    #[serde(default)]
    pub active: bool,
    /// Abilities whose checks and saves roll with advantage.
    #[serde(default)]
    pub advantage_on: Vec<Ability>,
    /// Sides of an extra die added to weapon damage, if any.
    #[serde(default)]
    pub bonus_damage_die: Option<u32>,
}

impl StatusEffect {
    /// An inactive effect with no mechanical impact yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: false,
            advantage_on: Vec::new(),
            bonus_damage_die: None,
        }
    }

    /// Grant advantage on an ability's checks and saves.
    pub fn with_advantage_on(mut self, ability: Ability) -> Self {
        if !self.advantage_on.contains(&ability) {
            self.advantage_on.push(ability);
        }
        self
    }

    /// Add a bonus damage die with the given number of sides.
    pub fn with_bonus_damage_die(mut self, sides: u32) -> Self {
        self.bonus_damage_die = Some(sides);
        self
    }

    /// True when active and granting advantage on `ability`.
    pub fn grants_advantage(&self, ability: Ability) -> bool {
        self.active && self.advantage_on.contains(&ability)
    }
}
