//! The persisted character record.
//!
//! This is the single owned value a frontend keeps for a character. It is
//! saved and loaded as JSON; every field has a default so records written
//! by older versions still load.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ability::{Ability, AbilityScores, Proficiency};
use crate::coin::Coins;
use crate::effect::StatusEffect;
use crate::error::{CoreError, CoreResult};
use crate::item::{Item, ItemId};
use crate::track::{HitPoints, Resource};

/// Everything the sheet stores about one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterRecord {
    /// Character name.
    pub name: String,
    /// Character level (1-20).
    pub level: u32,
    /// Explicit proficiency bonus. Derived from level when absent.
    pub proficiency_bonus: Option<i32>,
    /// The six ability scores.
    pub abilities: AbilityScores,
    /// Saving throw proficiencies by ability.
    pub save_proficiencies: BTreeMap<Ability, Proficiency>,
    /// Skill proficiencies by skill key (e.g. `"athletics"`).
    pub skill_proficiencies: BTreeMap<String, Proficiency>,
    /// Hit points.
    pub hit_points: HitPoints,
    /// Limited-use features.
    pub resources: Vec<Resource>,
    /// Temporary status effects.
    pub effects: Vec<StatusEffect>,
    /// Carried items.
    pub inventory: Vec<Item>,
    /// Coin purse.
    pub coins: Coins,
    /// Free-form session notes.
    pub notes: String,
    /// Background and origin story.
    pub origin_story: String,
    /// When the record was last written.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for CharacterRecord {
    fn default() -> Self {
        Self::new("Unnamed")
    }
}

impl CharacterRecord {
    /// A level 1 character with average scores and nothing else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            proficiency_bonus: None,
            abilities: AbilityScores::default(),
            save_proficiencies: BTreeMap::new(),
            skill_proficiencies: BTreeMap::new(),
            hit_points: HitPoints::default(),
            resources: Vec::new(),
            effects: Vec::new(),
            inventory: Vec::new(),
            coins: Coins::default(),
            notes: String::new(),
            origin_story: String::new(),
            updated_at: None,
        }
    }

    /// Parse a record from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Stamp the record as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    // --- Inventory ---

    /// Add an item and return its ID.
    pub fn add_item(&mut self, item: Item) -> ItemId {
        let id = item.id;
        self.inventory.push(item);
        id
    }

    /// Remove an item by ID.
    pub fn remove_item(&mut self, id: ItemId) -> CoreResult<Item> {
        let index = self
            .inventory
            .iter()
            .position(|i| i.id == id)
            .ok_or(CoreError::ItemNotFound(id))?;
        Ok(self.inventory.remove(index))
    }

    /// Look up an item by ID.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.inventory.iter().find(|i| i.id == id)
    }

    /// Look up the first item with a matching name (case-insensitive).
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        let lower = name.to_lowercase();
        self.inventory
            .iter()
            .find(|i| i.name.to_lowercase() == lower)
    }

    /// Toggle whether an item is equipped. Returns the new state.
    ///
    /// Only one body armor and one shield can be worn: equipping either
    /// unequips any other item of the same slot.
    pub fn toggle_equipped(&mut self, id: ItemId) -> CoreResult<bool> {
        let item = self.item(id).ok_or(CoreError::ItemNotFound(id))?;
        let equipping = !item.equipped;
        let is_armor = item.as_armor().is_some();
        let is_shield = item.is_shield();

        if equipping {
            for other in self.inventory.iter_mut().filter(|i| i.id != id) {
                if (is_armor && other.as_armor().is_some()) || (is_shield && other.is_shield()) {
                    other.equipped = false;
                }
            }
        }

        let item = self
            .inventory
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CoreError::ItemNotFound(id))?;
        item.equipped = equipping;
        Ok(equipping)
    }

    /// Items currently equipped.
    pub fn equipped_items(&self) -> impl Iterator<Item = &Item> {
        self.inventory.iter().filter(|i| i.equipped)
    }

    /// Total weight of carried items in pounds (coins excluded).
    pub fn item_weight(&self) -> f64 {
        self.inventory.iter().map(|i| i.weight).sum()
    }

    // --- Resources & effects ---

    /// Look up a resource by name (case-insensitive).
    pub fn resource_mut(&mut self, name: &str) -> CoreResult<&mut Resource> {
        let lower = name.to_lowercase();
        self.resources
            .iter_mut()
            .find(|r| r.name.to_lowercase() == lower)
            .ok_or_else(|| CoreError::ResourceNotFound(name.to_string()))
    }

    /// Effects that are currently active.
    pub fn active_effects(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter().filter(|e| e.active)
    }
}
