//! Inventory items.
//!
//! Weapons and armor carry the fields the sheet needs for attacks and
//! armor class. Everything else is [`ItemKind::Gear`].

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate a new random item ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Whether a weapon is swung or fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackType {
    /// Melee weapon attack (Strength by default).
    #[default]
    Melee,
    /// Ranged weapon attack (Dexterity).
    Ranged,
}

/// Weight class of body armor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorCategory {
    /// Adds the full Dexterity modifier.
    Light,
    /// Adds Dexterity up to +2.
    Medium,
    /// Ignores Dexterity.
    Heavy,
}

impl fmt::Display for ArmorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Medium => write!(f, "medium"),
            Self::Heavy => write!(f, "heavy"),
        }
    }
}

/// Weapon-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponProps {
    /// Whether the wielder adds their proficiency bonus to hit.
    #[serde(default = "default_true")]
    pub proficient: bool,
    /// Melee or ranged.
    #[serde(default)]
    pub attack_type: AttackType,
    /// Damage formula, e.g. `"1d8"` or `"2d6"`.
    pub damage: String,
    /// Damage type, e.g. "Slashing".
    #[serde(default)]
    pub damage_type: String,
    /// Reach or normal range in feet.
    #[serde(default)]
    pub reach: u32,
    /// Weapon properties such as "finesse" or "versatile (1d10)".
    #[serde(default)]
    pub properties: Vec<String>,
}

impl WeaponProps {
    /// Case-insensitive check for a property by its leading word.
    pub fn has_property(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.properties
            .iter()
            .any(|p| p.to_lowercase().split_whitespace().next() == Some(name.as_str()))
    }
}

/// Body armor fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorProps {
    /// Light, medium, or heavy.
    pub category: ArmorCategory,
    /// Armor class before Dexterity.
    pub base_ac: i32,
    /// Explicit Dexterity cap replacing the category default.
    #[serde(default)]
    pub max_dex: Option<i32>,
    /// Whether the wearer is trained with it.
    #[serde(default = "default_true")]
    pub proficient: bool,
    /// Imposes disadvantage on Stealth checks.
    #[serde(default)]
    pub stealth_disadvantage: bool,
}

/// What kind of item this is, with kind-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    /// A weapon that can make attacks.
    Weapon(WeaponProps),
    /// Body armor.
    Armor(ArmorProps),
    /// A shield (+2 AC when equipped).
    Shield,
    /// Anything else.
    Gear,
}

/// A single inventory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    #[serde(default)]
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Kind-specific data.
    #[serde(flatten)]
    pub kind: ItemKind,
    /// Whether the item is currently worn or wielded.
    #[serde(default)]
    pub equipped: bool,
    /// Weight in pounds.
    #[serde(default)]
    pub weight: f64,
    /// Cost in gold pieces.
    #[serde(default)]
    pub cost: f64,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

impl Item {
    /// Create an unequipped item with no weight or cost.
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            kind,
            equipped: false,
            weight: 0.0,
            cost: 0.0,
            notes: String::new(),
        }
    }

    /// A versatile one-handed melee weapon (the sheet's default weapon form).
    pub fn weapon_template(name: impl Into<String>) -> Self {
        Self {
            weight: 2.0,
            cost: 1.0,
            ..Self::new(
                name,
                ItemKind::Weapon(WeaponProps {
                    proficient: true,
                    attack_type: AttackType::Melee,
                    damage: "1d8".to_string(),
                    damage_type: "Bludgeoning".to_string(),
                    reach: 5,
                    properties: vec!["versatile (1d10)".to_string()],
                }),
            )
        }
    }

    /// Heavy plate-style armor (the sheet's default armor form).
    pub fn armor_template(name: impl Into<String>) -> Self {
        Self {
            weight: 65.0,
            cost: 1500.0,
            ..Self::new(
                name,
                ItemKind::Armor(ArmorProps {
                    category: ArmorCategory::Heavy,
                    base_ac: 18,
                    max_dex: None,
                    proficient: true,
                    stealth_disadvantage: true,
                }),
            )
        }
    }

    /// Weapon data, if this is a weapon.
    pub fn as_weapon(&self) -> Option<&WeaponProps> {
        match &self.kind {
            ItemKind::Weapon(w) => Some(w),
            _ => None,
        }
    }

    /// Armor data, if this is body armor.
    pub fn as_armor(&self) -> Option<&ArmorProps> {
        match &self.kind {
            ItemKind::Armor(a) => Some(a),
            _ => None,
        }
    }

    /// Returns true for shields.
    pub fn is_shield(&self) -> bool {
        matches!(self.kind, ItemKind::Shield)
    }

    /// Builder-style equip flag.
    pub fn equipped(mut self, equipped: bool) -> Self {
        self.equipped = equipped;
        self
    }
}

fn default_true() -> bool {
    true
}
