//! Armor class.

use ds_core::{ArmorCategory, ArmorProps};
use serde::{Deserialize, Serialize};

/// Highest dexterity modifier medium armor allows.
pub const MEDIUM_ARMOR_DEX_CAP: i32 = 2;

/// AC granted by an equipped shield.
pub const SHIELD_BONUS: i32 = 2;

/// Base AC with no armor.
pub const UNARMORED_BASE: i32 = 10;

/// The body armor being worn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedArmor {
    /// Printed AC of the armor.
    pub base_ac: i32,
    /// Light, medium, or heavy.
    pub category: ArmorCategory,
    /// Replaces the category's dexterity cap when set.
    #[serde(default)]
    pub max_dex_override: Option<i32>,
}

impl From<&ArmorProps> for EquippedArmor {
    fn from(props: &ArmorProps) -> Self {
        Self {
            base_ac: props.base_ac,
            category: props.category,
            max_dex_override: props.max_dex,
        }
    }
}

/// Everything armor class depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArmorClassInput {
    /// Body armor, or `None` when unarmored.
    pub armor: Option<EquippedArmor>,
    /// The wearer's dexterity modifier.
    pub dex_modifier: i32,
    /// Whether a shield is equipped.
    pub shield: bool,
}

/// Compute armor class.
///
/// Unarmored is `10 + dex`. Light armor adds full dex, medium caps it at
/// +2, heavy adds none in either direction. An explicit cap replaces the
/// category rule, and negative dex then applies in full.
pub fn armor_class(input: &ArmorClassInput) -> i32 {
    let dex = input.dex_modifier;
    let (base, dex) = match input.armor {
        None => (UNARMORED_BASE, dex),
        Some(armor) => {
            let applied = match (armor.max_dex_override, armor.category) {
                (Some(cap), _) => dex.min(cap),
                (None, ArmorCategory::Light) => dex,
                (None, ArmorCategory::Medium) => dex.min(MEDIUM_ARMOR_DEX_CAP),
                (None, ArmorCategory::Heavy) => 0,
            };
            (armor.base_ac, applied)
        }
    };
    let shield = if input.shield { SHIELD_BONUS } else { 0 };

    base.saturating_add(dex).saturating_add(shield)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worn(base_ac: i32, category: ArmorCategory) -> Option<EquippedArmor> {
        Some(EquippedArmor {
            base_ac,
            category,
            max_dex_override: None,
        })
    }

    #[test]
    fn unarmored() {
        let input = ArmorClassInput {
            armor: None,
            dex_modifier: 3,
            shield: false,
        };
        assert_eq!(armor_class(&input), 13);
    }

    #[test]
    fn light_armor_adds_full_dex() {
        let input = ArmorClassInput {
            armor: worn(11, ArmorCategory::Light),
            dex_modifier: 4,
            shield: false,
        };
        assert_eq!(armor_class(&input), 15);
    }

    #[test]
    fn medium_armor_caps_dex() {
        let input = ArmorClassInput {
            armor: worn(14, ArmorCategory::Medium),
            dex_modifier: 3,
            shield: false,
        };
        assert_eq!(armor_class(&input), 16);
    }

    #[test]
    fn heavy_armor_ignores_dex_and_adds_shield() {
        let input = ArmorClassInput {
            armor: worn(18, ArmorCategory::Heavy),
            dex_modifier: 3,
            shield: true,
        };
        assert_eq!(armor_class(&input), 20);
    }

    #[test]
    fn heavy_armor_ignores_negative_dex() {
        let input = ArmorClassInput {
            armor: worn(16, ArmorCategory::Heavy),
            dex_modifier: -1,
            shield: false,
        };
        assert_eq!(armor_class(&input), 16);
    }

    #[test]
    fn negative_dex_applies_under_medium_armor() {
        let input = ArmorClassInput {
            armor: worn(14, ArmorCategory::Medium),
            dex_modifier: -2,
            shield: false,
        };
        assert_eq!(armor_class(&input), 12);
    }

    #[test]
    fn override_on_heavy_armor_allows_dex() {
        let mut armor = worn(16, ArmorCategory::Heavy);
        if let Some(a) = armor.as_mut() {
            a.max_dex_override = Some(1);
        }
        let input = ArmorClassInput {
            armor,
            dex_modifier: 3,
            shield: false,
        };
        assert_eq!(armor_class(&input), 17);
    }

    #[test]
    fn reference_examples() {
        let unarmored = ArmorClassInput {
            armor: None,
            dex_modifier: 1,
            shield: false,
        };
        let heavy = ArmorClassInput {
            armor: worn(16, ArmorCategory::Heavy),
            dex_modifier: 3,
            shield: false,
        };
        let medium = ArmorClassInput {
            armor: worn(14, ArmorCategory::Medium),
            dex_modifier: 4,
            shield: false,
        };
        let light = ArmorClassInput {
            armor: worn(12, ArmorCategory::Light),
            dex_modifier: 4,
            shield: false,
        };
        assert_eq!(armor_class(&unarmored), 11);
        assert_eq!(armor_class(&heavy), 16);
        assert_eq!(armor_class(&medium), 16);
        assert_eq!(armor_class(&light), 16);
    }

    #[test]
    fn override_replaces_category_cap() {
        let mut armor = worn(14, ArmorCategory::Medium);
        if let Some(a) = armor.as_mut() {
            a.max_dex_override = Some(3);
        }
        let input = ArmorClassInput {
            armor,
            dex_modifier: 4,
            shield: false,
        };
        assert_eq!(armor_class(&input), 17);
    }

    #[test]
    fn from_armor_props() {
        let props = ArmorProps {
            category: ArmorCategory::Medium,
            base_ac: 15,
            max_dex: Some(1),
            proficient: true,
            stealth_disadvantage: true,
        };
        let armor = EquippedArmor::from(&props);
        assert_eq!(armor.base_ac, 15);
        assert_eq!(armor.max_dex_override, Some(1));
    }
}
