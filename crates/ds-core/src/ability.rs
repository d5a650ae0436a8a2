use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the six core character attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    /// Physical power.
    #[serde(alias = "str")]
    Strength,
    /// Agility and reflexes.
    #[serde(alias = "dex")]
    Dexterity,
    /// Endurance and health.
    #[serde(alias = "con")]
    Constitution,
    /// Reasoning and memory.
    #[serde(alias = "int")]
    Intelligence,
    /// Perception and insight.
    #[serde(alias = "wis")]
    Wisdom,
    /// Force of personality.
    #[serde(alias = "cha")]
    Charisma,
}

impl Ability {
    /// All six abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Intelligence,
        Self::Wisdom,
        Self::Charisma,
    ];

    /// Three-letter uppercase abbreviation ("STR", "DEX", ...).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    /// Lowercase full name, as used in JSON keys.
    pub fn key(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Intelligence => "intelligence",
            Self::Wisdom => "wisdom",
            Self::Charisma => "charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key();
        let mut chars = key.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for Ability {
    type Err = String;

    /// Accepts full names and abbreviations, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.key() == lower || a.abbreviation().eq_ignore_ascii_case(&lower))
            .ok_or_else(|| format!("unknown ability: {s}"))
    }
}

/// The six ability scores of a character.
///
/// Scores are plain integers. Nothing here validates the 1-30 range; the
/// validator in `ds-mechanics` reports out-of-range scores as warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityScores {
    /// Strength score.
    pub strength: i32,
    /// Dexterity score.
    pub dexterity: i32,
    /// Constitution score.
    pub constitution: i32,
    /// Intelligence score.
    pub intelligence: i32,
    /// Wisdom score.
    pub wisdom: i32,
    /// Charisma score.
    pub charisma: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::uniform(10)
    }
}

impl AbilityScores {
    /// Every ability set to the same score.
    pub fn uniform(score: i32) -> Self {
        Self {
            strength: score,
            dexterity: score,
            constitution: score,
            intelligence: score,
            wisdom: score,
            charisma: score,
        }
    }

    /// Read the score for one ability.
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// Overwrite the score for one ability.
    pub fn set(&mut self, ability: Ability, score: i32) {
        let slot = match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        };
        *slot = score;
    }

    /// Builder-style variant of [`AbilityScores::set`].
    pub fn with(mut self, ability: Ability, score: i32) -> Self {
        self.set(ability, score);
        self
    }

    /// Iterate `(ability, score)` pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL.into_iter().map(|a| (a, self.get(a)))
    }
}

/// How trained a character is in a save or skill.
///
/// Serialized as the integer tier. Deserializes from either the tier or a
/// boolean (`true` = proficient).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "ProficiencyRepr", into = "u8")]
pub enum Proficiency {
    /// Untrained.
    #[default]
    None,
    /// Proficient: add the proficiency bonus once.
    Proficient,
    /// Expertise: add the proficiency bonus twice.
    Expertise,
}

impl Proficiency {
    /// How many times the proficiency bonus applies (0, 1, or 2).
    pub fn multiplier(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Proficient => 1,
            Self::Expertise => 2,
        }
    }

    /// True for any tier above `None`.
    pub fn is_trained(self) -> bool {
        self != Self::None
    }
}

impl From<bool> for Proficiency {
    fn from(proficient: bool) -> Self {
        if proficient {
            Self::Proficient
        } else {
            Self::None
        }
    }
}

impl From<Proficiency> for u8 {
    fn from(p: Proficiency) -> Self {
        p.multiplier() as u8
    }
}

impl TryFrom<u8> for Proficiency {
    type Error = String;

    fn try_from(tier: u8) -> Result<Self, Self::Error> {
        match tier {
            0 => Ok(Self::None),
            1 => Ok(Self::Proficient),
            2 => Ok(Self::Expertise),
            other => Err(format!("proficiency tier must be 0, 1 or 2, got {other}")),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProficiencyRepr {
    Flag(bool),
    Tier(u8),
}

impl TryFrom<ProficiencyRepr> for Proficiency {
    type Error = String;

    fn try_from(repr: ProficiencyRepr) -> Result<Self, Self::Error> {
        match repr {
            ProficiencyRepr::Flag(b) => Ok(b.into()),
            ProficiencyRepr::Tier(t) => t.try_into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn ability_from_str_accepts_names_and_abbreviations() {
        assert_eq!("str".parse::<Ability>().unwrap(), Ability::Strength);
        assert_eq!("DEX".parse::<Ability>().unwrap(), Ability::Dexterity);
        assert_eq!("Wisdom".parse::<Ability>().unwrap(), Ability::Wisdom);
        assert!("luck".parse::<Ability>().is_err());
    }

    #[test]
    fn ability_display() {
        assert_eq!(Ability::Constitution.to_string(), "Constitution");
        assert_eq!(Ability::Charisma.abbreviation(), "CHA");
    }

    #[test]
    fn scores_get_and_set() {
        let mut scores = AbilityScores::default();
        assert_eq!(scores.get(Ability::Wisdom), 10);
        scores.set(Ability::Wisdom, 14);
        assert_eq!(scores.wisdom, 14);
        assert_eq!(scores.iter().count(), 6);
    }

    #[test]
    fn scores_missing_fields_default_to_ten() {
        let scores: AbilityScores = serde_json::from_str(r#"{"strength": 18}"#).unwrap();
        assert_eq!(scores.strength, 18);
        assert_eq!(scores.charisma, 10);
    }

    #[test]
    fn proficiency_accepts_bool_or_tier() {
        let map: BTreeMap<String, Proficiency> =
            serde_json::from_str(r#"{"athletics": true, "stealth": false, "perception": 2}"#)
                .unwrap();
        assert_eq!(map["athletics"], Proficiency::Proficient);
        assert_eq!(map["stealth"], Proficiency::None);
        assert_eq!(map["perception"], Proficiency::Expertise);
    }

    #[test]
    fn proficiency_rejects_unknown_tier() {
        let result: Result<Proficiency, _> = serde_json::from_str("3");
        assert!(result.is_err());
    }

    #[test]
    fn proficiency_serializes_as_tier() {
        assert_eq!(serde_json::to_string(&Proficiency::Expertise).unwrap(), "2");
    }

    #[test]
    fn ability_map_keys_accept_aliases() {
        let map: BTreeMap<Ability, bool> =
            serde_json::from_str(r#"{"str": true, "constitution": true}"#).unwrap();
        assert!(map[&Ability::Strength]);
        assert!(map[&Ability::Constitution]);
    }
}
