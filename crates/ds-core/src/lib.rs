//! Core types for dragonsheet: the character record and everything it owns.
//!
//! This crate is plain data. It knows nothing about dice or derived stats;
//! `ds-mechanics` reads a [`CharacterRecord`] and computes those. A record
//! can be built programmatically or loaded from JSON.

/// The six abilities, ability scores, and proficiency tiers.
pub mod ability;
/// Coin purse with denomination conversion.
pub mod coin;
/// Temporary status effects such as damage buffs.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// Inventory items: weapons, armor, shields, and gear.
pub mod item;
/// The persisted character record.
pub mod record;
/// Hit points and limited-use resource trackers.
pub mod track;

/// Re-export ability types.
pub use ability::{Ability, AbilityScores, Proficiency};
/// Re-export coin types.
pub use coin::{Coins, Denomination};
/// Re-export status effects.
pub use effect::StatusEffect;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export inventory types.
pub use item::{ArmorCategory, ArmorProps, AttackType, Item, ItemId, ItemKind, WeaponProps};
/// Re-export the character record.
pub use record::CharacterRecord;
/// Re-export tracker types.
pub use track::{HitPoints, Recharge, Resource};
