//! Game mechanics for dragonsheet.
//!
//! Two independent halves: [`stats`] derives bonuses, armor class and
//! encumbrance from ability scores, and [`dice`] parses and resolves dice
//! formulas against an injected [`RollSource`]. The remaining modules join
//! them up for a stored character: [`sheet`] builds the derived snapshot,
//! [`check`] rolls checks and attacks, [`rest`] recovers resources, and
//! [`validate`] reports inconsistencies. [`rules`] holds the skill table and
//! house rules everything else reads.

pub mod check;
pub mod dice;
pub mod error;
pub mod rest;
pub mod rules;
pub mod sheet;
pub mod stats;
pub mod validate;

pub use check::{AttackResult, CheckResult, ability_check, attack, saving_throw, skill_check};
pub use dice::{
    DiceFormula, DiceTag, Die, DieResult, RollMode, RollOutcome, RollRequest, RollSource,
    ScriptedRolls, resolve, resolve_formula,
};
pub use error::{FormulaError, MechError, MechResult};
pub use rest::{RestKind, RestSummary, long_rest, short_rest};
pub use rules::{HouseRules, RuleSet, SkillTable};
pub use sheet::{CharacterSheet, DerivedStats, SkillLine};
pub use stats::{AbilityProfile, ArmorClassInput, Encumbrance, EquippedArmor};
pub use validate::{Severity, ValidationIssue, validate_record};
