//! Error types for the mechanics engine.

/// Why a dice formula could not be parsed.
///
/// Returned to the caller instead of panicking so a single bad user-entered
/// string never halts the frontend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    /// The formula was empty or whitespace.
    #[error("empty dice formula")]
    Empty,

    /// The dice count was zero.
    #[error("dice count must be at least 1 in \"{0}\"")]
    ZeroCount(String),

    /// The dice count exceeds the supported maximum.
    #[error("too many dice: {count} (max {max})")]
    TooManyDice {
        /// Requested count.
        count: u32,
        /// Largest accepted count.
        max: u32,
    },

    /// The side count was zero or negative.
    #[error("die sides must be positive in \"{0}\"")]
    NonPositiveSides(String),

    /// The string matches no recognized pattern.
    #[error("unrecognized dice formula: \"{0}\"")]
    Unrecognized(String),
}

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A dice formula failed to parse.
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// A skill is not in the ruleset's skill table.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// An ability name could not be recognized.
    #[error("unknown ability: {0}")]
    UnknownAbility(String),

    /// An item used for an attack is not a weapon.
    #[error("\"{0}\" is not a weapon")]
    NotAWeapon(String),

    /// The rules configuration is malformed.
    #[error("invalid rules config: {0}")]
    InvalidConfig(String),

    /// An error from the character record.
    #[error(transparent)]
    Core(#[from] ds_core::CoreError),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
