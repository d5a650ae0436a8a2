use crate::item::ItemId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating a character record.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested item ID does not exist in the inventory.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// No resource with the given name is tracked on the record.
    #[error("resource not found: \"{0}\"")]
    ResourceNotFound(String),

    /// A resource was spent while it had no uses left.
    #[error("no uses of \"{0}\" remaining")]
    ResourceExhausted(String),

    /// The purse does not hold enough value to pay.
    #[error("insufficient funds: need {needed} cp, have {available} cp")]
    InsufficientFunds {
        /// Value requested, in copper pieces.
        needed: u64,
        /// Value held, in copper pieces.
        available: u64,
    },

    /// A coin amount string could not be parsed.
    #[error("invalid coin amount: \"{0}\"")]
    InvalidCoins(String),

    /// The record could not be serialized or deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
