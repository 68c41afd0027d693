//! # Error Types
//!
//! Domain-specific error types for tcis-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tcis-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Card/Binder/Deck construction failures         │
//! │                                                                         │
//! │  tcis-inventory                                                        │
//! │  └── Managers catch CoreError, log it, and return bool / status code   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → warn!(..) + false / AddCardStatus │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (card name, binder name, index)
//! 3. Errors are enum variants, never String
//! 4. No error crosses the `InventorySystem` facade

use thiserror::Error;

use crate::money::Money;
use crate::types::AddCardStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised while moving, trading or selling cards.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No card type with this name is registered in the collection.
    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Binder not found: {0}")]
    BinderNotFound(String),

    #[error("Deck not found: {0}")]
    DeckNotFound(String),

    /// A card type with this name already exists (names are case-insensitive).
    #[error("A card named '{0}' already exists")]
    DuplicateCard(String),

    #[error("A binder named '{0}' already exists")]
    DuplicateBinder(String),

    #[error("A deck named '{0}' already exists")]
    DuplicateDeck(String),

    #[error("Unknown binder type '{0}'")]
    UnknownBinderType(String),

    #[error("Unknown deck type '{0}'")]
    UnknownDeckType(String),

    /// Not enough copies left in the collection.
    ///
    /// ## When This Occurs
    /// - Moving a card whose available count is 0
    /// - Selling more loose copies than are owned
    #[error("Insufficient copies of {card}: available {available}, requested {requested}")]
    InsufficientCopies {
        card: String,
        available: i64,
        requested: i64,
    },

    #[error("{container} is full (capacity {capacity})")]
    ContainerFull { container: String, capacity: usize },

    /// The card does not satisfy the binder kind's eligibility rule.
    #[error("{card} cannot be placed in {binder}")]
    IneligibleCard { card: String, binder: String },

    #[error("Deck {deck} already contains {card}")]
    DuplicateInDeck { card: String, deck: String },

    #[error("Count of {card} cannot grow by {amount}")]
    CountOverflow { card: String, amount: i64 },

    #[error("Value of {quantity} × {card} is too large")]
    AmountOverflow { card: String, quantity: i64 },

    #[error("{0} cannot be sold")]
    NotSellable(String),

    #[error("Cards cannot be traded from {0}")]
    NotTradeable(String),

    #[error("No card at index {index} in {container}")]
    InvalidIndex { container: String, index: usize },

    /// A Luxury binder's custom price may never undercut its contents.
    #[error("Price {requested} is below the contents' value {minimum}")]
    PriceBelowValue { requested: Money, minimum: Money },

    #[error("{0} does not accept a custom price")]
    CustomPriceUnsupported(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Maps an add-to-container failure onto its status code.
    ///
    /// Errors that cannot come out of an add operation fall back to
    /// `NotFound`, which is what presentation layers treat as "try again".
    pub fn add_status(&self) -> AddCardStatus {
        match self {
            CoreError::InsufficientCopies { .. } => AddCardStatus::NoCopies,
            CoreError::ContainerFull { .. } => AddCardStatus::ContainerFull,
            CoreError::IneligibleCard { .. } => AddCardStatus::Ineligible,
            CoreError::DuplicateInDeck { .. } => AddCardStatus::DuplicateName,
            _ => AddCardStatus::NotFound,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Construction-time validation errors.
///
/// Raised only by `Card`, `Binder` and `Deck` constructors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} cannot be negative")]
    MustBeNonNegative { field: String },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., an amount with three decimal places).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
