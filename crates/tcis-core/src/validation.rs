//! # Validation Module
//!
//! Field validators called by the `Card`, `Binder` and `Deck` constructors.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (menu / GUI)                                    │
//! │  ├── Input parsing, re-prompting                                       │
//! │  └── Offering only Rare/Legendary cards special variants               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Constructors (THIS MODULE)                                   │
//! │  ├── Blank names, negative values, missing rarity/variant              │
//! │  └── The single gate: nothing else re-checks these fields              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Managers                                                     │
//! │  └── Uniqueness, availability, capacity, eligibility                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates and normalizes a name (card, binder or deck).
///
/// ## Rules
/// - Must not be blank after trimming
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use tcis_core::validation::validate_name;
///
/// assert_eq!(validate_name("card name", "  Pikachu ").unwrap(), "Pikachu");
/// assert!(validate_name("card name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(name.to_string())
}

/// Builds the lookup key for a name: trimmed and lowercased.
///
/// Card, binder and deck names are all unique case-insensitively.
#[inline]
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a card's base value.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (bulk cards)
pub fn validate_base_value(value: Money) -> ValidationResult<()> {
    if value.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "base value".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity used to adjust or sell loose copies.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
