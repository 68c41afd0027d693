//! # tcis-core: Pure Business Rules for the Trading Card Inventory System
//!
//! This crate holds every rule that decides what a card is worth, which
//! container may hold it, and what a container sells for. It has zero I/O
//! dependencies and never logs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TCIS Architecture                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Presentation (console menu, desktop GUI)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ method calls                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │      tcis-inventory (Collection, Managers, InventorySystem)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ tcis-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   card    │  │  binder   │  │   deck    │  │   money   │  │   │
//! │  │   │  Rarity   │  │  5 kinds  │  │  2 kinds  │  │  cents    │  │   │
//! │  │   │  Variant  │  │  pricing  │  │  unique   │  │  fees     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO SHARED STATE                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`card`] - `Card`, `Rarity`, `Variant`, `CardDraft`
//! - [`binder`] - `Binder` and the five `BinderKind` policies
//! - [`deck`] - `Deck` and the two `DeckKind` policies
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Status codes, sale ledger entries, trade quotes
//! - [`error`] - Domain error types
//! - [`validation`] - Field validators used by the constructors
//!
//! ## Example Usage
//!
//! ```rust
//! use tcis_core::{Binder, BinderKind, Card, Money, Rarity, Variant};
//! use std::sync::Arc;
//!
//! let card = Card::new("Pikachu", Money::from_cents(1000), Rarity::Rare, Variant::FullArt).unwrap();
//! assert_eq!(card.calculated_value(), Money::from_cents(2000));
//!
//! let mut binder = Binder::new("Trade stock", BinderKind::Rares).unwrap();
//! assert!(binder.add_card(Arc::new(card)));
//! assert_eq!(binder.calculate_price(), Money::from_cents(2200));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod binder;
pub mod card;
pub mod deck;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use binder::{Binder, BinderKind, BinderSummary};
pub use card::{Card, CardDraft, Rarity, Variant};
pub use deck::{Deck, DeckKind, DeckSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of cards a binder can hold (duplicates count separately).
pub const BINDER_CAPACITY: usize = 20;

/// Maximum number of cards a deck can hold (all names distinct).
pub const DECK_CAPACITY: usize = 10;

/// Handling fee charged when selling a Rares or Luxury binder.
///
/// ## Business Reason
/// 1000 basis points = 10%. Pauper binders and decks are sold at face value.
pub const HANDLING_FEE_BPS: u32 = 1000;
