//! # Shared Types
//!
//! Result and record types that flow between the managers and presentation
//! layers.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shared Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  AddCardStatus  │   │   SaleRecord    │   │   TradeQuote    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  0 Added        │   │  id (UUID)      │   │  outgoing       │       │
//! │  │  1 NotFound     │   │  kind           │   │  incoming       │       │
//! │  │  2 NoCopies     │   │  name, quantity │   │  difference     │       │
//! │  │  3 Full         │   │  amount         │   │  requires_      │       │
//! │  │  4 Ineligible / │   │  sold_at        │   │   confirmation  │       │
//! │  │    Duplicate    │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::card::Card;
use crate::money::Money;

// =============================================================================
// Add Card Status
// =============================================================================

/// Outcome of moving a card from the collection into a binder or deck.
///
/// ## Status Codes
/// Presentation layers key their messages off [`AddCardStatus::code`]:
///
/// | code | binder                   | deck                      |
/// |------|--------------------------|---------------------------|
/// | 0    | added                    | added                     |
/// | 1    | binder or card not found | deck or card not found    |
/// | 2    | no available copies      | no available copies       |
/// | 3    | binder full              | deck full                 |
/// | 4    | card breaks binder rule  | name already in deck      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AddCardStatus {
    Added,
    NotFound,
    NoCopies,
    ContainerFull,
    /// The card violates the binder kind's eligibility rule.
    Ineligible,
    /// A card with the same name is already in the deck.
    DuplicateName,
}

impl AddCardStatus {
    pub const fn code(&self) -> u8 {
        match self {
            AddCardStatus::Added => 0,
            AddCardStatus::NotFound => 1,
            AddCardStatus::NoCopies => 2,
            AddCardStatus::ContainerFull => 3,
            AddCardStatus::Ineligible | AddCardStatus::DuplicateName => 4,
        }
    }

    #[inline]
    pub const fn is_added(&self) -> bool {
        matches!(self, AddCardStatus::Added)
    }
}

// =============================================================================
// Sale Ledger
// =============================================================================

/// What was sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleKind {
    /// Loose copies straight out of the collection.
    Card,
    Binder,
    Deck,
}

/// One completed sale. The ledger is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    pub kind: SaleKind,
    /// Card, binder or deck name at time of sale.
    pub name: String,
    /// Copies sold for `Card`, number of cards inside for `Binder`/`Deck`.
    pub quantity: i64,
    /// Amount credited to total money.
    pub amount: Money,
    #[ts(as = "String")]
    pub sold_at: DateTime<Utc>,
}

// =============================================================================
// Trade Quote
// =============================================================================

/// A checked but not yet executed 1-for-1 trade.
///
/// ## User Workflow
/// ```text
/// Pick outgoing card + describe incoming card
///      │
///      ▼
/// quote_trade() ── any rule broken? ──► rejected, nothing changed
///      │
///      ▼
/// TradeQuote { difference: $2.00, requires_confirmation: true }
///      │
///      ├── user declines ──► drop the quote, nothing changed
///      │
///      └── user accepts ──► perform_trade()
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TradeQuote {
    pub binder: String,
    pub outgoing_index: usize,
    pub outgoing: Card,
    pub incoming: Card,
    /// `|outgoing value − incoming value|`
    pub difference: Money,
    /// True when `difference` reaches the configured warning threshold.
    pub requires_confirmation: bool,
}

impl TradeQuote {
    /// Builds a quote, comparing calculated values against `threshold`.
    pub fn new(
        binder: &str,
        outgoing_index: usize,
        outgoing: Card,
        incoming: Card,
        threshold: Money,
    ) -> Self {
        let difference = outgoing
            .calculated_value()
            .abs_diff(incoming.calculated_value());

        TradeQuote {
            binder: binder.to_string(),
            outgoing_index,
            outgoing,
            incoming,
            difference,
            requires_confirmation: difference >= threshold,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
