//! # Deck
//!
//! Bounded play sets in which every card name appears at most once.
//!
//! ## Deck Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Kind       Sellable   Price when sold                                  │
//! │  ─────────  ─────────  ───────────────────────────────                  │
//! │  Normal     no         -                                                │
//! │  Sellable   yes        Σ calculated value (no handling fee)             │
//! │                                                                         │
//! │  Both: capacity 10, names unique case-insensitively                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use ts_rs::TS;

use crate::card::Card;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{name_key, validate_name, ValidationResult};
use crate::DECK_CAPACITY;

// =============================================================================
// Deck Kind
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeckKind {
    Normal,
    Sellable,
}

impl DeckKind {
    pub const ALL: [DeckKind; 2] = [DeckKind::Normal, DeckKind::Sellable];

    pub fn display_name(&self) -> &'static str {
        match self {
            DeckKind::Normal => "Normal",
            DeckKind::Sellable => "Sellable",
        }
    }

    #[inline]
    pub fn is_sellable(&self) -> bool {
        matches!(self, DeckKind::Sellable)
    }
}

impl fmt::Display for DeckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DeckKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(DeckKind::Normal),
            "sellable" => Ok(DeckKind::Sellable),
            _ => Err(CoreError::UnknownDeckType(s.to_string())),
        }
    }
}

// =============================================================================
// Deck
// =============================================================================

/// A named deck with up to [`DECK_CAPACITY`] distinct cards.
///
/// ## Invariants
/// - `cards.len() <= DECK_CAPACITY`
/// - no two cards share a case-insensitive name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    name: String,
    kind: DeckKind,
    cards: Vec<Arc<Card>>,
}

impl Deck {
    /// Creates an empty deck.
    ///
    /// ## Errors
    /// `Required` if the name is blank.
    pub fn new(name: &str, kind: DeckKind) -> ValidationResult<Deck> {
        let name = validate_name("deck name", name)?;

        Ok(Deck {
            name,
            kind,
            cards: Vec::new(),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    #[inline]
    pub fn cards(&self) -> &[Arc<Card>] {
        &self.cards
    }

    pub fn card_at(&self, index: usize) -> Option<&Arc<Card>> {
        self.cards.get(index)
    }

    #[inline]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= DECK_CAPACITY
    }

    #[inline]
    pub fn is_sellable(&self) -> bool {
        self.kind.is_sellable()
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name_key(name)
    }

    /// Case-insensitive search by card name.
    pub fn contains_card(&self, card_name: &str) -> bool {
        self.cards.iter().any(|c| c.matches_name(card_name))
    }

    /// Checks capacity, then uniqueness, without changing anything.
    pub fn check_add(&self, card: &Card) -> CoreResult<()> {
        if self.is_full() {
            return Err(CoreError::ContainerFull {
                container: self.name.clone(),
                capacity: DECK_CAPACITY,
            });
        }

        if self.contains_card(card.name()) {
            return Err(CoreError::DuplicateInDeck {
                card: card.name().to_string(),
                deck: self.name.clone(),
            });
        }

        Ok(())
    }

    /// Appends a card if the deck has room and doesn't already hold the name.
    pub fn add_card(&mut self, card: Arc<Card>) -> bool {
        match self.check_add(&card) {
            Ok(()) => {
                self.cards.push(card);
                true
            }
            Err(_) => false,
        }
    }

    /// Removes and returns the card at `index`, or `None` if out of range.
    pub fn remove_card(&mut self, index: usize) -> Option<Arc<Card>> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    pub fn into_cards(self) -> Vec<Arc<Card>> {
        self.cards
    }

    /// Sale price: the plain sum of calculated values, no fee.
    ///
    /// Returned for both kinds; whether the deck may actually be sold is
    /// `is_sellable`'s call.
    pub fn calculate_price(&self) -> Money {
        self.cards.iter().map(|c| c.calculated_value()).sum()
    }

    pub fn summary(&self) -> DeckSummary {
        DeckSummary::from(self)
    }
}

// =============================================================================
// Deck Summary
// =============================================================================

/// Deck read model for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeckSummary {
    pub name: String,
    pub kind: DeckKind,
    pub card_count: usize,
    pub capacity: usize,
    pub sellable: bool,
    pub total_value: Money,
}

impl From<&Deck> for DeckSummary {
    fn from(deck: &Deck) -> Self {
        DeckSummary {
            name: deck.name.clone(),
            kind: deck.kind,
            card_count: deck.card_count(),
            capacity: DECK_CAPACITY,
            sellable: deck.is_sellable(),
            total_value: deck.calculate_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
