//! # Binder
//!
//! Bounded card containers used for display, trading and selling.
//!
//! ## Binder Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Binder Policies                                  │
//! │                                                                         │
//! │  Kind         Accepts                         Sell   Trade  Price       │
//! │  ───────────  ──────────────────────────────  ─────  ─────  ─────────── │
//! │  NonCurated   any card                        no     yes    0           │
//! │  Collector    Rare/Legendary AND not Normal   no     yes    0           │
//! │  Pauper       Common/Uncommon                 yes    no     Σ value     │
//! │  Rares        Rare/Legendary                  yes    no     Σ × 1.10    │
//! │  Luxury       not Normal                      yes    no     custom×1.10 │
//! │                                                                         │
//! │  Selling and trading are mutually exclusive for every kind.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Card References
//! A binder holds `Arc<Card>` handles to the collection's canonical card
//! instances. Duplicates are allowed; each entry is one checked-out copy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use ts_rs::TS;

use crate::card::{Card, Rarity};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{name_key, validate_name, ValidationResult};
use crate::{BINDER_CAPACITY, HANDLING_FEE_BPS};

// =============================================================================
// Binder Kind
// =============================================================================

/// The five binder variants. Each fixes eligibility, sellability,
/// tradeability and pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BinderKind {
    NonCurated,
    Collector,
    Pauper,
    Rares,
    Luxury,
}

impl BinderKind {
    pub const ALL: [BinderKind; 5] = [
        BinderKind::NonCurated,
        BinderKind::Collector,
        BinderKind::Pauper,
        BinderKind::Rares,
        BinderKind::Luxury,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            BinderKind::NonCurated => "Non-curated",
            BinderKind::Collector => "Collector",
            BinderKind::Pauper => "Pauper",
            BinderKind::Rares => "Rares",
            BinderKind::Luxury => "Luxury",
        }
    }

    /// Eligibility rule for a single card.
    pub fn can_add_card(&self, card: &Card) -> bool {
        let high_rarity = matches!(card.rarity(), Rarity::Rare | Rarity::Legendary);

        match self {
            BinderKind::NonCurated => true,
            BinderKind::Collector => high_rarity && card.variant().is_special(),
            BinderKind::Pauper => matches!(card.rarity(), Rarity::Common | Rarity::Uncommon),
            BinderKind::Rares => high_rarity,
            BinderKind::Luxury => card.variant().is_special(),
        }
    }

    /// Pauper, Rares and Luxury binders can be sold as a unit.
    #[inline]
    pub fn is_sellable(&self) -> bool {
        matches!(
            self,
            BinderKind::Pauper | BinderKind::Rares | BinderKind::Luxury
        )
    }

    /// Trading is allowed exactly when selling is not.
    #[inline]
    pub fn can_trade(&self) -> bool {
        !self.is_sellable()
    }
}

impl fmt::Display for BinderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BinderKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "non-curated" | "noncurated" | "non_curated" => Ok(BinderKind::NonCurated),
            "collector" => Ok(BinderKind::Collector),
            "pauper" => Ok(BinderKind::Pauper),
            "rares" => Ok(BinderKind::Rares),
            "luxury" => Ok(BinderKind::Luxury),
            _ => Err(CoreError::UnknownBinderType(s.to_string())),
        }
    }
}

// =============================================================================
// Binder
// =============================================================================

/// A named binder with up to [`BINDER_CAPACITY`] cards.
///
/// ## Invariants
/// - `name` is trimmed and non-blank
/// - `cards.len() <= BINDER_CAPACITY`
/// - every card satisfied `kind.can_add_card` when it entered
/// - `custom_price` is zero unless `kind` is `Luxury`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Binder {
    name: String,
    kind: BinderKind,
    cards: Vec<Arc<Card>>,
    /// Zero means unset.
    custom_price: Money,
}

impl Binder {
    /// Creates an empty binder.
    ///
    /// ## Errors
    /// `Required` if the name is blank.
    pub fn new(name: &str, kind: BinderKind) -> ValidationResult<Binder> {
        let name = validate_name("binder name", name)?;

        Ok(Binder {
            name,
            kind,
            cards: Vec::new(),
            custom_price: Money::zero(),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> BinderKind {
        self.kind
    }

    /// Cards in insertion order. Read-only view.
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
        self.cards.len() >= BINDER_CAPACITY
    }

    #[inline]
    pub fn can_add_card(&self, card: &Card) -> bool {
        self.kind.can_add_card(card)
    }

    #[inline]
    pub fn is_sellable(&self) -> bool {
        self.kind.is_sellable()
    }

    #[inline]
    pub fn can_trade(&self) -> bool {
        self.kind.can_trade()
    }

    /// Returns true if the binder's name matches `name` case-insensitively.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name_key(name)
    }

    /// Checks capacity, then eligibility, without changing anything.
    ///
    /// ## Errors
    /// - `ContainerFull` when the binder already holds 20 cards
    /// - `IneligibleCard` when the kind's rule rejects the card
    pub fn check_add(&self, card: &Card) -> CoreResult<()> {
        if self.is_full() {
            return Err(CoreError::ContainerFull {
                container: self.name.clone(),
                capacity: BINDER_CAPACITY,
            });
        }

        if !self.can_add_card(card) {
            return Err(CoreError::IneligibleCard {
                card: card.name().to_string(),
                binder: self.name.clone(),
            });
        }

        Ok(())
    }

    /// Appends a card if the binder has room and the card is eligible.
    ///
    /// ## Returns
    /// `false` if the binder was full or the card broke the kind's rule.
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

    /// Replaces the card at `index` with `incoming` in one step.
    ///
    /// The incoming card takes the last position, matching a remove followed
    /// by an append. Capacity is not rechecked since the count is unchanged.
    ///
    /// ## Errors
    /// - `InvalidIndex` for an out-of-range index
    /// - `IneligibleCard` when the kind's rule rejects `incoming`
    pub fn swap_card(&mut self, index: usize, incoming: Arc<Card>) -> CoreResult<Arc<Card>> {
        if !self.can_add_card(&incoming) {
            return Err(CoreError::IneligibleCard {
                card: incoming.name().to_string(),
                binder: self.name.clone(),
            });
        }

        let outgoing = self.remove_card(index).ok_or_else(|| CoreError::InvalidIndex {
            container: self.name.clone(),
            index,
        })?;
        self.cards.push(incoming);
        Ok(outgoing)
    }

    /// Consumes the binder, handing back its cards.
    pub fn into_cards(self) -> Vec<Arc<Card>> {
        self.cards
    }

    /// Sum of calculated values of all cards inside.
    pub fn total_card_value(&self) -> Money {
        self.cards.iter().map(|c| c.calculated_value()).sum()
    }

    /// The Luxury custom price, if one has been set.
    pub fn custom_price(&self) -> Option<Money> {
        if self.custom_price.is_positive() {
            Some(self.custom_price)
        } else {
            None
        }
    }

    /// Sets a Luxury binder's asking price.
    ///
    /// ## Rules
    /// - Only Luxury binders accept a custom price
    /// - The price may not undercut the contents' total value
    ///
    /// ## Errors
    /// - `CustomPriceUnsupported` for any other kind
    /// - `PriceBelowValue` when `price < total_card_value()`
    pub fn set_price(&mut self, price: Money) -> CoreResult<()> {
        if self.kind != BinderKind::Luxury {
            return Err(CoreError::CustomPriceUnsupported(self.name.clone()));
        }

        let minimum = self.total_card_value();
        if price < minimum {
            return Err(CoreError::PriceBelowValue {
                requested: price,
                minimum,
            });
        }

        self.custom_price = price;
        Ok(())
    }

    /// Sale price of the binder including any handling fee.
    ///
    /// ## Pricing
    /// ```text
    /// NonCurated / Collector ──► $0.00 (not sellable)
    /// Pauper ─────────────────► Σ value
    /// Rares ──────────────────► Σ value + 10%
    /// Luxury ─────────────────► (custom price, else Σ value) + 10%
    /// ```
    ///
    /// A Luxury custom price is only checked against the contents when it
    /// is set; cards added afterwards do not change it.
    pub fn calculate_price(&self) -> Money {
        let total = self.total_card_value();

        match self.kind {
            BinderKind::NonCurated | BinderKind::Collector => Money::zero(),
            BinderKind::Pauper => total,
            BinderKind::Rares => total.with_fee(HANDLING_FEE_BPS),
            BinderKind::Luxury => self
                .custom_price()
                .unwrap_or(total)
                .with_fee(HANDLING_FEE_BPS),
        }
    }

    pub fn summary(&self) -> BinderSummary {
        BinderSummary::from(self)
    }
}

// =============================================================================
// Binder Summary
// =============================================================================

/// Binder read model for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BinderSummary {
    pub name: String,
    pub kind: BinderKind,
    pub card_count: usize,
    pub capacity: usize,
    pub sellable: bool,
    pub tradeable: bool,
    pub total_value: Money,
    pub custom_price: Option<Money>,
    /// What selling right now would credit.
    pub price: Money,
}

impl From<&Binder> for BinderSummary {
    fn from(binder: &Binder) -> Self {
        BinderSummary {
            name: binder.name.clone(),
            kind: binder.kind,
            card_count: binder.card_count(),
            capacity: BINDER_CAPACITY,
            sellable: binder.is_sellable(),
            tradeable: binder.can_trade(),
            total_value: binder.total_card_value(),
            custom_price: binder.custom_price(),
            price: binder.calculate_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
