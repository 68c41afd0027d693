//! # Binder Manager
//!
//! Owns every binder and moves cards between binders and the collection.
//!
//! ## Card Movement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Binder Operations                               │
//! │                                                                         │
//! │  Operation              Binder                 Collection count         │
//! │  ─────────              ──────                 ────────────────         │
//! │  add_card_to_binder     push card              - 1                      │
//! │  remove_card_from_...   remove at index        + 1                      │
//! │  delete_binder          dropped                + 1 per card             │
//! │  sell_binder            dropped                unchanged (cards gone)   │
//! │  perform_trade          swap out → swap in     new type: registered     │
//! │                                                at 0, otherwise none     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The public methods keep the simple return contracts presentation layers
//! expect (`bool`, [`AddCardStatus`], `Option<Money>`). Each one is a thin
//! wrapper over a `try_*` method that returns [`CoreResult`] and logs the
//! error on failure.

use std::sync::Arc;

use tcis_core::validation::name_key;
use tcis_core::{
    AddCardStatus, Binder, BinderKind, BinderSummary, Card, CoreError, CoreResult, Money,
    TradeQuote,
};
use tracing::{debug, info, warn};

use crate::collection::CollectionManager;

/// A trade that has passed every check and can be applied without failing.
#[derive(Debug)]
struct TradePlan {
    position: usize,
    outgoing: Arc<Card>,
    incoming: Arc<Card>,
    /// The incoming card is unknown to the collection and must be registered.
    is_new_type: bool,
}

/// Holds binders in creation order.
///
/// ## Invariants
/// - binder names are unique case-insensitively
/// - every card in a binder is a canonical `Arc` from the collection
#[derive(Debug, Clone, Default)]
pub struct BinderManager {
    binders: Vec<Binder>,
}

impl BinderManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.binders.iter().position(|b| b.matches_name(name))
    }

    fn require_position(&self, name: &str) -> CoreResult<usize> {
        self.position(name)
            .ok_or_else(|| CoreError::BinderNotFound(name.trim().to_string()))
    }

    /// Borrowed lookup, case-insensitive and trimmed.
    pub fn binder(&self, name: &str) -> Option<&Binder> {
        self.position(name).map(|i| &self.binders[i])
    }

    /// Independent copy of a binder.
    pub fn find_binder(&self, name: &str) -> Option<Binder> {
        self.binder(name).cloned()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Creates an empty binder of the kind named by `kind`.
    ///
    /// `kind` is one of "Non-curated", "Collector", "Pauper", "Rares" or
    /// "Luxury", case-insensitive.
    pub fn create_binder(&mut self, name: &str, kind: &str) -> bool {
        match self.try_create_binder(name, kind) {
            Ok(kind) => {
                debug!(binder = %name.trim(), kind = %kind, "Created binder");
                true
            }
            Err(e) => {
                warn!(binder = %name, kind = %kind, error = %e, "Could not create binder");
                false
            }
        }
    }

    pub fn try_create_binder(&mut self, name: &str, kind: &str) -> CoreResult<BinderKind> {
        let kind: BinderKind = kind.parse()?;
        let binder = Binder::new(name, kind)?;

        if self.position(binder.name()).is_some() {
            return Err(CoreError::DuplicateBinder(binder.name().to_string()));
        }

        self.binders.push(binder);
        Ok(kind)
    }

    /// Deletes a binder, returning each of its cards to the collection.
    pub fn delete_binder(&mut self, name: &str, collection: &mut CollectionManager) -> bool {
        match self.try_delete_binder(name, collection) {
            Ok(returned) => {
                debug!(binder = %name.trim(), returned, "Deleted binder");
                true
            }
            Err(e) => {
                warn!(binder = %name, error = %e, "Could not delete binder");
                false
            }
        }
    }

    /// Returns how many cards went back to the collection.
    pub fn try_delete_binder(
        &mut self,
        name: &str,
        collection: &mut CollectionManager,
    ) -> CoreResult<usize> {
        let position = self.require_position(name)?;
        collection.return_cards(self.binders[position].cards())?;

        let returned = self.binders.remove(position).card_count();
        Ok(returned)
    }

    /// Sells a sellable binder and returns its price.
    ///
    /// The binder and its cards are gone afterwards; collection counts are
    /// not restored. `None` means nothing happened.
    pub fn sell_binder(&mut self, name: &str) -> Option<Money> {
        match self.try_sell_binder(name) {
            Ok((binder, price)) => {
                info!(binder = %binder.name(), cards = binder.card_count(), price = %price, "Sold binder");
                Some(price)
            }
            Err(e) => {
                warn!(binder = %name, error = %e, "Could not sell binder");
                None
            }
        }
    }

    /// Removes a sellable binder, handing back the binder and its price.
    ///
    /// ## Errors
    /// - `BinderNotFound`
    /// - `NotSellable` for NonCurated and Collector binders
    pub fn try_sell_binder(&mut self, name: &str) -> CoreResult<(Binder, Money)> {
        let position = self.require_position(name)?;

        if !self.binders[position].is_sellable() {
            return Err(CoreError::NotSellable(self.binders[position].name().to_string()));
        }

        let binder = self.binders.remove(position);
        let price = binder.calculate_price();
        Ok((binder, price))
    }

    // =========================================================================
    // Card Movement
    // =========================================================================

    /// Moves one available copy of a card into a binder.
    ///
    /// ## Status
    /// Checks run in this order and the first failure wins:
    /// 1. binder, then card, not found → `NotFound`
    /// 2. no available copies → `NoCopies`
    /// 3. binder full → `ContainerFull`
    /// 4. card breaks the binder's rule → `Ineligible`
    pub fn add_card_to_binder(
        &mut self,
        card_name: &str,
        binder_name: &str,
        collection: &mut CollectionManager,
    ) -> AddCardStatus {
        match self.try_add_card_to_binder(card_name, binder_name, collection) {
            Ok(()) => {
                debug!(card = %card_name.trim(), binder = %binder_name.trim(), "Added card to binder");
                AddCardStatus::Added
            }
            Err(e) => {
                warn!(card = %card_name, binder = %binder_name, error = %e, "Could not add card to binder");
                e.add_status()
            }
        }
    }

    pub fn try_add_card_to_binder(
        &mut self,
        card_name: &str,
        binder_name: &str,
        collection: &mut CollectionManager,
    ) -> CoreResult<()> {
        let position = self.require_position(binder_name)?;
        let card = collection.check_available(card_name, 1)?;

        let binder = &mut self.binders[position];
        binder.check_add(&card)?;

        collection.try_decrease_count(card.name(), 1)?;
        binder.add_card(card);
        Ok(())
    }

    /// Takes the card at `index` out of a binder and back into the collection.
    pub fn remove_card_from_binder(
        &mut self,
        index: usize,
        binder_name: &str,
        collection: &mut CollectionManager,
    ) -> bool {
        match self.try_remove_card_from_binder(index, binder_name, collection) {
            Ok(card) => {
                debug!(card = %card.name(), binder = %binder_name.trim(), index, "Removed card from binder");
                true
            }
            Err(e) => {
                warn!(binder = %binder_name, index, error = %e, "Could not remove card from binder");
                false
            }
        }
    }

    pub fn try_remove_card_from_binder(
        &mut self,
        index: usize,
        binder_name: &str,
        collection: &mut CollectionManager,
    ) -> CoreResult<Arc<Card>> {
        let position = self.require_position(binder_name)?;
        let binder = &mut self.binders[position];

        let card = binder.card_at(index).cloned().ok_or_else(|| CoreError::InvalidIndex {
            container: binder.name().to_string(),
            index,
        })?;

        collection.try_increase_count(card.name(), 1)?;
        binder.remove_card(index);
        Ok(card)
    }

    // =========================================================================
    // Trading
    // =========================================================================

    /// Runs every trade check without touching any state.
    ///
    /// ## Check Order
    /// binder exists → binder trades → incoming card eligible → index valid
    ///
    /// When the incoming name is already registered, the registered card is
    /// what enters the binder, so eligibility is judged on that card.
    fn prepare_trade(
        &self,
        binder_name: &str,
        outgoing_index: usize,
        incoming: &Card,
        collection: &CollectionManager,
    ) -> CoreResult<TradePlan> {
        let position = self.require_position(binder_name)?;
        let binder = &self.binders[position];

        if !binder.can_trade() {
            return Err(CoreError::NotTradeable(binder.name().to_string()));
        }

        let (incoming, is_new_type) = match collection.find_card(incoming.name()) {
            Some(existing) => (existing, false),
            None => (Arc::new(incoming.clone()), true),
        };

        if !binder.can_add_card(&incoming) {
            return Err(CoreError::IneligibleCard {
                card: incoming.name().to_string(),
                binder: binder.name().to_string(),
            });
        }

        let outgoing = binder
            .card_at(outgoing_index)
            .cloned()
            .ok_or_else(|| CoreError::InvalidIndex {
                container: binder.name().to_string(),
                index: outgoing_index,
            })?;

        Ok(TradePlan {
            position,
            outgoing,
            incoming,
            is_new_type,
        })
    }

    /// Checks a trade and prices the difference, changing nothing.
    pub fn quote_trade(
        &self,
        binder_name: &str,
        outgoing_index: usize,
        incoming: &Card,
        collection: &CollectionManager,
        threshold: Money,
    ) -> CoreResult<TradeQuote> {
        let plan = self.prepare_trade(binder_name, outgoing_index, incoming, collection)?;

        Ok(TradeQuote::new(
            self.binders[plan.position].name(),
            outgoing_index,
            (*plan.outgoing).clone(),
            (*plan.incoming).clone(),
            threshold,
        ))
    }

    /// Swaps the card at `outgoing_index` for `incoming`.
    ///
    /// ## Effects
    /// - the outgoing card leaves for good (no count is restored)
    /// - an unknown incoming card is registered and its count set to 0,
    ///   since its single copy goes straight into the binder
    ///
    /// Any failed check returns `false` before anything is mutated.
    pub fn perform_trade(
        &mut self,
        binder_name: &str,
        outgoing_index: usize,
        incoming: Card,
        collection: &mut CollectionManager,
    ) -> bool {
        let incoming_name = incoming.name().to_string();

        match self.try_perform_trade(binder_name, outgoing_index, incoming, collection) {
            Ok(outgoing) => {
                info!(
                    binder = %binder_name.trim(),
                    outgoing = %outgoing.name(),
                    incoming = %incoming_name,
                    "Completed trade"
                );
                true
            }
            Err(e) => {
                warn!(binder = %binder_name, index = outgoing_index, incoming = %incoming_name, error = %e, "Trade rejected");
                false
            }
        }
    }

    /// Returns the card that left the binder.
    pub fn try_perform_trade(
        &mut self,
        binder_name: &str,
        outgoing_index: usize,
        incoming: Card,
        collection: &mut CollectionManager,
    ) -> CoreResult<Arc<Card>> {
        let plan = self.prepare_trade(binder_name, outgoing_index, &incoming, collection)?;

        let incoming = if plan.is_new_type {
            let registered = collection.register_card(incoming)?;
            collection.try_decrease_count(registered.name(), 1)?;
            registered
        } else {
            plan.incoming
        };

        let outgoing = self.binders[plan.position].swap_card(outgoing_index, incoming)?;
        debug_assert!(Arc::ptr_eq(&outgoing, &plan.outgoing));
        Ok(outgoing)
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Sets a Luxury binder's asking price.
    pub fn set_binder_price(&mut self, name: &str, price: Money) -> bool {
        match self.try_set_binder_price(name, price) {
            Ok(()) => {
                debug!(binder = %name.trim(), price = %price, "Set binder price");
                true
            }
            Err(e) => {
                warn!(binder = %name, price = %price, error = %e, "Could not set binder price");
                false
            }
        }
    }

    pub fn try_set_binder_price(&mut self, name: &str, price: Money) -> CoreResult<()> {
        let position = self.require_position(name)?;
        self.binders[position].set_price(price)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Copies of all binders in creation order.
    pub fn get_binders(&self) -> Vec<Binder> {
        self.binders.clone()
    }

    /// Binder summaries ordered by name.
    pub fn summaries(&self) -> Vec<BinderSummary> {
        let mut summaries: Vec<BinderSummary> = self.binders.iter().map(Binder::summary).collect();
        summaries.sort_by_key(|s| name_key(&s.name));
        summaries
    }

    pub fn binder_count(&self) -> usize {
        self.binders.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
