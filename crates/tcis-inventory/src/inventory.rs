//! # Inventory System
//!
//! The one entry point presentation layers talk to. It composes the three
//! managers, credits sale proceeds and keeps the sale ledger.
//!
//! ## Facade Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         InventorySystem                                 │
//! │                                                                         │
//! │   ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐     │
//! │   │ CollectionManager│◄─┤  BinderManager   │  │   DeckManager    ├─┐   │
//! │   │ card types/counts│  │ binders, trades  │  │ decks            │ │   │
//! │   └────────▲─────────┘  └──────────────────┘  └──────────────────┘ │   │
//! │            └────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │   total_money ◄── sell_card / sell_binder / sell_deck ──► sales ledger │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Apart from crediting sales, every method is plain delegation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tcis_core::{
    AddCardStatus, Binder, BinderSummary, Card, CardDraft, CoreError, Deck, DeckSummary, Money,
    Rarity, SaleKind, SaleRecord, TradeQuote, Variant,
};
use tracing::{debug, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::binder_manager::BinderManager;
use crate::collection::CollectionManager;
use crate::config::InventoryConfig;
use crate::deck_manager::DeckManager;

/// A card type with its available count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CardHolding {
    pub card: Card,
    pub calculated_value: Money,
    pub available: i64,
}

/// Snapshot of the whole inventory for display or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_money: Money,
    pub cards: Vec<CardHolding>,
    pub binders: Vec<BinderSummary>,
    pub decks: Vec<DeckSummary>,
    pub sales: Vec<SaleRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct InventorySystem {
    collection: CollectionManager,
    binders: BinderManager,
    decks: DeckManager,
    total_money: Money,
    sales: Vec<SaleRecord>,
    config: InventoryConfig,
}

impl InventorySystem {
    /// Creates an empty inventory with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InventoryConfig) -> Self {
        InventorySystem {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    // =========================================================================
    // Money and Sales
    // =========================================================================

    /// Money earned from every sale so far.
    pub fn total_money(&self) -> Money {
        self.total_money
    }

    /// Copy of the sale ledger, oldest first.
    pub fn sales(&self) -> Vec<SaleRecord> {
        self.sales.clone()
    }

    fn record_sale(&mut self, kind: SaleKind, name: &str, quantity: i64, amount: Money) {
        self.total_money += amount;
        self.sales.push(SaleRecord {
            id: Uuid::new_v4().to_string(),
            kind,
            name: name.to_string(),
            quantity,
            amount,
            sold_at: Utc::now(),
        });

        debug!(total = %self.total_money, "Credited sale");
    }

    // =========================================================================
    // Collection
    // =========================================================================

    pub fn find_card(&self, name: &str) -> Option<Arc<Card>> {
        self.collection.find_card(name)
    }

    pub fn add_new_card(
        &mut self,
        name: &str,
        base_value: Money,
        rarity: Rarity,
        variant: Variant,
    ) -> bool {
        self.collection.add_new_card(name, base_value, rarity, variant)
    }

    /// Registers a card from a form-style draft.
    ///
    /// A draft without a rarity or variant is rejected.
    pub fn add_new_card_from_draft(&mut self, draft: CardDraft) -> bool {
        let name = draft.name.clone();
        let result = Card::try_from(draft)
            .map_err(CoreError::from)
            .and_then(|card| self.collection.register_card(card));

        match result {
            Ok(card) => {
                debug!(card = %card.name(), "Registered card from draft");
                true
            }
            Err(e) => {
                warn!(card = %name, error = %e, "Could not add card");
                false
            }
        }
    }

    pub fn increase_count(&mut self, name: &str, amount: i64) -> bool {
        self.collection.increase_count(name, amount)
    }

    pub fn decrease_count(&mut self, name: &str, amount: i64) -> bool {
        self.collection.decrease_count(name, amount)
    }

    pub fn is_card_available(&self, name: &str) -> bool {
        self.collection.is_card_available(name)
    }

    pub fn get_card_count(&self, name: &str) -> i64 {
        self.collection.get_card_count(name)
    }

    pub fn get_card_types(&self) -> Vec<Arc<Card>> {
        self.collection.get_card_types()
    }

    pub fn get_card_counts(&self) -> HashMap<String, i64> {
        self.collection.get_card_counts()
    }

    /// Sells `amount` loose copies for their calculated value each.
    ///
    /// ## Returns
    /// The amount credited, or `None` if the card is unknown, `amount` is not
    /// positive, or fewer than `amount` copies are available.
    pub fn sell_card(&mut self, name: &str, amount: i64) -> Option<Money> {
        let card = match self.collection.check_available(name, amount) {
            Ok(card) => card,
            Err(e) => {
                warn!(card = %name, amount, error = %e, "Could not sell card");
                return None;
            }
        };

        let Some(price) = card.calculated_value().checked_mul(amount) else {
            let e = CoreError::AmountOverflow {
                card: card.name().to_string(),
                quantity: amount,
            };
            warn!(card = %name, amount, error = %e, "Could not sell card");
            return None;
        };

        if !self.collection.sell_card(card.name(), amount) {
            return None;
        }

        info!(card = %card.name(), amount, price = %price, "Sold card");
        self.record_sale(SaleKind::Card, card.name(), amount, price);
        Some(price)
    }

    /// Sells a single copy.
    pub fn sell_one_card(&mut self, name: &str) -> Option<Money> {
        self.sell_card(name, 1)
    }

    // =========================================================================
    // Binders
    // =========================================================================

    pub fn find_binder(&self, name: &str) -> Option<Binder> {
        self.binders.find_binder(name)
    }

    pub fn create_binder(&mut self, name: &str, kind: &str) -> bool {
        self.binders.create_binder(name, kind)
    }

    pub fn delete_binder(&mut self, name: &str) -> bool {
        self.binders.delete_binder(name, &mut self.collection)
    }

    /// Sells a binder and credits its price.
    ///
    /// An empty sellable binder sells for `Some($0.00)`; `None` means the
    /// binder was missing or not sellable.
    pub fn sell_binder(&mut self, name: &str) -> Option<Money> {
        let sold = self
            .binders
            .binder(name)
            .map(|binder| (binder.name().to_string(), binder.card_count()));

        // The manager logs a missing or unsellable binder
        let price = self.binders.sell_binder(name)?;
        let (binder_name, cards) = sold?;
        self.record_sale(SaleKind::Binder, &binder_name, cards as i64, price);
        Some(price)
    }

    pub fn add_card_to_binder(&mut self, card_name: &str, binder_name: &str) -> AddCardStatus {
        self.binders
            .add_card_to_binder(card_name, binder_name, &mut self.collection)
    }

    pub fn remove_card_from_binder(&mut self, index: usize, binder_name: &str) -> bool {
        self.binders
            .remove_card_from_binder(index, binder_name, &mut self.collection)
    }

    /// Checks a trade and reports the value difference without trading.
    ///
    /// ## User Workflow
    /// 1. `quote_trade` → show `difference`
    /// 2. if `requires_confirmation`, ask the user
    /// 3. on yes, `perform_trade`; on no, do nothing
    pub fn quote_trade(
        &self,
        binder_name: &str,
        outgoing_index: usize,
        incoming: &Card,
    ) -> Option<TradeQuote> {
        match self.binders.quote_trade(
            binder_name,
            outgoing_index,
            incoming,
            &self.collection,
            self.config.trade_warning_threshold,
        ) {
            Ok(quote) => {
                debug!(
                    binder = %quote.binder,
                    difference = %quote.difference,
                    requires_confirmation = quote.requires_confirmation,
                    "Quoted trade"
                );
                Some(quote)
            }
            Err(e) => {
                warn!(binder = %binder_name, index = outgoing_index, error = %e, "Trade rejected");
                None
            }
        }
    }

    pub fn perform_trade(&mut self, binder_name: &str, outgoing_index: usize, incoming: Card) -> bool {
        self.binders
            .perform_trade(binder_name, outgoing_index, incoming, &mut self.collection)
    }

    pub fn set_binder_price(&mut self, name: &str, price: Money) -> bool {
        self.binders.set_binder_price(name, price)
    }

    pub fn get_binders(&self) -> Vec<Binder> {
        self.binders.get_binders()
    }

    // =========================================================================
    // Decks
    // =========================================================================

    pub fn find_deck(&self, name: &str) -> Option<Deck> {
        self.decks.find_deck(name)
    }

    pub fn create_deck(&mut self, name: &str, kind: &str) -> bool {
        self.decks.create_deck(name, kind)
    }

    pub fn delete_deck(&mut self, name: &str) -> bool {
        self.decks.delete_deck(name, &mut self.collection)
    }

    /// Sells a Sellable deck and credits the sum of its cards' values.
    pub fn sell_deck(&mut self, name: &str) -> Option<Money> {
        let sold = self
            .decks
            .deck(name)
            .map(|deck| (deck.name().to_string(), deck.card_count()));

        // The manager logs a missing or unsellable deck
        let price = self.decks.sell_deck(name)?;
        let (deck_name, cards) = sold?;
        self.record_sale(SaleKind::Deck, &deck_name, cards as i64, price);
        Some(price)
    }

    pub fn add_card_to_deck(&mut self, card_name: &str, deck_name: &str) -> AddCardStatus {
        self.decks
            .add_card_to_deck(card_name, deck_name, &mut self.collection)
    }

    pub fn remove_card_from_deck(&mut self, index: usize, deck_name: &str) -> bool {
        self.decks
            .remove_card_from_deck(index, deck_name, &mut self.collection)
    }

    pub fn get_decks(&self) -> Vec<Deck> {
        self.decks.get_decks()
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Everything a dashboard needs, with lists ordered by name.
    pub fn summary(&self) -> InventorySummary {
        let cards = self
            .collection
            .get_card_types()
            .into_iter()
            .map(|card| CardHolding {
                available: self.collection.get_card_count(card.name()),
                calculated_value: card.calculated_value(),
                card: (*card).clone(),
            })
            .collect();

        InventorySummary {
            total_money: self.total_money,
            cards,
            binders: self.binders.summaries(),
            decks: self.decks.summaries(),
            sales: self.sales(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> InventorySystem {
        let mut inventory = InventorySystem::new();
        inventory.add_new_card("Pikachu", Money::from_cents(1000), Rarity::Rare, Variant::FullArt);
        inventory.add_new_card("Rattata", Money::from_cents(50), Rarity::Common, Variant::Normal);
        inventory.increase_count("Rattata", 4);
        inventory
    }

    #[test]
    fn test_starts_with_no_money() {
        let inventory = InventorySystem::new();
        assert_eq!(inventory.total_money(), Money::zero());
        assert!(inventory.sales().is_empty());
    }

    #[test]
    fn test_sell_card_credits_value_times_amount() {
        let mut inventory = inventory();

        assert_eq!(inventory.sell_card("rattata", 3), Some(Money::from_cents(150)));
        assert_eq!(inventory.get_card_count("Rattata"), 2);
        assert_eq!(inventory.sell_one_card("Pikachu"), Some(Money::from_cents(2000)));
        assert_eq!(inventory.total_money().cents(), 2150);

        assert_eq!(inventory.sell_card("Rattata", 3), None);
        assert_eq!(inventory.sell_card("Rattata", 0), None);
        assert_eq!(inventory.sell_card("Missing", 1), None);
        assert_eq!(inventory.total_money().cents(), 2150);
        assert_eq!(inventory.get_card_count("Rattata"), 2);
    }

    #[test]
    fn test_failed_sales_do_not_credit() {
        let mut inventory = inventory();
        inventory.create_binder("Bulk", "Non-curated");
        inventory.create_deck("Play", "Normal");
        inventory.add_card_to_binder("Pikachu", "Bulk");

        assert_eq!(inventory.sell_binder("Bulk"), None);
        assert_eq!(inventory.sell_deck("Play"), None);
        assert_eq!(inventory.sell_binder("Ghost"), None);
        assert_eq!(inventory.sell_deck("Ghost"), None);
        assert_eq!(inventory.total_money(), Money::zero());
        assert!(inventory.sales().is_empty());
        assert!(inventory.find_binder("Bulk").is_some());
    }

    #[test]
    fn test_sell_card_rejects_value_overflow() {
        let mut inventory = inventory();
        inventory.increase_count("Pikachu", i64::MAX - 1);

        // $20.00 × i64::MAX does not fit in cents
        assert_eq!(inventory.sell_card("Pikachu", i64::MAX), None);
        assert_eq!(inventory.get_card_count("Pikachu"), i64::MAX);
        assert_eq!(inventory.total_money(), Money::zero());
        assert!(inventory.sales().is_empty());

        assert_eq!(inventory.sell_card("Pikachu", 2), Some(Money::from_cents(4000)));
        assert_eq!(inventory.get_card_count("Pikachu"), i64::MAX - 2);
    }

    #[test]
    fn test_ledger_matches_total() {
        let mut inventory = inventory();
        inventory.create_binder("Cheap", "Pauper");
        inventory.create_deck("Market", "Sellable");
        inventory.add_card_to_binder("Rattata", "Cheap");
        inventory.add_card_to_binder("Rattata", "Cheap");
        inventory.add_card_to_deck("Pikachu", "Market");

        inventory.sell_binder("cheap");
        inventory.sell_deck("market");
        inventory.sell_card("Rattata", 1);

        let sales = inventory.sales();
        assert_eq!(sales.len(), 3);
        assert_eq!(sales[0].kind, SaleKind::Binder);
        assert_eq!(sales[0].name, "Cheap");
        assert_eq!(sales[0].quantity, 2);
        assert_eq!(sales[1].kind, SaleKind::Deck);
        assert_eq!(sales[2].kind, SaleKind::Card);

        let ledger_total: Money = sales.iter().map(|s| s.amount).sum();
        assert_eq!(ledger_total, inventory.total_money());
        assert_eq!(ledger_total.cents(), 100 + 2000 + 50);
        assert_ne!(sales[0].id, sales[1].id);
    }

    #[test]
    fn test_quote_uses_configured_threshold() {
        let config = InventoryConfig {
            trade_warning_threshold: Money::from_cents(5000),
            ..InventoryConfig::default()
        };
        let mut inventory = InventorySystem::with_config(config);
        inventory.add_new_card("Pikachu", Money::from_cents(1000), Rarity::Rare, Variant::FullArt);
        inventory.create_binder("Trade", "Non-curated");
        inventory.add_card_to_binder("Pikachu", "Trade");

        let incoming = Card::new("Mew", Money::from_cents(4000), Rarity::Legendary, Variant::Normal).unwrap();
        let quote = inventory.quote_trade("Trade", 0, &incoming).unwrap();
        assert_eq!(quote.difference.cents(), 2000);
        assert!(!quote.requires_confirmation);

        assert!(inventory.quote_trade("Trade", 9, &incoming).is_none());
    }

    #[test]
    fn test_add_from_draft() {
        let mut inventory = InventorySystem::new();

        let missing_variant = CardDraft {
            name: "Eevee".to_string(),
            base_value: Money::from_cents(300),
            rarity: Some(Rarity::Uncommon),
            variant: None,
        };
        assert!(!inventory.add_new_card_from_draft(missing_variant.clone()));

        let complete = CardDraft {
            variant: Some(Variant::AltArt),
            ..missing_variant
        };
        assert!(inventory.add_new_card_from_draft(complete));
        assert_eq!(inventory.get_card_count("eevee"), 1);
    }

    #[test]
    fn test_summary() {
        let mut inventory = inventory();
        inventory.create_binder("Zed", "Rares");
        inventory.create_binder("Amy", "Luxury");
        inventory.add_card_to_binder("Pikachu", "Zed");

        let summary = inventory.summary();
        assert_eq!(summary.cards.len(), 2);
        assert_eq!(summary.cards[0].card.name(), "Pikachu");
        assert_eq!(summary.cards[0].available, 0);
        assert_eq!(summary.binders[0].name, "Amy");
        assert_eq!(summary.binders[1].price.cents(), 2200);
    }
}
