//! # Deck Manager
//!
//! Owns every deck. Decks follow the same check-out rules as binders but
//! never trade and never carry a handling fee.
//!
//! ## Add Status
//! ```text
//! deck missing / card missing ──► NotFound       (1)
//! no available copies ──────────► NoCopies       (2)
//! deck holds 10 cards ──────────► ContainerFull  (3)
//! name already in deck ─────────► DuplicateName  (4)
//! ```

use std::sync::Arc;

use tcis_core::validation::name_key;
use tcis_core::{AddCardStatus, Card, CoreError, CoreResult, Deck, DeckKind, DeckSummary, Money};
use tracing::{debug, info, warn};

use crate::collection::CollectionManager;

/// Holds decks in creation order. Names are unique case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct DeckManager {
    decks: Vec<Deck>,
}

impl DeckManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.decks.iter().position(|d| d.matches_name(name))
    }

    fn require_position(&self, name: &str) -> CoreResult<usize> {
        self.position(name)
            .ok_or_else(|| CoreError::DeckNotFound(name.trim().to_string()))
    }

    pub fn deck(&self, name: &str) -> Option<&Deck> {
        self.position(name).map(|i| &self.decks[i])
    }

    /// Independent copy of a deck.
    pub fn find_deck(&self, name: &str) -> Option<Deck> {
        self.deck(name).cloned()
    }

    /// Creates an empty deck; `kind` is "Normal" or "Sellable".
    pub fn create_deck(&mut self, name: &str, kind: &str) -> bool {
        match self.try_create_deck(name, kind) {
            Ok(kind) => {
                debug!(deck = %name.trim(), kind = %kind, "Created deck");
                true
            }
            Err(e) => {
                warn!(deck = %name, kind = %kind, error = %e, "Could not create deck");
                false
            }
        }
    }

    pub fn try_create_deck(&mut self, name: &str, kind: &str) -> CoreResult<DeckKind> {
        let kind: DeckKind = kind.parse()?;
        let deck = Deck::new(name, kind)?;

        if self.position(deck.name()).is_some() {
            return Err(CoreError::DuplicateDeck(deck.name().to_string()));
        }

        self.decks.push(deck);
        Ok(kind)
    }

    /// Deletes a deck, returning each of its cards to the collection.
    pub fn delete_deck(&mut self, name: &str, collection: &mut CollectionManager) -> bool {
        match self.try_delete_deck(name, collection) {
            Ok(returned) => {
                debug!(deck = %name.trim(), returned, "Deleted deck");
                true
            }
            Err(e) => {
                warn!(deck = %name, error = %e, "Could not delete deck");
                false
            }
        }
    }

    pub fn try_delete_deck(
        &mut self,
        name: &str,
        collection: &mut CollectionManager,
    ) -> CoreResult<usize> {
        let position = self.require_position(name)?;
        collection.return_cards(self.decks[position].cards())?;

        let returned = self.decks.remove(position).card_count();
        Ok(returned)
    }

    /// Sells a Sellable deck for the plain sum of its cards' values.
    pub fn sell_deck(&mut self, name: &str) -> Option<Money> {
        match self.try_sell_deck(name) {
            Ok((deck, price)) => {
                info!(deck = %deck.name(), cards = deck.card_count(), price = %price, "Sold deck");
                Some(price)
            }
            Err(e) => {
                warn!(deck = %name, error = %e, "Could not sell deck");
                None
            }
        }
    }

    pub fn try_sell_deck(&mut self, name: &str) -> CoreResult<(Deck, Money)> {
        let position = self.require_position(name)?;

        if !self.decks[position].is_sellable() {
            return Err(CoreError::NotSellable(self.decks[position].name().to_string()));
        }

        let deck = self.decks.remove(position);
        let price = deck.calculate_price();
        Ok((deck, price))
    }

    /// Moves one available copy of a card into a deck.
    pub fn add_card_to_deck(
        &mut self,
        card_name: &str,
        deck_name: &str,
        collection: &mut CollectionManager,
    ) -> AddCardStatus {
        match self.try_add_card_to_deck(card_name, deck_name, collection) {
            Ok(()) => {
                debug!(card = %card_name.trim(), deck = %deck_name.trim(), "Added card to deck");
                AddCardStatus::Added
            }
            Err(e) => {
                warn!(card = %card_name, deck = %deck_name, error = %e, "Could not add card to deck");
                e.add_status()
            }
        }
    }

    pub fn try_add_card_to_deck(
        &mut self,
        card_name: &str,
        deck_name: &str,
        collection: &mut CollectionManager,
    ) -> CoreResult<()> {
        let position = self.require_position(deck_name)?;
        let card = collection.check_available(card_name, 1)?;

        let deck = &mut self.decks[position];
        deck.check_add(&card)?;

        collection.try_decrease_count(card.name(), 1)?;
        deck.add_card(card);
        Ok(())
    }

    pub fn remove_card_from_deck(
        &mut self,
        index: usize,
        deck_name: &str,
        collection: &mut CollectionManager,
    ) -> bool {
        match self.try_remove_card_from_deck(index, deck_name, collection) {
            Ok(card) => {
                debug!(card = %card.name(), deck = %deck_name.trim(), index, "Removed card from deck");
                true
            }
            Err(e) => {
                warn!(deck = %deck_name, index, error = %e, "Could not remove card from deck");
                false
            }
        }
    }

    pub fn try_remove_card_from_deck(
        &mut self,
        index: usize,
        deck_name: &str,
        collection: &mut CollectionManager,
    ) -> CoreResult<Arc<Card>> {
        let position = self.require_position(deck_name)?;
        let deck = &mut self.decks[position];

        let card = deck.card_at(index).cloned().ok_or_else(|| CoreError::InvalidIndex {
            container: deck.name().to_string(),
            index,
        })?;

        collection.try_increase_count(card.name(), 1)?;
        deck.remove_card(index);
        Ok(card)
    }

    /// Copies of all decks in creation order.
    pub fn get_decks(&self) -> Vec<Deck> {
        self.decks.clone()
    }

    /// Deck summaries ordered by name.
    pub fn summaries(&self) -> Vec<DeckSummary> {
        let mut summaries: Vec<DeckSummary> = self.decks.iter().map(Deck::summary).collect();
        summaries.sort_by_key(|s| name_key(&s.name));
        summaries
    }

    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcis_core::{Rarity, Variant, DECK_CAPACITY};

    fn setup() -> (DeckManager, CollectionManager) {
        let mut collection = CollectionManager::new();
        collection.add_new_card("Charizard", Money::from_cents(5000), Rarity::Legendary, Variant::Normal);
        collection.add_new_card("Bulbasaur", Money::from_cents(250), Rarity::Common, Variant::ExtendedArt);
        collection.increase_count("Charizard", 1);
        (DeckManager::new(), collection)
    }

    #[test]
    fn test_create_deck() {
        let (mut decks, _) = setup();

        assert!(decks.create_deck("Fire", "normal"));
        assert!(decks.create_deck("Market", "SELLABLE"));
        assert!(!decks.create_deck("fire", "Sellable"));
        assert!(!decks.create_deck("Grass", "Commander"));
        assert_eq!(decks.deck_count(), 2);
    }

    #[test]
    fn test_add_card_status() {
        let (mut decks, mut collection) = setup();
        decks.create_deck("Fire", "Normal");

        assert_eq!(decks.add_card_to_deck("Charizard", "Water", &mut collection), AddCardStatus::NotFound);
        assert_eq!(decks.add_card_to_deck("Squirtle", "Fire", &mut collection), AddCardStatus::NotFound);
        assert_eq!(decks.add_card_to_deck("Charizard", "Fire", &mut collection), AddCardStatus::Added);

        // A second copy is available but the name is taken
        assert_eq!(
            decks.add_card_to_deck("charizard", "Fire", &mut collection),
            AddCardStatus::DuplicateName
        );
        assert_eq!(AddCardStatus::DuplicateName.code(), 4);
        assert_eq!(collection.get_card_count("Charizard"), 1);

        collection.decrease_count("Bulbasaur", 1);
        assert_eq!(decks.add_card_to_deck("Bulbasaur", "Fire", &mut collection), AddCardStatus::NoCopies);
    }

    #[test]
    fn test_deck_full() {
        let (mut decks, mut collection) = setup();
        decks.create_deck("Big", "Normal");

        for i in 0..DECK_CAPACITY {
            let name = format!("Filler {i}");
            collection.add_new_card(&name, Money::from_cents(10), Rarity::Common, Variant::Normal);
            assert!(decks.add_card_to_deck(&name, "Big", &mut collection).is_added());
        }

        assert_eq!(
            decks.add_card_to_deck("Bulbasaur", "Big", &mut collection),
            AddCardStatus::ContainerFull
        );
        assert_eq!(collection.get_card_count("Bulbasaur"), 1);
    }

    #[test]
    fn test_remove_and_delete_restore_counts() {
        let (mut decks, mut collection) = setup();
        decks.create_deck("Fire", "Normal");
        decks.add_card_to_deck("Charizard", "Fire", &mut collection);
        decks.add_card_to_deck("Bulbasaur", "Fire", &mut collection);

        assert!(!decks.remove_card_from_deck(2, "Fire", &mut collection));
        assert!(decks.remove_card_from_deck(1, "Fire", &mut collection));
        assert_eq!(collection.get_card_count("Bulbasaur"), 1);

        assert!(decks.delete_deck("fire", &mut collection));
        assert_eq!(collection.get_card_count("Charizard"), 2);
        assert!(decks.find_deck("Fire").is_none());
    }

    #[test]
    fn test_full_count_keeps_card_in_deck() {
        let (mut decks, mut collection) = setup();
        decks.create_deck("Fire", "Normal");
        decks.add_card_to_deck("Charizard", "Fire", &mut collection);
        collection.increase_count("Charizard", i64::MAX - 1);

        assert!(!decks.remove_card_from_deck(0, "Fire", &mut collection));
        assert!(!decks.delete_deck("Fire", &mut collection));

        assert_eq!(decks.find_deck("Fire").unwrap().card_count(), 1);
        assert_eq!(collection.get_card_count("Charizard"), i64::MAX);
    }

    #[test]
    fn test_sell_deck() {
        let (mut decks, mut collection) = setup();
        decks.create_deck("Fire", "Normal");
        decks.create_deck("Market", "Sellable");
        decks.add_card_to_deck("Charizard", "Market", &mut collection);
        decks.add_card_to_deck("Bulbasaur", "Market", &mut collection);

        assert_eq!(decks.sell_deck("Fire"), None);
        assert_eq!(decks.sell_deck("Nowhere"), None);

        // $50.00 + $3.75, no fee
        assert_eq!(decks.sell_deck("Market"), Some(Money::from_cents(5375)));
        assert!(decks.find_deck("Market").is_none());
        assert_eq!(collection.get_card_count("Charizard"), 1);
        assert_eq!(collection.get_card_count("Bulbasaur"), 0);
    }
}
