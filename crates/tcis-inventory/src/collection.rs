//! # Collection Manager
//!
//! The master registry of card types and how many loose copies of each are
//! owned.
//!
//! ## Counts and Check-outs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Where a copy can be                                 │
//! │                                                                         │
//! │   Collection (available)  ──add_card_to_binder──►  Binder / Deck       │
//! │          count - 1                                 holds Arc<Card>      │
//! │                                                                         │
//! │   Collection (available)  ◄──remove / delete────  Binder / Deck        │
//! │          count + 1                                                      │
//! │                                                                         │
//! │   sell_binder / sell_deck / trade-out: the copy is gone for good,      │
//! │   the count is NOT restored                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Counts only track copies that are *available*. A card type stays
//! registered even when its count drops to zero.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tcis_core::validation::{name_key, validate_amount};
use tcis_core::{Card, CoreError, CoreResult, Money, Rarity, Variant};
use tracing::{debug, warn};

/// Owns the canonical `Card` instances.
///
/// ## Invariants
/// - every key in `card_counts` has an entry in `card_types`
/// - counts are never negative
#[derive(Debug, Clone, Default)]
pub struct CollectionManager {
    /// Keyed by lowercase trimmed name, so iteration is alphabetical.
    card_types: BTreeMap<String, Arc<Card>>,
    card_counts: HashMap<String, i64>,
}

impl CollectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive, trimmed lookup.
    pub fn find_card(&self, name: &str) -> Option<Arc<Card>> {
        self.card_types.get(&name_key(name)).cloned()
    }

    /// Like [`find_card`](Self::find_card) but with a typed error.
    pub fn require_card(&self, name: &str) -> CoreResult<Arc<Card>> {
        self.find_card(name)
            .ok_or_else(|| CoreError::CardNotFound(name.trim().to_string()))
    }

    /// Registers a new card type with one copy.
    ///
    /// ## Returns
    /// `false` if the name is taken or the fields fail validation.
    pub fn add_new_card(
        &mut self,
        name: &str,
        base_value: Money,
        rarity: Rarity,
        variant: Variant,
    ) -> bool {
        let result = Card::new(name, base_value, rarity, variant)
            .map_err(CoreError::from)
            .and_then(|card| self.register_card(card));

        match result {
            Ok(card) => {
                debug!(card = %card.name(), value = %card.calculated_value(), "Registered new card type");
                true
            }
            Err(e) => {
                warn!(card = %name, error = %e, "Could not add card");
                false
            }
        }
    }

    /// Registers an already-validated card with a count of 1.
    ///
    /// ## Errors
    /// `DuplicateCard` if a card with that name (any case) exists.
    pub fn register_card(&mut self, card: Card) -> CoreResult<Arc<Card>> {
        let key = card.key();
        if self.card_types.contains_key(&key) {
            return Err(CoreError::DuplicateCard(card.name().to_string()));
        }

        let card = Arc::new(card);
        self.card_types.insert(key.clone(), Arc::clone(&card));
        self.card_counts.insert(key, 1);
        Ok(card)
    }

    pub fn increase_count(&mut self, name: &str, amount: i64) -> bool {
        match self.try_increase_count(name, amount) {
            Ok(count) => {
                debug!(card = %name, amount, count, "Increased card count");
                true
            }
            Err(e) => {
                warn!(card = %name, amount, error = %e, "Could not increase card count");
                false
            }
        }
    }

    /// Adds `amount` copies. Returns the new count.
    ///
    /// ## Errors
    /// - `CardNotFound` for an unknown card
    /// - `Validation` when `amount <= 0`
    /// - `CountOverflow` when the count would pass `i64::MAX`
    pub fn try_increase_count(&mut self, name: &str, amount: i64) -> CoreResult<i64> {
        let updated = self.check_increase(name, amount)?;
        self.card_counts.insert(name_key(name), updated);
        Ok(updated)
    }

    /// Verifies `amount` copies could be added, returning the would-be count.
    pub fn check_increase(&self, name: &str, amount: i64) -> CoreResult<i64> {
        let card = self.require_card(name)?;
        validate_amount(amount)?;

        self.get_card_count(name)
            .checked_add(amount)
            .ok_or_else(|| CoreError::CountOverflow {
                card: card.name().to_string(),
                amount,
            })
    }

    /// Returns a batch of checked-out cards, one copy each.
    ///
    /// Every count is checked first, so either all cards come back or none.
    pub fn return_cards(&mut self, cards: &[Arc<Card>]) -> CoreResult<()> {
        let mut returned: HashMap<String, i64> = HashMap::new();
        for card in cards {
            *returned.entry(card.key()).or_insert(0) += 1;
        }

        let mut updated = Vec::with_capacity(returned.len());
        for (key, amount) in returned {
            updated.push((key.clone(), self.check_increase(&key, amount)?));
        }

        self.card_counts.extend(updated);
        Ok(())
    }

    pub fn decrease_count(&mut self, name: &str, amount: i64) -> bool {
        match self.try_decrease_count(name, amount) {
            Ok(count) => {
                debug!(card = %name, amount, count, "Decreased card count");
                true
            }
            Err(e) => {
                warn!(card = %name, amount, error = %e, "Could not decrease card count");
                false
            }
        }
    }

    /// Removes `amount` copies. Returns the new count.
    ///
    /// ## Errors
    /// - `CardNotFound` for an unknown card
    /// - `Validation` when `amount <= 0`
    /// - `InsufficientCopies` when `amount` exceeds the current count
    pub fn try_decrease_count(&mut self, name: &str, amount: i64) -> CoreResult<i64> {
        self.check_available(name, amount)?;

        let key = name_key(name);
        let count = self.card_counts.entry(key).or_insert(0);
        *count -= amount;
        Ok(*count)
    }

    /// Verifies `amount` copies could be taken, without taking them.
    pub fn check_available(&self, name: &str, amount: i64) -> CoreResult<Arc<Card>> {
        let card = self.require_card(name)?;
        validate_amount(amount)?;

        let available = self.get_card_count(name);
        if available < amount {
            return Err(CoreError::InsufficientCopies {
                card: card.name().to_string(),
                available,
                requested: amount,
            });
        }

        Ok(card)
    }

    /// Sells loose copies straight out of the collection.
    ///
    /// Only the count changes here; crediting money is the facade's job.
    pub fn sell_card(&mut self, name: &str, amount: i64) -> bool {
        self.decrease_count(name, amount)
    }

    /// True iff at least one copy is available.
    pub fn is_card_available(&self, name: &str) -> bool {
        self.get_card_count(name) > 0
    }

    /// Available copies of a card, 0 when unknown.
    pub fn get_card_count(&self, name: &str) -> i64 {
        self.card_counts.get(&name_key(name)).copied().unwrap_or(0)
    }

    /// All card types, ordered by name (case-insensitive).
    pub fn get_card_types(&self) -> Vec<Arc<Card>> {
        self.card_types.values().cloned().collect()
    }

    /// Copy of the count map, keyed by lowercase name.
    pub fn get_card_counts(&self) -> HashMap<String, i64> {
        self.card_counts.clone()
    }

    /// Total available copies across all card types.
    pub fn total_copies(&self) -> i64 {
        self.card_counts
            .values()
            .fold(0, |total: i64, count| total.saturating_add(*count))
    }

    pub fn type_count(&self) -> usize {
        self.card_types.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn collection_with(name: &str, cents: i64) -> CollectionManager {
        let mut collection = CollectionManager::new();
        assert!(collection.add_new_card(name, Money::from_cents(cents), Rarity::Rare, Variant::FullArt));
        collection
    }

    #[test]
    fn test_add_new_card_starts_at_one() {
        let collection = collection_with("Pikachu", 1000);

        assert_eq!(collection.get_card_count("pikachu"), 1);
        let card = collection.find_card("  PIKACHU ").unwrap();
        assert_eq!(card.calculated_value(), Money::from_cents(2000));
    }

    #[test]
    fn test_add_new_card_rejects_duplicates_and_invalid() {
        let mut collection = collection_with("Pikachu", 1000);

        assert!(!collection.add_new_card("pikachu", Money::from_cents(5), Rarity::Common, Variant::Normal));
        assert!(!collection.add_new_card("  ", Money::from_cents(5), Rarity::Common, Variant::Normal));
        assert!(!collection.add_new_card("Ghost", Money::from_cents(-5), Rarity::Common, Variant::Normal));

        assert_eq!(collection.type_count(), 1);
        assert_eq!(collection.get_card_count("pikachu"), 1);
        assert!(collection.find_card("Ghost").is_none());
    }

    #[test]
    fn test_increase_count() {
        let mut collection = collection_with("Pikachu", 1000);

        assert!(collection.increase_count("Pikachu", 4));
        assert_eq!(collection.get_card_count("pikachu"), 5);

        assert!(!collection.increase_count("Pikachu", 0));
        assert!(!collection.increase_count("Pikachu", -2));
        assert!(!collection.increase_count("Raichu", 1));
        assert_eq!(collection.get_card_count("pikachu"), 5);
    }

    #[test]
    fn test_increase_count_rejects_overflow() {
        let mut collection = collection_with("Pikachu", 1000);

        assert!(!collection.increase_count("Pikachu", i64::MAX));
        assert_eq!(collection.get_card_count("Pikachu"), 1);
        assert!(matches!(
            collection.try_increase_count("Pikachu", i64::MAX),
            Err(CoreError::CountOverflow { .. })
        ));

        assert!(collection.increase_count("Pikachu", i64::MAX - 1));
        assert_eq!(collection.get_card_count("Pikachu"), i64::MAX);
        assert!(!collection.increase_count("Pikachu", 1));
        assert_eq!(collection.get_card_count("Pikachu"), i64::MAX);
    }

    #[test]
    fn test_return_cards_is_all_or_nothing() {
        let mut collection = CollectionManager::new();
        collection.add_new_card("Mew", Money::from_cents(100), Rarity::Rare, Variant::Normal);
        collection.add_new_card("Ditto", Money::from_cents(100), Rarity::Common, Variant::Normal);
        let mew = collection.find_card("Mew").unwrap();
        let ditto = collection.find_card("Ditto").unwrap();

        assert!(collection.return_cards(&[mew.clone(), ditto.clone(), ditto.clone()]).is_ok());
        assert_eq!(collection.get_card_count("Mew"), 2);
        assert_eq!(collection.get_card_count("Ditto"), 3);

        collection.increase_count("Ditto", i64::MAX - 4);
        assert!(matches!(
            collection.return_cards(&[mew, ditto.clone(), ditto]),
            Err(CoreError::CountOverflow { .. })
        ));
        assert_eq!(collection.get_card_count("Mew"), 2);
        assert_eq!(collection.get_card_count("Ditto"), i64::MAX - 1);
    }

    #[test]
    fn test_decrease_count_never_goes_negative() {
        let mut collection = collection_with("Pikachu", 1000);
        collection.increase_count("Pikachu", 2);

        assert!(!collection.decrease_count("Pikachu", 4));
        assert_eq!(collection.get_card_count("Pikachu"), 3);

        assert!(collection.decrease_count("Pikachu", 3));
        assert_eq!(collection.get_card_count("Pikachu"), 0);
        assert!(!collection.is_card_available("Pikachu"));

        assert!(!collection.decrease_count("Pikachu", 1));
        assert!(!collection.decrease_count("Pikachu", 0));
        assert_eq!(collection.get_card_count("Pikachu"), 0);

        // Type stays registered at zero copies
        assert!(collection.find_card("Pikachu").is_some());
    }

    #[test]
    fn test_check_available_reports_shortfall() {
        let collection = collection_with("Pikachu", 1000);

        match collection.check_available("pikachu", 3) {
            Err(CoreError::InsufficientCopies {
                available,
                requested,
                ..
            }) => {
                assert_eq!(available, 1);
                assert_eq!(requested, 3);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            collection.check_available("Raichu", 1),
            Err(CoreError::CardNotFound(_))
        ));
    }

    #[test]
    fn test_sell_card_is_decrease() {
        let mut collection = collection_with("Pikachu", 1000);
        collection.increase_count("Pikachu", 1);

        assert!(collection.sell_card("Pikachu", 2));
        assert_eq!(collection.get_card_count("Pikachu"), 0);
        assert!(!collection.sell_card("Pikachu", 1));
    }

    #[test]
    fn test_getters_return_copies() {
        let mut collection = collection_with("Pikachu", 1000);
        collection.add_new_card("Abra", Money::from_cents(50), Rarity::Common, Variant::Normal);

        let mut counts = collection.get_card_counts();
        counts.insert("pikachu".to_string(), 99);
        counts.remove("abra");
        assert_eq!(collection.get_card_count("pikachu"), 1);
        assert_eq!(collection.get_card_count("abra"), 1);

        let mut types = collection.get_card_types();
        types.clear();
        assert_eq!(collection.type_count(), 2);

        // Ordered by name
        let names: Vec<String> = collection
            .get_card_types()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["Abra", "Pikachu"]);
        assert_eq!(collection.total_copies(), 2);
    }

    #[test]
    fn test_register_card_shares_instance() {
        let mut collection = CollectionManager::new();
        let card = Card::new("Mew", Money::from_cents(100), Rarity::Legendary, Variant::AltArt).unwrap();

        let registered = collection.register_card(card.clone()).unwrap();
        let found = collection.find_card("mew").unwrap();
        assert!(Arc::ptr_eq(&registered, &found));

        assert!(matches!(
            collection.register_card(card),
            Err(CoreError::DuplicateCard(_))
        ));
    }
}
