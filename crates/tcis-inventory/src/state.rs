//! # Inventory State
//!
//! Shares one [`InventorySystem`] between threads.
//!
//! ## Thread Safety
//! Manager operations run check → mutate → mutate. Holding the lock for the
//! whole closure makes each operation one critical section, so a trade can
//! never interleave with a sale of the same binder.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::InventoryConfig;
use crate::inventory::InventorySystem;

#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    inventory: Arc<Mutex<InventorySystem>>,
}

impl InventoryState {
    pub fn new(config: InventoryConfig) -> Self {
        InventoryState {
            inventory: Arc::new(Mutex::new(InventorySystem::with_config(config))),
        }
    }

    /// Operations validate before mutating, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, InventorySystem> {
        self.inventory
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Executes a function with read access to the inventory.
    ///
    /// ## Usage
    /// ```rust
    /// # use tcis_inventory::InventoryState;
    /// let state = InventoryState::default();
    /// let money = state.with_inventory(|inv| inv.total_money());
    /// assert!(money.is_zero());
    /// ```
    pub fn with_inventory<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InventorySystem) -> R,
    {
        let inventory = self.lock();
        f(&inventory)
    }

    /// Executes a function with write access to the inventory.
    pub fn with_inventory_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InventorySystem) -> R,
    {
        let mut inventory = self.lock();
        f(&mut inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tcis_core::{Money, Rarity, Variant};

    #[test]
    fn test_concurrent_sales_never_oversell() {
        let state = InventoryState::default();
        state.with_inventory_mut(|inv| {
            inv.add_new_card("Rattata", Money::from_cents(50), Rarity::Common, Variant::Normal);
            inv.increase_count("Rattata", 9);
        });

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let state = state.clone();
                thread::spawn(move || {
                    (0..5)
                        .filter(|_| state.with_inventory_mut(|inv| inv.sell_one_card("Rattata")).is_some())
                        .count()
                })
            })
            .collect();

        let sold: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(sold, 10);
        state.with_inventory(|inv| {
            assert_eq!(inv.get_card_count("Rattata"), 0);
            assert_eq!(inv.total_money().cents(), 500);
            assert_eq!(inv.sales().len(), 10);
        });
    }

    #[test]
    fn test_uses_given_config() {
        let config = InventoryConfig {
            trade_warning_threshold: Money::from_cents(250),
            ..InventoryConfig::default()
        };
        let state = InventoryState::new(config);

        let threshold = state.with_inventory(|inv| inv.config().trade_warning_threshold);
        assert_eq!(threshold.cents(), 250);
    }
}
