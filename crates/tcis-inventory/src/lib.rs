//! # tcis-inventory: Stateful Inventory Engine
//!
//! Owns the collection, binders and decks, and moves cards between them
//! using the rules in `tcis-core`.
//!
//! ## Module Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          tcis-inventory                                 │
//! │                                                                         │
//! │   state ─────────► inventory (InventorySystem facade)                   │
//! │   Arc<Mutex<_>>        │                                                │
//! │                        ├──► collection      card types + counts         │
//! │                        ├──► binder_manager  binders, trades, prices     │
//! │                        ├──► deck_manager    decks                       │
//! │                        └──► config          TCIS_* settings             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Surface
//! Rule violations never escape as errors. Each public manager method turns
//! them into a `bool`, an [`AddCardStatus`](tcis_core::AddCardStatus) or an
//! `Option`, and logs the cause with `tracing::warn!`. The `try_*` variants
//! on the managers expose the underlying [`CoreError`](tcis_core::CoreError)
//! for callers that want it.
//!
//! ## Example
//! ```rust
//! use tcis_core::{AddCardStatus, Money, Rarity, Variant};
//! use tcis_inventory::InventorySystem;
//!
//! let mut inventory = InventorySystem::new();
//! inventory.add_new_card("Charizard", Money::from_cents(5000), Rarity::Legendary, Variant::AltArt);
//! inventory.create_binder("Vault", "Luxury");
//!
//! assert_eq!(inventory.add_card_to_binder("charizard", "vault"), AddCardStatus::Added);
//! assert_eq!(inventory.sell_binder("Vault"), Some(Money::from_cents(16500)));
//! assert_eq!(inventory.total_money(), Money::from_cents(16500));
//! ```

pub mod binder_manager;
pub mod collection;
pub mod config;
pub mod deck_manager;
pub mod inventory;
pub mod state;

pub use binder_manager::BinderManager;
pub use collection::CollectionManager;
pub use config::InventoryConfig;
pub use deck_manager::DeckManager;
pub use inventory::{CardHolding, InventorySummary, InventorySystem};
pub use state::InventoryState;
