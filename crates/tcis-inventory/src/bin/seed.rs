//! # Sample Inventory Generator
//!
//! Builds a small inventory, runs a sale and a trade through it, and prints
//! the resulting summary as JSON.
//!
//! ## Usage
//! ```bash
//! # Pretty JSON (default)
//! cargo run -p tcis-inventory --bin seed
//!
//! # Single-line JSON
//! cargo run -p tcis-inventory --bin seed -- --compact
//!
//! # Watch every manager call
//! RUST_LOG=debug cargo run -p tcis-inventory --bin seed
//! ```

use std::env;

use tcis_core::{Card, Money, Rarity, Variant};
use tcis_inventory::{InventoryConfig, InventorySystem};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// (name, base cents, rarity, variant, copies)
const CARDS: &[(&str, i64, Rarity, Variant, i64)] = &[
    ("Rattata", 25, Rarity::Common, Variant::Normal, 6),
    ("Caterpie", 20, Rarity::Common, Variant::ExtendedArt, 3),
    ("Growlithe", 150, Rarity::Uncommon, Variant::Normal, 2),
    ("Pikachu", 1200, Rarity::Rare, Variant::FullArt, 3),
    ("Gengar", 2500, Rarity::Rare, Variant::Normal, 2),
    ("Mewtwo", 6000, Rarity::Legendary, Variant::AltArt, 1),
    ("Lugia", 4500, Rarity::Legendary, Variant::ExtendedArt, 2),
];

/// (binder, kind, cards)
const BINDERS: &[(&str, &str, &[&str])] = &[
    ("Bulk Box", "Non-curated", &["Rattata", "Caterpie"]),
    ("Showcase", "Collector", &["Mewtwo"]),
    ("Bargain Bin", "Pauper", &["Rattata", "Rattata", "Growlithe"]),
    ("Heavy Hitters", "Rares", &["Gengar", "Pikachu"]),
    ("Vault", "Luxury", &["Lugia", "Caterpie"]),
];

/// (deck, kind, cards)
const DECKS: &[(&str, &str, &[&str])] = &[
    ("Casual", "Normal", &["Rattata", "Growlithe", "Pikachu"]),
    ("For Sale", "Sellable", &["Lugia", "Gengar", "Caterpie"]),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut compact = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--compact" | "-c" => compact = true,
            "--help" | "-h" => {
                println!("TCIS Sample Inventory Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --compact      Print single-line JSON");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
    }

    let config = InventoryConfig::from_env();
    init_tracing(&config);

    let mut inventory = InventorySystem::with_config(config);
    populate(&mut inventory);

    // One loose card, one binder, one deck
    inventory.sell_card("Rattata", 2);
    inventory.sell_binder("Heavy Hitters");
    inventory.sell_deck("For Sale");

    let incoming = Card::new("Snorlax", Money::from_cents(300), Rarity::Uncommon, Variant::Normal)?;
    if let Some(quote) = inventory.quote_trade("Bulk Box", 0, &incoming) {
        info!(
            outgoing = %quote.outgoing.name(),
            incoming = %quote.incoming.name(),
            difference = %quote.difference,
            requires_confirmation = quote.requires_confirmation,
            "Trade quoted, accepting"
        );
        inventory.perform_trade("Bulk Box", 0, incoming);
    }

    info!(
        total = %inventory.config().format_money(inventory.total_money()),
        sales = inventory.sales().len(),
        "Sample inventory ready"
    );

    let summary = inventory.summary();
    let json = if compact {
        serde_json::to_string(&summary)?
    } else {
        serde_json::to_string_pretty(&summary)?
    };
    println!("{json}");

    Ok(())
}

fn populate(inventory: &mut InventorySystem) {
    for &(name, cents, rarity, variant, copies) in CARDS {
        inventory.add_new_card(name, Money::from_cents(cents), rarity, variant);
        if copies > 1 {
            inventory.increase_count(name, copies - 1);
        }
    }

    for &(binder, kind, cards) in BINDERS {
        inventory.create_binder(binder, kind);
        for card in cards {
            inventory.add_card_to_binder(card, binder);
        }
    }
    inventory.set_binder_price("Vault", Money::from_cents(20000));

    for &(deck, kind, cards) in DECKS {
        inventory.create_deck(deck, kind);
        for card in cards {
            inventory.add_card_to_deck(card, deck);
        }
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - otherwise `TCIS_LOG`, default `info,tcis=debug`
fn init_tracing(config: &InventoryConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
