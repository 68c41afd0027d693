//! # Card Types
//!
//! The immutable `Card` value and its two closed enumerations.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Card Types                                     │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Card       │   │     Rarity      │   │     Variant     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (key)     │   │  Common         │   │  Normal    ×1.0 │       │
//! │  │  base_value     │   │  Uncommon       │   │  ExtendedArt×1.5│       │
//! │  │  rarity         │   │  Rare           │   │  FullArt   ×2.0 │       │
//! │  │  variant        │   │  Legendary      │   │  AltArt    ×3.0 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  calculated_value = base_value × variant multiplier                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A card's name is its identity across the whole system, compared
//! case-insensitively after trimming. Two `Card` values with the same name
//! are the same card type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{name_key, validate_base_value, validate_name, ValidationResult};

/// Lowercases and strips separators so "Extended-art", "extended_art" and
/// "ExtendedArt" all parse the same way.
fn normalize_choice(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// Rarity
// =============================================================================

/// How rare a card is. Drives binder eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    /// All rarities in menu order.
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Maps a 1-based menu choice to a rarity.
    ///
    /// ## Example
    /// ```rust
    /// use tcis_core::Rarity;
    ///
    /// assert_eq!(Rarity::from_choice(3), Some(Rarity::Rare));
    /// assert_eq!(Rarity::from_choice(0), None);
    /// ```
    pub fn from_choice(choice: usize) -> Option<Rarity> {
        choice
            .checked_sub(1)
            .and_then(|i| Rarity::ALL.get(i).copied())
    }

    /// Rare and Legendary cards are the only ones conventionally printed in
    /// special variants.
    ///
    /// Advisory only: `Card::new` accepts any combination, presentation
    /// layers use this to decide which variants to offer.
    pub fn supports_special_variants(&self) -> bool {
        matches!(self, Rarity::Rare | Rarity::Legendary)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Rarity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "common" => Ok(Rarity::Common),
            "uncommon" => Ok(Rarity::Uncommon),
            "rare" => Ok(Rarity::Rare),
            "legendary" => Ok(Rarity::Legendary),
            _ => Err(ValidationError::NotAllowed {
                field: "rarity".to_string(),
                allowed: Rarity::ALL.iter().map(|r| r.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Variant
// =============================================================================

/// Printing variant of a card. Each carries a value multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Normal,
    ExtendedArt,
    FullArt,
    AltArt,
}

impl Variant {
    /// All variants in menu order.
    pub const ALL: [Variant; 4] = [
        Variant::Normal,
        Variant::ExtendedArt,
        Variant::FullArt,
        Variant::AltArt,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Variant::Normal => "Normal",
            Variant::ExtendedArt => "Extended-art",
            Variant::FullArt => "Full-art",
            Variant::AltArt => "Alt-art",
        }
    }

    /// Value multiplier as an integer percentage (150 = ×1.5).
    #[inline]
    pub const fn multiplier_percent(&self) -> u32 {
        match self {
            Variant::Normal => 100,
            Variant::ExtendedArt => 150,
            Variant::FullArt => 200,
            Variant::AltArt => 300,
        }
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        !matches!(self, Variant::Normal)
    }

    /// Maps a 1-based menu choice to a variant.
    pub fn from_choice(choice: usize) -> Option<Variant> {
        choice
            .checked_sub(1)
            .and_then(|i| Variant::ALL.get(i).copied())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Variant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "normal" => Ok(Variant::Normal),
            "extendedart" => Ok(Variant::ExtendedArt),
            "fullart" => Ok(Variant::FullArt),
            "altart" => Ok(Variant::AltArt),
            _ => Err(ValidationError::NotAllowed {
                field: "variant".to_string(),
                allowed: Variant::ALL.iter().map(|v| v.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Card
// =============================================================================

/// A card type. Immutable after construction.
///
/// ## Invariants
/// - `name` is trimmed and non-blank
/// - `base_value` is non-negative
///
/// Deserialization goes through [`CardDraft`] so the same checks apply to
/// cards arriving from a frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", try_from = "CardDraft")]
pub struct Card {
    name: String,
    base_value: Money,
    rarity: Rarity,
    variant: Variant,
}

impl Card {
    /// Creates a card, validating every field.
    ///
    /// ## Errors
    /// - `Required` if the name is blank
    /// - `MustBeNonNegative` if the base value is below zero
    ///
    /// ## Example
    /// ```rust
    /// use tcis_core::{Card, Money, Rarity, Variant};
    ///
    /// let card = Card::new(" Pikachu ", Money::from_cents(1000), Rarity::Rare, Variant::FullArt).unwrap();
    /// assert_eq!(card.name(), "Pikachu");
    /// assert_eq!(card.calculated_value().cents(), 2000);
    ///
    /// assert!(Card::new("", Money::zero(), Rarity::Common, Variant::Normal).is_err());
    /// ```
    pub fn new(
        name: &str,
        base_value: Money,
        rarity: Rarity,
        variant: Variant,
    ) -> ValidationResult<Card> {
        let name = validate_name("card name", name)?;
        validate_base_value(base_value)?;

        Ok(Card {
            name,
            base_value,
            rarity,
            variant,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive lookup key for this card.
    #[inline]
    pub fn key(&self) -> String {
        name_key(&self.name)
    }

    /// Returns true if `name` refers to this card type.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name_key(name)
    }

    #[inline]
    pub fn base_value(&self) -> Money {
        self.base_value
    }

    #[inline]
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The card's real (tradeable) worth: base value × variant multiplier.
    pub fn calculated_value(&self) -> Money {
        self.base_value.scale_percent(self.variant.multiplier_percent())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) {}",
            self.name,
            self.rarity,
            self.variant,
            self.calculated_value()
        )
    }
}

// =============================================================================
// Card Draft
// =============================================================================

/// Unvalidated card fields as a presentation layer collects them.
///
/// Rarity and variant are optional here because a form can be submitted
/// without choosing one; converting into a [`Card`] rejects that.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub name: String,
    pub base_value: Money,
    pub rarity: Option<Rarity>,
    pub variant: Option<Variant>,
}

impl TryFrom<CardDraft> for Card {
    type Error = ValidationError;

    fn try_from(draft: CardDraft) -> Result<Self, Self::Error> {
        let rarity = draft.rarity.ok_or_else(|| ValidationError::Required {
            field: "rarity".to_string(),
        })?;
        let variant = draft.variant.ok_or_else(|| ValidationError::Required {
            field: "variant".to_string(),
        })?;

        Card::new(&draft.name, draft.base_value, rarity, variant)
    }
}

impl From<&Card> for CardDraft {
    fn from(card: &Card) -> Self {
        CardDraft {
            name: card.name.clone(),
            base_value: card.base_value,
            rarity: Some(card.rarity),
            variant: Some(card.variant),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, cents: i64, rarity: Rarity, variant: Variant) -> Card {
        Card::new(name, Money::from_cents(cents), rarity, variant).unwrap()
    }

    #[test]
    fn test_calculated_value_uses_variant_multiplier() {
        let base = 1000;
        assert_eq!(card("a", base, Rarity::Rare, Variant::Normal).calculated_value().cents(), 1000);
        assert_eq!(card("b", base, Rarity::Rare, Variant::ExtendedArt).calculated_value().cents(), 1500);
        assert_eq!(card("c", base, Rarity::Rare, Variant::FullArt).calculated_value().cents(), 2000);
        assert_eq!(card("d", base, Rarity::Rare, Variant::AltArt).calculated_value().cents(), 3000);
    }

    #[test]
    fn test_new_trims_name() {
        let c = card("  Charizard  ", 500, Rarity::Legendary, Variant::AltArt);
        assert_eq!(c.name(), "Charizard");
        assert_eq!(c.key(), "charizard");
        assert!(c.matches_name(" CHARIZARD"));
        assert!(!c.matches_name("Charmander"));
    }

    #[test]
    fn test_new_rejects_invalid_fields() {
        let blank = Card::new("   ", Money::from_cents(100), Rarity::Common, Variant::Normal);
        assert!(matches!(blank, Err(ValidationError::Required { .. })));

        let negative = Card::new("Bulbasaur", Money::from_cents(-1), Rarity::Common, Variant::Normal);
        assert!(matches!(negative, Err(ValidationError::MustBeNonNegative { .. })));

        // Zero-value cards are allowed
        assert!(Card::new("Energy", Money::zero(), Rarity::Common, Variant::Normal).is_ok());
    }

    #[test]
    fn test_variant_not_restricted_by_rarity() {
        // Offering only Rare/Legendary special variants is a UI convention
        let c = card("Odd Print", 100, Rarity::Common, Variant::AltArt);
        assert_eq!(c.calculated_value().cents(), 300);
        assert!(!Rarity::Common.supports_special_variants());
        assert!(Rarity::Legendary.supports_special_variants());
    }

    #[test]
    fn test_draft_requires_rarity_and_variant() {
        let draft = CardDraft {
            name: "Mew".to_string(),
            base_value: Money::from_cents(4200),
            rarity: None,
            variant: Some(Variant::Normal),
        };
        assert_eq!(
            Card::try_from(draft).unwrap_err(),
            ValidationError::Required {
                field: "rarity".to_string()
            }
        );

        let draft = CardDraft {
            name: "Mew".to_string(),
            base_value: Money::from_cents(4200),
            rarity: Some(Rarity::Legendary),
            variant: None,
        };
        assert!(Card::try_from(draft).is_err());

        let original = card("Mew", 4200, Rarity::Legendary, Variant::FullArt);
        let round = Card::try_from(CardDraft::from(&original)).unwrap();
        assert_eq!(round, original);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Card = serde_json::from_str(
            r#"{"name":"Eevee","baseValue":250,"rarity":"uncommon","variant":"normal"}"#,
        )
        .unwrap();
        assert_eq!(ok.rarity(), Rarity::Uncommon);

        let bad = serde_json::from_str::<Card>(
            r#"{"name":"  ","baseValue":250,"rarity":"uncommon","variant":"normal"}"#,
        );
        assert!(bad.is_err());

        let missing = serde_json::from_str::<Card>(r#"{"name":"Eevee","baseValue":250}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("legendary".parse::<Rarity>().unwrap(), Rarity::Legendary);
        assert_eq!(" RARE ".parse::<Rarity>().unwrap(), Rarity::Rare);
        assert!("mythic".parse::<Rarity>().is_err());

        assert_eq!("Extended-art".parse::<Variant>().unwrap(), Variant::ExtendedArt);
        assert_eq!("full_art".parse::<Variant>().unwrap(), Variant::FullArt);
        assert_eq!("AltArt".parse::<Variant>().unwrap(), Variant::AltArt);
        assert!("holo".parse::<Variant>().is_err());
    }

    #[test]
    fn test_from_choice() {
        assert_eq!(Rarity::from_choice(1), Some(Rarity::Common));
        assert_eq!(Rarity::from_choice(4), Some(Rarity::Legendary));
        assert_eq!(Rarity::from_choice(5), None);
        assert_eq!(Variant::from_choice(2), Some(Variant::ExtendedArt));
        assert_eq!(Variant::from_choice(0), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Variant::ExtendedArt.to_string(), "Extended-art");
        assert_eq!(Variant::AltArt.multiplier_percent(), 300);
        let c = card("Pikachu", 1000, Rarity::Rare, Variant::FullArt);
        assert_eq!(c.to_string(), "Pikachu (Rare, Full-art) $20.00");
    }
}
