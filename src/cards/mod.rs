//! Card system: templates, instances, catalog and deck construction.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for catalog templates
//! - `CardTemplate`: Immutable card data (cost, attack, defense, abilities)
//! - `CardInstance`: One copy in a match (tapped, summoning sickness, defense)
//! - `CardCatalog`: Template lookup, shared by every match
//! - `DeckBuilder`: Randomized or listed decks with unique instance ids

pub mod catalog;
pub mod deck;
pub mod definition;
pub mod instance;

pub use catalog::{CardCatalog, CatalogError};
pub use deck::DeckBuilder;
pub use definition::{CardId, CardTemplate, FIRST_STRIKE};
pub use instance::CardInstance;
