pub mod deck;
pub mod item;
pub mod loaders;

pub use deck::Deck;
pub use item::{Item, ItemId};
pub use loaders::{load_deck_file, parse_deck};
