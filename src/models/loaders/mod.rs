pub mod deck_loader;

pub use deck_loader::{load_deck_file, parse_deck, strip_comments};
