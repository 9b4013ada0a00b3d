pub mod deck_converter;
pub mod history_store;

pub use deck_converter::convert_key_value_to_deck_file;
pub use history_store::{HistoryFile, HistoryStore};
