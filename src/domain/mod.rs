//! Доменная модель Big Two: карты, колода, руки, игроки, поле, стол.

pub mod card;
pub mod deck;
pub mod field;
pub mod hand;
pub mod player;
pub mod table;

pub type PlayerId = u64;
pub type TableId = u64;
pub type RoundId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use deck::*;
pub use field::*;
pub use hand::*;
pub use player::*;
pub use table::*;
