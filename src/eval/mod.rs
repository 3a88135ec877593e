//! Модуль правил Big Two: классификация рук и поиск ходов, бьющих поле.
//!
//! Основные функции:
//!   `classify(cards) -> ClassifiedHands`
//!   `valid_plays(classified, target) -> Vec<Combo>`

pub mod classifier;
pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use classifier::{candidate_flushes, candidate_straights, categorize, classify, ClassifiedHands};
pub use evaluator::{
    all_plays, beats, hand_rank_of, plays_containing, valid_plays, valid_plays_against, Combo,
};
pub use hand_rank::{describe_hand, HandCategory, HandRank};
