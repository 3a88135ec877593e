use crate::domain::card::Rank;
use crate::domain::card::Rank::*;

/// Битовая маска рангов.
///
/// Используем 13 бит в порядке Big Two:
/// бит 0 = тройка, бит 11 = туз, бит 12 = двойка.
pub type RankMask = u16;

/// Все окна рангов, образующие стрит.
///
/// Индексы:
///   0..=8: пять подряд в каноническом порядке (34567 ... JQKA2)
///   9:     A2345 (двойка как младшая карта)
///   10:    23456 (двойка как младшая карта)
///
/// Других "заворотов" (например, QKA23) нет.
pub const STRAIGHT_WINDOWS: [[Rank; 5]; 11] = [
    [Three, Four, Five, Six, Seven],
    [Four, Five, Six, Seven, Eight],
    [Five, Six, Seven, Eight, Nine],
    [Six, Seven, Eight, Nine, Ten],
    [Seven, Eight, Nine, Ten, Jack],
    [Eight, Nine, Ten, Jack, Queen],
    [Nine, Ten, Jack, Queen, King],
    [Ten, Jack, Queen, King, Ace],
    [Jack, Queen, King, Ace, Two],
    // wrap-исключения
    [Ace, Two, Three, Four, Five],
    [Two, Three, Four, Five, Six],
];

/// Маски окон из STRAIGHT_WINDOWS (тот же порядок).
/// Окно целиком есть в руке, если `mask & rank_mask == mask`.
pub const STRAIGHT_MASKS: [RankMask; 11] = [
    mask_from_ranks(&STRAIGHT_WINDOWS[0]),
    mask_from_ranks(&STRAIGHT_WINDOWS[1]),
    mask_from_ranks(&STRAIGHT_WINDOWS[2]),
    mask_from_ranks(&STRAIGHT_WINDOWS[3]),
    mask_from_ranks(&STRAIGHT_WINDOWS[4]),
    mask_from_ranks(&STRAIGHT_WINDOWS[5]),
    mask_from_ranks(&STRAIGHT_WINDOWS[6]),
    mask_from_ranks(&STRAIGHT_WINDOWS[7]),
    mask_from_ranks(&STRAIGHT_WINDOWS[8]),
    mask_from_ranks(&STRAIGHT_WINDOWS[9]),
    mask_from_ranks(&STRAIGHT_WINDOWS[10]),
];

/// Получить битовую маску для одного ранга.
pub const fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank as u8)
}

/// Построить маску из списка рангов.
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        mask |= rank_to_bit(ranks[i]);
        i += 1;
    }
    mask
}
