use crate::domain::{Card, SeatIndex, Table};

/// Следующее место по кругу.
pub fn next_seat(table: &Table, seat: SeatIndex) -> SeatIndex {
    let max = table.seated_count().max(1);
    ((seat as usize + 1) % max) as SeatIndex
}

/// Все места по кругу, начиная с `start`.
pub fn collect_seats_from(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    let max = table.seated_count();
    (0..max)
        .map(|i| ((start as usize + i) % max) as SeatIndex)
        .collect()
}

/// Порядок ходов на раунд: циклический сдвиг, начиная с владельца `opening_card`.
pub fn turn_order(table: &Table, opening_card: &Card) -> Option<Vec<SeatIndex>> {
    table
        .holder_of(opening_card)
        .map(|first| collect_seats_from(table, first))
}
