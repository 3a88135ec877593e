//! Перебор всех комбинаций, которые можно собрать из карт игрока.
//!
//! Каждая 5-карточная комбинация попадает ровно в одну категорию:
//! стрит-флеш исключается и из стритов, и из флешей.

use std::collections::HashSet;

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::hand::Hand;
use crate::eval::hand_rank::HandCategory;
use crate::eval::lookup_tables::{rank_to_bit, RankMask, STRAIGHT_MASKS, STRAIGHT_WINDOWS};

/// Результат классификации: восемь непересекающихся наборов рук,
/// по одному на категорию (индекс = HandCategory::index()).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassifiedHands {
    sets: [Vec<Hand>; 8],
}

impl ClassifiedHands {
    pub fn get(&self, category: HandCategory) -> &[Hand] {
        &self.sets[category.index()]
    }

    pub fn singles(&self) -> &[Hand] {
        self.get(HandCategory::Single)
    }

    pub fn pairs(&self) -> &[Hand] {
        self.get(HandCategory::Pair)
    }

    pub fn triples(&self) -> &[Hand] {
        self.get(HandCategory::Triple)
    }

    pub fn straights(&self) -> &[Hand] {
        self.get(HandCategory::Straight)
    }

    pub fn flushes(&self) -> &[Hand] {
        self.get(HandCategory::Flush)
    }

    pub fn full_houses(&self) -> &[Hand] {
        self.get(HandCategory::FullHouse)
    }

    pub fn four_of_a_kinds(&self) -> &[Hand] {
        self.get(HandCategory::FourOfAKindPlusKicker)
    }

    pub fn straight_flushes(&self) -> &[Hand] {
        self.get(HandCategory::StraightFlush)
    }

    /// Все руки с категориями, в порядке HandCategory::ALL.
    pub fn iter(&self) -> impl Iterator<Item = (HandCategory, &Hand)> + '_ {
        HandCategory::ALL
            .iter()
            .flat_map(move |&cat| self.get(cat).iter().map(move |h| (cat, h)))
    }

    /// Общее число рук во всех категориях.
    pub fn total(&self) -> usize {
        self.sets.iter().map(Vec::len).sum()
    }

    /// Категория, в которую попала ровно такая рука (если попала).
    pub fn category_of(&self, hand: &Hand) -> Option<HandCategory> {
        HandCategory::ALL
            .iter()
            .copied()
            .filter(|cat| cat.card_count() == hand.len())
            .find(|&cat| self.get(cat).contains(hand))
    }
}

/// Карты, разложенные по рангам и мастям (каждая группа отсортирована).
struct Groups {
    cards: Vec<Card>,
    by_rank: [Vec<Card>; 13],
    by_suit: [Vec<Card>; 4],
    /// Какие ранги есть в руке.
    rank_mask: RankMask,
}

impl Groups {
    fn new(cards: &[Card]) -> Self {
        let mut sorted = cards.to_vec();
        sorted.sort();
        sorted.dedup();

        let mut by_rank: [Vec<Card>; 13] = Default::default();
        let mut by_suit: [Vec<Card>; 4] = Default::default();
        let mut rank_mask: RankMask = 0;
        for &card in &sorted {
            by_rank[card.rank.index() as usize].push(card);
            by_suit[card.suit.index() as usize].push(card);
            rank_mask |= rank_to_bit(card.rank);
        }

        Self {
            cards: sorted,
            by_rank,
            by_suit,
            rank_mask,
        }
    }

    fn rank(&self, rank: Rank) -> &[Card] {
        &self.by_rank[rank.index() as usize]
    }

    fn suit(&self, suit: Suit) -> &[Card] {
        &self.by_suit[suit.index() as usize]
    }
}

/// Главная функция: разложить карты игрока по всем категориям.
///
/// Чистая функция: повторный вызов на тех же картах даёт тот же результат.
pub fn classify(cards: &[Card]) -> ClassifiedHands {
    let groups = Groups::new(cards);

    let singles = groups
        .cards
        .iter()
        .map(|&c| Hand::from_sorted_unchecked(vec![c]))
        .collect();
    let pairs = same_rank(&groups, 2);
    let triples = same_rank(&groups, 3);

    let all_straights = straights_of(&groups);
    let all_flushes = flushes_of(&groups);

    let flush_set: HashSet<&Hand> = all_flushes.iter().collect();
    let (straight_flushes, straights): (Vec<Hand>, Vec<Hand>) = all_straights
        .iter()
        .cloned()
        .partition(|h| flush_set.contains(h));

    let sf_set: HashSet<&Hand> = straight_flushes.iter().collect();
    let flushes = all_flushes
        .iter()
        .filter(|h| !sf_set.contains(h))
        .cloned()
        .collect();

    let full_houses = full_houses_of(&groups, &triples);
    let four_of_a_kinds = four_of_a_kinds_of(&groups);

    ClassifiedHands {
        sets: [
            singles,
            pairs,
            triples,
            straights,
            flushes,
            full_houses,
            four_of_a_kinds,
            straight_flushes,
        ],
    }
}

/// Определить категорию ровно этого набора карт (все карты должны участвовать).
///
/// Повторно классифицирует сами карты, так что ответ всегда согласован с `classify`.
pub fn categorize(hand: &Hand) -> Option<HandCategory> {
    classify(hand.cards()).category_of(hand)
}

/// Все стриты, включая стрит-флеши (до исключения).
pub fn candidate_straights(cards: &[Card]) -> Vec<Hand> {
    straights_of(&Groups::new(cards))
}

/// Все флеши, включая стрит-флеши (до исключения).
pub fn candidate_flushes(cards: &[Card]) -> Vec<Hand> {
    flushes_of(&Groups::new(cards))
}

/// Пары (n = 2) и тройки (n = 3): все n-сочетания карт одного ранга.
fn same_rank(groups: &Groups, n: usize) -> Vec<Hand> {
    Rank::ALL
        .iter()
        .flat_map(|&rank| combinations(groups.rank(rank), n))
        .map(Hand::from_sorted_unchecked)
        .collect()
}

/// Для каждого окна рангов, полностью присутствующего в руке,
/// берём по одной карте каждого ранга окна.
fn straights_of(groups: &Groups) -> Vec<Hand> {
    let mut out = Vec::new();

    for (window, &mask) in STRAIGHT_WINDOWS.iter().zip(STRAIGHT_MASKS.iter()) {
        if groups.rank_mask & mask != mask {
            continue;
        }

        let mut partial: Vec<Vec<Card>> = vec![Vec::with_capacity(5)];
        for &rank in window {
            let mut extended = Vec::with_capacity(partial.len() * groups.rank(rank).len());
            for prefix in &partial {
                for &card in groups.rank(rank) {
                    let mut next = prefix.clone();
                    next.push(card);
                    extended.push(next);
                }
            }
            partial = extended;
        }

        for mut cards in partial {
            cards.sort();
            out.push(Hand::from_sorted_unchecked(cards));
        }
    }

    out
}

fn flushes_of(groups: &Groups) -> Vec<Hand> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| combinations(groups.suit(suit), 5))
        .map(Hand::from_sorted_unchecked)
        .collect()
}

/// Тройка + пара из оставшихся карт (другого ранга).
fn full_houses_of(groups: &Groups, triples: &[Hand]) -> Vec<Hand> {
    let mut out = Vec::new();

    for triple in triples {
        let rest = Groups::new(
            &groups
                .cards
                .iter()
                .copied()
                .filter(|c| !triple.contains(c))
                .collect::<Vec<_>>(),
        );

        for &rank in Rank::ALL.iter() {
            for pair in combinations(rest.rank(rank), 2) {
                let mut cards = triple.cards().to_vec();
                cards.extend(pair);
                cards.sort();
                out.push(Hand::from_sorted_unchecked(cards));
            }
        }
    }

    out
}

/// Каре (ранг, которого ровно 4 карты) + любой кикер другого ранга.
fn four_of_a_kinds_of(groups: &Groups) -> Vec<Hand> {
    let mut out = Vec::new();

    for &rank in Rank::ALL.iter() {
        let quad = groups.rank(rank);
        if quad.len() != 4 {
            continue;
        }
        for &kicker in groups.cards.iter().filter(|c| c.rank != rank) {
            let mut cards = quad.to_vec();
            cards.push(kicker);
            cards.sort();
            out.push(Hand::from_sorted_unchecked(cards));
        }
    }

    out
}

/// Все k-сочетания в лексикографическом порядке индексов.
fn combinations(items: &[Card], k: usize) -> Vec<Vec<Card>> {
    let n = items.len();
    if k == 0 || k > n {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.iter().map(|&i| items[i]).collect());

        // Найти самую правую позицию, которую ещё можно сдвинуть.
        let mut i = k;
        while i > 0 && idx[i - 1] == n - k + (i - 1) {
            i -= 1;
        }
        if i == 0 {
            break;
        }
        idx[i - 1] += 1;
        for j in i..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
    out
}
