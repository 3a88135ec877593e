use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::domain::card::THREE_OF_DIAMONDS;
use crate::domain::deck::{Deck, DeckError};
use crate::domain::player::PlayerHand;
use crate::domain::table::Table;
use crate::domain::{PlayerId, RoundId, SeatIndex, TableId};
use crate::engine::actions::PlayerAction;
use crate::engine::errors::EngineError;
use crate::engine::positions::{next_seat, turn_order};
use crate::engine::round_history::{RoundEventKind, RoundHistory};
use crate::engine::validation::{legal_options, validate_action};
use crate::engine::RandomSource;
use crate::eval::Combo;

/// Фаза раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundPhase {
    /// Поле пустое, ждём первый ход (с тройкой бубен).
    AwaitingOpeningPlay,
    /// На поле есть рука: текущий игрок бьёт её, пасует или ходит свободно.
    AwaitingResponse,
    /// Кто-то избавился от всех карт.
    RoundOver { winner: PlayerId },
}

/// Что требуется от текущего игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnKind {
    /// Первый ход раунда: любая рука с тройкой бубен, пас запрещён.
    Opening,
    /// Наверху поля рука самого игрока (все спасовали): любая рука, пас запрещён.
    FreeTurn,
    /// Нужно перебить `target` или спасовать.
    Response { target: Combo },
}

/// Итог завершённого раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSummary {
    pub round_id: RoundId,
    pub table_id: TableId,
    pub winner: PlayerId,
    /// Сколько рук выложено на поле за раунд.
    pub plays: usize,
    /// Сколько карт осталось у каждого игрока (по местам).
    pub cards_left: Vec<(PlayerId, usize)>,
}

/// Статус раунда для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    Ongoing,
    Finished(RoundSummary, RoundHistory),
}

/// Внутреннее состояние раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundEngine {
    pub table_id: TableId,
    pub round_id: RoundId,
    pub phase: RoundPhase,
    /// Места в порядке хода (начиная с владельца 3♦).
    pub turn_order: Vec<SeatIndex>,
    /// Чей сейчас ход (seat). None – раунд окончен.
    pub current_actor: Option<SeatIndex>,
    /// История раунда.
    pub history: RoundHistory,
}

impl RoundEngine {
    fn new(table_id: TableId, round_id: RoundId, turn_order: Vec<SeatIndex>) -> Self {
        let current_actor = turn_order.first().copied();
        Self {
            table_id,
            round_id,
            phase: RoundPhase::AwaitingOpeningPlay,
            turn_order,
            current_actor,
            history: RoundHistory::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, RoundPhase::RoundOver { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            RoundPhase::RoundOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// ID игрока, который сейчас ходит.
    pub fn current_player_id(&self, table: &Table) -> Option<PlayerId> {
        self.current_actor
            .and_then(|seat| table.player(seat))
            .map(|p| p.player_id())
    }

    /// Тип текущего хода. None – раунд окончен.
    pub fn turn_kind(&self, table: &Table) -> Option<TurnKind> {
        let actor = self.current_player_id(table)?;
        match &self.phase {
            RoundPhase::AwaitingOpeningPlay => Some(TurnKind::Opening),
            RoundPhase::AwaitingResponse => {
                let top = table.field.top()?;
                if top.player_id == actor {
                    Some(TurnKind::FreeTurn)
                } else {
                    Some(TurnKind::Response {
                        target: top.combo.clone(),
                    })
                }
            }
            RoundPhase::RoundOver { .. } => None,
        }
    }

    /// Легальные руки текущего игрока в текущем ходе.
    pub fn legal_options(&self, table: &Table) -> Vec<Combo> {
        let turn = match self.turn_kind(table) {
            Some(t) => t,
            None => return Vec::new(),
        };
        self.current_actor
            .and_then(|seat| table.player(seat))
            .map(|p| legal_options(p, &turn))
            .unwrap_or_default()
    }
}

/// Старт нового раунда:
/// - перемешивает колоду через RNG;
/// - раздаёт по `hand_size` карт;
/// - определяет порядок хода от владельца 3♦.
pub fn start_round<R: RandomSource>(
    table: &mut Table,
    rng: &mut R,
    round_id: RoundId,
) -> Result<RoundEngine, EngineError> {
    let mut deck = Deck::standard_52();
    rng.shuffle(&mut deck.cards);
    start_round_with_deck(table, deck, round_id)
}

/// Старт раунда с заранее подготовленной колодой (реплей, тесты).
///
/// Карты берутся с конца `deck.cards`: место 0 получает последние `hand_size` карт и т.д.
pub fn start_round_with_deck(
    table: &mut Table,
    mut deck: Deck,
    round_id: RoundId,
) -> Result<RoundEngine, EngineError> {
    if table.round_in_progress {
        return Err(EngineError::RoundAlreadyInProgress);
    }
    table.config.validate()?;
    let hands = deck.deal(table.seated_count(), table.config.hand_size)?;
    start_round_with_hands(table, hands, round_id)
}

/// Старт раунда с уже розданными руками (по местам).
///
/// Предусловие раздачи: руки не пересекаются и вместе дают ровно 52 карты.
pub fn start_round_with_hands(
    table: &mut Table,
    hands: Vec<PlayerHand>,
    round_id: RoundId,
) -> Result<RoundEngine, EngineError> {
    if table.round_in_progress {
        return Err(EngineError::RoundAlreadyInProgress);
    }
    table.config.validate()?;
    if hands.len() != table.seated_count() {
        return Err(DeckError::HandCount {
            expected: table.seated_count(),
            got: hands.len(),
        }
        .into());
    }
    if let Some(h) = hands.iter().find(|h| h.len() != table.config.hand_size) {
        return Err(DeckError::HandSize {
            expected: table.config.hand_size,
            got: h.len(),
        }
        .into());
    }
    Deck {
        cards: hands.iter().flat_map(|h| h.cards().iter().copied()).collect(),
    }
    .validate()?;

    table.reset_for_new_round();
    for (seat, hand) in table.seats.iter_mut().zip(hands) {
        seat.hand = hand;
    }

    let order = turn_order(table, &THREE_OF_DIAMONDS)
        .ok_or(EngineError::Internal("тройка бубен не найдена ни у одного игрока"))?;

    let table_id = table.id;
    let mut engine = RoundEngine::new(table_id, round_id, order);

    let order_ids: Vec<PlayerId> = engine
        .turn_order
        .iter()
        .filter_map(|&s| table.player(s))
        .map(|p| p.player_id())
        .collect();

    engine.history.push(RoundEventKind::RoundStarted {
        table_id,
        round_id,
        turn_order: order_ids.clone(),
    });
    for (idx, p) in table.seats.iter().enumerate() {
        engine.history.push(RoundEventKind::CardsDealt {
            seat: idx as SeatIndex,
            player_id: p.player_id(),
            cards: p.hand.cards().to_vec(),
        });
    }

    table.current_round_id = Some(round_id);
    table.round_in_progress = true;

    info!(
        "round {} started at table {}: turn order {:?}",
        round_id, table_id, order_ids
    );

    Ok(engine)
}

/// Применить действие игрока. Возвращает статус раунда (идёт / закончился).
///
/// Ошибка не меняет ни стол, ни движок: тот же игрок может сходить заново.
pub fn apply_action(
    table: &mut Table,
    engine: &mut RoundEngine,
    action: PlayerAction,
) -> Result<RoundStatus, EngineError> {
    if !table.round_in_progress || engine.is_over() {
        return Err(EngineError::NoActiveRound);
    }

    let seat = table
        .seat_of(action.player_id)
        .ok_or(EngineError::PlayerNotAtTable(action.player_id))?;

    if engine.current_actor != Some(seat) {
        return Err(EngineError::NotPlayersTurn(action.player_id));
    }

    let turn = engine.turn_kind(table).ok_or(EngineError::NoActiveRound)?;
    let player_ref = table.player(seat).ok_or(EngineError::PlayerNotAtTable(action.player_id))?;

    match validate_action(player_ref, &action.kind, &turn)? {
        None => {
            debug!("player {} passes", action.player_id);
            engine.history.push(RoundEventKind::Passed {
                player_id: action.player_id,
            });
        }
        Some(combo) => {
            let cards_left = {
                let player = table
                    .player_mut(seat)
                    .ok_or(EngineError::PlayerNotAtTable(action.player_id))?;
                player.hand.remove(&combo.hand);
                player.played.push(combo.hand.clone());
                player.hand.len()
            };

            debug!("player {} plays {} ({} cards left)", action.player_id, combo, cards_left);

            table.field.push(action.player_id, combo.clone());
            engine.history.push(RoundEventKind::HandPlayed {
                player_id: action.player_id,
                combo,
                cards_left,
            });
            engine.phase = RoundPhase::AwaitingResponse;

            if cards_left == 0 {
                return Ok(finish_round(table, engine, action.player_id));
            }
        }
    }

    // Ход переходит к следующему по кругу.
    engine.current_actor = Some(next_seat(table, seat));
    Ok(RoundStatus::Ongoing)
}

/// Закрыть раунд: победитель найден, больше ходов не будет.
fn finish_round(table: &mut Table, engine: &mut RoundEngine, winner: PlayerId) -> RoundStatus {
    engine.phase = RoundPhase::RoundOver { winner };
    engine.current_actor = None;
    engine.history.push(RoundEventKind::RoundWon {
        player_id: winner,
        round_id: engine.round_id,
    });
    table.round_in_progress = false;

    info!("round {} won by player {}", engine.round_id, winner);

    let summary = RoundSummary {
        round_id: engine.round_id,
        table_id: engine.table_id,
        winner,
        plays: table.field.len(),
        cards_left: table
            .seats
            .iter()
            .map(|p| (p.player_id(), p.hand.len()))
            .collect(),
    };
    RoundStatus::Finished(summary, engine.history.clone())
}
