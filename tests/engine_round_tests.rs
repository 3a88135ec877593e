// tests/engine_round_tests.rs
//
// Раунд целиком: раздача, порядок хода, первый ход с 3♦, пасы,
// свободный ход, победитель.
//
// Раздача из неперемешанной колоды (start_round_with_deck):
//   место 0 (id=1): Q♠ K K K K A A A A 2 2 2 2
//   место 1 (id=2): 9♥ 9♠ 10×4 J×4 Q♦ Q♣ Q♥
//   место 2 (id=3): 6♣ 6♥ 6♠ 7×4 8×4 9♦ 9♣
//   место 3 (id=4): 3×4 4×4 5×4 6♦
// Порядок хода: места 3, 0, 1, 2.

use std::cell::RefCell;
use std::rc::Rc;

use bigtwo_engine::domain::{parse_cards, Card, Deck, PlayerId, Table, TableConfig, THREE_OF_DIAMONDS};
use bigtwo_engine::engine::{
    apply_action, run_round, start_round, start_round_with_deck, EngineError, GameSession,
    IllegalPlay, NoopObserver, PlayerAction, RoundEngine, RoundEvent, RoundEventKind, RoundHistory,
    RoundPhase, RoundStatus, TurnKind,
};
use bigtwo_engine::eval::HandCategory;
use bigtwo_engine::infra::DeterministicRng;
use bigtwo_engine::players::{Decision, DecisionRequest, Player, Robot, ScriptedPlayer};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn fresh_round() -> (Table, RoundEngine) {
    let mut table = Table::new(1, "test".into(), TableConfig::robots_only());
    let engine = start_round_with_deck(&mut table, Deck::standard_52(), 1).unwrap();
    (table, engine)
}

fn play(table: &mut Table, engine: &mut RoundEngine, id: PlayerId, s: &str) -> Result<RoundStatus, EngineError> {
    apply_action(table, engine, PlayerAction::play(id, cards(s)))
}

fn pass(table: &mut Table, engine: &mut RoundEngine, id: PlayerId) -> Result<RoundStatus, EngineError> {
    apply_action(table, engine, PlayerAction::pass(id))
}

fn robots() -> Vec<Box<dyn Player>> {
    (0..4).map(|_| Box::new(Robot::new()) as Box<dyn Player>).collect()
}

//
// TEST 1 — старт раунда
//
#[test]
fn round_starts_with_holder_of_three_of_diamonds() {
    let (table, engine) = fresh_round();

    assert_eq!(engine.turn_order, vec![3, 0, 1, 2]);
    assert_eq!(engine.current_player_id(&table), Some(4));
    assert_eq!(engine.turn_kind(&table), Some(TurnKind::Opening));
    assert_eq!(engine.phase, RoundPhase::AwaitingOpeningPlay);
    assert!(table.round_in_progress);
    assert!(table.field.is_empty());
    assert!(table.seats[3].hand.contains(&THREE_OF_DIAMONDS));

    // RoundStarted + 4 x CardsDealt
    assert_eq!(engine.history.len(), 5);
    match &engine.history.events[0].kind {
        RoundEventKind::RoundStarted { turn_order, .. } => assert_eq!(turn_order, &vec![4, 1, 2, 3]),
        other => panic!("unexpected first event {:?}", other),
    }

    // Первый ход: все варианты содержат 3♦
    let options = engine.legal_options(&table);
    assert!(!options.is_empty());
    assert!(options.iter().all(|c| c.hand.contains(&THREE_OF_DIAMONDS)));
}

//
// TEST 2 — первый ход без 3♦ и пас отклоняются, состояние не меняется
//
#[test]
fn opening_requires_three_of_diamonds() {
    let (mut table, mut engine) = fresh_round();
    let before = engine.history.len();

    assert_eq!(
        play(&mut table, &mut engine, 4, "3c"),
        Err(EngineError::IllegalPlay(IllegalPlay::MissingOpeningCard))
    );
    assert_eq!(
        pass(&mut table, &mut engine, 4),
        Err(EngineError::IllegalPlay(IllegalPlay::CannotPass))
    );

    assert_eq!(engine.history.len(), before);
    assert_eq!(table.seats[3].hand.len(), 13);
    assert_eq!(engine.current_player_id(&table), Some(4));

    // Любая рука с 3♦: например, тройка
    assert_eq!(play(&mut table, &mut engine, 4, "3d 3h 3s"), Ok(RoundStatus::Ongoing));
    assert_eq!(table.seats[3].hand.len(), 10);
    assert_eq!(table.field.top().map(|e| e.combo.category), Some(HandCategory::Triple));
}

//
// TEST 3 — пасы по кругу дают свободный ход, на нём пасовать нельзя
//
#[test]
fn all_pass_gives_free_turn() {
    let (mut table, mut engine) = fresh_round();

    play(&mut table, &mut engine, 4, "3d 3c").unwrap();
    play(&mut table, &mut engine, 1, "Kd Kc").unwrap();
    pass(&mut table, &mut engine, 2).unwrap();
    pass(&mut table, &mut engine, 3).unwrap();
    pass(&mut table, &mut engine, 4).unwrap();

    assert_eq!(engine.current_player_id(&table), Some(1));
    assert_eq!(engine.turn_kind(&table), Some(TurnKind::FreeTurn));
    assert_eq!(
        pass(&mut table, &mut engine, 1),
        Err(EngineError::IllegalPlay(IllegalPlay::CannotPass))
    );

    // На свободном ходе можно любую руку, например одиночку
    play(&mut table, &mut engine, 1, "Qs").unwrap();
    assert!(matches!(engine.turn_kind(&table), Some(TurnKind::Response { .. })));
    assert_eq!(table.seats[0].played.len(), 2);
}

//
// TEST 4 — не та очередь, не тот размер, не бьёт
//
#[test]
fn response_rules_are_enforced() {
    let (mut table, mut engine) = fresh_round();

    assert_eq!(
        play(&mut table, &mut engine, 1, "Kd"),
        Err(EngineError::NotPlayersTurn(1))
    );
    assert_eq!(
        play(&mut table, &mut engine, 99, "Kd"),
        Err(EngineError::PlayerNotAtTable(99))
    );

    play(&mut table, &mut engine, 4, "3d").unwrap();

    assert_eq!(
        play(&mut table, &mut engine, 1, "Kd Kc"),
        Err(EngineError::IllegalPlay(IllegalPlay::CardCountMismatch))
    );
    play(&mut table, &mut engine, 1, "Kd").unwrap();

    assert_eq!(
        play(&mut table, &mut engine, 2, "Qh"),
        Err(EngineError::IllegalPlay(IllegalPlay::DoesNotBeat))
    );
    // пас на ответном ходе разрешён
    assert_eq!(pass(&mut table, &mut engine, 2), Ok(RoundStatus::Ongoing));
    assert_eq!(engine.current_player_id(&table), Some(3));
}

//
// TEST 5 — карты не с руки, не комбинация, неверный размер
//
#[test]
fn malformed_plays_are_rejected() {
    let (mut table, mut engine) = fresh_round();

    assert_eq!(
        play(&mut table, &mut engine, 4, "3d 2s"),
        Err(EngineError::IllegalPlay(IllegalPlay::CardsNotHeld))
    );
    assert_eq!(
        play(&mut table, &mut engine, 4, "3d 4c"),
        Err(EngineError::IllegalPlay(IllegalPlay::NotAHand))
    );
    assert!(matches!(
        play(&mut table, &mut engine, 4, "3d 3c 3h 3s"),
        Err(EngineError::InvalidHandShape(_))
    ));
    assert!(table.field.is_empty());
}

//
// TEST 6 — раунд роботов заканчивается ровно одним победителем
//
#[test]
fn robot_round_has_single_winner() {
    let mut table = Table::new(1, "robots".into(), TableConfig::robots_only());
    let mut rng = DeterministicRng::from_seed(42);
    let mut engine = start_round(&mut table, &mut rng, 1).unwrap();

    let mut players = robots();
    let summary = run_round(&mut table, &mut engine, &mut players, &mut NoopObserver).unwrap();

    let winner_seat = table.seat_of(summary.winner).unwrap();
    assert!(table.seats[winner_seat as usize].hand.is_empty());
    assert_eq!(
        table.seats.iter().filter(|p| p.hand.is_empty()).count(),
        1,
        "exactly one empty hand"
    );
    assert_eq!(engine.winner(), Some(summary.winner));
    assert!(engine.is_over());
    assert!(!table.round_in_progress);

    let won: Vec<&RoundEvent> = engine
        .history
        .events
        .iter()
        .filter(|e| matches!(e.kind, RoundEventKind::RoundWon { .. }))
        .collect();
    assert_eq!(won.len(), 1);
    assert!(matches!(
        engine.history.events.last().map(|e| &e.kind),
        Some(RoundEventKind::RoundWon { .. })
    ));

    // Сумма оставшихся карт + сыгранные = 52
    let played: usize = table
        .seats
        .iter()
        .flat_map(|p| p.played.iter())
        .map(|h| h.len())
        .sum();
    let left: usize = summary.cards_left.iter().map(|(_, n)| n).sum();
    assert_eq!(played + left, 52);
    assert_eq!(summary.plays, table.field.len());
}

//
// TEST 7 — после победы ходов больше нет
//
#[test]
fn no_actions_after_round_over() {
    let mut table = Table::new(1, "robots".into(), TableConfig::robots_only());
    let mut engine = start_round(&mut table, &mut DeterministicRng::from_seed(7), 1).unwrap();
    let summary = run_round(&mut table, &mut engine, &mut robots(), &mut NoopObserver).unwrap();
    let events = engine.history.len();

    for id in 1..=4 {
        assert_eq!(pass(&mut table, &mut engine, id), Err(EngineError::NoActiveRound));
    }
    assert_eq!(engine.history.len(), events);
    assert_eq!(engine.current_actor, None);
    assert_eq!(engine.turn_kind(&table), None);
    assert!(engine.legal_options(&table).is_empty());
    assert_eq!(engine.winner(), Some(summary.winner));
}

//
// TEST 8 — победа ровно в момент, когда рука опустела
//
#[test]
fn player_emptying_hand_wins_immediately() {
    use bigtwo_engine::domain::PlayerHand;
    use bigtwo_engine::engine::start_round_with_hands;

    let deck = Deck::standard_52();
    let mut hands: Vec<PlayerHand> = vec![
        PlayerHand::from_cards(deck.cards[39..52].to_vec()),
        PlayerHand::from_cards(deck.cards[26..39].to_vec()),
        PlayerHand::from_cards(deck.cards[13..26].to_vec()),
        PlayerHand::from_cards(deck.cards[0..13].to_vec()),
    ];
    // id=1 получает 3..5 и 6♦, id=4 – Q♠ K A 2
    hands.swap(0, 3);

    let mut table = Table::new(1, "t".into(), TableConfig::robots_only());
    let mut engine = start_round_with_hands(&mut table, hands, 1).unwrap();
    assert_eq!(engine.current_player_id(&table), Some(1));

    play(&mut table, &mut engine, 1, "3d").unwrap();
    pass(&mut table, &mut engine, 2).unwrap();
    pass(&mut table, &mut engine, 3).unwrap();
    play(&mut table, &mut engine, 4, "Qs").unwrap();
    for id in 1..=3 {
        pass(&mut table, &mut engine, id).unwrap();
    }
    // свободный ход: каре двоек с кикером
    play(&mut table, &mut engine, 4, "2d 2c 2h 2s Kd").unwrap();
    for id in 1..=3 {
        pass(&mut table, &mut engine, id).unwrap();
    }
    // каре тузов с кикером
    play(&mut table, &mut engine, 4, "Ad Ac Ah As Kc").unwrap();
    for id in 1..=3 {
        pass(&mut table, &mut engine, id).unwrap();
    }
    assert_eq!(table.seats[3].hand.len(), 2);

    // последняя пара
    let status = play(&mut table, &mut engine, 4, "Kh Ks").unwrap();

    match status {
        RoundStatus::Finished(summary, history) => {
            assert_eq!(summary.winner, 4);
            assert!(matches!(
                history.events.last().map(|e| &e.kind),
                Some(RoundEventKind::RoundWon { player_id: 4, .. })
            ));
        }
        RoundStatus::Ongoing => panic!("round must be over"),
    }
    assert_eq!(engine.phase, RoundPhase::RoundOver { winner: 4 });
    assert_eq!(pass(&mut table, &mut engine, 1), Err(EngineError::NoActiveRound));
}

//
// TEST 9 — отклонённое решение запрашивается снова
//
#[derive(Debug)]
struct Stubborn {
    inner: ScriptedPlayer,
    rejections: Rc<RefCell<Vec<EngineError>>>,
}

impl Player for Stubborn {
    fn act(&mut self, request: &DecisionRequest<'_>) -> Decision {
        self.inner.act(request)
    }

    fn on_rejected(&mut self, error: &EngineError) {
        self.rejections.borrow_mut().push(error.clone());
    }
}

#[test]
fn rejected_decision_is_requested_again() {
    let mut table = Table::new(1, "t".into(), TableConfig::robots_only());
    let mut engine = start_round_with_deck(&mut table, Deck::standard_52(), 1).unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    let stubborn = Stubborn {
        // пас на первом ходе, потом карта без 3♦, потом робот
        inner: ScriptedPlayer::new(vec![Decision::Pass, Decision::Play(cards("4d"))]),
        rejections: Rc::clone(&log),
    };

    let mut players: Vec<Box<dyn Player>> = vec![
        Box::new(Robot::new()),
        Box::new(Robot::new()),
        Box::new(Robot::new()),
        Box::new(stubborn),
    ];

    let summary = run_round(&mut table, &mut engine, &mut players, &mut NoopObserver).unwrap();
    assert!(table.seat_of(summary.winner).is_some());

    assert_eq!(
        *log.borrow(),
        vec![
            EngineError::IllegalPlay(IllegalPlay::CannotPass),
            EngineError::IllegalPlay(IllegalPlay::MissingOpeningCard),
        ]
    );

    // Отказы в историю не попадают: первое игровое событие – 3♦ от id=4
    let first_play = engine
        .history
        .events
        .iter()
        .find_map(|e| match &e.kind {
            RoundEventKind::HandPlayed { player_id, combo, .. } => Some((*player_id, combo.clone())),
            _ => None,
        })
        .unwrap();
    assert_eq!(first_play.0, 4);
    assert_eq!(first_play.1.cards(), &[THREE_OF_DIAMONDS]);
}

//
// TEST 10 — наблюдатель видит все события по порядку
//
#[test]
fn observer_receives_every_event_once() {
    let mut table = Table::new(1, "t".into(), TableConfig::robots_only());
    let mut engine = start_round(&mut table, &mut DeterministicRng::from_seed(3), 1).unwrap();

    let mut seen: Vec<u32> = Vec::new();
    let mut observer = |e: &RoundEvent| seen.push(e.index);
    run_round(&mut table, &mut engine, &mut robots(), &mut observer).unwrap();

    let expected: Vec<u32> = (0..engine.history.len() as u32).collect();
    assert_eq!(seen, expected);
}

//
// TEST 11 — число игроков должно совпадать с числом мест
//
#[test]
fn run_round_requires_player_per_seat() {
    let (mut table, mut engine) = fresh_round();
    let mut three: Vec<Box<dyn Player>> = robots().into_iter().take(3).collect();
    assert!(matches!(
        run_round(&mut table, &mut engine, &mut three, &mut NoopObserver),
        Err(EngineError::Internal(_))
    ));
}

//
// TEST 12 — робот: 3♦ одиночкой, бьёт минимально, иначе пас
//
#[test]
fn robot_fallback_policy() {
    let (mut table, mut engine) = fresh_round();
    let mut robot = Robot::new();

    let decide = |table: &Table, engine: &RoundEngine, robot: &mut Robot| {
        let seat = engine.current_actor.unwrap();
        let turn = engine.turn_kind(table).unwrap();
        let options = engine.legal_options(table);
        let p = table.player(seat).unwrap();
        let request = DecisionRequest {
            player_id: p.player_id(),
            hand: &p.hand,
            turn: &turn,
            top: table.field.top(),
            options: &options,
        };
        robot.act(&request)
    };

    // первый ход: одиночная 3♦
    assert_eq!(decide(&table, &engine, &mut robot), Decision::Play(vec![THREE_OF_DIAMONDS]));
    play(&mut table, &mut engine, 4, "3d").unwrap();

    // id=1: самая младшая бьющая одиночка – Q♠
    assert_eq!(decide(&table, &engine, &mut robot), Decision::Play(cards("Qs")));
    play(&mut table, &mut engine, 1, "Qs").unwrap();

    // id=2: старшая карта Q♥ < Q♠ – пас
    assert_eq!(decide(&table, &engine, &mut robot), Decision::Pass);
}

//
// TEST 13 — сессия: несколько раундов, счёт побед
//
#[test]
fn session_plays_several_rounds() {
    let mut session = GameSession::new(5, "s".into(), TableConfig::robots_only()).unwrap();
    let mut rng = DeterministicRng::from_seed(2024);
    let mut players = robots();

    for _ in 0..3 {
        session.play_round(&mut rng, &mut players, &mut NoopObserver).unwrap();
    }

    assert_eq!(session.rounds_played(), 3);
    let total: u32 = (1..=4).map(|id| session.wins(id)).sum();
    assert_eq!(total, 3);
    assert!(!session.table().round_in_progress);

    let ids: Vec<u64> = session.summaries().iter().map(|s| s.round_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

//
// TEST 14 — одинаковый seed → одинаковые раунды
//
#[test]
fn same_seed_same_rounds() {
    let run = |seed: u64| {
        let mut session = GameSession::new(1, "s".into(), TableConfig::robots_only()).unwrap();
        let mut rng = DeterministicRng::from_seed(seed);
        let mut players = robots();
        (0..2)
            .map(|_| session.play_round(&mut rng, &mut players, &mut NoopObserver).unwrap())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(11), run(11));
}

//
// TEST 15 — нельзя начать раунд поверх идущего
//
#[test]
fn cannot_start_round_twice() {
    let (mut table, _engine) = fresh_round();
    assert!(matches!(
        start_round_with_deck(&mut table, Deck::standard_52(), 2),
        Err(EngineError::RoundAlreadyInProgress)
    ));
}

//
// TEST 16 — история раунда выгружается в JSON и читается обратно
//
#[test]
fn round_history_json_dump_reads_back() {
    let mut table = Table::new(1, "dump".into(), TableConfig::robots_only());
    let mut engine = start_round(&mut table, &mut DeterministicRng::from_seed(7), 1).unwrap();
    let mut players = robots();
    run_round(&mut table, &mut engine, &mut players, &mut NoopObserver).unwrap();

    let json = engine.history.to_json().unwrap();
    let restored: RoundHistory = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, engine.history);

    // В дампе есть сыгранные руки – значит, Combo/Hand тоже прошли через serde
    assert!(restored
        .events
        .iter()
        .any(|e| matches!(e.kind, RoundEventKind::HandPlayed { .. })));
}
