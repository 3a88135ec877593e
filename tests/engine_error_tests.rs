// tests/engine_error_tests.rs
//
// Ошибки движка:
//  1) какие ошибки "восстановимы" (решение запрашивается заново), а какие нет
//  2) преобразования From из доменных ошибок
//  3) предусловия раздачи: число рук, размер руки, пересечения
//  4) некорректный конфиг не даёт начать сессию
//  5) ScriptedPlayer: сценарий, затем робот; отказы сохраняются

use bigtwo_engine::domain::{
    parse_cards, ConfigError, Deck, DeckError, Hand, HandShapeError, InvalidCard, PlayerHand,
    Table, TableConfig,
};
use bigtwo_engine::engine::{start_round_with_hands, EngineError, GameSession, IllegalPlay, TurnKind};
use bigtwo_engine::players::{Decision, DecisionRequest, Player, ScriptedPlayer};

fn standard_hands() -> Vec<PlayerHand> {
    let deck = Deck::standard_52();
    deck.cards
        .chunks(13)
        .map(|c| PlayerHand::from_cards(c.to_vec()))
        .collect()
}

// -----------------------------
// TEST 1
// -----------------------------
#[test]
fn recoverable_errors() {
    let recoverable = [
        EngineError::InvalidCard(InvalidCard::Suit("x".into())),
        EngineError::InvalidHandShape(HandShapeError::WrongSize(4)),
        EngineError::IllegalPlay(IllegalPlay::DoesNotBeat),
        EngineError::NotPlayersTurn(2),
    ];
    for e in &recoverable {
        assert!(e.is_recoverable(), "{:?}", e);
    }

    let fatal = [
        EngineError::NoActiveRound,
        EngineError::RoundAlreadyInProgress,
        EngineError::PlayerNotAtTable(9),
        EngineError::InvalidDeck(DeckError::WrongSize(51)),
        EngineError::InvalidConfig(ConfigError::WrongPlayerCount(3)),
        EngineError::Internal("x"),
    ];
    for e in &fatal {
        assert!(!e.is_recoverable(), "{:?}", e);
    }
}

// -----------------------------
// TEST 2
// -----------------------------
#[test]
fn domain_errors_convert_into_engine_error() {
    let e: EngineError = IllegalPlay::CannotPass.into();
    assert_eq!(e, EngineError::IllegalPlay(IllegalPlay::CannotPass));

    let e: EngineError = Hand::new(vec![]).unwrap_err().into();
    assert_eq!(e, EngineError::InvalidHandShape(HandShapeError::WrongSize(0)));

    let e: EngineError = parse_cards("zz").unwrap_err().into();
    assert!(matches!(e, EngineError::InvalidCard(_)));

    // Сообщения человекочитаемые и включают причину
    let msg = EngineError::InvalidDeck(DeckError::WrongSize(51)).to_string();
    assert!(msg.contains("51"), "{}", msg);
}

// -----------------------------
// TEST 3
// -----------------------------
#[test]
fn dealing_preconditions() {
    let mut table = Table::new(1, "t".into(), TableConfig::robots_only());

    let mut three = standard_hands();
    three.pop();
    assert_eq!(
        start_round_with_hands(&mut table, three, 1).unwrap_err(),
        EngineError::InvalidDeck(DeckError::HandCount { expected: 4, got: 3 })
    );

    let mut short = standard_hands();
    short[0] = PlayerHand::from_cards(short[0].cards()[..12].to_vec());
    assert_eq!(
        start_round_with_hands(&mut table, short, 1).unwrap_err(),
        EngineError::InvalidDeck(DeckError::HandSize { expected: 13, got: 12 })
    );

    // Две одинаковые руки: пересечение
    let mut overlap = standard_hands();
    overlap[1] = overlap[0].clone();
    assert!(matches!(
        start_round_with_hands(&mut table, overlap, 1),
        Err(EngineError::InvalidDeck(DeckError::Duplicate(_)))
    ));

    // После всех отказов стол не тронут
    assert!(!table.round_in_progress);
    assert!(table.seats.iter().all(|p| p.hand.is_empty()));

    assert!(start_round_with_hands(&mut table, standard_hands(), 1).is_ok());
}

// -----------------------------
// TEST 4
// -----------------------------
#[test]
fn invalid_config_rejected_by_session() {
    let mut cfg = TableConfig::robots_only();
    cfg.players.truncate(2);
    assert_eq!(
        GameSession::new(1, "s".into(), cfg).unwrap_err(),
        EngineError::InvalidConfig(ConfigError::WrongPlayerCount(2))
    );
}

// -----------------------------
// TEST 5
// -----------------------------
#[test]
fn scripted_player_then_robot() {
    let hand = PlayerHand::from_cards(parse_cards("3d 5c 9h").unwrap());
    let options = Vec::new();
    let turn = TurnKind::FreeTurn;
    let request = DecisionRequest {
        player_id: 1,
        hand: &hand,
        turn: &turn,
        top: None,
        options: &options,
    };
    assert!(!request.can_pass());

    let mut p = ScriptedPlayer::new(vec![Decision::Play(parse_cards("9h").unwrap())]);
    assert_eq!(p.remaining(), 1);
    assert_eq!(p.act(&request), Decision::Play(parse_cards("9h").unwrap()));
    assert_eq!(p.remaining(), 0);

    // без вариантов робот пасует
    assert_eq!(p.act(&request), Decision::Pass);

    p.on_rejected(&EngineError::IllegalPlay(IllegalPlay::CannotPass));
    assert_eq!(p.rejections, vec![EngineError::IllegalPlay(IllegalPlay::CannotPass)]);
}
