use crate::domain::card::THREE_OF_DIAMONDS;
use crate::domain::hand::Hand;
use crate::domain::player::PlayerAtTable;
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::{EngineError, IllegalPlay};
use crate::engine::game_loop::TurnKind;
use crate::eval::{all_plays, classify, plays_containing, valid_plays_against, Combo};

/// Все руки, которые игрок может выложить в этот ход.
///
/// Пустой список на ответном ходе = остаётся только пас.
pub fn legal_options(player: &PlayerAtTable, turn: &TurnKind) -> Vec<Combo> {
    let classified = classify(player.hand.cards());
    match turn {
        TurnKind::Opening => plays_containing(&classified, THREE_OF_DIAMONDS),
        TurnKind::FreeTurn => all_plays(&classified),
        TurnKind::Response { target } => valid_plays_against(&classified, target),
    }
}

/// Проверка, может ли игрок выполнить это действие в текущем ходе.
///
/// `Ok(None)` – принятый пас, `Ok(Some(combo))` – принятый ход.
pub fn validate_action(
    player: &PlayerAtTable,
    action: &PlayerActionKind,
    turn: &TurnKind,
) -> Result<Option<Combo>, EngineError> {
    let cards = match action {
        PlayerActionKind::Pass => {
            return match turn {
                TurnKind::Opening | TurnKind::FreeTurn => Err(IllegalPlay::CannotPass.into()),
                TurnKind::Response { .. } => Ok(None),
            };
        }
        PlayerActionKind::Play(cards) => cards,
    };

    let hand = Hand::new(cards.clone())?;
    if !player.hand.holds(&hand) {
        return Err(IllegalPlay::CardsNotHeld.into());
    }

    // Рука должна совпасть с одной из рук классификатора.
    let classified = classify(player.hand.cards());
    let category = classified
        .category_of(&hand)
        .ok_or(EngineError::IllegalPlay(IllegalPlay::NotAHand))?;
    let combo = Combo::new(category, hand);

    match turn {
        TurnKind::Opening => {
            if !combo.hand.contains(&THREE_OF_DIAMONDS) {
                return Err(IllegalPlay::MissingOpeningCard.into());
            }
        }
        TurnKind::FreeTurn => {}
        TurnKind::Response { target } => {
            if combo.len() != target.len() {
                return Err(IllegalPlay::CardCountMismatch.into());
            }
            if !valid_plays_against(&classified, target).contains(&combo) {
                return Err(IllegalPlay::DoesNotBeat.into());
            }
        }
    }

    Ok(Some(combo))
}
