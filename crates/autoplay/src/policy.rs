//! Turn planning for the three bot tiers.
//!
//! Every decision takes a [`PlayerView`], so a bot can read its own grid,
//! the piles and other seats' face-up cards, and nothing else.

use crate::heuristics::{
    best_hidden_slot, column_potential, enables_any_column, find_best_replacement_position, CORNERS,
};
use crate::{CardDecision, Difficulty, DrawSource};
use skyjo_core::{Action, Hand, Phase, PlayerView, RngState, TurnPhase, ValidActions};
use tracing::{debug, trace};

/// Two face-down slots to open the round with. Normal picks any two at
/// random; the advanced tiers pick two corners in random order.
pub fn choose_initial_cards_to_reveal(
    hand: &Hand,
    difficulty: Difficulty,
    rng: &mut RngState,
) -> Option<[usize; 2]> {
    let hidden = hand.hidden_indices();
    let mut pool = if difficulty.is_advanced() {
        CORNERS
            .into_iter()
            .filter(|index| hidden.contains(index))
            .collect::<Vec<_>>()
    } else {
        Vec::new()
    };
    if pool.len() < 2 {
        pool = hidden;
    }
    rng.shuffle(&mut pool);
    match pool[..] {
        [a, b, ..] => Some([a, b]),
        _ => None,
    }
}

pub fn decide_draw_source(view: &PlayerView<'_>, difficulty: Difficulty) -> DrawSource {
    let Some(top) = view.discard_top() else {
        return DrawSource::DrawPile;
    };
    let value = top.value;
    let hand = view.own_hand();
    let builds_column = enables_any_column(hand, value);

    let take = match difficulty {
        Difficulty::Normal => value <= 4 || builds_column,
        Difficulty::Hard | Difficulty::Hardcore => {
            let beats_highest = hand
                .highest_revealed()
                .is_some_and(|(_, highest)| highest > value + 2);
            value <= 0
                || (value <= difficulty.good_card_threshold() && beats_highest)
                || builds_column
        }
    };
    trace!(%difficulty, value, builds_column, take, "draw source");
    if take {
        DrawSource::DiscardPile
    } else {
        DrawSource::DrawPile
    }
}

/// Resolves the card in hand. `None` when the viewer holds nothing.
pub fn decide_card_action(
    view: &PlayerView<'_>,
    difficulty: Difficulty,
    rng: &mut RngState,
) -> Option<CardDecision> {
    let value = view.drawn_card()?.value;
    let hand = view.own_hand();

    if view.turn_phase() == TurnPhase::MustReplace {
        let index = find_best_replacement_position(hand, value, difficulty, rng)
            .or_else(|| rng.choose(&hand.occupied_indices()).copied())?;
        return Some(CardDecision::Replace(index));
    }

    let replacement = find_best_replacement_position(hand, value, difficulty, rng);
    let highest = hand.highest_revealed();

    if difficulty == Difficulty::Normal {
        if let Some(index) = replacement.filter(|_| value <= 3) {
            return Some(CardDecision::Replace(index));
        }
        if let Some((index, top)) = highest {
            if value < top - 2 {
                return Some(CardDecision::Replace(index));
            }
        }
        if let Some(&index) = rng.choose(&hand.hidden_indices()) {
            return Some(CardDecision::DiscardAndReveal(index));
        }
    }

    if let Some(index) = replacement {
        if column_potential(hand, index, value) || value <= difficulty.good_card_threshold() {
            return Some(CardDecision::Replace(index));
        }
    }
    if let Some((index, top)) = highest {
        if value < top {
            return Some(CardDecision::Replace(index));
        }
    }
    if let Some(index) = best_hidden_slot(hand, difficulty) {
        return Some(CardDecision::DiscardAndReveal(index));
    }
    // No face-down card left: swap out the highest card to limit the damage.
    highest
        .map(|(index, _)| index)
        .or_else(|| hand.occupied_indices().first().copied())
        .map(CardDecision::Replace)
}

/// The single next action for the viewing seat, or `None` when it has
/// nothing to do. Call again after the action is applied.
///
/// A planned action the state does not allow is swapped for the first legal
/// one, so the engine never sees a rejected move from a bot.
pub fn plan_turn(
    view: &PlayerView<'_>,
    difficulty: Difficulty,
    rng: &mut RngState,
) -> Option<Action> {
    let valid = view.valid_actions();
    let seat = view.seat();
    let planned = match view.phase() {
        Phase::InitialReveal => {
            choose_initial_cards_to_reveal(view.own_hand(), difficulty, rng).map(|indices| {
                Action::RevealInitial {
                    player_index: seat,
                    indices,
                }
            })
        }
        Phase::Playing | Phase::FinalRound if view.is_my_turn() => match view.turn_phase() {
            TurnPhase::Draw => Some(decide_draw_source(view, difficulty).into_action()),
            TurnPhase::ReplaceOrDiscard | TurnPhase::MustReplace => {
                decide_card_action(view, difficulty, rng).map(CardDecision::into_action)
            }
            TurnPhase::MustReveal => best_hidden_slot(view.own_hand(), difficulty)
                .map(|index| Action::RevealGridCard { index }),
        },
        _ => None,
    };

    match planned {
        Some(action) if valid.allows(&action) => {
            debug!(seat, %difficulty, action = %action.short_label(), "planned");
            Some(action)
        }
        Some(action) => {
            debug!(seat, ?action, "planned action not legal, falling back");
            first_legal(view, &valid)
        }
        None => first_legal(view, &valid),
    }
}

fn first_legal(view: &PlayerView<'_>, valid: &ValidActions) -> Option<Action> {
    let seat = view.seat();
    if view.phase() == Phase::InitialReveal {
        let own_reveal = |action: &Action| {
            matches!(action, Action::RevealInitial { player_index, .. } if *player_index == seat)
        };
        return valid.actions().into_iter().find(own_reveal);
    }
    if !view.is_my_turn() {
        return None;
    }
    valid
        .actions()
        .into_iter()
        .find(|action| !matches!(action, Action::UndoDrawFromDiscard))
}

/// A seat-bound bot: a tier plus its own generator.
#[derive(Debug, Clone)]
pub struct Bot {
    difficulty: Difficulty,
    rng: RngState,
}

impl Bot {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: RngState::from_seed(seed),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn plan(&mut self, view: &PlayerView<'_>) -> Option<Action> {
        plan_turn(view, self.difficulty, &mut self.rng)
    }
}
