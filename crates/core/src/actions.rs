use crate::{GameState, HAND_SIZE};
use serde::{Deserialize, Serialize};

/// One atomic player action. Every variant maps onto exactly one transition
/// of [`GameState`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Action {
    RevealInitial {
        player_index: usize,
        indices: [usize; 2],
    },
    DrawFromPile,
    DrawFromDiscard,
    Replace { index: usize },
    DiscardAndReveal { index: usize },
    AbandonDrawnCard,
    RevealGridCard { index: usize },
    UndoDrawFromDiscard,
}

impl Action {
    pub fn stable_key(&self) -> String {
        match self {
            Self::RevealInitial {
                player_index,
                indices,
            } => format!("reveal_initial:{player_index}:{indices:?}"),
            Self::DrawFromPile => "draw_pile".to_string(),
            Self::DrawFromDiscard => "draw_discard".to_string(),
            Self::Replace { index } => format!("replace:{index}"),
            Self::DiscardAndReveal { index } => format!("discard_reveal:{index}"),
            Self::AbandonDrawnCard => "abandon".to_string(),
            Self::RevealGridCard { index } => format!("reveal:{index}"),
            Self::UndoDrawFromDiscard => "undo_draw_discard".to_string(),
        }
    }

    pub fn short_label(&self) -> String {
        match self {
            Self::RevealInitial {
                player_index,
                indices,
            } => format!("seat {player_index} reveals {} and {}", indices[0], indices[1]),
            Self::DrawFromPile => "draw from pile".to_string(),
            Self::DrawFromDiscard => "take discard".to_string(),
            Self::Replace { index } => format!("replace slot {index}"),
            Self::DiscardAndReveal { index } => format!("discard, reveal slot {index}"),
            Self::AbandonDrawnCard => "abandon drawn card".to_string(),
            Self::RevealGridCard { index } => format!("reveal slot {index}"),
            Self::UndoDrawFromDiscard => "put discard back".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitialRevealOption {
    pub player_index: usize,
    /// Slots the player may pick two distinct entries from.
    pub hidden: Vec<usize>,
}

/// Legal moves for a state, for gating input. Built from the same guard
/// the transitions run, so the two never disagree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidActions {
    pub reveal_initial: Vec<InitialRevealOption>,
    pub draw_from_pile: bool,
    pub draw_from_discard: bool,
    pub replace: Vec<usize>,
    pub discard_and_reveal: Vec<usize>,
    pub abandon_drawn_card: bool,
    pub reveal_grid_card: Vec<usize>,
    pub undo_draw_from_discard: bool,
}

impl ValidActions {
    pub fn is_empty(&self) -> bool {
        self.reveal_initial.is_empty()
            && !self.draw_from_pile
            && !self.draw_from_discard
            && self.replace.is_empty()
            && self.discard_and_reveal.is_empty()
            && !self.abandon_drawn_card
            && self.reveal_grid_card.is_empty()
            && !self.undo_draw_from_discard
    }

    pub fn allows(&self, action: &Action) -> bool {
        match action {
            Action::RevealInitial {
                player_index,
                indices: [a, b],
            } => {
                a != b
                    && self.reveal_initial.iter().any(|option| {
                        option.player_index == *player_index
                            && option.hidden.contains(a)
                            && option.hidden.contains(b)
                    })
            }
            Action::DrawFromPile => self.draw_from_pile,
            Action::DrawFromDiscard => self.draw_from_discard,
            Action::Replace { index } => self.replace.contains(index),
            Action::DiscardAndReveal { index } => self.discard_and_reveal.contains(index),
            Action::AbandonDrawnCard => self.abandon_drawn_card,
            Action::RevealGridCard { index } => self.reveal_grid_card.contains(index),
            Action::UndoDrawFromDiscard => self.undo_draw_from_discard,
        }
    }

    /// Flat list of legal actions. Initial reveals are listed as the first
    /// two hidden slots of each eligible seat rather than every pair.
    pub fn actions(&self) -> Vec<Action> {
        let mut out = Vec::new();
        for option in &self.reveal_initial {
            if let [a, b, ..] = option.hidden[..] {
                out.push(Action::RevealInitial {
                    player_index: option.player_index,
                    indices: [a, b],
                });
            }
        }
        if self.draw_from_pile {
            out.push(Action::DrawFromPile);
        }
        if self.draw_from_discard {
            out.push(Action::DrawFromDiscard);
        }
        out.extend(self.replace.iter().map(|&index| Action::Replace { index }));
        out.extend(
            self.discard_and_reveal
                .iter()
                .map(|&index| Action::DiscardAndReveal { index }),
        );
        if self.abandon_drawn_card {
            out.push(Action::AbandonDrawnCard);
        }
        out.extend(
            self.reveal_grid_card
                .iter()
                .map(|&index| Action::RevealGridCard { index }),
        );
        if self.undo_draw_from_discard {
            out.push(Action::UndoDrawFromDiscard);
        }
        out
    }
}

impl GameState {
    pub fn valid_actions(&self) -> ValidActions {
        let legal = |action: Action| self.check(&action).is_ok();
        let slots = |make: fn(usize) -> Action| -> Vec<usize> {
            (0..HAND_SIZE).filter(|&index| legal(make(index))).collect()
        };
        let reveal_initial = (0..self.players.len())
            .filter_map(|player_index| {
                let hidden = self.initial_reveal_slots(player_index)?;
                Some(InitialRevealOption {
                    player_index,
                    hidden,
                })
            })
            .collect();
        ValidActions {
            reveal_initial,
            draw_from_pile: legal(Action::DrawFromPile),
            draw_from_discard: legal(Action::DrawFromDiscard),
            replace: slots(|index| Action::Replace { index }),
            discard_and_reveal: slots(|index| Action::DiscardAndReveal { index }),
            abandon_drawn_card: legal(Action::AbandonDrawnCard),
            reveal_grid_card: slots(|index| Action::RevealGridCard { index }),
            undo_draw_from_discard: legal(Action::UndoDrawFromDiscard),
        }
    }
}
