use super::RoundError;
use crate::*;

impl GameState {
    /// Shared guard for every transition and for [`GameState::valid_actions`].
    pub fn check(&self, action: &Action) -> Result<(), RoundError> {
        match *action {
            Action::RevealInitial {
                player_index,
                indices,
            } => self.check_initial_reveal(player_index, indices),
            Action::DrawFromPile => {
                self.require_turn(&[TurnPhase::Draw])?;
                if !self.deck.can_draw() {
                    return Err(RoundError::EmptyDrawPile);
                }
                Ok(())
            }
            Action::DrawFromDiscard => {
                self.require_turn(&[TurnPhase::Draw])?;
                if self.deck.discard.is_empty() {
                    return Err(RoundError::EmptyDiscardPile);
                }
                Ok(())
            }
            Action::Replace { index } => {
                self.require_turn(&[TurnPhase::ReplaceOrDiscard, TurnPhase::MustReplace])?;
                self.require_drawn()?;
                self.require_occupied(index)?;
                Ok(())
            }
            Action::DiscardAndReveal { index } => {
                if self.phase.is_turn_cycle() && self.turn_phase == TurnPhase::MustReplace {
                    return Err(RoundError::MustReplace);
                }
                self.require_turn(&[TurnPhase::ReplaceOrDiscard])?;
                self.require_drawn()?;
                self.require_hidden(index)
            }
            Action::AbandonDrawnCard => {
                if self.phase.is_turn_cycle() && self.turn_phase == TurnPhase::MustReplace {
                    return Err(RoundError::MustReplace);
                }
                self.require_turn(&[TurnPhase::ReplaceOrDiscard])?;
                self.require_drawn()?;
                if self.current_player().hand.hidden_count() == 0 {
                    return Err(RoundError::NoHiddenSlot);
                }
                Ok(())
            }
            Action::RevealGridCard { index } => {
                self.require_turn(&[TurnPhase::MustReveal])?;
                self.require_hidden(index)
            }
            Action::UndoDrawFromDiscard => {
                self.require_turn(&[TurnPhase::MustReplace])?;
                self.require_drawn()
            }
        }
    }

    /// `end_turn` never drops a held card and never skips an owed reveal.
    pub(crate) fn check_end_turn(&self) -> Result<(), RoundError> {
        if self.phase.is_turn_cycle() && self.turn_phase == TurnPhase::MustReplace {
            return Err(RoundError::MustReplace);
        }
        self.require_turn(&[TurnPhase::Draw])?;
        if self.drawn_card.is_some() {
            return Err(RoundError::DrawnCardHeld);
        }
        Ok(())
    }

    /// Hidden slots of a seat that may still make its initial reveal.
    pub(crate) fn initial_reveal_slots(&self, player_index: usize) -> Option<Vec<usize>> {
        if self.phase != Phase::InitialReveal {
            return None;
        }
        let hand = &self.players.get(player_index)?.hand;
        if hand.revealed_count() > 0 {
            return None;
        }
        let hidden = hand.hidden_indices();
        (hidden.len() >= 2).then_some(hidden)
    }

    fn check_initial_reveal(
        &self,
        player_index: usize,
        indices: [usize; 2],
    ) -> Result<(), RoundError> {
        if self.phase != Phase::InitialReveal {
            return Err(RoundError::InvalidPhase(self.phase));
        }
        let Some(player) = self.players.get(player_index) else {
            return Err(RoundError::UnknownPlayer(player_index));
        };
        let Some(hidden) = self.initial_reveal_slots(player_index) else {
            return Err(RoundError::InitialRevealDone(player_index));
        };
        if indices[0] == indices[1] {
            return Err(RoundError::DuplicateIndex);
        }
        for index in indices {
            if index >= HAND_SIZE {
                return Err(RoundError::IndexOutOfRange(index));
            }
            if !hidden.contains(&index) {
                return Err(if player.hand.is_occupied(index) {
                    RoundError::AlreadyRevealed(index)
                } else {
                    RoundError::EmptySlot(index)
                });
            }
        }
        Ok(())
    }

    fn require_turn(&self, allowed: &[TurnPhase]) -> Result<(), RoundError> {
        if !self.phase.is_turn_cycle() {
            return Err(RoundError::InvalidPhase(self.phase));
        }
        if !allowed.contains(&self.turn_phase) {
            return Err(RoundError::InvalidTurnPhase(self.turn_phase));
        }
        Ok(())
    }

    fn require_drawn(&self) -> Result<(), RoundError> {
        if self.drawn_card.is_none() {
            return Err(RoundError::NoDrawnCard);
        }
        Ok(())
    }

    fn require_occupied(&self, index: usize) -> Result<(), RoundError> {
        if index >= HAND_SIZE {
            return Err(RoundError::IndexOutOfRange(index));
        }
        if !self.current_player().hand.is_occupied(index) {
            return Err(RoundError::EmptySlot(index));
        }
        Ok(())
    }

    fn require_hidden(&self, index: usize) -> Result<(), RoundError> {
        self.require_occupied(index)?;
        if self.current_player().hand.is_revealed(index) {
            return Err(RoundError::AlreadyRevealed(index));
        }
        Ok(())
    }
}
