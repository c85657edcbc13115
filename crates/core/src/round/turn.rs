use super::RoundError;
use crate::rng::derive_seed;
use crate::*;
use tracing::debug;

impl GameState {
    /// Applies any action through its transition.
    pub fn apply(&self, action: &Action) -> Result<Self, RoundError> {
        match *action {
            Action::RevealInitial {
                player_index,
                indices,
            } => self.reveal_initial_cards(player_index, indices),
            Action::DrawFromPile => self.draw_from_pile(),
            Action::DrawFromDiscard => self.draw_from_discard(),
            Action::Replace { index } => self.replace_card(index),
            Action::DiscardAndReveal { index } => self.discard_and_reveal(index),
            Action::AbandonDrawnCard => self.abandon_drawn_card(),
            Action::RevealGridCard { index } => self.reveal_grid_card(index),
            Action::UndoDrawFromDiscard => self.undo_draw_from_discard(),
        }
    }

    pub fn draw_from_pile(&self) -> Result<Self, RoundError> {
        self.check(&Action::DrawFromPile)?;
        let mut next = self.clone();
        if next.deck.draw.is_empty() {
            let mut rng = RngState::from_seed(derive_seed(next.deck_seed, next.recycles));
            let recycled = next.deck.recycle_discard(&mut rng);
            next.recycles += 1;
            debug!(recycled, recycles = next.recycles, "recycled discard pile");
        }
        let card = next.deck.draw_card().ok_or(RoundError::EmptyDrawPile)?;
        next.drawn_card = Some(card.revealed());
        next.turn_phase = TurnPhase::ReplaceOrDiscard;
        Ok(next)
    }

    pub fn draw_from_discard(&self) -> Result<Self, RoundError> {
        self.check(&Action::DrawFromDiscard)?;
        let mut next = self.clone();
        let card = next
            .deck
            .take_discard_top()
            .ok_or(RoundError::EmptyDiscardPile)?;
        next.drawn_card = Some(card);
        next.turn_phase = TurnPhase::MustReplace;
        Ok(next)
    }

    /// Swaps the drawn card into `index`; the displaced card goes face up on
    /// the discard pile. Ends the turn.
    pub fn replace_card(&self, index: usize) -> Result<Self, RoundError> {
        self.check(&Action::Replace { index })?;
        let mut next = self.clone();
        let drawn = next.drawn_card.take().ok_or(RoundError::NoDrawnCard)?;
        let seat = next.current_player_index;
        let displaced = next.players[seat]
            .hand
            .swap(index, drawn)
            .ok_or(RoundError::EmptySlot(index))?;
        next.deck.discard(displaced);
        next.clear_column(seat, column_of(index));
        Ok(next.advance_turn())
    }

    /// Discards the drawn card and flips a hidden slot. Ends the turn.
    pub fn discard_and_reveal(&self, index: usize) -> Result<Self, RoundError> {
        self.check(&Action::DiscardAndReveal { index })?;
        let mut next = self.clone();
        let drawn = next.drawn_card.take().ok_or(RoundError::NoDrawnCard)?;
        next.deck.discard(drawn);
        let seat = next.current_player_index;
        next.players[seat].hand.reveal(index);
        Ok(next.advance_turn())
    }

    /// Drops a pile-drawn card without choosing a slot yet; the player then
    /// owes a reveal through [`GameState::reveal_grid_card`].
    pub fn abandon_drawn_card(&self) -> Result<Self, RoundError> {
        self.check(&Action::AbandonDrawnCard)?;
        let mut next = self.clone();
        let drawn = next.drawn_card.take().ok_or(RoundError::NoDrawnCard)?;
        next.deck.discard(drawn);
        next.turn_phase = TurnPhase::MustReveal;
        Ok(next)
    }

    pub fn reveal_grid_card(&self, index: usize) -> Result<Self, RoundError> {
        self.check(&Action::RevealGridCard { index })?;
        let mut next = self.clone();
        let seat = next.current_player_index;
        next.players[seat].hand.reveal(index);
        Ok(next.advance_turn())
    }

    /// Puts a card taken from the discard pile back. The only revocable step.
    pub fn undo_draw_from_discard(&self) -> Result<Self, RoundError> {
        self.check(&Action::UndoDrawFromDiscard)?;
        let mut next = self.clone();
        let drawn = next.drawn_card.take().ok_or(RoundError::NoDrawnCard)?;
        next.deck.discard.push(drawn);
        next.turn_phase = TurnPhase::Draw;
        Ok(next)
    }

    /// Passes play on from a seat that holds no card and owes nothing, with
    /// the same column, finisher and final-round bookkeeping as a resolved
    /// turn. Resolving transitions run this step themselves.
    pub fn end_turn(&self) -> Result<Self, RoundError> {
        self.check_end_turn()?;
        Ok(self.clone().advance_turn())
    }

    /// Closes the current seat's turn: clears matching columns, detects the
    /// finisher and the end of the final round, then passes play on.
    fn advance_turn(mut self) -> Self {
        let acting = self.current_player_index;
        let seats = self.players.len();
        for column in 0..COLUMNS {
            self.clear_column(acting, column);
        }

        if self.finishing_player_index.is_none() && self.players[acting].hand.is_fully_revealed() {
            self.finishing_player_index = Some(acting);
            self.phase = Phase::FinalRound;
            debug!(finisher = acting, "final round triggered");
        } else if self.phase == Phase::FinalRound {
            if let Some(finisher) = self.finishing_player_index {
                if acting == (finisher + seats - 1) % seats {
                    self.phase = Phase::Finished;
                    debug!(finisher, "round finished");
                }
            }
        }

        self.current_player_index = (acting + 1) % seats;
        self.turn_phase = TurnPhase::Draw;
        self
    }

    fn clear_column(&mut self, seat: usize, column: usize) {
        if let Some(cards) = self.players[seat].hand.clear_column(column) {
            debug!(seat, column, value = cards[0].value, "column cleared");
            self.cleared.extend(cards);
        }
    }
}
