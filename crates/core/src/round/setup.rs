use super::RoundError;
use crate::*;
use std::collections::HashSet;
use tracing::debug;

/// Deals a fresh round with the canonical rules.
pub fn initialize_game(
    players: &[PlayerInfo],
    rng: &mut RngState,
) -> Result<GameState, ConfigError> {
    GameState::deal(players, &RuleConfig::default(), rng)
}

impl GameState {
    /// Shuffles the configured deck, deals a face-down hand to every seat and
    /// turns one card face up to start the discard pile.
    pub fn deal(
        players: &[PlayerInfo],
        config: &RuleConfig,
        rng: &mut RngState,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        config.check_player_count(players.len())?;
        let mut seen = HashSet::new();
        for player in players {
            if !seen.insert(player.id.as_str()) {
                return Err(ConfigError::DuplicatePlayerId(player.id.clone()));
            }
        }

        let mut deck = Deck::shuffled(build_deck_from(&config.deck), rng);
        let mut seated = Vec::with_capacity(players.len());
        for info in players {
            let cards = deck.draw_cards(HAND_SIZE);
            let mut slots = [None; HAND_SIZE];
            for (slot, card) in slots.iter_mut().zip(cards) {
                *slot = Some(card);
            }
            seated.push(Player {
                id: info.id.clone(),
                name: info.name.clone(),
                hand: Hand::new(slots),
            });
        }
        if let Some(first) = deck.draw_card() {
            deck.discard(first);
        }
        let deck_seed = rng.next_u64();
        debug!(
            players = seated.len(),
            draw_pile = deck.draw.len(),
            "dealt new round"
        );

        Ok(Self {
            players: seated,
            current_player_index: 0,
            deck,
            drawn_card: None,
            phase: Phase::InitialReveal,
            turn_phase: TurnPhase::Draw,
            finishing_player_index: None,
            deck_seed,
            recycles: 0,
            cleared: Vec::new(),
        })
    }

    /// Reveals the two opening cards of a seat. Once every seat has done so
    /// play starts with the seat whose two cards sum lowest.
    pub fn reveal_initial_cards(
        &self,
        player_index: usize,
        indices: [usize; 2],
    ) -> Result<Self, RoundError> {
        self.check(&Action::RevealInitial {
            player_index,
            indices,
        })?;
        let mut next = self.clone();
        let hand = &mut next.players[player_index].hand;
        for index in indices {
            hand.reveal(index);
        }
        if next
            .players
            .iter()
            .all(|player| player.hand.revealed_count() >= 2)
        {
            let starter = next.starting_player();
            next.phase = Phase::Playing;
            next.turn_phase = TurnPhase::Draw;
            next.current_player_index = starter;
            debug!(starter, "initial reveal complete");
        }
        Ok(next)
    }

    /// Seat with the lowest visible sum; the lowest seat index wins ties.
    fn starting_player(&self) -> usize {
        self.players
            .iter()
            .enumerate()
            .min_by_key(|(index, player)| (player.hand.visible_score(), *index))
            .map(|(index, _)| index)
            .unwrap_or(0)
    }
}
