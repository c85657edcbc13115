use skyjo_core::{
    hand_score, Action, Card, Deck, GameState, Hand, Phase, Player, RoundError, TurnPhase,
};

const NO_MATCH: [i32; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

fn hand(values: [i32; 12], hidden: &[usize]) -> Hand {
    let mut cards = values.map(Card::face_up);
    for &idx in hidden {
        cards[idx] = Card::new(values[idx]);
    }
    Hand::from_cards(cards)
}

fn all_hidden(values: [i32; 12]) -> Hand {
    Hand::hidden(values)
}

/// Draw pile values are listed bottom first; the last one is drawn first.
fn table(hands: Vec<Hand>, draw: &[i32], discard: &[i32]) -> GameState {
    GameState {
        players: hands
            .into_iter()
            .enumerate()
            .map(|(idx, hand)| Player {
                id: format!("p{idx}"),
                name: format!("Player {idx}"),
                hand,
            })
            .collect(),
        current_player_index: 0,
        deck: Deck {
            draw: draw.iter().copied().map(Card::new).collect(),
            discard: discard.iter().copied().map(Card::face_up).collect(),
        },
        drawn_card: None,
        phase: Phase::Playing,
        turn_phase: TurnPhase::Draw,
        finishing_player_index: None,
        deck_seed: 42,
        recycles: 0,
        cleared: Vec::new(),
    }
}

fn opening(hands: Vec<Hand>) -> GameState {
    GameState {
        phase: Phase::InitialReveal,
        ..table(hands, &[0, 0, 0], &[4])
    }
}

#[test]
fn initial_reveal_flips_two_slots() {
    let state = opening(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)]);
    let next = state.reveal_initial_cards(0, [0, 11]).expect("reveal");
    assert!(next.players[0].hand.is_revealed(0));
    assert!(next.players[0].hand.is_revealed(11));
    assert_eq!(next.players[0].hand.revealed_count(), 2);
    assert_eq!(next.phase, Phase::InitialReveal);
}

#[test]
fn initial_reveal_rejects_second_attempt() {
    let state = opening(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)]);
    let next = state.reveal_initial_cards(1, [3, 4]).expect("reveal");
    assert_eq!(
        next.reveal_initial_cards(1, [5, 6]),
        Err(RoundError::InitialRevealDone(1))
    );
}

#[test]
fn initial_reveal_rejects_bad_indices() {
    let state = opening(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)]);
    assert_eq!(
        state.reveal_initial_cards(0, [2, 2]),
        Err(RoundError::DuplicateIndex)
    );
    assert_eq!(
        state.reveal_initial_cards(0, [2, 12]),
        Err(RoundError::IndexOutOfRange(12))
    );
    assert_eq!(
        state.reveal_initial_cards(5, [0, 1]),
        Err(RoundError::UnknownPlayer(5))
    );
}

#[test]
fn lowest_opening_sum_starts_with_ties_to_lowest_seat() {
    let state = opening(vec![
        all_hidden([6, 6, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        all_hidden([1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        all_hidden([0, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    ]);
    let state = state.reveal_initial_cards(2, [0, 1]).expect("seat 2");
    let state = state.reveal_initial_cards(0, [0, 1]).expect("seat 0");
    assert_eq!(state.phase, Phase::InitialReveal);
    let state = state.reveal_initial_cards(1, [0, 1]).expect("seat 1");
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.turn_phase, TurnPhase::Draw);
    assert_eq!(state.current_player_index, 1);
}

#[test]
fn turn_actions_are_rejected_during_initial_reveal() {
    let state = opening(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)]);
    assert_eq!(
        state.draw_from_pile(),
        Err(RoundError::InvalidPhase(Phase::InitialReveal))
    );
}

#[test]
fn draw_from_pile_holds_card_face_up() {
    let state = table(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)], &[3, 9], &[4]);
    let next = state.draw_from_pile().expect("draw");
    assert_eq!(next.turn_phase, TurnPhase::ReplaceOrDiscard);
    assert_eq!(next.drawn_card, Some(Card::face_up(9)));
    assert_eq!(next.deck.draw.len(), 1);
    assert_eq!(state.deck.draw.len(), 2);
}

#[test]
fn replace_discards_displaced_card_and_passes_turn() {
    let state = table(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)], &[0], &[4]);
    let next = state
        .draw_from_pile()
        .and_then(|s| s.replace_card(7))
        .expect("replace");
    assert_eq!(next.players[0].hand.get(7), Some(&Card::face_up(0)));
    assert_eq!(next.discard_top(), Some(&Card::face_up(8)));
    assert_eq!(next.current_player_index, 1);
    assert_eq!(next.turn_phase, TurnPhase::Draw);
    assert_eq!(next.drawn_card, None);
}

#[test]
fn discard_draw_must_be_swapped() {
    let state = table(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)], &[0], &[4]);
    let taken = state.draw_from_discard().expect("take");
    assert_eq!(taken.turn_phase, TurnPhase::MustReplace);
    assert_eq!(taken.discard_and_reveal(0), Err(RoundError::MustReplace));
    assert_eq!(taken.abandon_drawn_card(), Err(RoundError::MustReplace));
    let valid = taken.valid_actions();
    assert!(valid.discard_and_reveal.is_empty());
    assert!(!valid.abandon_drawn_card);
    assert_eq!(valid.replace.len(), 12);
    assert!(valid.undo_draw_from_discard);
}

#[test]
fn undo_take_from_discard_restores_state() {
    let state = table(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)], &[0], &[2, 4]);
    let undone = state
        .draw_from_discard()
        .and_then(|s| s.undo_draw_from_discard())
        .expect("undo");
    assert_eq!(undone, state);
}

#[test]
fn undo_is_rejected_after_pile_draw() {
    let state = table(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)], &[0], &[4]);
    let drawn = state.draw_from_pile().expect("draw");
    assert_eq!(
        drawn.undo_draw_from_discard(),
        Err(RoundError::InvalidTurnPhase(TurnPhase::ReplaceOrDiscard))
    );
}

#[test]
fn discard_and_reveal_needs_hidden_slot() {
    let state = table(vec![hand(NO_MATCH, &[4]), all_hidden(NO_MATCH)], &[0], &[4]);
    let drawn = state.draw_from_pile().expect("draw");
    assert_eq!(drawn.discard_and_reveal(3), Err(RoundError::AlreadyRevealed(3)));
    let next = drawn.discard_and_reveal(4).expect("reveal");
    assert!(next.players[0].hand.is_revealed(4));
    assert_eq!(next.discard_top(), Some(&Card::face_up(0)));
}

#[test]
fn abandon_then_reveal_ends_turn() {
    let state = table(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)], &[11], &[4]);
    let abandoned = state
        .draw_from_pile()
        .and_then(|s| s.abandon_drawn_card())
        .expect("abandon");
    assert_eq!(abandoned.turn_phase, TurnPhase::MustReveal);
    assert_eq!(abandoned.drawn_card, None);
    assert_eq!(abandoned.discard_top(), Some(&Card::face_up(11)));
    assert_eq!(
        abandoned.draw_from_pile(),
        Err(RoundError::InvalidTurnPhase(TurnPhase::MustReveal))
    );
    let next = abandoned.reveal_grid_card(5).expect("reveal");
    assert!(next.players[0].hand.is_revealed(5));
    assert_eq!(next.current_player_index, 1);
}

#[test]
fn third_matching_card_clears_column() {
    let values = [5, 5, 9, 1, 2, 3, 4, 6, 7, 8, 10, 11];
    let state = table(
        vec![hand(values, &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11]), all_hidden(NO_MATCH)],
        &[0],
        &[5],
    );
    let before = hand_score(&state.players[0].hand);
    let next = state
        .draw_from_discard()
        .and_then(|s| s.replace_card(2))
        .expect("replace");
    let cleared = &next.players[0].hand;
    assert!(cleared.is_column_empty(0));
    assert_eq!(next.cleared.len(), 3);
    assert_eq!(hand_score(cleared), before - 5 - 5 - 9);
    assert_eq!(next.discard_top(), Some(&Card::face_up(9)));
    assert_eq!(next.card_count(), state.card_count());
}

#[test]
fn cleared_column_cannot_be_targeted() {
    let values = [5, 5, 9, 1, 2, 3, 4, 6, 7, 8, 10, 11];
    let state = table(
        vec![hand(values, &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11]), all_hidden(NO_MATCH)],
        &[0, 0, 0],
        &[5],
    );
    let state = state
        .draw_from_discard()
        .and_then(|s| s.replace_card(2))
        .expect("clear");
    let state = state
        .draw_from_pile()
        .and_then(|s| s.discard_and_reveal(0))
        .expect("seat 1");
    let drawn = state.draw_from_pile().expect("draw");
    assert_eq!(drawn.replace_card(1), Err(RoundError::EmptySlot(1)));
    assert!(!drawn.valid_actions().replace.contains(&1));
}

#[test]
fn finisher_triggers_final_round_for_two_players() {
    let state = table(
        vec![hand(NO_MATCH, &[11]), all_hidden(NO_MATCH)],
        &[0, 0, 0],
        &[4],
    );
    let after_finisher = state
        .draw_from_pile()
        .and_then(|s| s.discard_and_reveal(11))
        .expect("finish");
    assert_eq!(after_finisher.finishing_player_index, Some(0));
    assert_eq!(after_finisher.phase, Phase::FinalRound);
    assert_eq!(after_finisher.current_player_index, 1);

    let finished = after_finisher
        .draw_from_pile()
        .and_then(|s| s.discard_and_reveal(0))
        .expect("last turn");
    assert_eq!(finished.phase, Phase::Finished);
    assert_eq!(finished.finishing_player_index, Some(0));
    assert_eq!(
        finished.draw_from_pile(),
        Err(RoundError::InvalidPhase(Phase::Finished))
    );
    assert!(finished.valid_actions().is_empty());
}

#[test]
fn every_other_seat_gets_one_last_turn() {
    let mut state = table(
        vec![
            all_hidden(NO_MATCH),
            hand(NO_MATCH, &[0]),
            all_hidden(NO_MATCH),
        ],
        &[0, 0, 0, 0, 0],
        &[4],
    );
    state.current_player_index = 1;
    let state = state
        .draw_from_pile()
        .and_then(|s| s.discard_and_reveal(0))
        .expect("seat 1 finishes");
    assert_eq!(state.finishing_player_index, Some(1));
    let state = state
        .draw_from_pile()
        .and_then(|s| s.discard_and_reveal(3))
        .expect("seat 2");
    assert_eq!(state.phase, Phase::FinalRound);
    assert_eq!(state.current_player_index, 0);
    let state = state
        .draw_from_pile()
        .and_then(|s| s.discard_and_reveal(3))
        .expect("seat 0");
    assert_eq!(state.phase, Phase::Finished);
}

#[test]
fn finisher_is_set_only_once() {
    let state = table(
        vec![hand(NO_MATCH, &[11]), hand(NO_MATCH, &[0]), all_hidden(NO_MATCH)],
        &[0, 0, 0, 0],
        &[4],
    );
    let state = state
        .draw_from_pile()
        .and_then(|s| s.discard_and_reveal(11))
        .expect("seat 0 finishes");
    let state = state
        .draw_from_pile()
        .and_then(|s| s.discard_and_reveal(0))
        .expect("seat 1 also reveals all");
    assert_eq!(state.finishing_player_index, Some(0));
    assert_eq!(state.phase, Phase::FinalRound);
}

#[test]
fn empty_draw_pile_recycles_discards() {
    let state = table(
        vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)],
        &[],
        &[1, 2, 3, 4],
    );
    let drawn = state.draw_from_pile().expect("recycled draw");
    assert_eq!(drawn.recycles, 1);
    assert_eq!(drawn.discard_top(), Some(&Card::face_up(4)));
    assert_eq!(drawn.deck.discard.len(), 1);
    assert_eq!(drawn.deck.draw.len(), 2);
    assert!(drawn.deck.draw.iter().all(|card| !card.is_revealed));
    assert_eq!(drawn.card_count(), state.card_count());
    assert_eq!(state.draw_from_pile(), Ok(drawn));
}

#[test]
fn draw_pile_exhausted_without_spare_discards() {
    let state = table(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)], &[], &[4]);
    assert_eq!(state.draw_from_pile(), Err(RoundError::EmptyDrawPile));
    let valid = state.valid_actions();
    assert!(!valid.draw_from_pile);
    assert!(valid.draw_from_discard);
}

#[test]
fn empty_discard_pile_cannot_be_taken() {
    let state = table(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)], &[1], &[]);
    assert_eq!(state.draw_from_discard(), Err(RoundError::EmptyDiscardPile));
}

#[test]
fn apply_dispatches_each_action() {
    let state = table(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)], &[0], &[4]);
    let via_apply = state
        .apply(&Action::DrawFromPile)
        .and_then(|s| s.apply(&Action::Replace { index: 3 }))
        .expect("apply");
    let direct = state
        .draw_from_pile()
        .and_then(|s| s.replace_card(3))
        .expect("direct");
    assert_eq!(via_apply, direct);
}

#[test]
fn end_turn_refuses_to_drop_a_discard_pile_card() {
    let state = table(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)], &[6], &[4]);
    let taken = state.draw_from_discard().expect("take");
    assert_eq!(taken.end_turn(), Err(RoundError::MustReplace));
    assert_eq!(taken.current_player_index, 0);
    assert_eq!(taken.drawn_card, Some(Card::face_up(4)));
}

#[test]
fn end_turn_refuses_while_a_card_is_held_or_a_reveal_is_owed() {
    let state = table(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)], &[6], &[4]);
    let drawn = state.draw_from_pile().expect("draw");
    assert_eq!(
        drawn.end_turn(),
        Err(RoundError::InvalidTurnPhase(TurnPhase::ReplaceOrDiscard))
    );
    let abandoned = drawn.abandon_drawn_card().expect("abandon");
    assert_eq!(
        abandoned.end_turn(),
        Err(RoundError::InvalidTurnPhase(TurnPhase::MustReveal))
    );
}

#[test]
fn end_turn_refuses_outside_the_turn_cycle() {
    let state = opening(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)]);
    assert_eq!(
        state.end_turn(),
        Err(RoundError::InvalidPhase(Phase::InitialReveal))
    );
    let finished = GameState {
        phase: Phase::Finished,
        finishing_player_index: Some(1),
        ..table(vec![hand(NO_MATCH, &[]), hand(NO_MATCH, &[])], &[6], &[4])
    };
    assert_eq!(
        finished.end_turn(),
        Err(RoundError::InvalidPhase(Phase::Finished))
    );
}

#[test]
fn end_turn_passes_an_idle_seat() {
    let state = table(vec![all_hidden(NO_MATCH), all_hidden(NO_MATCH)], &[6], &[4]);
    let passed = state.end_turn().expect("pass");
    assert_eq!(passed.current_player_index, 1);
    assert_eq!(passed.turn_phase, TurnPhase::Draw);
    assert_eq!(passed.phase, Phase::Playing);
    assert_eq!(passed.deck, state.deck);
    assert_eq!(passed.card_count(), state.card_count());
}
