//! Hand-evaluation helpers shared by every tier. They only ever look at the
//! deciding player's own hand.

use crate::Difficulty;
use skyjo_core::{column_of, column_slots, Hand, RngState};

/// Corner slots of the grid: columns 0 and 3, top and bottom rows.
pub const CORNERS: [usize; 4] = [0, 2, 9, 11];

/// Visible sum past which a hardcore bot stops caring where its last hidden
/// card lands.
pub const LATE_ROUND_VISIBLE_SUM: i32 = 50;

/// Whether placing `value` at `index` completes its column or builds
/// toward it: the other two slots hold two face-up matches, or one match
/// and at least one face-down card.
pub fn column_potential(hand: &Hand, index: usize, value: i32) -> bool {
    let mut matches = 0;
    let mut hidden = 0;
    for slot in column_slots(column_of(index)) {
        if slot == index {
            continue;
        }
        match hand.get(slot) {
            Some(card) if !card.is_revealed => hidden += 1,
            Some(card) if card.value == value => matches += 1,
            _ => {}
        }
    }
    matches == 2 || (matches == 1 && hidden >= 1)
}

/// [`column_potential`] for an occupied slot that does not already show
/// `value`. Swapping a card for its own value wastes the turn.
pub fn enables_column(hand: &Hand, index: usize, value: i32) -> bool {
    let Some(card) = hand.get(index) else {
        return false;
    };
    if card.is_revealed && card.value == value {
        return false;
    }
    column_potential(hand, index, value)
}

pub fn enables_any_column(hand: &Hand, value: i32) -> bool {
    hand.occupied_indices()
        .into_iter()
        .any(|index| enables_column(hand, index, value))
}

/// Where a card of `value` should go, if anywhere.
///
/// Column building wins first, scanning face-up slots before face-down ones.
/// After that the card's value band decides: an excellent card (`<= 0`)
/// displaces the highest face-up card above it, a good card (`1..=4`)
/// displaces a face-up card at least 4 higher or else lands on a face-down
/// slot (corners preferred by the advanced tiers), and anything worse only
/// displaces a face-up 10 or more.
pub fn find_best_replacement_position(
    hand: &Hand,
    value: i32,
    difficulty: Difficulty,
    rng: &mut RngState,
) -> Option<usize> {
    let revealed = hand.revealed_indices();
    let hidden = hand.hidden_indices();

    if let Some(index) = revealed
        .iter()
        .chain(&hidden)
        .copied()
        .find(|&index| enables_column(hand, index, value))
    {
        return Some(index);
    }

    let highest = hand.highest_revealed();

    if value <= 0 {
        if let Some((index, top)) = highest {
            if top > value {
                return Some(index);
            }
        }
    }

    if value <= 4 {
        if let Some((index, top)) = highest {
            if top >= value + 4 {
                return Some(index);
            }
        }
        if !hidden.is_empty() {
            if difficulty.is_advanced() {
                let corners: Vec<usize> = CORNERS
                    .into_iter()
                    .filter(|index| hidden.contains(index))
                    .collect();
                if let Some(&index) = rng.choose(&corners) {
                    return Some(index);
                }
            }
            return rng.choose(&hidden).copied();
        }
    }

    match highest {
        Some((index, top)) if value < top && top >= 10 => Some(index),
        _ => None,
    }
}

/// How promising it is to flip the face-down card at `index`.
pub fn hidden_slot_score(hand: &Hand, index: usize, difficulty: Difficulty) -> i32 {
    if difficulty == Difficulty::Hardcore
        && hand.hidden_count() == 1
        && hand.visible_score() > LATE_ROUND_VISIBLE_SUM
    {
        return 0;
    }
    let neighbours: Vec<i32> = column_slots(column_of(index))
        .into_iter()
        .filter(|&slot| slot != index)
        .filter_map(|slot| hand.get(slot))
        .filter(|card| card.is_revealed)
        .map(|card| card.value)
        .collect();
    match neighbours[..] {
        [a, b] if a == b => 20,
        [value] if difficulty == Difficulty::Hardcore && value <= 4 => 8,
        [_] => 5,
        _ => 1,
    }
}

/// Face-down slot with the best [`hidden_slot_score`]; the first one wins a
/// tie. Zero-scored slots are still candidates.
pub fn best_hidden_slot(hand: &Hand, difficulty: Difficulty) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for index in hand.hidden_indices() {
        let score = hidden_slot_score(hand, index, difficulty);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}
