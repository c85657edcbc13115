use crate::Card;
use serde::{Deserialize, Serialize};

pub const HAND_SIZE: usize = 12;
pub const ROWS: usize = 3;
pub const COLUMNS: usize = HAND_SIZE / ROWS;

/// Slot indices of column `column`.
pub fn column_slots(column: usize) -> [usize; ROWS] {
    let start = column * ROWS;
    [start, start + 1, start + 2]
}

pub fn column_of(index: usize) -> usize {
    index / ROWS
}

/// A 4x3 grid stored column-major: column `c` is slots `3c..3c+3`.
/// `None` marks a slot emptied by a column clear; it never refills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    slots: [Option<Card>; HAND_SIZE],
}

impl Default for Hand {
    fn default() -> Self {
        Self {
            slots: [None; HAND_SIZE],
        }
    }
}

impl Hand {
    pub fn new(slots: [Option<Card>; HAND_SIZE]) -> Self {
        Self { slots }
    }

    pub fn from_cards(cards: [Card; HAND_SIZE]) -> Self {
        Self {
            slots: cards.map(Some),
        }
    }

    /// Every slot face down with the given values.
    pub fn hidden(values: [i32; HAND_SIZE]) -> Self {
        Self::from_cards(values.map(Card::new))
    }

    /// Every slot face up with the given values.
    pub fn revealed(values: [i32; HAND_SIZE]) -> Self {
        Self::from_cards(values.map(Card::face_up))
    }

    pub fn slots(&self) -> &[Option<Card>; HAND_SIZE] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.get(index).is_some_and(|card| !card.is_revealed)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.get(index).is_some_and(|card| card.is_revealed)
    }

    pub fn occupied_indices(&self) -> Vec<usize> {
        (0..HAND_SIZE).filter(|&idx| self.is_occupied(idx)).collect()
    }

    pub fn hidden_indices(&self) -> Vec<usize> {
        (0..HAND_SIZE).filter(|&idx| self.is_hidden(idx)).collect()
    }

    pub fn revealed_indices(&self) -> Vec<usize> {
        (0..HAND_SIZE).filter(|&idx| self.is_revealed(idx)).collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn revealed_count(&self) -> usize {
        self.slots.iter().flatten().filter(|card| card.is_revealed).count()
    }

    pub fn hidden_count(&self) -> usize {
        self.slots.iter().flatten().filter(|card| !card.is_revealed).count()
    }

    /// True once no occupied slot is face down. An all-empty hand counts.
    pub fn is_fully_revealed(&self) -> bool {
        self.hidden_count() == 0
    }

    /// Sum of the face-up cards only.
    pub fn visible_score(&self) -> i32 {
        self.slots
            .iter()
            .flatten()
            .filter(|card| card.is_revealed)
            .map(|card| card.value)
            .sum()
    }

    /// Sum of every remaining card, face up or not.
    pub fn total(&self) -> i32 {
        self.slots.iter().flatten().map(|card| card.value).sum()
    }

    /// Highest face-up card as `(index, value)`; the lowest index wins ties.
    pub fn highest_revealed(&self) -> Option<(usize, i32)> {
        let mut best: Option<(usize, i32)> = None;
        for idx in self.revealed_indices() {
            let value = self.slots[idx].map(|card| card.value).unwrap_or_default();
            if best.map_or(true, |(_, top)| value > top) {
                best = Some((idx, value));
            }
        }
        best
    }

    pub(crate) fn reveal(&mut self, index: usize) {
        if let Some(card) = self.slots.get_mut(index).and_then(Option::as_mut) {
            card.reveal();
        }
    }

    /// Puts `card` face up into an occupied slot and hands back the old card.
    pub(crate) fn swap(&mut self, index: usize, card: Card) -> Option<Card> {
        let slot = self.slots.get_mut(index)?;
        let previous = slot.take()?;
        *slot = Some(card.revealed());
        Some(previous)
    }

    /// True when all three cards of the column are face up and equal.
    pub fn column_matches(&self, column: usize) -> bool {
        if column >= COLUMNS {
            return false;
        }
        let [a, b, c] = column_slots(column).map(|idx| self.slots[idx]);
        match (a, b, c) {
            (Some(a), Some(b), Some(c)) => {
                a.is_revealed
                    && b.is_revealed
                    && c.is_revealed
                    && a.value == b.value
                    && b.value == c.value
            }
            _ => false,
        }
    }

    /// False for a column outside the grid.
    pub fn is_column_empty(&self, column: usize) -> bool {
        column < COLUMNS
            && column_slots(column)
                .iter()
                .all(|&idx| self.slots[idx].is_none())
    }

    /// Empties `column` if it matches. The removed cards leave the game.
    pub(crate) fn clear_column(&mut self, column: usize) -> Option<[Card; ROWS]> {
        if !self.column_matches(column) {
            return None;
        }
        let slots = column_slots(column);
        let mut removed = [Card::new(0); ROWS];
        for (out, idx) in removed.iter_mut().zip(slots) {
            if let Some(card) = self.slots[idx].take() {
                *out = card;
            }
        }
        Some(removed)
    }
}
