use crate::{Card, DeckEntry, RngState};
use serde::{Deserialize, Serialize};

pub const DECK_SIZE: usize = 150;

/// Canonical composition: -2 x5, -1 x10, 0 x15, 1..=12 x10 each.
pub fn standard_composition() -> Vec<DeckEntry> {
    let mut entries = vec![
        DeckEntry { value: -2, copies: 5 },
        DeckEntry { value: -1, copies: 10 },
        DeckEntry { value: 0, copies: 15 },
    ];
    entries.extend((1..=12).map(|value| DeckEntry { value, copies: 10 }));
    entries
}

/// The canonical 150-card multiset, all face down, in composition order.
pub fn build_deck() -> Vec<Card> {
    build_deck_from(&standard_composition())
}

pub fn build_deck_from(composition: &[DeckEntry]) -> Vec<Card> {
    let total = composition.iter().map(|entry| entry.copies as usize).sum();
    let mut cards = Vec::with_capacity(total);
    for entry in composition {
        for _ in 0..entry.copies {
            cards.push(Card::new(entry.value));
        }
    }
    cards
}

pub fn shuffle(cards: &mut [Card], rng: &mut RngState) {
    rng.shuffle(cards);
}

/// Face-down draw pile and face-up discard pile. The last element of each
/// vector is the top of the pile.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    pub fn shuffled(mut cards: Vec<Card>, rng: &mut RngState) -> Self {
        shuffle(&mut cards, rng);
        Self {
            draw: cards,
            discard: Vec::new(),
        }
    }

    pub fn draw_card(&mut self) -> Option<Card> {
        self.draw.pop()
    }

    pub fn draw_cards(&mut self, count: usize) -> Vec<Card> {
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(card) = self.draw.pop() {
                cards.push(card);
            } else {
                break;
            }
        }
        cards
    }

    pub fn discard(&mut self, card: Card) {
        self.discard.push(card.revealed());
    }

    pub fn discard_top(&self) -> Option<&Card> {
        self.discard.last()
    }

    pub fn take_discard_top(&mut self) -> Option<Card> {
        self.discard.pop()
    }

    pub fn len(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty() && self.discard.is_empty()
    }

    /// Whether a draw from the face-down pile can be served, possibly after
    /// recycling the discard pile.
    pub fn can_draw(&self) -> bool {
        !self.draw.is_empty() || self.discard.len() > 1
    }

    /// Turns every discard except the top face down and shuffles them into the
    /// draw pile. Returns the number of recycled cards.
    pub fn recycle_discard(&mut self, rng: &mut RngState) -> usize {
        let Some(top) = self.discard.pop() else {
            return 0;
        };
        let recycled = self.discard.len();
        for mut card in self.discard.drain(..) {
            card.is_revealed = false;
            self.draw.push(card);
        }
        rng.shuffle(&mut self.draw);
        self.discard.push(top);
        recycled
    }
}
