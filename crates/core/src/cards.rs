use serde::{Deserialize, Serialize};

pub const MIN_CARD_VALUE: i32 = -2;
pub const MAX_CARD_VALUE: i32 = 12;

/// Colour band printed on a card. Purely derived from the value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardColor {
    DarkBlue,
    LightBlue,
    Green,
    Yellow,
    Red,
}

impl CardColor {
    pub fn for_value(value: i32) -> Self {
        match value {
            i32::MIN..=-1 => Self::DarkBlue,
            0 => Self::LightBlue,
            1..=4 => Self::Green,
            5..=8 => Self::Yellow,
            _ => Self::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub value: i32,
    pub color: CardColor,
    #[serde(default)]
    pub is_revealed: bool,
}

impl Card {
    /// A face-down card.
    pub fn new(value: i32) -> Self {
        Self {
            value,
            color: CardColor::for_value(value),
            is_revealed: false,
        }
    }

    pub fn face_up(value: i32) -> Self {
        Self {
            is_revealed: true,
            ..Self::new(value)
        }
    }

    pub fn revealed(mut self) -> Self {
        self.is_revealed = true;
        self
    }

    pub fn reveal(&mut self) {
        self.is_revealed = true;
    }

    pub fn is_valid_value(value: i32) -> bool {
        (MIN_CARD_VALUE..=MAX_CARD_VALUE).contains(&value)
    }
}
