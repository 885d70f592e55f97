//! Core card-related types: Card, Rank, Suit, Trump

use serde::{Deserialize, Serialize};

use crate::errors::domain::GameError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    /// The Joker's suit. No other card carries it.
    NoSuit,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Joker,
}

/// The contract's trump: a suit or the no-trump sentinel.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Trump {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    NoTrump,
}

impl Trump {
    /// The trump suit, or `None` for a no-trump contract.
    pub fn suit(self) -> Option<Suit> {
        match self {
            Trump::Clubs => Some(Suit::Clubs),
            Trump::Diamonds => Some(Suit::Diamonds),
            Trump::Hearts => Some(Suit::Hearts),
            Trump::Spades => Some(Suit::Spades),
            Trump::NoTrump => None,
        }
    }

    pub fn is_no_trump(self) -> bool {
        self == Trump::NoTrump
    }
}

impl TryFrom<Suit> for Trump {
    type Error = GameError;

    fn try_from(suit: Suit) -> Result<Self, Self::Error> {
        match suit {
            Suit::Clubs => Ok(Trump::Clubs),
            Suit::Diamonds => Ok(Trump::Diamonds),
            Suit::Hearts => Ok(Trump::Hearts),
            Suit::Spades => Ok(Trump::Spades),
            Suit::NoSuit => Err(GameError::InvalidTrump),
        }
    }
}

impl TryFrom<Trump> for Suit {
    type Error = GameError;

    fn try_from(trump: Trump) -> Result<Self, Self::Error> {
        trump.suit().ok_or(GameError::InvalidTrump)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub const fn joker() -> Self {
        Self {
            suit: Suit::NoSuit,
            rank: Rank::Joker,
        }
    }
}

// Ord on Card is only for stable sorting: suit order C<D<H<S<NoSuit, then
// rank order. Never use it for trick resolution, which depends on trump and
// lead context.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
