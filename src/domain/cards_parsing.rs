//! Card parsing and formatting ("SA", "H10", "JOKER").
//!
//! Parsing is case-insensitive; formatting is uppercase. The two are exact
//! inverses: `parse(format(c)) == c` for every valid card and
//! `format(parse(s)) == uppercase(s)` for every valid card string.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::GameError;

impl Suit {
    /// Single-letter abbreviation used by the wire encoding.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Suit::Spades => "S",
            Suit::Hearts => "H",
            Suit::Diamonds => "D",
            Suit::Clubs => "C",
            Suit::NoSuit => "J",
        }
    }
}

impl Rank {
    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Joker => "JOKER",
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.rank == Rank::Joker {
            return write!(f, "JOKER");
        }
        write!(f, "{}{}", self.suit.abbreviation(), self.rank.symbol())
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_uppercase();
        if s == "JOKER" {
            return Ok(Card::joker());
        }
        if s.len() < 2 {
            return Err(GameError::InvalidCard);
        }

        let suit = match s.as_bytes()[0] {
            b'S' => Suit::Spades,
            b'H' => Suit::Hearts,
            b'D' => Suit::Diamonds,
            b'C' => Suit::Clubs,
            _ => return Err(GameError::InvalidSuit),
        };

        let rank = match &s[1..] {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(GameError::InvalidRank),
        };

        Ok(Card { suit, rank })
    }
}

/// Parse a sequence of card tokens, failing on the first invalid one.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, GameError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
