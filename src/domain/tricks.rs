//! Tricks and trick resolution.

use serde::{Deserialize, Serialize};

use super::cards_logic::card_beats;
use super::cards_types::{Card, Suit, Trump};
use super::state::Seat;

/// One card played into a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlay {
    pub seat: Seat,
    pub card: Card,
}

/// One round of play: each seat contributes a card, the winner takes the
/// trick's accumulated point value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    pub trick_no: u8,
    pub leader_seat: Seat,
    pub plays: Vec<CardPlay>,
    pub winner_seat: Option<Seat>,
    pub points: u8,
}

impl Trick {
    pub fn new(trick_no: u8, leader_seat: Seat) -> Self {
        Self {
            trick_no,
            leader_seat,
            plays: Vec::with_capacity(5),
            winner_seat: None,
            points: 0,
        }
    }

    pub fn add_card(&mut self, seat: Seat, card: Card) {
        self.points += card.point_value();
        self.plays.push(CardPlay { seat, card });
    }

    pub fn is_complete(&self, num_players: usize) -> bool {
        self.plays.len() == num_players
    }

    /// Suit of the first card played; NoSuit for a Joker lead, `None` for an
    /// empty trick.
    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|p| p.card.suit)
    }

    /// Whether the Ripper for this trump landed in this trick. The Joker's
    /// over-trump privilege is cancelled exactly in such tricks.
    pub fn contains_ripper(&self, trump: Trump) -> bool {
        self.plays.iter().any(|p| p.card.is_ripper(trump))
    }
}

/// Winner of a trick under the layered precedence: Mighty, then Joker
/// (unless the Ripper is present), then trump by rank, then lead suit by
/// rank, with earlier plays standing otherwise. `None` for an empty trick.
pub fn trick_winner(trick: &Trick, trump: Trump) -> Option<Seat> {
    let lead = trick.lead_suit()?;
    let joker_ripped = trick.contains_ripper(trump);

    let mut winning = trick.plays[0];
    for &play in &trick.plays[1..] {
        if card_beats(play.card, winning.card, lead, trump, joker_ripped) {
            winning = play;
        }
    }
    Some(winning.seat)
}
