//! Table-level constants and standalone rule helpers.

use std::ops::RangeInclusive;

use super::cards_logic::mighty_card;
use super::cards_types::{Card, Rank, Trump};

/// Seats at a standard Mighty table.
pub const NUM_PLAYERS: usize = 5;
/// Cards dealt to each seat.
pub const CARDS_PER_PLAYER: usize = 10;
/// Cards left for the declarer's kitty.
pub const KITTY_SIZE: usize = 3;
/// Full deck: 52 suited cards plus the Joker.
pub const DECK_SIZE: usize = 53;
/// Tricks per hand.
pub const TRICKS_PER_HAND: usize = 10;
/// Point cards in the deck.
pub const TOTAL_POINTS: u8 = 20;
/// Default floor for the auction; tables may raise it via `GameOptions`.
pub const DEFAULT_MIN_BID: u8 = 13;
/// Ceiling of the auction: all twenty points.
pub const MAX_BID: u8 = 20;
/// A hand valued at or below this may be thrown in for a redeal.
pub const WEAK_HAND_THRESHOLD: f64 = 0.5;

pub fn valid_bid_range(min_bid: u8) -> RangeInclusive<u8> {
    min_bid..=MAX_BID
}

/// Hand strength for redeal eligibility: Mighty 0, Joker −1, A/K/Q/J +1,
/// Ten +0.5, everything else 0.
pub fn hand_value(hand: &[Card], trump: Trump) -> f64 {
    let mighty = mighty_card(trump);
    hand.iter()
        .map(|&card| {
            if card == mighty {
                0.0
            } else if card.is_joker() {
                -1.0
            } else {
                match card.rank {
                    Rank::Ace | Rank::King | Rank::Queen | Rank::Jack => 1.0,
                    Rank::Ten => 0.5,
                    _ => 0.0,
                }
            }
        })
        .sum()
}

/// Redeal eligibility for a dealt hand. The evaluator uses the Spades
/// sentinel because no trump has been declared at redeal time.
pub fn is_weak_hand(hand: &[Card]) -> bool {
    hand_value(hand, Trump::Spades) <= WEAK_HAND_THRESHOLD
}
