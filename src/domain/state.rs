//! Phase, role, and seat primitives shared across the engine.

use serde::{Deserialize, Serialize};

/// Seat index at the table, 0-based. Seats are opaque positions; player
/// identity lives in `PlayerState`.
pub type Seat = u8;

/// Progression of a hand (and, coarsely, of the game).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for players to fill seats.
    Waiting,
    /// Auction in progress.
    Bidding,
    /// Declarer about to pick up the kitty.
    Kitty,
    /// Declarer discarding back down to ten cards.
    Discard,
    /// Declarer naming the partner call.
    CallingPartner,
    /// Trick play, ten tricks.
    Playing,
    /// All tricks played; scoring may run.
    HandComplete,
    /// Game session over.
    GameComplete,
}

/// A player's role within the current hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Undecided,
    Declarer,
    Partner,
    Opponent,
}

/// Why a hand was thrown in for a redeal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedealReason {
    AllPassed,
    WeakHand,
    Manual,
}

/// Next seat clockwise. Seat math is modular over the table size.
#[inline]
pub fn next_seat(seat: Seat, num_players: usize) -> Seat {
    ((seat as usize + 1) % num_players) as Seat
}

/// The seat `n` steps clockwise from `start`.
#[inline]
pub fn nth_from(start: Seat, n: usize, num_players: usize) -> Seat {
    ((start as usize + n) % num_players) as Seat
}
