//! Domain layer: pure game logic types and helpers.

pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod clock;
pub mod dealing;
pub mod game;
pub mod hand;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod tests_game;
#[cfg(test)]
mod tests_props_dealing;

// Re-exports for ergonomics
pub use bidding::{Bid, BidAction, Contract, PartnerCall};
pub use cards_logic::{card_beats, hand_has_suit, mighty_card, ripper_card};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, Rank, Suit, Trump};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dealing::Deck;
pub use game::{Game, GameOptions, PlayerState};
pub use hand::Hand;
pub use scoring::{score_hand, HandScore};
pub use snapshot::{MemoryStore, SnapshotStore};
pub use state::{Phase, PlayerRole, RedealReason, Seat};
pub use tricks::{trick_winner, CardPlay, Trick};
