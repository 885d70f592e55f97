//! Rules engine for 5-player Mighty.
//!
//! The engine owns the authoritative state of one table: dealing, the
//! bidding auction, kitty/discard/partner-call, trick play under the
//! Mighty/Joker/Ripper precedence rules, and scoring. It is synchronous;
//! the caller provides concurrency, a clock, an RNG, and persistence.

pub mod domain;
pub mod errors;

pub use domain::{Card, Game, GameOptions, Hand, Rank, Suit, Trump};
pub use errors::domain::GameError;
