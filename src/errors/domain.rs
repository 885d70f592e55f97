//! Domain-level error type used across the engine.
//!
//! Errors are enumerated kinds compared by identity; the `Display`
//! implementation exists for logs and protocol mapping, never for
//! comparison. Every engine operation returns exactly one of these and
//! leaves state unchanged on failure.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    InsufficientCards,
    InvalidBid,
    BidTooLow,
    PlayerAlreadyPassed,
    InvalidTrump,
    InvalidMove,
    NotPlayerTurn,
    CardNotInHand,
    MustFollowSuit,
    InvalidPhase,
    GameNotStarted,
    GameAlreadyStarted,
    InvalidPlayerCount,
    InvalidSeat,
    SeatOccupied,
    PlayerNotFound,
    NotDeclarer,
    KittyAlreadyPicked,
    PartnerAlreadyCalled,
    InvalidPartnerCall,
    CannotLeadTrump,
    InvalidSuit,
    InvalidRank,
    InvalidCard,
}

impl Display for GameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let msg = match self {
            GameError::InsufficientCards => "insufficient cards in deck",
            GameError::InvalidBid => "invalid bid",
            GameError::BidTooLow => "bid too low",
            GameError::PlayerAlreadyPassed => "player has already passed",
            GameError::InvalidTrump => "invalid trump suit",
            GameError::InvalidMove => "invalid move",
            GameError::NotPlayerTurn => "not player's turn",
            GameError::CardNotInHand => "card not in hand",
            GameError::MustFollowSuit => "must follow suit",
            GameError::InvalidPhase => "invalid game phase",
            GameError::GameNotStarted => "game not started",
            GameError::GameAlreadyStarted => "game already started",
            GameError::InvalidPlayerCount => "invalid player count",
            GameError::InvalidSeat => "invalid seat number",
            GameError::SeatOccupied => "seat already occupied",
            GameError::PlayerNotFound => "player not found",
            GameError::NotDeclarer => "only declarer can perform this action",
            GameError::KittyAlreadyPicked => "kitty already picked",
            GameError::PartnerAlreadyCalled => "partner already called",
            GameError::InvalidPartnerCall => "invalid partner call",
            GameError::CannotLeadTrump => {
                "cannot lead trump on first trick unless only trumps in hand"
            }
            GameError::InvalidSuit => "invalid suit",
            GameError::InvalidRank => "invalid rank",
            GameError::InvalidCard => "invalid card string",
        };
        write!(f, "{msg}")
    }
}

impl Error for GameError {}
