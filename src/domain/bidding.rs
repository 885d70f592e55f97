//! The auction: bids, bid ordering, contracts, and partner calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cards_types::{Card, Suit, Trump};
use super::game::GameOptions;
use super::hand::Hand;
use super::rules::valid_bid_range;
use super::state::{next_seat, Phase, Seat};
use crate::errors::domain::GameError;

/// What a seat does on its turn in the auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BidAction {
    Pass,
    Call { points: u8, trump: Trump },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub seat: Seat,
    pub action: BidAction,
}

impl Bid {
    pub fn call(seat: Seat, points: u8, trump: Trump) -> Self {
        Self {
            seat,
            action: BidAction::Call { points, trump },
        }
    }

    pub fn pass(seat: Seat) -> Self {
        Self {
            seat,
            action: BidAction::Pass,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.action == BidAction::Pass
    }

    /// Strictly-higher ordering: more points win; at equal points NoTrump
    /// beats a suit; an equal (points, trump-kind) pair never beats, so a
    /// later bidder must raise.
    pub fn beats(&self, other: &Bid) -> bool {
        match (self.action, other.action) {
            (BidAction::Pass, _) => false,
            (_, BidAction::Pass) => true,
            (
                BidAction::Call { points, trump },
                BidAction::Call {
                    points: other_points,
                    trump: other_trump,
                },
            ) => {
                points > other_points
                    || (points == other_points
                        && trump.is_no_trump()
                        && !other_trump.is_no_trump())
            }
        }
    }
}

/// How the declarer names the hidden partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PartnerCall {
    /// The holder of the named card; revealed when the card is played. The
    /// lead-suit request is only legal alongside a 20-point NoTrump
    /// contract.
    #[serde(rename = "card")]
    ByCard {
        card: Card,
        lead_suit: Option<Suit>,
    },
    /// The winner of the first trick.
    #[serde(rename = "first_trick")]
    ByFirstTrick,
    /// The declarer plays alone against four opponents.
    #[serde(rename = "no_friend")]
    NoFriend,
}

/// The winning bid together with its declarer and partner call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub declarer_seat: Seat,
    pub points: u8,
    pub trump: Trump,
    pub no_friend: bool,
    pub partner_call: Option<PartnerCall>,
}

/// Accept one auction action. On success the bid is logged, pass/highest
/// bookkeeping is updated, and the turn advances clockwise past seats that
/// have already passed.
pub fn add_bid(hand: &mut Hand, bid: Bid, options: &GameOptions) -> Result<(), GameError> {
    if hand.phase != Phase::Bidding {
        return Err(GameError::InvalidPhase);
    }
    if bid.seat != hand.current_bidder {
        return Err(GameError::NotPlayerTurn);
    }
    if hand.passed_seats.contains(&bid.seat) {
        return Err(GameError::PlayerAlreadyPassed);
    }

    if let BidAction::Call { points, trump } = bid.action {
        if !valid_bid_range(options.min_bid).contains(&points) {
            return Err(GameError::InvalidBid);
        }
        if trump.is_no_trump() && !options.allow_no_trump {
            return Err(GameError::InvalidTrump);
        }
        if let Some(highest) = &hand.highest_bid {
            if !bid.beats(highest) {
                return Err(GameError::BidTooLow);
            }
        }
    }

    hand.bids.push(bid);
    if bid.is_pass() {
        hand.passed_seats.insert(bid.seat);
    } else {
        hand.highest_bid = Some(bid);
    }

    advance_bidder(hand);
    Ok(())
}

/// Move the turn clockwise, skipping seats that already passed. A no-op
/// when every seat has passed.
fn advance_bidder(hand: &mut Hand) {
    let num_players = hand.num_players();
    let mut seat = hand.current_bidder;
    for _ in 0..num_players {
        seat = next_seat(seat, num_players);
        if !hand.passed_seats.contains(&seat) {
            hand.current_bidder = seat;
            return;
        }
    }
}

/// Bidding ends when every seat has passed (redeal) or exactly one live
/// seat remains behind a standing bid.
pub fn is_bidding_complete(hand: &Hand) -> bool {
    let num_players = hand.num_players();
    if hand.passed_seats.len() == num_players {
        return true;
    }
    hand.highest_bid.is_some() && hand.passed_seats.len() == num_players - 1
}

/// Every seat passed: the hand is thrown in.
pub fn all_passed(hand: &Hand) -> bool {
    hand.passed_seats.len() == hand.num_players()
}

/// Seal the auction into a contract and move to the kitty phase.
pub fn finalize_bidding(hand: &mut Hand) -> Result<(), GameError> {
    if hand.phase != Phase::Bidding {
        return Err(GameError::InvalidPhase);
    }
    let highest = hand.highest_bid.ok_or(GameError::InvalidBid)?;
    let BidAction::Call { points, trump } = highest.action else {
        return Err(GameError::InvalidBid);
    };

    hand.declarer_seat = Some(highest.seat);
    hand.contract = Some(Contract {
        declarer_seat: highest.seat,
        points,
        trump,
        no_friend: false,
        partner_call: None,
    });
    hand.phase = Phase::Kitty;

    debug!(
        hand_no = hand.hand_no,
        declarer = highest.seat,
        points,
        ?trump,
        "contract finalized"
    );
    Ok(())
}
