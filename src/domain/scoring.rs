//! Hand scoring: the base formula, the multiplier stack, and per-seat
//! allocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::game::GameOptions;
use super::hand::Hand;
use super::rules::TOTAL_POINTS;
use super::state::Seat;
use crate::errors::domain::GameError;

/// Result of scoring one completed hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandScore {
    /// Declarer-team points, including the discard.
    pub team_points: u8,
    pub success: bool,
    /// Score before the multiplier stack.
    pub base_score: i32,
    /// Product of the independent doublings (run, back-run, no-trump,
    /// no-friend).
    pub multiplier: i32,
    /// Final per-unit score `s`.
    pub score: i32,
    /// Signed deltas per seat.
    pub deltas: BTreeMap<Seat, i32>,
}

/// Score a completed hand.
///
/// Success means the declarer's team took at least the bid B. The base is
/// `2(B − M) + (P − B)` on success and `B − P` on failure; each applicable
/// multiplier doubles it. Allocation: declarer ±2s, revealed partner ±s,
/// opponents ∓s. Under NoFriend the four opponents instead split the
/// declarer's ±2s evenly (∓s/2 each; the NoFriend doubling keeps that
/// integral).
pub fn score_hand(hand: &Hand, options: &GameOptions) -> Result<HandScore, GameError> {
    if !hand.is_complete() {
        return Err(GameError::InvalidPhase);
    }
    let contract = hand.contract.as_ref().ok_or(GameError::InvalidMove)?;
    let declarer = contract.declarer_seat;

    let team_points = hand.declarer_team_points()?;
    let bid = i32::from(contract.points);
    let taken = i32::from(team_points);
    let min_bid = i32::from(options.min_bid);
    let success = taken >= bid;

    let base_score = if success {
        2 * (bid - min_bid) + (taken - bid)
    } else {
        bid - taken
    };

    let mut multiplier = 1;
    if success && team_points == TOTAL_POINTS {
        multiplier *= 2; // run
    }
    if !success && i32::from(TOTAL_POINTS) - taken >= 11 {
        multiplier *= 2; // back-run
    }
    if contract.trump.is_no_trump() {
        multiplier *= 2;
    }
    if contract.no_friend {
        multiplier *= 2;
    }

    let score = base_score * multiplier;
    let sign = if success { 1 } else { -1 };

    let partner = if contract.no_friend {
        None
    } else {
        hand.partner_seat.filter(|&p| p != declarer)
    };

    let mut deltas = BTreeMap::new();
    deltas.insert(declarer, sign * 2 * score);
    // Under NoFriend the doubled score makes the opponents' share integral.
    let opponent_share = if contract.no_friend { score / 2 } else { score };
    for seat in 0..hand.num_players() as Seat {
        if seat == declarer {
            continue;
        }
        if Some(seat) == partner {
            deltas.insert(seat, sign * score);
        } else {
            deltas.insert(seat, -sign * opponent_share);
        }
    }

    debug!(
        hand_no = hand.hand_no,
        team_points,
        success,
        base_score,
        multiplier,
        score,
        "hand scored"
    );

    Ok(HandScore {
        team_points,
        success,
        base_score,
        multiplier,
        score,
        deltas,
    })
}
