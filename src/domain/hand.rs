//! One deal of Mighty: the hand state machine from bidding through the
//! tenth trick.
//!
//! Phase flow: Bidding → Kitty → Discard → CallingPartner → Playing →
//! HandComplete. Every operation validates before it mutates; a failed
//! operation leaves the hand untouched.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bidding::{Bid, Contract, PartnerCall};
use super::cards_logic::hand_has_suit;
use super::cards_types::{Card, Suit, Trump};
use super::game::GameOptions;
use super::rules::{valid_bid_range, KITTY_SIZE, TRICKS_PER_HAND};
use super::state::{nth_from, Phase, Seat};
use super::tricks::{trick_winner, Trick};
use crate::errors::domain::GameError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub hand_no: u32,
    pub dealer_seat: Seat,
    pub phase: Phase,

    // Auction
    pub bids: Vec<Bid>,
    pub highest_bid: Option<Bid>,
    pub passed_seats: BTreeSet<Seat>,
    pub current_bidder: Seat,

    // Contract
    pub contract: Option<Contract>,
    pub declarer_seat: Option<Seat>,
    pub partner_seat: Option<Seat>,
    pub partner_revealed: bool,

    // Cards
    pub kitty: Vec<Card>,
    pub discarded: Vec<Card>,
    pub player_hands: Vec<Vec<Card>>,

    // Tricks
    pub tricks: Vec<Trick>,
    pub current_trick: Option<Trick>,
    pub points_by_seat: BTreeMap<Seat, u8>,

    /// Per-hand latch: the Ripper has been played.
    pub ripper_played: bool,
    /// Per-hand latch: a trick has contained both Ripper and Joker. Trick
    /// resolution itself uses the per-trick rule; this records the event.
    pub joker_ripped: bool,
}

impl Hand {
    pub fn new(hand_no: u32, dealer_seat: Seat, num_players: usize) -> Self {
        Self {
            hand_no,
            dealer_seat,
            phase: Phase::Bidding,
            bids: Vec::new(),
            highest_bid: None,
            passed_seats: BTreeSet::new(),
            current_bidder: dealer_seat,
            contract: None,
            declarer_seat: None,
            partner_seat: None,
            partner_revealed: false,
            kitty: Vec::new(),
            discarded: Vec::new(),
            player_hands: vec![Vec::new(); num_players],
            tricks: Vec::with_capacity(TRICKS_PER_HAND),
            current_trick: None,
            points_by_seat: BTreeMap::new(),
            ripper_played: false,
            joker_ripped: false,
        }
    }

    pub fn num_players(&self) -> usize {
        self.player_hands.len()
    }

    /// Install the dealt hands and kitty.
    pub fn set_deal(&mut self, hands: Vec<Vec<Card>>, kitty: Vec<Card>) {
        self.player_hands = hands;
        self.kitty = kitty;
    }

    pub fn trump(&self) -> Option<Trump> {
        self.contract.as_ref().map(|c| c.trump)
    }

    fn declarer(&self) -> Result<Seat, GameError> {
        // Contract finalization always sets the declarer; missing one here
        // is the "should not happen" sentinel.
        self.declarer_seat.ok_or(GameError::InvalidMove)
    }

    /// Move the kitty into the declarer's hand (ten cards become thirteen).
    pub fn pickup_kitty(&mut self) -> Result<(), GameError> {
        match self.phase {
            Phase::Kitty => {}
            Phase::Discard => return Err(GameError::KittyAlreadyPicked),
            _ => return Err(GameError::InvalidPhase),
        }
        let declarer = self.declarer()?;
        if declarer as usize >= self.num_players() {
            return Err(GameError::InvalidSeat);
        }

        let kitty: Vec<Card> = self.kitty.drain(..).collect();
        self.player_hands[declarer as usize].extend(kitty);
        self.phase = Phase::Discard;
        Ok(())
    }

    /// Discard exactly three cards from the declarer's hand. Atomic: either
    /// all three are removed or the hand is untouched. The discards are
    /// retained and count for the declarer's team at scoring time.
    pub fn discard(&mut self, cards: &[Card]) -> Result<(), GameError> {
        if self.phase != Phase::Discard {
            return Err(GameError::InvalidPhase);
        }
        if cards.len() != KITTY_SIZE {
            return Err(GameError::InvalidMove);
        }
        let declarer = self.declarer()?;

        let mut remaining = self.player_hands[declarer as usize].clone();
        for card in cards {
            match remaining.iter().position(|c| c == card) {
                Some(pos) => {
                    remaining.remove(pos);
                }
                None => return Err(GameError::CardNotInHand),
            }
        }

        self.player_hands[declarer as usize] = remaining;
        self.discarded = cards.to_vec();
        self.phase = Phase::CallingPartner;
        Ok(())
    }

    /// Raise the contract after seeing the kitty, before discarding.
    pub fn raise_bid(&mut self, points: u8, options: &GameOptions) -> Result<(), GameError> {
        if self.phase != Phase::Discard {
            return Err(GameError::InvalidPhase);
        }
        if !options.allow_raise_bid {
            return Err(GameError::InvalidBid);
        }
        let contract = self.contract.as_mut().ok_or(GameError::InvalidMove)?;
        if !valid_bid_range(options.min_bid).contains(&points) {
            return Err(GameError::InvalidBid);
        }
        if points <= contract.points {
            return Err(GameError::BidTooLow);
        }
        contract.points = points;
        Ok(())
    }

    /// Swap the contract's trump after seeing the kitty, before discarding.
    pub fn change_trump(&mut self, trump: Trump, options: &GameOptions) -> Result<(), GameError> {
        if self.phase != Phase::Discard {
            return Err(GameError::InvalidPhase);
        }
        if !options.allow_change_trump {
            return Err(GameError::InvalidTrump);
        }
        if trump.is_no_trump() && !options.allow_no_trump {
            return Err(GameError::InvalidTrump);
        }
        let contract = self.contract.as_mut().ok_or(GameError::InvalidMove)?;
        contract.trump = trump;
        Ok(())
    }

    /// Record the partner call and open trick play.
    pub fn call_partner(
        &mut self,
        call: PartnerCall,
        options: &GameOptions,
    ) -> Result<(), GameError> {
        match self.phase {
            Phase::CallingPartner => {}
            Phase::Playing => return Err(GameError::PartnerAlreadyCalled),
            _ => return Err(GameError::InvalidPhase),
        }
        let contract = self.contract.as_ref().ok_or(GameError::InvalidMove)?;

        match call {
            PartnerCall::NoFriend if !options.allow_no_friend => {
                return Err(GameError::InvalidPartnerCall);
            }
            PartnerCall::ByCard {
                lead_suit: Some(suit),
                ..
            } => {
                // A lead request rides only on the 20-point NoTrump contract.
                if suit == Suit::NoSuit
                    || contract.points != 20
                    || !contract.trump.is_no_trump()
                {
                    return Err(GameError::InvalidPartnerCall);
                }
            }
            _ => {}
        }

        let contract = self.contract.as_mut().ok_or(GameError::InvalidMove)?;
        contract.partner_call = Some(call);
        if call == PartnerCall::NoFriend {
            contract.no_friend = true;
            self.partner_seat = None;
        }
        self.phase = Phase::Playing;

        debug!(hand_no = self.hand_no, ?call, "partner called");
        Ok(())
    }

    /// Open a trick with the given leader.
    pub fn start_trick(&mut self, leader_seat: Seat) -> Result<(), GameError> {
        if self.phase != Phase::Playing || self.current_trick.is_some() {
            return Err(GameError::InvalidPhase);
        }
        let trick_no = self.tricks.len() as u8 + 1;
        self.current_trick = Some(Trick::new(trick_no, leader_seat));
        Ok(())
    }

    /// Legality of playing `card` from `seat`, without turn enforcement.
    pub fn validate_card_play(&self, seat: Seat, card: Card) -> Result<(), GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::InvalidPhase);
        }
        let trick = self.current_trick.as_ref().ok_or(GameError::InvalidMove)?;
        if seat as usize >= self.num_players() {
            return Err(GameError::InvalidSeat);
        }

        let hand = &self.player_hands[seat as usize];
        if !hand.contains(&card) {
            return Err(GameError::CardNotInHand);
        }

        let trump = self.trump().unwrap_or(Trump::NoTrump);

        if trick.plays.is_empty() {
            // Leading the first trick: trump may not be led while the hand
            // still holds a non-trump card. The Mighty and the Joker count
            // as trump for this rule.
            if self.tricks.is_empty() {
                if let Some(trump_suit) = trump.suit() {
                    let is_trump =
                        |c: &Card| c.suit == trump_suit || c.is_mighty(trump) || c.is_joker();
                    if card.suit == trump_suit
                        && !card.is_mighty(trump)
                        && !card.is_joker()
                        && hand.iter().any(|c| !is_trump(c))
                    {
                        return Err(GameError::CannotLeadTrump);
                    }
                }
            }
            return Ok(());
        }

        // Follow the lead suit when able; the Joker is exempt.
        if let Some(lead) = trick.lead_suit() {
            if card.suit != lead && !card.is_joker() && hand_has_suit(hand, lead) {
                return Err(GameError::MustFollowSuit);
            }
        }

        Ok(())
    }

    /// Play a card into the current trick, enforcing turn order and play
    /// legality.
    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::InvalidPhase);
        }
        let trick = self.current_trick.as_ref().ok_or(GameError::InvalidMove)?;
        let expected = nth_from(trick.leader_seat, trick.plays.len(), self.num_players());
        if seat != expected {
            return Err(GameError::NotPlayerTurn);
        }

        self.validate_card_play(seat, card)?;

        let hand = &mut self.player_hands[seat as usize];
        let pos = hand
            .iter()
            .position(|c| *c == card)
            .ok_or(GameError::CardNotInHand)?;
        hand.remove(pos);

        let trick = self.current_trick.as_mut().ok_or(GameError::InvalidMove)?;
        trick.add_card(seat, card);

        let trump = self.trump().unwrap_or(Trump::NoTrump);
        if card.is_ripper(trump) {
            self.ripper_played = true;
        }

        Ok(())
    }

    /// Close a fully played trick: pick the winner, credit the points,
    /// reveal the partner when the call resolves, and finish the hand after
    /// the tenth trick. Returns the winner's seat.
    pub fn complete_trick(&mut self) -> Result<Seat, GameError> {
        let num_players = self.num_players();
        let complete = self
            .current_trick
            .as_ref()
            .is_some_and(|t| t.is_complete(num_players));
        if !complete {
            return Err(GameError::InvalidMove);
        }
        let mut trick = self.current_trick.take().ok_or(GameError::InvalidMove)?;

        let trump = self.trump().unwrap_or(Trump::NoTrump);
        let winner = trick_winner(&trick, trump).ok_or(GameError::InvalidMove)?;
        trick.winner_seat = Some(winner);

        *self.points_by_seat.entry(winner).or_insert(0) += trick.points;

        if trick.contains_ripper(trump) && trick.plays.iter().any(|p| p.card.is_joker()) {
            self.joker_ripped = true;
        }

        if !self.partner_revealed {
            match self.contract.as_ref().and_then(|c| c.partner_call) {
                Some(PartnerCall::ByCard { card, .. }) => {
                    if let Some(play) = trick.plays.iter().find(|p| p.card == card) {
                        self.partner_seat = Some(play.seat);
                        self.partner_revealed = true;
                    }
                }
                Some(PartnerCall::ByFirstTrick) if self.tricks.is_empty() => {
                    self.partner_seat = Some(winner);
                    self.partner_revealed = true;
                }
                _ => {}
            }
        }

        debug!(
            hand_no = self.hand_no,
            trick_no = trick.trick_no,
            winner,
            points = trick.points,
            "trick complete"
        );

        self.tricks.push(trick);
        if self.tricks.len() == TRICKS_PER_HAND {
            self.phase = Phase::HandComplete;
            debug!(hand_no = self.hand_no, "hand complete");
        }

        Ok(winner)
    }

    /// All ten tricks have been played.
    pub fn is_complete(&self) -> bool {
        self.tricks.len() == TRICKS_PER_HAND
    }

    /// Whether the seat's dealt hand qualifies for a weak-hand redeal.
    pub fn can_redeal_weak_hand(&self, seat: Seat) -> bool {
        self.player_hands
            .get(seat as usize)
            .is_some_and(|hand| super::rules::is_weak_hand(hand))
    }

    /// Points taken by the declarer's team: the declarer's tricks, the
    /// revealed partner's tricks, and the discarded cards.
    pub fn declarer_team_points(&self) -> Result<u8, GameError> {
        let declarer = self.declarer()?;
        let contract = self.contract.as_ref().ok_or(GameError::InvalidMove)?;

        let mut points = *self.points_by_seat.get(&declarer).unwrap_or(&0);
        points += self
            .discarded
            .iter()
            .map(|c| c.point_value())
            .sum::<u8>();
        if !contract.no_friend {
            if let Some(partner) = self.partner_seat {
                if partner != declarer {
                    points += *self.points_by_seat.get(&partner).unwrap_or(&0);
                }
            }
        }
        Ok(points)
    }
}
