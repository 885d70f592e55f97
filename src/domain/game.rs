//! Game orchestration: seats, player lifecycle, hand rotation, and the
//! declarer-gated wrappers the network layer drives.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use super::bidding::{self, Bid, PartnerCall};
use super::cards_logic::{mighty_card, ripper_card};
use super::cards_types::{Card, Trump};
use super::clock::Clock;
use super::dealing::Deck;
use super::hand::Hand;
use super::rules::{DEFAULT_MIN_BID, NUM_PLAYERS};
use super::scoring::{score_hand, HandScore};
use super::state::{next_seat, Phase, PlayerRole, RedealReason, Seat};
use crate::errors::domain::GameError;

/// Table settings. Defaults follow the standard five-player game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    pub min_bid: u8,
    pub allow_no_trump: bool,
    pub allow_no_friend: bool,
    /// Declarer may raise the bid after seeing the kitty.
    pub allow_raise_bid: bool,
    /// Declarer may change trump after seeing the kitty.
    pub allow_change_trump: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            min_bid: DEFAULT_MIN_BID,
            allow_no_trump: true,
            allow_no_friend: true,
            allow_raise_bid: true,
            allow_change_trump: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub player_id: String,
    pub seat_no: Seat,
    pub connected: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub last_ping: OffsetDateTime,
    pub role: PlayerRole,
}

/// One table: seated players, the running hand, and the hand history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
    pub status: Phase,
    pub variant: String,
    pub max_players: usize,
    pub seats: Vec<Option<PlayerState>>,
    pub current_hand: Option<Hand>,
    pub hand_no: u32,
    pub hands: Vec<Hand>,
    /// Cumulative score across completed hands.
    pub scores_total: BTreeMap<Seat, i32>,
    pub options: GameOptions,
}

impl Game {
    pub fn new(
        game_id: impl Into<String>,
        max_players: usize,
        clock: &dyn Clock,
    ) -> Result<Self, GameError> {
        if max_players != NUM_PLAYERS {
            return Err(GameError::InvalidPlayerCount);
        }
        Ok(Self {
            game_id: game_id.into(),
            created_at: clock.now(),
            started_at: None,
            completed_at: None,
            status: Phase::Waiting,
            variant: "mighty-5p-standard".to_string(),
            max_players,
            seats: (0..max_players).map(|_| None).collect(),
            current_hand: None,
            hand_no: 0,
            hands: Vec::new(),
            scores_total: BTreeMap::new(),
            options: GameOptions::default(),
        })
    }

    // ----- seats and players -----

    pub fn add_player(
        &mut self,
        player_id: impl Into<String>,
        seat_no: Seat,
        clock: &dyn Clock,
    ) -> Result<(), GameError> {
        if self.status != Phase::Waiting {
            return Err(GameError::GameAlreadyStarted);
        }
        if seat_no as usize >= self.max_players {
            return Err(GameError::InvalidSeat);
        }
        if self.seats[seat_no as usize].is_some() {
            return Err(GameError::SeatOccupied);
        }
        self.seats[seat_no as usize] = Some(PlayerState {
            player_id: player_id.into(),
            seat_no,
            connected: true,
            last_ping: clock.now(),
            role: PlayerRole::Undecided,
        });
        Ok(())
    }

    pub fn remove_player(&mut self, seat_no: Seat) -> Result<(), GameError> {
        if seat_no as usize >= self.max_players {
            return Err(GameError::InvalidSeat);
        }
        self.seats[seat_no as usize] = None;
        Ok(())
    }

    pub fn get_player(&self, seat_no: Seat) -> Option<&PlayerState> {
        self.seats.get(seat_no as usize)?.as_ref()
    }

    pub fn player_by_seat(&self, seat_no: Seat) -> Result<&PlayerState, GameError> {
        if seat_no as usize >= self.max_players {
            return Err(GameError::InvalidSeat);
        }
        self.seats[seat_no as usize]
            .as_ref()
            .ok_or(GameError::PlayerNotFound)
    }

    pub fn player_by_id(&self, player_id: &str) -> Result<&PlayerState, GameError> {
        self.seats
            .iter()
            .flatten()
            .find(|p| p.player_id == player_id)
            .ok_or(GameError::PlayerNotFound)
    }

    pub fn mark_connected(
        &mut self,
        seat_no: Seat,
        connected: bool,
        clock: &dyn Clock,
    ) -> Result<(), GameError> {
        let now = clock.now();
        let player = self.player_by_seat_mut(seat_no)?;
        player.connected = connected;
        player.last_ping = now;
        Ok(())
    }

    pub fn touch(&mut self, seat_no: Seat, clock: &dyn Clock) -> Result<(), GameError> {
        let now = clock.now();
        self.player_by_seat_mut(seat_no)?.last_ping = now;
        Ok(())
    }

    fn player_by_seat_mut(&mut self, seat_no: Seat) -> Result<&mut PlayerState, GameError> {
        if seat_no as usize >= self.max_players {
            return Err(GameError::InvalidSeat);
        }
        self.seats[seat_no as usize]
            .as_mut()
            .ok_or(GameError::PlayerNotFound)
    }

    pub fn is_ready_to_start(&self) -> bool {
        self.status == Phase::Waiting && self.seats.iter().all(|s| s.is_some())
    }

    // ----- lifecycle -----

    pub fn start(&mut self, clock: &dyn Clock) -> Result<(), GameError> {
        if !self.is_ready_to_start() {
            return Err(GameError::InvalidPlayerCount);
        }
        self.started_at = Some(clock.now());
        self.status = Phase::Bidding;
        info!(game_id = %self.game_id, "game started");
        Ok(())
    }

    /// Deal a new hand with the rotated dealer.
    pub fn start_hand<R: Rng>(&mut self, rng: &mut R) -> Result<(), GameError> {
        if self.status == Phase::Waiting {
            return Err(GameError::GameNotStarted);
        }
        if self.status == Phase::GameComplete {
            return Err(GameError::InvalidPhase);
        }
        if self.current_hand.is_some() {
            return Err(GameError::InvalidMove);
        }

        let dealer = self.next_dealer();
        self.hand_no += 1;
        let mut hand = Hand::new(self.hand_no, dealer, self.max_players);
        self.deal_into(&mut hand, rng)?;
        info!(
            game_id = %self.game_id,
            hand_no = self.hand_no,
            dealer,
            "hand dealt"
        );
        self.current_hand = Some(hand);
        Ok(())
    }

    /// Throw in the current hand and deal afresh with the same dealer and
    /// hand number. Only legal while the auction is still open.
    pub fn redeal<R: Rng>(&mut self, reason: RedealReason, rng: &mut R) -> Result<(), GameError> {
        let current = self.current_hand.as_ref().ok_or(GameError::InvalidPhase)?;
        if current.phase != Phase::Bidding {
            return Err(GameError::InvalidPhase);
        }
        let mut hand = Hand::new(current.hand_no, current.dealer_seat, self.max_players);
        self.deal_into(&mut hand, rng)?;
        info!(
            game_id = %self.game_id,
            hand_no = hand.hand_no,
            ?reason,
            "hand redealt"
        );
        self.current_hand = Some(hand);
        Ok(())
    }

    fn deal_into<R: Rng>(&self, hand: &mut Hand, rng: &mut R) -> Result<(), GameError> {
        let mut deck = Deck::new();
        deck.shuffle(rng);
        let (player_hands, kitty) = deck.deal(self.max_players)?;
        hand.set_deal(player_hands, kitty);
        Ok(())
    }

    /// Dealer for the next hand: seat 0 for the first, the declarer after a
    /// NoFriend hand, the revealed partner otherwise, falling back to the
    /// seat after the previous dealer.
    pub fn next_dealer(&self) -> Seat {
        let Some(hand) = self.current_hand.as_ref().or_else(|| self.hands.last()) else {
            return 0;
        };
        if hand.contract.as_ref().is_some_and(|c| c.no_friend) {
            return hand.declarer_seat.unwrap_or(0);
        }
        if let Some(partner) = hand.partner_seat {
            return partner;
        }
        next_seat(hand.dealer_seat, self.max_players)
    }

    // ----- auction -----

    pub fn add_bid(&mut self, bid: Bid) -> Result<(), GameError> {
        let options = self.options.clone();
        let hand = self.current_hand_mut()?;
        bidding::add_bid(hand, bid, &options)
    }

    pub fn is_bidding_complete(&self) -> bool {
        self.current_hand
            .as_ref()
            .is_some_and(bidding::is_bidding_complete)
    }

    /// Every seat passed: the hand must be redealt.
    pub fn is_redeal_required(&self) -> bool {
        self.current_hand.as_ref().is_some_and(bidding::all_passed)
    }

    pub fn finalize_bidding(&mut self) -> Result<(), GameError> {
        let hand = self.current_hand_mut()?;
        bidding::finalize_bidding(hand)
    }

    // ----- declarer actions -----

    pub fn pickup_kitty(&mut self, seat_no: Seat) -> Result<(), GameError> {
        let hand = self.current_hand_mut()?;
        require_declarer(hand, seat_no)?;
        hand.pickup_kitty()
    }

    pub fn discard(&mut self, seat_no: Seat, cards: &[Card]) -> Result<(), GameError> {
        let hand = self.current_hand_mut()?;
        require_declarer(hand, seat_no)?;
        hand.discard(cards)
    }

    pub fn raise_bid(&mut self, seat_no: Seat, points: u8) -> Result<(), GameError> {
        let options = self.options.clone();
        let hand = self.current_hand_mut()?;
        require_declarer(hand, seat_no)?;
        hand.raise_bid(points, &options)
    }

    pub fn change_trump(&mut self, seat_no: Seat, trump: Trump) -> Result<(), GameError> {
        let options = self.options.clone();
        let hand = self.current_hand_mut()?;
        require_declarer(hand, seat_no)?;
        hand.change_trump(trump, &options)
    }

    /// Record the partner call and lead the first trick with the declarer.
    pub fn call_partner(&mut self, seat_no: Seat, call: PartnerCall) -> Result<(), GameError> {
        let options = self.options.clone();
        let hand = self.current_hand_mut()?;
        require_declarer(hand, seat_no)?;
        hand.call_partner(call, &options)?;
        let leader = hand.declarer_seat.unwrap_or(hand.dealer_seat);
        hand.start_trick(leader)
    }

    // ----- trick play -----

    pub fn validate_card_play(&self, seat_no: Seat, card: Card) -> Result<(), GameError> {
        let hand = self.current_hand.as_ref().ok_or(GameError::InvalidPhase)?;
        hand.validate_card_play(seat_no, card)
    }

    pub fn play_card(&mut self, seat_no: Seat, card: Card) -> Result<(), GameError> {
        let hand = self.current_hand_mut()?;
        hand.play_card(seat_no, card)
    }

    /// Close the current trick. The winner leads the next trick; after the
    /// tenth the hand moves to `HandComplete`.
    pub fn complete_trick(&mut self) -> Result<Seat, GameError> {
        let hand = self.current_hand_mut()?;
        let winner = hand.complete_trick()?;
        if !hand.is_complete() {
            hand.start_trick(winner)?;
        }
        Ok(winner)
    }

    // ----- scoring and completion -----

    /// Score the finished hand, accrue the per-seat totals, and move the
    /// hand into history.
    pub fn complete_hand(&mut self) -> Result<HandScore, GameError> {
        let hand = self.current_hand.as_ref().ok_or(GameError::InvalidMove)?;
        if !hand.is_complete() {
            return Err(GameError::InvalidMove);
        }
        let score = score_hand(hand, &self.options)?;
        for (&seat, &delta) in &score.deltas {
            *self.scores_total.entry(seat).or_insert(0) += delta;
        }
        if let Some(mut hand) = self.current_hand.take() {
            hand.phase = Phase::HandComplete;
            self.hands.push(hand);
        }
        Ok(score)
    }

    /// Role of a seat in the current hand.
    pub fn player_role(&self, seat_no: Seat) -> PlayerRole {
        let Some(hand) = self.current_hand.as_ref() else {
            return PlayerRole::Undecided;
        };
        if hand.declarer_seat == Some(seat_no) {
            return PlayerRole::Declarer;
        }
        if hand.partner_revealed && hand.partner_seat == Some(seat_no) {
            return PlayerRole::Partner;
        }
        if hand.contract.as_ref().is_some_and(|c| c.no_friend) {
            return PlayerRole::Opponent;
        }
        PlayerRole::Undecided
    }

    /// Recompute and store the seat's role, returning it.
    pub fn update_role(&mut self, seat_no: Seat) -> Result<PlayerRole, GameError> {
        let role = self.player_role(seat_no);
        self.player_by_seat_mut(seat_no)?.role = role;
        Ok(role)
    }

    // ----- card identities for the running contract -----

    pub fn mighty(&self) -> Card {
        mighty_card(self.current_trump())
    }

    pub fn ripper(&self) -> Card {
        ripper_card(self.current_trump())
    }

    pub fn joker(&self) -> Card {
        Card::joker()
    }

    fn current_trump(&self) -> Trump {
        self.current_hand
            .as_ref()
            .and_then(|h| h.trump())
            .unwrap_or(Trump::NoTrump)
    }

    pub fn complete(&mut self, clock: &dyn Clock) {
        self.completed_at = Some(clock.now());
        self.status = Phase::GameComplete;
        info!(game_id = %self.game_id, "game complete");
    }

    pub fn is_complete(&self) -> bool {
        self.status == Phase::GameComplete
    }

    fn current_hand_mut(&mut self) -> Result<&mut Hand, GameError> {
        self.current_hand.as_mut().ok_or(GameError::InvalidPhase)
    }
}

fn require_declarer(hand: &Hand, seat_no: Seat) -> Result<(), GameError> {
    // Before the auction settles there is no declarer; the hand operation
    // itself reports the phase error.
    if let Some(declarer) = hand.declarer_seat {
        if declarer != seat_no {
            return Err(GameError::NotDeclarer);
        }
    }
    Ok(())
}
