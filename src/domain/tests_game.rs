use rand::rngs::StdRng;
use rand::SeedableRng;
use time::macros::datetime;

use super::bidding::{Bid, PartnerCall};
use super::cards_types::Trump;
use super::clock::FixedClock;
use super::game::Game;
use super::state::{Phase, PlayerRole, RedealReason};
use crate::errors::domain::GameError;

fn clock() -> FixedClock {
    FixedClock(datetime!(2025-06-01 12:00 UTC))
}

fn full_game() -> Game {
    let clock = clock();
    let mut game = Game::new("g-1", 5, &clock).unwrap();
    for seat in 0..5u8 {
        game.add_player(format!("player-{seat}"), seat, &clock).unwrap();
    }
    game
}

fn started_game() -> Game {
    let mut game = full_game();
    game.start(&clock()).unwrap();
    game
}

#[test]
fn new_game_requires_five_seats() {
    let clock = clock();
    assert_eq!(
        Game::new("g", 4, &clock).unwrap_err(),
        GameError::InvalidPlayerCount
    );
    let game = Game::new("g", 5, &clock).unwrap();
    assert_eq!(game.status, Phase::Waiting);
    assert_eq!(game.seats.len(), 5);
    assert_eq!(game.created_at, clock.0);
    assert!(game.started_at.is_none());
}

#[test]
fn add_player_validates_seat_and_occupancy() {
    let clock = clock();
    let mut game = Game::new("g", 5, &clock).unwrap();
    game.add_player("alice", 2, &clock).unwrap();
    assert_eq!(
        game.add_player("bob", 2, &clock).unwrap_err(),
        GameError::SeatOccupied
    );
    assert_eq!(
        game.add_player("bob", 5, &clock).unwrap_err(),
        GameError::InvalidSeat
    );

    let player = game.player_by_seat(2).unwrap();
    assert_eq!(player.player_id, "alice");
    assert!(player.connected);
    assert_eq!(player.role, PlayerRole::Undecided);
}

#[test]
fn add_remove_round_trips_to_empty_seat() {
    let clock = clock();
    let mut game = Game::new("g", 5, &clock).unwrap();
    game.add_player("alice", 1, &clock).unwrap();
    game.remove_player(1).unwrap();
    assert!(game.get_player(1).is_none());
    assert_eq!(
        game.player_by_seat(1).unwrap_err(),
        GameError::PlayerNotFound
    );
    // The slot is usable again.
    game.add_player("bob", 1, &clock).unwrap();
}

#[test]
fn players_cannot_join_after_start() {
    let mut game = started_game();
    assert_eq!(
        game.add_player("late", 0, &clock()).unwrap_err(),
        GameError::GameAlreadyStarted
    );
}

#[test]
fn lookup_by_id() {
    let game = full_game();
    assert_eq!(game.player_by_id("player-3").unwrap().seat_no, 3);
    assert_eq!(
        game.player_by_id("ghost").unwrap_err(),
        GameError::PlayerNotFound
    );
}

#[test]
fn start_requires_full_table() {
    let clock = clock();
    let mut game = Game::new("g", 5, &clock).unwrap();
    game.add_player("alice", 0, &clock).unwrap();
    assert!(!game.is_ready_to_start());
    assert_eq!(game.start(&clock).unwrap_err(), GameError::InvalidPlayerCount);

    let mut game = full_game();
    assert!(game.is_ready_to_start());
    game.start(&clock).unwrap();
    assert_eq!(game.status, Phase::Bidding);
    assert_eq!(game.started_at, Some(clock.0));
}

#[test]
fn start_hand_deals_ten_cards_each_and_three_to_kitty() {
    let mut game = started_game();
    let mut rng = StdRng::seed_from_u64(11);
    game.start_hand(&mut rng).unwrap();

    let hand = game.current_hand.as_ref().unwrap();
    assert_eq!(hand.hand_no, 1);
    assert_eq!(hand.dealer_seat, 0);
    assert_eq!(hand.phase, Phase::Bidding);
    for seat_hand in &hand.player_hands {
        assert_eq!(seat_hand.len(), 10);
    }
    assert_eq!(hand.kitty.len(), 3);
}

#[test]
fn start_hand_requires_started_game() {
    let mut game = full_game();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        game.start_hand(&mut rng).unwrap_err(),
        GameError::GameNotStarted
    );
}

#[test]
fn start_hand_refuses_while_hand_is_live() {
    let mut game = started_game();
    let mut rng = StdRng::seed_from_u64(0);
    game.start_hand(&mut rng).unwrap();
    assert_eq!(game.start_hand(&mut rng).unwrap_err(), GameError::InvalidMove);
}

#[test]
fn redeal_replaces_the_deal_during_bidding() {
    let mut game = started_game();
    let mut rng = StdRng::seed_from_u64(3);
    game.start_hand(&mut rng).unwrap();
    let before = game.current_hand.as_ref().unwrap().player_hands.clone();

    game.redeal(RedealReason::AllPassed, &mut rng).unwrap();
    let hand = game.current_hand.as_ref().unwrap();
    assert_eq!(hand.hand_no, 1);
    assert_eq!(hand.phase, Phase::Bidding);
    assert!(hand.bids.is_empty());
    assert_ne!(hand.player_hands, before);
}

#[test]
fn redeal_only_while_bidding() {
    let mut game = started_game();
    let mut rng = StdRng::seed_from_u64(3);
    game.start_hand(&mut rng).unwrap();
    settle_contract(&mut game, 0);
    assert_eq!(
        game.redeal(RedealReason::Manual, &mut rng).unwrap_err(),
        GameError::InvalidPhase
    );
}

/// Drive the auction so `declarer` wins 14 hearts and the contract is
/// finalized.
fn settle_contract(game: &mut Game, declarer: u8) {
    let dealer = game.current_hand.as_ref().unwrap().dealer_seat;
    let mut seat = dealer;
    loop {
        let bid = if seat == declarer {
            Bid::call(seat, 14, Trump::Hearts)
        } else {
            Bid::pass(seat)
        };
        game.add_bid(bid).unwrap();
        if game.is_bidding_complete() {
            break;
        }
        seat = game.current_hand.as_ref().unwrap().current_bidder;
    }
    game.finalize_bidding().unwrap();
}

#[test]
fn declarer_gates_on_kitty_and_discard() {
    let mut game = started_game();
    let mut rng = StdRng::seed_from_u64(5);
    game.start_hand(&mut rng).unwrap();
    settle_contract(&mut game, 2);

    assert_eq!(game.pickup_kitty(0).unwrap_err(), GameError::NotDeclarer);
    game.pickup_kitty(2).unwrap();

    let extra = game.current_hand.as_ref().unwrap().player_hands[2].clone();
    assert_eq!(extra.len(), 13);
    assert_eq!(
        game.discard(1, &extra[..3]).unwrap_err(),
        GameError::NotDeclarer
    );
    game.discard(2, &extra[..3]).unwrap();
    assert_eq!(
        game.current_hand.as_ref().unwrap().phase,
        Phase::CallingPartner
    );
}

#[test]
fn call_partner_leads_first_trick_with_declarer() {
    let mut game = started_game();
    let mut rng = StdRng::seed_from_u64(5);
    game.start_hand(&mut rng).unwrap();
    settle_contract(&mut game, 2);
    game.pickup_kitty(2).unwrap();
    let extra = game.current_hand.as_ref().unwrap().player_hands[2].clone();
    game.discard(2, &extra[..3]).unwrap();

    game.call_partner(2, PartnerCall::ByFirstTrick).unwrap();
    let hand = game.current_hand.as_ref().unwrap();
    assert_eq!(hand.phase, Phase::Playing);
    let trick = hand.current_trick.as_ref().unwrap();
    assert_eq!(trick.trick_no, 1);
    assert_eq!(trick.leader_seat, 2);
}

#[test]
fn next_dealer_rules() {
    let mut game = started_game();
    assert_eq!(game.next_dealer(), 0);

    let mut rng = StdRng::seed_from_u64(5);
    game.start_hand(&mut rng).unwrap();
    settle_contract(&mut game, 2);

    // Partner never revealed: fall back to the seat after the dealer.
    assert_eq!(game.next_dealer(), 1);

    // Revealed partner deals next.
    game.current_hand.as_mut().unwrap().partner_seat = Some(4);
    assert_eq!(game.next_dealer(), 4);

    // A NoFriend declarer deals next.
    game.current_hand.as_mut().unwrap().contract.as_mut().unwrap().no_friend = true;
    assert_eq!(game.next_dealer(), 2);
}

#[test]
fn roles_follow_the_contract() {
    let mut game = started_game();
    let mut rng = StdRng::seed_from_u64(5);
    game.start_hand(&mut rng).unwrap();
    settle_contract(&mut game, 2);

    assert_eq!(game.player_role(2), PlayerRole::Declarer);
    assert_eq!(game.player_role(0), PlayerRole::Undecided);

    game.current_hand.as_mut().unwrap().partner_seat = Some(4);
    game.current_hand.as_mut().unwrap().partner_revealed = true;
    assert_eq!(game.player_role(4), PlayerRole::Partner);

    game.current_hand.as_mut().unwrap().contract.as_mut().unwrap().no_friend = true;
    assert_eq!(game.player_role(0), PlayerRole::Opponent);

    assert_eq!(game.update_role(2).unwrap(), PlayerRole::Declarer);
    assert_eq!(
        game.player_by_seat(2).unwrap().role,
        PlayerRole::Declarer
    );
}

#[test]
fn weak_hand_redeal_eligibility() {
    let mut game = started_game();
    let mut rng = StdRng::seed_from_u64(5);
    game.start_hand(&mut rng).unwrap();

    let hand = game.current_hand.as_mut().unwrap();
    hand.player_hands[3] = super::cards_parsing::try_parse_cards([
        "JOKER", "H10", "C2", "D3", "S2", "S4", "D5", "C6", "H7", "H8",
    ])
    .unwrap();
    assert!(hand.can_redeal_weak_hand(3));

    hand.player_hands[3][0] = "SA".parse().unwrap();
    assert!(!hand.can_redeal_weak_hand(3));

    game.redeal(RedealReason::WeakHand, &mut rng).unwrap();
}

#[test]
fn connection_lifecycle_updates_ping() {
    let mut game = full_game();
    let later = FixedClock(datetime!(2025-06-01 12:05 UTC));
    game.mark_connected(3, false, &later).unwrap();
    let player = game.player_by_seat(3).unwrap();
    assert!(!player.connected);
    assert_eq!(player.last_ping, later.0);

    game.touch(3, &clock()).unwrap();
    assert_eq!(game.player_by_seat(3).unwrap().last_ping, clock().0);
    assert_eq!(
        game.touch(9, &clock()).unwrap_err(),
        GameError::InvalidSeat
    );
}

#[test]
fn magic_card_identities_track_the_contract() {
    let mut game = started_game();
    assert_eq!(game.mighty(), "SA".parse().unwrap());
    assert_eq!(game.ripper(), "C3".parse().unwrap());
    assert_eq!(game.joker(), super::cards_types::Card::joker());

    let mut rng = StdRng::seed_from_u64(5);
    game.start_hand(&mut rng).unwrap();
    settle_contract(&mut game, 2);
    game.current_hand.as_mut().unwrap().contract.as_mut().unwrap().trump = Trump::Spades;
    assert_eq!(game.mighty(), "DA".parse().unwrap());

    game.current_hand.as_mut().unwrap().contract.as_mut().unwrap().trump = Trump::Clubs;
    assert_eq!(game.ripper(), "S3".parse().unwrap());
}

#[test]
fn complete_stamps_and_closes() {
    let mut game = started_game();
    let done = FixedClock(datetime!(2025-06-02 09:00 UTC));
    game.complete(&done);
    assert!(game.is_complete());
    assert_eq!(game.status, Phase::GameComplete);
    assert_eq!(game.completed_at, Some(done.0));

    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(game.start_hand(&mut rng).unwrap_err(), GameError::InvalidPhase);
}
