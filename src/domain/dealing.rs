//! Deck construction, shuffling, and the 1-2-3-4 deal.

use rand::seq::SliceRandom;
use rand::Rng;

use super::cards_types::{Card, Rank, Suit};
use super::rules::{CARDS_PER_PLAYER, DECK_SIZE, KITTY_SIZE};
use crate::errors::domain::GameError;

const SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
const RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Standard 52-card deck plus one Joker, in construction order.
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in SUITS {
            for rank in RANKS {
                cards.push(Card::new(suit, rank));
            }
        }
        cards.push(Card::joker());
        Self { cards }
    }

    /// Uniform permutation via the injected RNG. Preserves the multiset.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Deal ten cards to each seat in the 1-2-3-4 pattern: round `k` gives
    /// `k` cards to each seat in order. The three cards left over form the
    /// kitty in deck order. Deterministic given the deck order.
    pub fn deal(&self, num_players: usize) -> Result<(Vec<Vec<Card>>, Vec<Card>), GameError> {
        if self.cards.len() < num_players * CARDS_PER_PLAYER + KITTY_SIZE {
            return Err(GameError::InsufficientCards);
        }

        let mut hands: Vec<Vec<Card>> = (0..num_players)
            .map(|_| Vec::with_capacity(CARDS_PER_PLAYER))
            .collect();

        let mut next = 0usize;
        for count in 1..=4usize {
            for hand in hands.iter_mut() {
                hand.extend_from_slice(&self.cards[next..next + count]);
                next += count;
            }
        }

        let kitty = self.cards[next..next + KITTY_SIZE].to_vec();
        Ok((hands, kitty))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
