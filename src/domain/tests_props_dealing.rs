//! Property-based tests for shuffling and dealing.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::cards_types::Card;
use super::dealing::Deck;

proptest! {
    /// Any shuffle is a permutation of the 53-card deck.
    #[test]
    fn shuffle_preserves_the_deck(seed in any::<u64>()) {
        let mut deck = Deck::new();
        let before: BTreeSet<Card> = deck.cards().iter().copied().collect();
        let mut rng = StdRng::seed_from_u64(seed);
        deck.shuffle(&mut rng);
        let after: BTreeSet<Card> = deck.cards().iter().copied().collect();
        prop_assert_eq!(deck.remaining(), 53);
        prop_assert_eq!(before, after);
    }

    /// A deal partitions the shuffled deck: five hands of ten plus a kitty
    /// of three, no card lost or duplicated.
    #[test]
    fn deal_partitions_the_deck(seed in any::<u64>()) {
        let mut deck = Deck::new();
        let mut rng = StdRng::seed_from_u64(seed);
        deck.shuffle(&mut rng);

        let (hands, kitty) = deck.deal(5).unwrap();
        prop_assert_eq!(hands.len(), 5);
        for hand in &hands {
            prop_assert_eq!(hand.len(), 10);
        }
        prop_assert_eq!(kitty.len(), 3);

        let mut dealt: Vec<Card> = hands.into_iter().flatten().collect();
        dealt.extend(kitty);
        let expected: BTreeSet<Card> = deck.cards().iter().copied().collect();
        let got: BTreeSet<Card> = dealt.iter().copied().collect();
        prop_assert_eq!(dealt.len(), 53);
        prop_assert_eq!(got, expected);
    }

    /// Equal seeds shuffle and deal identically.
    #[test]
    fn same_seed_same_deal(seed in any::<u64>()) {
        let deal = |seed: u64| {
            let mut deck = Deck::new();
            let mut rng = StdRng::seed_from_u64(seed);
            deck.shuffle(&mut rng);
            deck.deal(5).unwrap()
        };
        prop_assert_eq!(deal(seed), deal(seed));
    }

    /// The dealt point total is always the full twenty.
    #[test]
    fn dealt_points_total_twenty(seed in any::<u64>()) {
        let mut deck = Deck::new();
        let mut rng = StdRng::seed_from_u64(seed);
        deck.shuffle(&mut rng);
        let (hands, kitty) = deck.deal(5).unwrap();
        let hand_points: u8 = hands.iter().flatten().map(|c| c.point_value()).sum();
        let kitty_points: u8 = kitty.iter().map(|c| c.point_value()).sum();
        prop_assert_eq!(hand_points + kitty_points, 20);
    }
}
