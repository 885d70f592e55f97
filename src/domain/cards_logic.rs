//! Card identities and comparison: point values, the trump-dependent
//! Mighty/Ripper identities, and the pairwise `card_beats` used by trick
//! resolution.

use super::cards_types::{Card, Rank, Suit, Trump};

impl Card {
    /// A, K, Q, J and 10 are worth one point; everything else is zero.
    /// The full deck carries exactly 20 points.
    pub fn point_value(self) -> u8 {
        match self.rank {
            Rank::Ace | Rank::King | Rank::Queen | Rank::Jack | Rank::Ten => 1,
            _ => 0,
        }
    }

    /// Numeric rank for comparisons among ordinary cards (2..=14, Joker 15).
    pub fn rank_value(self) -> u8 {
        match self.rank {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
            Rank::Joker => 15,
        }
    }

    /// The Mighty: SA, or DA when spades are trump.
    pub fn is_mighty(self, trump: Trump) -> bool {
        self == mighty_card(trump)
    }

    pub fn is_joker(self) -> bool {
        self.rank == Rank::Joker
    }

    /// The Ripper (Joker hunter): C3, or S3 when clubs are trump.
    pub fn is_ripper(self, trump: Trump) -> bool {
        self == ripper_card(trump)
    }

    /// Magic cards are the Mighty and the Joker.
    pub fn is_magic_card(self, trump: Trump) -> bool {
        self.is_mighty(trump) || self.is_joker()
    }
}

/// The Mighty for a given trump. Always exists, always unique.
pub fn mighty_card(trump: Trump) -> Card {
    if trump == Trump::Spades {
        Card::new(Suit::Diamonds, Rank::Ace)
    } else {
        Card::new(Suit::Spades, Rank::Ace)
    }
}

/// The Ripper for a given trump.
pub fn ripper_card(trump: Trump) -> Card {
    if trump == Trump::Clubs {
        Card::new(Suit::Spades, Rank::Three)
    } else {
        Card::new(Suit::Clubs, Rank::Three)
    }
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Whether `a` beats `b` in a trick with the given lead suit and trump.
///
/// `joker_ripped` says the Ripper is present in this trick: the Joker then
/// loses its over-trump privilege and falls through to the plain suit/rank
/// rules (its NoSuit never follows an ordinary lead).
///
/// Precedence, highest first: Mighty; Joker (unless ripped); trump by rank;
/// lead suit by rank; otherwise the earlier play stands.
pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Trump, joker_ripped: bool) -> bool {
    if a.is_mighty(trump) {
        return true;
    }
    if b.is_mighty(trump) {
        return false;
    }

    if a.is_joker() && !joker_ripped {
        return true;
    }
    if b.is_joker() && !joker_ripped {
        return false;
    }

    let trump_suit = trump.suit();
    let a_trump = trump_suit == Some(a.suit);
    let b_trump = trump_suit == Some(b.suit);
    if a_trump && b_trump {
        return a.rank_value() > b.rank_value();
    }
    if a_trump {
        return true;
    }
    if b_trump {
        return false;
    }

    let a_follows = a.suit == lead;
    let b_follows = b.suit == lead;
    if a_follows && b_follows {
        return a.rank_value() > b.rank_value();
    }
    if a_follows {
        return true;
    }
    // b follows the lead, or neither does: the earlier play stands.
    false
}
