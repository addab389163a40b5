use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank, Suit};
use crate::pile::Pile;

/// Number of foundation slots (one per suit).
pub const FOUNDATION_COUNT: usize = 4;

/// A single suit's completion stack, built Ace to King.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foundation {
    suit: Suit,
    pile: Pile,
}

impl Foundation {
    pub fn new(suit: Suit) -> Self {
        Foundation {
            suit,
            pile: Pile::new(),
        }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn pile(&self) -> &Pile {
        &self.pile
    }

    pub fn top(&self) -> Option<Card> {
        self.pile.top()
    }

    pub fn len(&self) -> usize {
        self.pile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pile.is_empty()
    }

    pub fn can_place(&self, card: Card) -> bool {
        if card.suit != self.suit {
            return false;
        }
        match self.pile.top() {
            None => card.rank == Rank::Ace,
            Some(top) => card.follows_on_foundation(top),
        }
    }

    /// All thirteen ranks, King on top.
    pub fn is_finished(&self) -> bool {
        self.pile.len() == Rank::ALL.len() && self.pile.top().is_some_and(|c| c.rank == Rank::King)
    }
}

/// The four suit-keyed foundations, indexed in `Suit::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foundations {
    slots: [Foundation; FOUNDATION_COUNT],
}

impl Default for Foundations {
    fn default() -> Self {
        Foundations {
            slots: Suit::ALL.map(Foundation::new),
        }
    }
}

impl Foundations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, suit: Suit) -> &Foundation {
        &self.slots[suit.index()]
    }

    pub fn all(&self) -> &[Foundation; FOUNDATION_COUNT] {
        &self.slots
    }

    pub fn top_card(&self, suit: Suit) -> Option<Card> {
        self.get(suit).top()
    }

    /// Routes the card to its own suit's foundation.
    pub fn can_place(&self, card: Card) -> bool {
        self.get(card.suit).can_place(card)
    }

    pub fn place_card(&mut self, card: Card) -> bool {
        if !self.can_place(card) {
            return false;
        }
        // Foundation cards are always face-up.
        self.slots[card.suit.index()].pile.append(Card { hidden: false, ..card });
        true
    }

    pub fn remove_top_card(&mut self, suit: Suit) -> Option<Card> {
        self.slots[suit.index()].pile.pop()
    }

    pub fn is_finished(&self) -> bool {
        self.slots.iter().all(Foundation::is_finished)
    }

    /// Total number of cards across all four foundations.
    pub fn card_count(&self) -> usize {
        self.slots.iter().map(Foundation::len).sum()
    }
}
