use serde::{Deserialize, Serialize};

/// The four French suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

/// Red or black, derived from the suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Suit {
    /// All four suits, in canonical (foundation) order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    /// Position of this suit in `Suit::ALL`.
    pub fn index(self) -> usize {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }

    pub fn from_index(idx: usize) -> Option<Suit> {
        Suit::ALL.get(idx).copied()
    }

    /// Single-character symbol used in CLI rendering.
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
    }
}

/// Card ranks, Ace low. The discriminant is the 0..=12 ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
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
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A playing card. Suit and rank never change; only `hidden` is toggled
/// as the card is dealt face-down and later revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub hidden: bool,
}

impl Card {
    /// A face-up card.
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card {
            suit,
            rank,
            hidden: false,
        }
    }

    pub fn face_down(suit: Suit, rank: Rank) -> Self {
        Card {
            suit,
            rank,
            hidden: true,
        }
    }

    pub fn color(self) -> Color {
        self.suit.color()
    }

    /// True if this card may sit directly on `below` in a tableau run:
    /// one rank lower and the opposite color.
    pub fn can_stack_on(self, below: Card) -> bool {
        below.rank.value() == self.rank.value() + 1 && below.color() != self.color()
    }

    /// True if this card is the next one up from `below` on a foundation.
    pub fn follows_on_foundation(self, below: Card) -> bool {
        self.suit == below.suit && self.rank.value() == below.rank.value() + 1
    }

    /// Identity of the card ignoring its face-down state.
    pub fn same_card(self, other: Card) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }

    pub fn label(self) -> String {
        format!("{}{}", self.rank.short_name(), self.suit.symbol())
    }
}

pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);

    for &suit in &Suit::ALL {
        for &rank in &Rank::ALL {
            deck.push(Card::new(suit, rank));
        }
    }

    debug_assert_eq!(deck.len(), 52, "Deck must have exactly 52 cards");
    deck
}
