use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::card::{Card, full_deck};
use crate::difficulty::Difficulty;
use crate::foundations::Foundations;
use crate::stock::Stock;
use crate::tableau::{PILE_COUNT, Tableau};

/// Total number of cards in play.
pub const DECK_SIZE: usize = 52;

/// The three card containers, the single owner of all 52 cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub tableau: Tableau,
    pub stock: Stock,
    pub foundations: Foundations,
}

impl Board {
    // -------------------------------------------------------------------------
    // Construction / Dealing
    // -------------------------------------------------------------------------

    /// Deal a fresh shuffled board using OS entropy.
    pub fn deal_random(difficulty: Difficulty) -> Self {
        let mut rng = rand::rngs::SmallRng::from_os_rng();
        Self::deal(&mut rng, difficulty)
    }

    /// Deal a board from a specific seed (useful for reproducible games).
    pub fn deal_seeded(seed: u64, difficulty: Difficulty) -> Self {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
        Self::deal(&mut rng, difficulty)
    }

    /// Shuffle a full deck with `rng` and deal it.
    pub fn deal<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Self {
        let mut deck = full_deck();
        deck.shuffle(rng);
        Self::deal_from_deck(deck, difficulty)
    }

    /// Deal a board from an already-ordered deck (for testing).
    ///
    /// Cards are taken from the end of the deck. Pile `i` receives `i + 1`
    /// cards with only the last one face-up; the rest become the stock,
    /// which then makes its opening draw.
    pub fn deal_from_deck(mut deck: Vec<Card>, difficulty: Difficulty) -> Self {
        assert_eq!(deck.len(), DECK_SIZE, "Need exactly 52 cards to deal");

        let mut tableau = Tableau::new();
        for pile in 0..PILE_COUNT {
            for row in 0..=pile {
                let card = deck.pop().expect("52 cards cover the 28-card deal");
                let hidden = row != pile;
                tableau.deal_card(Card { hidden, ..card }, pile);
            }
        }

        let mut stock = Stock::new(deck);
        stock.draw_cards(difficulty);

        Board {
            tableau,
            stock,
            foundations: Foundations::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Accounting
    // -------------------------------------------------------------------------

    /// Every card on the board, container by container.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        let tableau = self.tableau.piles().iter().flat_map(|p| p.iter().copied());
        let foundations = self
            .foundations
            .all()
            .iter()
            .flat_map(|f| f.pile().iter().copied());
        let stock = self
            .stock
            .draw_pile()
            .iter()
            .chain(self.stock.waste())
            .copied();
        tableau.chain(foundations).chain(stock)
    }

    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    /// True if the board holds each of the 52 cards exactly once.
    pub fn holds_full_deck(&self) -> bool {
        let mut seen = [false; DECK_SIZE];
        for card in self.cards() {
            let slot = &mut seen[card.suit.index() * 13 + card.rank.value() as usize];
            if *slot {
                return false;
            }
            *slot = true;
        }
        seen.iter().all(|&s| s)
    }
}
