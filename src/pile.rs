use serde::{Deserialize, Serialize};

use crate::card::Card;

/// An ordered stack of cards. Index 0 is the buried bottom card, the last
/// element is the exposed top card.
///
/// A *run* is any suffix of a pile, addressed by its depth from the bottom
/// (depth 0 is the whole pile). Detached runs are themselves `Pile`s, so a
/// run moves between containers by value and is never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    pub fn new() -> Self {
        Pile { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Pile { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The run starting at `depth`, or `None` when there is no card there.
    pub fn at(&self, depth: usize) -> Option<&[Card]> {
        if depth < self.cards.len() {
            Some(&self.cards[depth..])
        } else {
            None
        }
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn append(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Detach the run starting at `depth`, leaving the prefix behind.
    /// Returns `None` (and leaves the pile untouched) when `depth` is out of range.
    pub fn split_at(&mut self, depth: usize) -> Option<Pile> {
        if depth >= self.cards.len() {
            return None;
        }
        Some(Pile {
            cards: self.cards.split_off(depth),
        })
    }

    /// Remove and return the top card.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Concatenate a detached run onto the top of this pile.
    pub fn attach(&mut self, mut run: Pile) {
        self.cards.append(&mut run.cards);
    }

    /// True if any card in the pile is face-down.
    pub fn is_hidden(&self) -> bool {
        self.cards.iter().any(|c| c.hidden)
    }

    /// True iff every adjacent pair alternates color and descends by one rank.
    pub fn is_descending_run(&self) -> bool {
        is_descending_run(&self.cards)
    }

    /// Turn the top card face-up. Returns true if it was hidden.
    pub fn reveal_top(&mut self) -> bool {
        match self.cards.last_mut() {
            Some(card) if card.hidden => {
                card.hidden = false;
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }
}

/// Slice form of [`Pile::is_descending_run`], usable on borrowed sub-runs.
pub fn is_descending_run(cards: &[Card]) -> bool {
    cards.windows(2).all(|pair| pair[1].can_stack_on(pair[0]))
}

impl From<Card> for Pile {
    fn from(card: Card) -> Self {
        Pile { cards: vec![card] }
    }
}

impl<'a> IntoIterator for &'a Pile {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
