use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::difficulty::Difficulty;

/// The face-down draw reserve and its face-up waste.
///
/// `draw` is popped from the end. `waste` is ordered oldest first; its last
/// element is the most recently drawn card and the only one that can leave.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    draw: Vec<Card>,
    waste: Vec<Card>,
}

impl Stock {
    /// A stock holding `cards` face-down with an empty waste.
    pub fn new(cards: Vec<Card>) -> Self {
        let draw = cards
            .into_iter()
            .map(|c| Card { hidden: true, ..c })
            .collect();
        Stock {
            draw,
            waste: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn draw_pile(&self) -> &[Card] {
        &self.draw
    }

    pub fn waste(&self) -> &[Card] {
        &self.waste
    }

    /// Cards left in the draw reserve.
    pub fn remaining(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty() && self.waste.is_empty()
    }

    /// Fraction of a full deck still held by the stock (draw plus waste).
    pub fn card_fraction(&self) -> f32 {
        (self.draw.len() + self.waste.len()) as f32 / 52.0
    }

    /// The trailing window of the waste that is shown to the player.
    pub fn visible_waste(&self, difficulty: Difficulty) -> &[Card] {
        let start = self.waste.len().saturating_sub(difficulty.draw_amount());
        &self.waste[start..]
    }

    pub fn top_waste(&self) -> Option<Card> {
        self.waste.last().copied()
    }

    pub fn can_draw_from_waste(&self) -> bool {
        !self.waste.is_empty()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Move up to `draw_amount` cards from draw to waste, recycling the waste
    /// first when the draw reserve has run out. Returns the cards just drawn,
    /// in the order they were drawn.
    pub fn draw_cards(&mut self, difficulty: Difficulty) -> &[Card] {
        if self.draw.is_empty() {
            self.reset();
        }

        let start = self.waste.len();
        for _ in 0..difficulty.draw_amount() {
            let Some(card) = self.draw.pop() else {
                break;
            };
            self.waste.push(Card { hidden: false, ..card });
        }
        &self.waste[start..]
    }

    /// Turn the waste back over into the draw reserve.
    /// The next pass draws the cards in the same order as the last one.
    pub fn reset(&mut self) {
        self.draw.extend(
            self.waste
                .drain(..)
                .rev()
                .map(|c| Card { hidden: true, ..c }),
        );
    }

    /// Remove the most recently drawn card from the waste.
    pub fn draw_top_from_waste(&mut self) -> Option<Card> {
        self.waste.pop()
    }
}
