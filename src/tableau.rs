use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank};
use crate::pile::{self, Pile};

/// Number of tableau piles.
pub const PILE_COUNT: usize = 7;

/// The seven playing columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tableau {
    piles: [Pile; PILE_COUNT],
}

impl Tableau {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The pile at `idx`, or `None` if the index is out of range or the pile is empty.
    pub fn pile(&self, idx: usize) -> Option<&Pile> {
        self.piles.get(idx).filter(|p| !p.is_empty())
    }

    pub fn piles(&self) -> &[Pile; PILE_COUNT] {
        &self.piles
    }

    pub fn top_card(&self, idx: usize) -> Option<Card> {
        self.piles.get(idx).and_then(Pile::top)
    }

    pub fn pile_len(&self, idx: usize) -> usize {
        self.piles.get(idx).map_or(0, Pile::len)
    }

    pub fn is_pile_empty(&self, idx: usize) -> bool {
        self.piles.get(idx).is_some_and(Pile::is_empty)
    }

    // -------------------------------------------------------------------------
    // Placement rules
    // -------------------------------------------------------------------------

    /// Can `card` be laid on pile `idx`? An empty pile takes only a King;
    /// otherwise the card must be one rank lower and the opposite color.
    pub fn can_place(&self, card: Card, idx: usize) -> bool {
        match self.piles.get(idx) {
            None => false,
            Some(pile) => match pile.top() {
                None => card.rank == Rank::King,
                Some(top) => card.can_stack_on(top),
            },
        }
    }

    /// Can the run starting at `depth` in pile `idx` be picked up as a unit?
    /// Its bottom card must be face-up. A single card then always can; a
    /// longer run only if it is an unbroken alternating descending sequence.
    pub fn can_move_run(&self, idx: usize, depth: usize) -> bool {
        match self.piles.get(idx).and_then(|p| p.at(depth)) {
            None => false,
            Some(run) if run[0].hidden => false,
            Some(run) => run.len() == 1 || pile::is_descending_run(run),
        }
    }

    /// Can this (detached or borrowed) run be laid on pile `idx`?
    pub fn can_place_run(&self, run: &[Card], idx: usize) -> bool {
        match run.first() {
            None => false,
            Some(&bottom) => pile::is_descending_run(run) && self.can_place(bottom, idx),
        }
    }

    // -------------------------------------------------------------------------
    // Moves
    // -------------------------------------------------------------------------

    /// Move the run at `depth` from pile `from` onto pile `to`.
    /// Returns false and leaves the tableau untouched if the move is illegal.
    pub fn move_pile(&mut self, from: usize, to: usize, depth: usize) -> bool {
        if from == to || from >= PILE_COUNT || to >= PILE_COUNT {
            return false;
        }
        if !self.can_move_run(from, depth) {
            return false;
        }
        let bottom = self.piles[from].cards()[depth];
        if !self.can_place(bottom, to) {
            return false;
        }

        let Some(run) = self.detach_run(from, depth) else {
            return false;
        };
        self.piles[to].attach(run);
        true
    }

    /// Place a single card, obeying `can_place`.
    pub fn place_card(&mut self, card: Card, idx: usize) -> bool {
        if !self.can_place(card, idx) {
            return false;
        }
        self.piles[idx].append(card);
        true
    }

    /// Detach the top card and reveal whatever is left on top.
    pub fn remove_top_card(&mut self, idx: usize) -> Option<Card> {
        let card = self.piles.get_mut(idx)?.pop()?;
        self.reveal_top(idx);
        Some(card)
    }

    /// Turn the top card of pile `idx` face-up if it is hidden.
    pub fn reveal_top(&mut self, idx: usize) -> bool {
        self.piles.get_mut(idx).is_some_and(Pile::reveal_top)
    }

    // -------------------------------------------------------------------------
    // Crate-internal helpers used by dealing and the transfer protocol
    // -------------------------------------------------------------------------

    /// Split the run at `depth` off pile `idx`, revealing the new top.
    pub(crate) fn detach_run(&mut self, idx: usize, depth: usize) -> Option<Pile> {
        let run = self.piles.get_mut(idx)?.split_at(depth)?;
        self.reveal_top(idx);
        Some(run)
    }

    /// Attach an already-validated run to pile `idx`.
    pub(crate) fn attach_run(&mut self, run: Pile, idx: usize) {
        self.piles[idx].attach(run);
    }

    /// Push a card during the deal, bypassing placement rules.
    pub(crate) fn deal_card(&mut self, card: Card, idx: usize) {
        self.piles[idx].append(card);
    }
}
