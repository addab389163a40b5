use crate::board::Board;
use crate::difficulty::Difficulty;
use crate::tableau::PILE_COUNT;
use crate::transfer::{Endpoint, Transfer};

/// The two points at which a successful move is announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveSignal {
    /// The board is about to change.
    PreMove,
    /// The board has changed.
    PostMove,
}

/// Observer notified around every successful move.
///
/// The board is handed over at both points so a listener can snapshot it
/// (undo history) or persist it without holding a reference to the game.
pub trait MoveListener {
    fn on_move(&mut self, signal: MoveSignal, board: &Board);
}

/// A listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl MoveListener for NoopListener {
    fn on_move(&mut self, _signal: MoveSignal, _board: &Board) {}
}

impl<F: FnMut(MoveSignal, &Board)> MoveListener for F {
    fn on_move(&mut self, signal: MoveSignal, board: &Board) {
        self(signal, board)
    }
}

/// Owns the board and applies moves to it. `listener` is injected so the
/// engine stays unaware of undo, persistence and rendering.
#[derive(Debug)]
pub struct Game<L: MoveListener = NoopListener> {
    board: Board,
    difficulty: Difficulty,
    listener: L,
}

impl<L: MoveListener> Game<L> {
    pub fn new(board: Board, difficulty: Difficulty, listener: L) -> Self {
        Game {
            board,
            difficulty,
            listener,
        }
    }

    /// Start a reproducible game from `seed`.
    pub fn deal_seeded(seed: u64, difficulty: Difficulty, listener: L) -> Self {
        Self::new(Board::deal_seeded(seed, difficulty), difficulty, listener)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Replace the board wholesale, e.g. with an undo snapshot or a loaded save.
    pub fn restore(&mut self, board: Board) {
        self.board = board;
    }

    // -------------------------------------------------------------------------
    // Moves
    // -------------------------------------------------------------------------

    /// Move a card or run from `source` to `target`.
    ///
    /// Returns false, with the board untouched and the listener not called,
    /// if either side declines. On success the listener sees `PreMove` just
    /// before the board changes and `PostMove` just after.
    pub fn transfer(&mut self, source: Transfer, target: Transfer) -> bool {
        let source = source.with_difficulty(self.difficulty);
        let target = target.with_difficulty(self.difficulty);

        if let Endpoint::Tableau { index, .. } = source.endpoint {
            if index >= PILE_COUNT || self.board.tableau.is_pile_empty(index) {
                return false;
            }
        }

        let Some(mut offer) = source.create_offer(&self.board, target.kind()) else {
            return false;
        };
        if !target.verify_offer(&self.board, &mut offer) {
            return false;
        }

        self.listener.on_move(MoveSignal::PreMove, &self.board);
        let completed = offer.complete(&mut self.board);
        debug_assert!(completed, "a verified offer must complete");
        self.listener.on_move(MoveSignal::PostMove, &self.board);
        completed
    }

    /// Dry run of [`Game::transfer`]: never mutates and never notifies.
    pub fn can_transfer(&self, source: Transfer, target: Transfer) -> bool {
        let source = source.with_difficulty(self.difficulty);
        let target = target.with_difficulty(self.difficulty);

        match source.create_offer(&self.board, target.kind()) {
            Some(mut offer) => target.verify_offer(&self.board, &mut offer),
            None => false,
        }
    }

    /// Draw from the stock at this game's difficulty. Returns the number of
    /// cards turned over; zero (and no notification) when the stock is empty.
    pub fn draw(&mut self) -> usize {
        if self.board.stock.is_empty() {
            return 0;
        }
        self.listener.on_move(MoveSignal::PreMove, &self.board);
        let drawn = self.board.stock.draw_cards(self.difficulty).len();
        self.listener.on_move(MoveSignal::PostMove, &self.board);
        drawn
    }

    // -------------------------------------------------------------------------
    // Win Condition
    // -------------------------------------------------------------------------

    /// The game is won when:
    /// - Every tableau pile is empty or one ordered descending run.
    /// - Every foundation holds its whole suit.
    /// - The stock and waste are empty.
    pub fn has_won(&self) -> bool {
        self.board
            .tableau
            .piles()
            .iter()
            .all(|pile| pile.is_empty() || pile.is_descending_run())
            && self.board.foundations.is_finished()
            && self.board.stock.is_empty()
    }
}

impl<L: MoveListener + Clone> Game<L> {
    /// Deep copy with an independent board. The listener is cloned too.
    pub fn copy(&self) -> Self {
        Game {
            board: self.board.clone(),
            difficulty: self.difficulty,
            listener: self.listener.clone(),
        }
    }
}
