use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;

use crate::board::Board;
use crate::command::{Command, parse_command};
use crate::difficulty::Difficulty;
use crate::game::Game;
use crate::history::{DEFAULT_UNDO_DEPTH, SaveError, SavedGame, UndoHistory};
use crate::renderer::Renderer;
use crate::transfer::Transfer;

/// The interactive game loop. `renderer` is injected so the loop stays
/// renderer-agnostic; `rng` is the one random source for every deal.
pub struct Session<R: Renderer> {
    game: Game<UndoHistory>,
    seed: Option<u64>,
    rng: SmallRng,
    renderer: R,
}

impl<R: Renderer> Session<R> {
    /// Deal the first game from `rng`. `seed` is only recorded in save files.
    pub fn new(mut rng: SmallRng, seed: Option<u64>, difficulty: Difficulty, renderer: R) -> Self {
        let board = Board::deal(&mut rng, difficulty);
        Session {
            game: Game::new(board, difficulty, UndoHistory::default()),
            seed,
            rng,
            renderer,
        }
    }

    pub fn game(&self) -> &Game<UndoHistory> {
        &self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run on standard input until the player quits.
    pub fn run(&mut self) {
        let stdin = io::stdin();
        self.run_from(stdin.lock());
    }

    /// Run the loop over any line source until EOF or `quit`.
    pub fn run_from<B: BufRead>(&mut self, mut input: B) {
        let mut stdout = io::stdout();
        self.render();

        loop {
            print!("> ");
            let _ = stdout.flush();

            let mut line = String::new();
            match input.read_line(&mut line) {
                // EOF
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    self.renderer.error(&format!("Could not read input: {}", e));
                    break;
                }
            }

            match parse_command(&line) {
                Err(e) => self.renderer.error(&e),
                Ok(cmd) => {
                    if self.handle(cmd) {
                        break;
                    }
                    if self.game.has_won() {
                        self.renderer.win();
                    }
                    self.render();
                }
            }
        }
    }

    /// Dispatch a command. Returns `true` if the session should end.
    pub fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Quit => {
                self.renderer.info("Thanks for playing. Goodbye!");
                return true;
            }
            Command::Help => {
                self.renderer.help();
            }
            Command::NewGame { difficulty } => {
                let difficulty = difficulty.unwrap_or(self.game.difficulty());
                let board = Board::deal(&mut self.rng, difficulty);
                self.game = Game::new(board, difficulty, UndoHistory::default());
                self.seed = None;
                self.renderer
                    .info(&format!("A new {} game has been dealt.", difficulty.name()));
            }
            Command::Undo => match self.game.listener_mut().pop() {
                Some(prev) => {
                    self.game.restore(prev);
                    self.renderer.info("Undo successful.");
                }
                None => self.renderer.error("Nothing to undo."),
            },
            Command::Save => match self.saved_game().save() {
                Ok(()) => self.renderer.info("Game saved."),
                Err(e) => self.renderer.error(&e.to_string()),
            },
            Command::Load => match SavedGame::load().and_then(|saved| self.resume(saved)) {
                Ok(()) => self.renderer.info("Game loaded."),
                Err(e) => self.renderer.error(&format!("Could not load the game: {}", e)),
            },
            Command::Draw => {
                if self.game.draw() == 0 {
                    self.renderer.error("The stock is empty.");
                }
            }
            Command::TableauToTableau { src, stack_start, dst } => {
                let pile_len = self.game.board().tableau.pile_len(src);
                if pile_len == 0 {
                    self.renderer.error("Source pile is empty.");
                    return false;
                }
                if stack_start >= pile_len {
                    self.renderer.error("Depth is deeper than the pile.");
                    return false;
                }
                // stack_start is depth from the top; the engine counts from the bottom.
                let depth = pile_len - 1 - stack_start;
                self.apply(Transfer::tableau(src, depth), Transfer::tableau_target(dst));
            }
            Command::WasteToTableau { dst } => {
                self.apply(Transfer::stock(), Transfer::tableau_target(dst));
            }
            Command::WasteToFoundation => match self.game.board().stock.top_waste() {
                Some(card) => {
                    self.apply(Transfer::stock(), Transfer::foundation(card.suit));
                }
                None => self.renderer.error("The waste is empty."),
            },
            Command::TableauToFoundation { src } => {
                match self.game.board().tableau.top_card(src) {
                    Some(card) => {
                        let depth = self.game.board().tableau.pile_len(src) - 1;
                        self.apply(Transfer::tableau(src, depth), Transfer::foundation(card.suit));
                    }
                    None => self.renderer.error("Source pile is empty."),
                }
            }
            Command::FoundationToTableau { suit, dst } => {
                self.apply(Transfer::foundation(suit), Transfer::tableau_target(dst));
            }
        }
        false
    }

    /// Replace the current game with a loaded one. A save whose boards do
    /// not hold a complete deck is refused and the current game kept.
    pub fn resume(&mut self, saved: SavedGame) -> Result<(), SaveError> {
        saved.validate()?;
        let history = UndoHistory::from_snapshots(saved.undo, DEFAULT_UNDO_DEPTH);
        self.game = Game::new(saved.board, saved.difficulty, history);
        self.seed = saved.seed;
        Ok(())
    }

    pub fn saved_game(&self) -> SavedGame {
        SavedGame {
            seed: self.seed,
            difficulty: self.game.difficulty(),
            board: self.game.board().clone(),
            undo: self.game.listener().snapshots().to_vec(),
        }
    }

    fn apply(&mut self, source: Transfer, target: Transfer) {
        if !self.game.transfer(source, target) {
            self.renderer.error("Illegal move.");
        }
    }

    fn render(&mut self) {
        self.renderer.render(self.game.board(), self.game.difficulty());
    }
}
