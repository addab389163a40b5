use crossterm::style::Stylize;

use crate::board::Board;
use crate::card::{Card, Color, Suit};
use crate::difficulty::Difficulty;
use crate::tableau::PILE_COUNT;

/// Trait that abstracts the rendering layer.
///
/// The session only talks to this trait, so the engine and the loop stay
/// independent of how the board reaches the screen.
pub trait Renderer {
    /// Render the full game board.
    fn render(&mut self, board: &Board, difficulty: Difficulty);
    /// Display an informational message.
    fn info(&mut self, msg: &str);
    /// Display an error message.
    fn error(&mut self, msg: &str);
    /// Display the help text.
    fn help(&mut self);
    /// Display the win screen.
    fn win(&mut self);
}

// ---------------------------------------------------------------------------
// CLI Renderer
// ---------------------------------------------------------------------------

/// A colored terminal renderer.
#[derive(Debug, Default)]
pub struct CliRenderer;

impl CliRenderer {
    pub fn new() -> Self {
        CliRenderer
    }

    /// Plain label for a card slot; face-down cards are `##`.
    pub fn card_text(card: Card) -> String {
        if card.hidden {
            "##".to_string()
        } else {
            card.label()
        }
    }

    fn card_str(&self, card: Card) -> String {
        let text = format!("{:>3}", Self::card_text(card));
        if card.hidden {
            return text.dark_grey().to_string();
        }
        match card.color() {
            Color::Red => text.red().to_string(),
            Color::Black => text.white().to_string(),
        }
    }
}

impl Renderer for CliRenderer {
    fn render(&mut self, board: &Board, difficulty: Difficulty) {
        println!();

        // ---- Top row: stock | waste | foundations ----
        let stock = if board.stock.remaining() > 0 {
            format!("[{:>2}]", board.stock.remaining())
        } else {
            "[  ]".to_string()
        };
        print!("  STOCK: {}  WASTE: ", stock);
        let waste = board.stock.visible_waste(difficulty);
        if waste.is_empty() {
            print!("[---]");
        }
        for card in waste {
            print!("[{}]", self.card_str(*card));
        }

        print!("    FOUND: ");
        for &suit in &Suit::ALL {
            match board.foundations.top_card(suit) {
                None => print!("{}[---] ", suit.symbol()),
                Some(card) => print!("{}[{}] ", suit.symbol(), self.card_str(card)),
            }
        }
        println!();

        // ---- Pile indices header ----
        println!();
        print!("  PILE:  ");
        for i in 0..PILE_COUNT {
            print!("  {:^4}", i);
        }
        println!();

        // ---- Tableau ----
        let max_len = (0..PILE_COUNT)
            .map(|i| board.tableau.pile_len(i))
            .max()
            .unwrap_or(0);

        for row in 0..max_len {
            print!("  {:>3}:   ", row);
            for pile in board.tableau.piles() {
                match pile.cards().get(row) {
                    Some(card) => print!(" {} ", self.card_str(*card)),
                    None => print!("  ..  "),
                }
            }
            println!();
        }

        if max_len == 0 {
            println!("  (all piles empty)");
        }

        println!();
    }

    fn info(&mut self, msg: &str) {
        println!("{} {}", "[INFO]".cyan(), msg);
    }

    fn error(&mut self, msg: &str) {
        println!("{} {}", "[ERR ]".red(), msg);
    }

    fn help(&mut self) {
        println!(
            r#"
╔══════════════════════════════════════════════════════════════╗
║          Klondike Solitaire – CLI Help                       ║
╠══════════════════════════════════════════════════════════════╣
║  GOAL: Build all four suits on the foundations, Ace to King. ║
║                                                              ║
║  RULES:                                                      ║
║    · Piles build down in alternating colors: 9♠ on 10♥       ║
║    · Only a King may fill an empty pile                      ║
║    · Foundations build up by suit: A♥ → 2♥ → ... → K♥       ║
║    · Draw turns over 1 card (easy) or 3 cards (hard);        ║
║      only the last card of the waste can be played           ║
╠══════════════════════════════════════════════════════════════╣
║  COMMANDS (case-insensitive):                                ║
║                                                              ║
║  d | draw                Draw from the stock                 ║
║  tt <src> <dst>          Move top card: pile → pile          ║
║  tt <src>:<N> <dst>      Move run of N+1 cards from top      ║
║                          (0=top card only, 1=top 2, etc.)    ║
║  wt <pile>               Move waste card → pile              ║
║  wf                      Move waste card → foundation        ║
║  tf <pile>               Move top card: pile → foundation    ║
║  ft h|d|c|s <pile>       Move foundation card → pile         ║
║  undo                    Undo last move                      ║
║  new [easy|hard]         Start a new game                    ║
║  save | load             Save / restore the game             ║
║  quit                    Exit                                ║
║  help | h | ?            Show this help                      ║
╠══════════════════════════════════════════════════════════════╣
║  Example: tt 4:2 6  →  move top 3 cards of pile 4 to pile 6  ║
╚══════════════════════════════════════════════════════════════╝
"#
        );
    }

    fn win(&mut self) {
        println!(
            "\n{}\n\n  Congratulations! You solved it!  Type 'new' for another game.\n",
            r#"
  ██╗    ██╗ ██████╗ ███╗   ██╗██╗
  ██║    ██║██╔═══██╗████╗  ██║██║
  ██║ █╗ ██║██║   ██║██╔██╗ ██║██║
  ██║███╗██║██║   ██║██║╚██╗██║╚═╝
  ╚███╔███╔╝╚██████╔╝██║ ╚████║██╗
   ╚══╝╚══╝  ╚═════╝ ╚═╝  ╚═══╝╚═╝"#
                .yellow()
        );
    }
}
