use crate::card::Suit;
use crate::difficulty::Difficulty;
use crate::tableau::PILE_COUNT;

/// All commands a player can issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Turn over cards from the stock (recycling the waste when it runs out).
    Draw,
    /// Move the top card (or a run starting at `stack_start`) from one tableau
    /// pile to another.
    /// `stack_start`: index from the **top** of the pile (0 = top card).
    TableauToTableau {
        src: usize,
        stack_start: usize,
        dst: usize,
    },
    /// Move the top waste card to a tableau pile.
    WasteToTableau { dst: usize },
    /// Move the top waste card to its foundation.
    WasteToFoundation,
    /// Move the top card of a tableau pile to its foundation.
    TableauToFoundation { src: usize },
    /// Take the top card of a foundation back onto a tableau pile.
    FoundationToTableau { suit: Suit, dst: usize },
    /// Undo the last move or draw.
    Undo,
    /// Save the game.
    Save,
    /// Load the saved game.
    Load,
    /// Quit the game.
    Quit,
    /// Give up and deal a new game, optionally at another difficulty.
    NewGame { difficulty: Option<Difficulty> },
    /// Print help.
    Help,
}

/// Parse a single line of text input into a `Command`.
///
/// Syntax reference (case-insensitive):
/// ```text
/// d | draw                          -- Draw from the stock
/// tt <src> <dst>                    -- Move top card pile→pile
/// tt <src>:<depth> <dst>            -- Move run pile→pile (0=top)
/// wt <dst>                          -- Move waste top → pile
/// wf                                -- Move waste top → foundation
/// tf <src>                          -- Move pile top → foundation
/// ft h|d|c|s <dst>                  -- Move foundation top → pile
/// undo                              -- Undo last move
/// new [easy|hard]                   -- New game
/// save | load                       -- Save / restore the game
/// quit | q                          -- Quit
/// help | h | ?                      -- Help
/// ```
pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }

    let tokens: Vec<&str> = input.split_whitespace().collect();
    let cmd = tokens[0].to_lowercase();

    match cmd.as_str() {
        "d" | "draw" => Ok(Command::Draw),
        "tt" => {
            if tokens.len() < 3 {
                return Err("Usage: tt <src[:<depth>]> <dst>".to_string());
            }
            let dst = parse_pile_idx(tokens[2])?;
            // Optional run depth: "3:2" means pile 3, starting 2 from the top.
            if let Some((pile_part, depth_part)) = tokens[1].split_once(':') {
                let src = parse_pile_idx(pile_part)?;
                let stack_start: usize = depth_part
                    .parse()
                    .map_err(|_| "Invalid depth".to_string())?;
                Ok(Command::TableauToTableau { src, stack_start, dst })
            } else {
                let src = parse_pile_idx(tokens[1])?;
                Ok(Command::TableauToTableau { src, stack_start: 0, dst })
            }
        }
        "wt" => {
            if tokens.len() < 2 {
                return Err("Usage: wt <dst>".to_string());
            }
            Ok(Command::WasteToTableau { dst: parse_pile_idx(tokens[1])? })
        }
        "wf" => Ok(Command::WasteToFoundation),
        "tf" => {
            if tokens.len() < 2 {
                return Err("Usage: tf <src>".to_string());
            }
            Ok(Command::TableauToFoundation { src: parse_pile_idx(tokens[1])? })
        }
        "ft" => {
            if tokens.len() < 3 {
                return Err("Usage: ft h|d|c|s <dst>".to_string());
            }
            Ok(Command::FoundationToTableau {
                suit: parse_suit(tokens[1])?,
                dst: parse_pile_idx(tokens[2])?,
            })
        }
        "undo" | "u" => Ok(Command::Undo),
        "save" => Ok(Command::Save),
        "load" => Ok(Command::Load),
        "new" | "n" => {
            let difficulty = match tokens.get(1) {
                None => None,
                Some(s) => Some(
                    Difficulty::parse(s)
                        .ok_or_else(|| format!("'{}' is not a difficulty. Use easy or hard.", s))?,
                ),
            };
            Ok(Command::NewGame { difficulty })
        }
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "help" | "h" | "?" => Ok(Command::Help),
        _ => Err(format!("Unknown command '{}'. Type 'help' for help.", tokens[0])),
    }
}

fn parse_pile_idx(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid pile index", s))?;
    if n >= PILE_COUNT {
        return Err(format!(
            "Pile index {} out of range (0–{})",
            n,
            PILE_COUNT - 1
        ));
    }
    Ok(n)
}

fn parse_suit(s: &str) -> Result<Suit, String> {
    match s.to_lowercase().as_str() {
        "h" | "hearts" => Ok(Suit::Hearts),
        "d" | "diamonds" => Ok(Suit::Diamonds),
        "c" | "clubs" => Ok(Suit::Clubs),
        "s" | "spades" => Ok(Suit::Spades),
        _ => Err(format!("'{}' is not a valid suit. Use h, d, c or s.", s)),
    }
}
