use serde::{Deserialize, Serialize};

/// Draw-one or draw-three Klondike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Hard,
}

impl Difficulty {
    /// Number of cards moved from draw to waste per draw action.
    pub fn draw_amount(self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Hard => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Difficulty> {
        match s.to_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}
