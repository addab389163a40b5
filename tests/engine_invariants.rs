use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use klondike_rs::board::{Board, DECK_SIZE};
use klondike_rs::card::{Card, Rank, Suit};
use klondike_rs::difficulty::Difficulty;
use klondike_rs::game::{Game, MoveSignal, NoopListener};
use klondike_rs::history::UndoHistory;
use klondike_rs::tableau::{PILE_COUNT, Tableau};
use klondike_rs::transfer::Transfer;

fn random_endpoint(rng: &mut SmallRng, board: &Board) -> Transfer {
    match rng.random_range(0..3) {
        0 => {
            let index = rng.random_range(0..PILE_COUNT);
            let len = board.tableau.pile_len(index).max(1);
            Transfer::tableau(index, rng.random_range(0..len))
        }
        1 => Transfer::stock(),
        _ => Transfer::foundation(Suit::ALL[rng.random_range(0..4)]),
    }
}

fn assert_every_card_once(board: &Board) {
    let distinct: HashSet<(Suit, Rank)> = board.cards().map(|c| (c.suit, c.rank)).collect();
    assert_eq!(board.card_count(), DECK_SIZE);
    assert_eq!(distinct.len(), DECK_SIZE);
}

fn assert_tops_revealed(board: &Board) {
    for pile in board.tableau.piles() {
        if let Some(top) = pile.top() {
            assert!(!top.hidden, "face-down card left on top of a pile");
        }
    }
}

#[test]
fn random_play_preserves_card_ownership() {
    let mut applied = 0;
    for seed in 0..20 {
        let difficulty = if seed % 2 == 0 { Difficulty::Easy } else { Difficulty::Hard };
        let mut game = Game::deal_seeded(seed, difficulty, NoopListener);
        let mut rng = SmallRng::seed_from_u64(seed + 1000);

        for _ in 0..2000 {
            if rng.random_bool(0.2) {
                game.draw();
            } else {
                let source = random_endpoint(&mut rng, game.board());
                let target = random_endpoint(&mut rng, game.board());
                let expected = game.can_transfer(source, target);
                let before = game.board().clone();
                let moved = game.transfer(source, target);
                assert_eq!(moved, expected);
                if moved {
                    applied += 1;
                } else {
                    assert_eq!(game.board(), &before, "failed transfer mutated the board");
                }
            }
            assert_every_card_once(game.board());
            assert_tops_revealed(game.board());
        }
    }
    assert!(applied > 0, "random play never moved a card");
}

#[test]
fn can_transfer_is_idempotent_on_a_deal() {
    let game = Game::deal_seeded(17, Difficulty::Hard, NoopListener);
    let before = game.board().clone();
    let mut endpoints = vec![Transfer::stock()];
    for index in 0..PILE_COUNT {
        for depth in 0..=index {
            endpoints.push(Transfer::tableau(index, depth));
        }
    }
    endpoints.extend(Suit::ALL.iter().map(|&s| Transfer::foundation(s)));

    for &source in &endpoints {
        for &target in &endpoints {
            let first = game.can_transfer(source, target);
            let second = game.can_transfer(source, target);
            assert_eq!(first, second);
        }
    }
    assert_eq!(game.board(), &before);
}

#[test]
fn copy_never_aliases_the_original() {
    let mut original = Game::deal_seeded(4, Difficulty::Easy, UndoHistory::default());
    let mut clone = original.copy();
    assert_eq!(clone.board(), original.board());

    for _ in 0..5 {
        clone.draw();
    }
    assert_ne!(clone.board(), original.board());
    assert_eq!(original.board(), &Board::deal_seeded(4, Difficulty::Easy));
    assert!(original.listener().is_empty());
    assert_eq!(clone.listener().len(), 5);

    original.draw();
    assert_eq!(clone.board().stock.waste().len(), 6);
    assert_eq!(original.board().stock.waste().len(), 2);
}

fn game_with(tableau: Tableau) -> Game<NoopListener> {
    let board = Board {
        tableau,
        ..Board::default()
    };
    Game::new(board, Difficulty::Hard, NoopListener)
}

#[test]
fn queen_moves_off_a_hidden_king_and_reveals_it() {
    let mut tableau = Tableau::new();
    assert!(tableau.place_card(Card::face_down(Suit::Spades, Rank::King), 0));
    assert!(tableau.place_card(Card::new(Suit::Hearts, Rank::Queen), 0));
    assert!(tableau.place_card(Card::new(Suit::Clubs, Rank::King), 1));
    let mut game = game_with(tableau);

    assert!(game.transfer(Transfer::tableau(0, 1), Transfer::tableau_target(1)));
    assert_eq!(game.board().tableau.top_card(0), Some(Card::new(Suit::Spades, Rank::King)));
    assert_eq!(game.board().tableau.pile_len(1), 2);
}

#[test]
fn king_run_moves_onto_empty_pile() {
    let mut tableau = Tableau::new();
    assert!(tableau.place_card(Card::new(Suit::Spades, Rank::King), 0));
    assert!(tableau.place_card(Card::new(Suit::Hearts, Rank::Queen), 0));
    assert!(tableau.place_card(Card::new(Suit::Diamonds, Rank::King), 1));
    let mut game = game_with(tableau);

    // Q♥ cannot go on K♦ (same color); the whole run fits an empty pile.
    assert!(!game.transfer(Transfer::tableau(0, 1), Transfer::tableau_target(1)));
    assert!(game.transfer(Transfer::tableau(0, 0), Transfer::tableau_target(2)));
    assert!(game.board().tableau.pile(0).is_none());
    assert_eq!(game.board().tableau.pile_len(2), 2);
    assert!(game.board().tableau.pile(2).unwrap().is_descending_run());
}

#[test]
fn listener_sees_board_before_and_after() {
    let mut seen: Vec<(MoveSignal, usize)> = Vec::new();
    {
        let mut game = Game::new(
            Board::deal_seeded(2, Difficulty::Easy),
            Difficulty::Easy,
            |signal: MoveSignal, board: &Board| seen.push((signal, board.stock.waste().len())),
        );
        game.draw();
    }
    assert_eq!(seen, vec![(MoveSignal::PreMove, 1), (MoveSignal::PostMove, 2)]);
}
