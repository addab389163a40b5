//! Container-agnostic card movement.
//!
//! A move is negotiated in two phases. The source describes what it is
//! willing to give up as an [`Offer`]; the target inspects the offered item
//! against its own placement rule and, if it agrees, signs the offer with the
//! action that will receive it. Only a signed offer can be completed, and
//! completion first detaches the item from the source and then attaches the
//! very same cards to the target, so a card is never owned by two containers.

use crate::board::Board;
use crate::card::{Card, Suit};
use crate::difficulty::Difficulty;
use crate::pile::Pile;

/// The three kinds of container a transfer can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferKind {
    Tableau,
    Stock,
    Foundation,
}

/// Addressing information for one side of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The run starting `depth` cards up from the bottom of tableau pile `index`.
    /// As a target only `index` matters.
    Tableau { index: usize, depth: usize },
    /// The top of the waste.
    Stock,
    /// The foundation of `suit`.
    Foundation { suit: Suit },
}

impl Endpoint {
    pub fn kind(self) -> TransferKind {
        match self {
            Endpoint::Tableau { .. } => TransferKind::Tableau,
            Endpoint::Stock => TransferKind::Stock,
            Endpoint::Foundation { .. } => TransferKind::Foundation,
        }
    }
}

/// What an offer proposes to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferItem {
    Card(Card),
    /// Two or more cards from a tableau pile, bottom first.
    Run(Pile),
}

impl OfferItem {
    pub fn len(&self) -> usize {
        match self {
            OfferItem::Card(_) => 1,
            OfferItem::Run(run) => run.len(),
        }
    }

    /// The offered cards, bottom first.
    pub fn cards(&self) -> &[Card] {
        match self {
            OfferItem::Card(card) => std::slice::from_ref(card),
            OfferItem::Run(run) => run.cards(),
        }
    }

    fn from_pile(pile: Pile) -> Option<OfferItem> {
        match pile.len() {
            0 => None,
            1 => pile.top().map(OfferItem::Card),
            _ => Some(OfferItem::Run(pile)),
        }
    }
}

/// Detaches the offered item from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceAction {
    Tableau { index: usize, depth: usize },
    Waste,
    Foundation { suit: Suit },
}

impl SourceAction {
    /// The cards this action would detach from `board`, without detaching them.
    fn peek(self, board: &Board) -> Option<&[Card]> {
        match self {
            SourceAction::Tableau { index, depth } => board.tableau.pile(index)?.at(depth),
            SourceAction::Waste => board.stock.waste().last().map(std::slice::from_ref),
            SourceAction::Foundation { suit } => {
                board.foundations.get(suit).pile().cards().last().map(std::slice::from_ref)
            }
        }
    }

    /// True if `board` still holds exactly `item` where this action takes from.
    fn still_holds(self, board: &Board, item: &OfferItem) -> bool {
        self.peek(board).is_some_and(|cards| {
            cards.len() == item.len()
                && cards.iter().zip(item.cards()).all(|(a, b)| a.same_card(*b))
        })
    }

    fn detach(self, board: &mut Board) -> Option<OfferItem> {
        match self {
            SourceAction::Tableau { index, depth } => board
                .tableau
                .detach_run(index, depth)
                .and_then(OfferItem::from_pile),
            SourceAction::Waste => board.stock.draw_top_from_waste().map(OfferItem::Card),
            SourceAction::Foundation { suit } => {
                board.foundations.remove_top_card(suit).map(OfferItem::Card)
            }
        }
    }
}

/// Attaches a detached item to the target that signed the offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetAction {
    Tableau { index: usize },
    Foundation,
}

impl TargetAction {
    fn accepts(self, board: &Board, item: &OfferItem) -> bool {
        match (self, item) {
            (TargetAction::Tableau { index }, OfferItem::Card(card)) => {
                board.tableau.can_place(*card, index)
            }
            (TargetAction::Tableau { index }, OfferItem::Run(run)) => {
                board.tableau.can_place_run(run.cards(), index)
            }
            (TargetAction::Foundation, OfferItem::Card(card)) => board.foundations.can_place(*card),
            (TargetAction::Foundation, OfferItem::Run(_)) => false,
        }
    }

    fn attach(self, board: &mut Board, item: OfferItem) -> bool {
        match (self, item) {
            (TargetAction::Tableau { index }, OfferItem::Card(card)) => {
                board.tableau.attach_run(Pile::from(card), index);
                true
            }
            (TargetAction::Tableau { index }, OfferItem::Run(run)) => {
                board.tableau.attach_run(run, index);
                true
            }
            (TargetAction::Foundation, OfferItem::Card(card)) => board.foundations.place_card(card),
            (TargetAction::Foundation, OfferItem::Run(_)) => false,
        }
    }
}

/// A proposed move: the item on offer, how to take it from the source, and,
/// once a target has accepted, how to give it to the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    item: OfferItem,
    origin: Endpoint,
    source: SourceAction,
    signature: Option<TargetAction>,
}

impl Offer {
    pub fn item(&self) -> &OfferItem {
        &self.item
    }

    pub fn origin(&self) -> Endpoint {
        self.origin
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    fn sign(&mut self, signature: TargetAction) {
        self.signature = Some(signature);
    }

    /// Carry out a signed offer: detach from the source, then attach to the
    /// target. The offer is refused without touching the board when it is
    /// unsigned, or when `board` no longer shows the offered cards at the
    /// source or no longer lets the target take them.
    pub fn complete(self, board: &mut Board) -> bool {
        let Some(target) = self.signature else {
            return false;
        };
        if !self.source.still_holds(board, &self.item) || !target.accepts(board, &self.item) {
            return false;
        }
        let Some(item) = self.source.detach(board) else {
            return false;
        };
        debug_assert_eq!(item.len(), self.item.len(), "detached item differs from the offer");
        target.attach(board, item)
    }
}

/// One side of a move: an endpoint plus the difficulty it is evaluated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transfer {
    pub endpoint: Endpoint,
    pub difficulty: Difficulty,
}

impl Transfer {
    pub fn new(endpoint: Endpoint) -> Self {
        Transfer {
            endpoint,
            difficulty: Difficulty::default(),
        }
    }

    pub fn tableau(index: usize, depth: usize) -> Self {
        Self::new(Endpoint::Tableau { index, depth })
    }

    /// The tableau pile `index` as a move target.
    pub fn tableau_target(index: usize) -> Self {
        Self::tableau(index, 0)
    }

    pub fn stock() -> Self {
        Self::new(Endpoint::Stock)
    }

    pub fn foundation(suit: Suit) -> Self {
        Self::new(Endpoint::Foundation { suit })
    }

    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        Transfer { difficulty, ..self }
    }

    pub fn kind(&self) -> TransferKind {
        self.endpoint.kind()
    }

    /// Phase one: describe what this endpoint can give to a `offering_to` target.
    /// Returns `None` when there is nothing eligible to move.
    pub fn create_offer(&self, board: &Board, offering_to: TransferKind) -> Option<Offer> {
        let (item, source) = match self.endpoint {
            Endpoint::Tableau { index, depth } => {
                if !board.tableau.can_move_run(index, depth) {
                    return None;
                }
                let run = board.tableau.pile(index)?.at(depth)?;
                let item = match run {
                    [card] => OfferItem::Card(*card),
                    // Runs only ever land on another tableau pile.
                    _ if offering_to != TransferKind::Tableau => return None,
                    _ => OfferItem::Run(Pile::from_cards(run.to_vec())),
                };
                (item, SourceAction::Tableau { index, depth })
            }
            Endpoint::Stock => {
                let card = *board.stock.visible_waste(self.difficulty).last()?;
                (OfferItem::Card(card), SourceAction::Waste)
            }
            Endpoint::Foundation { suit } => {
                let card = board.foundations.top_card(suit)?;
                (OfferItem::Card(card), SourceAction::Foundation { suit })
            }
        };

        Some(Offer {
            item,
            origin: self.endpoint,
            source,
            signature: None,
        })
    }

    /// Phase two: check the offered item against this endpoint's placement
    /// rule. On acceptance the offer is signed and `true` returned; otherwise
    /// the offer is left exactly as it was.
    pub fn verify_offer(&self, board: &Board, offer: &mut Offer) -> bool {
        let signature = match self.endpoint {
            // Nothing is ever put back into the stock.
            Endpoint::Stock => return false,
            Endpoint::Tableau { index, .. } => {
                if matches!(offer.origin, Endpoint::Tableau { index: from, .. } if from == index) {
                    return false;
                }
                let accepted = match &offer.item {
                    OfferItem::Card(card) => board.tableau.can_place(*card, index),
                    OfferItem::Run(run) => board.tableau.can_place_run(run.cards(), index),
                };
                if !accepted {
                    return false;
                }
                TargetAction::Tableau { index }
            }
            Endpoint::Foundation { suit } => {
                let accepted = match &offer.item {
                    OfferItem::Card(card) => card.suit == suit && board.foundations.can_place(*card),
                    OfferItem::Run(_) => false,
                };
                if !accepted {
                    return false;
                }
                TargetAction::Foundation
            }
        };

        offer.sign(signature);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Rank;

    fn board_with_tableau(piles: Vec<(usize, Vec<Card>)>) -> Board {
        let mut board = Board::default();
        for (idx, cards) in piles {
            for card in cards {
                board.tableau.deal_card(card, idx);
            }
        }
        board
    }

    #[test]
    fn tableau_offers_single_card_or_run() {
        let board = board_with_tableau(vec![(
            0,
            vec![
                Card::new(Suit::Spades, Rank::King),
                Card::new(Suit::Hearts, Rank::Queen),
            ],
        )]);

        let top = Transfer::tableau(0, 1)
            .create_offer(&board, TransferKind::Foundation)
            .unwrap();
        assert_eq!(top.item(), &OfferItem::Card(Card::new(Suit::Hearts, Rank::Queen)));

        let run = Transfer::tableau(0, 0)
            .create_offer(&board, TransferKind::Tableau)
            .unwrap();
        assert!(matches!(run.item(), OfferItem::Run(p) if p.len() == 2));

        assert!(Transfer::tableau(0, 0)
            .create_offer(&board, TransferKind::Foundation)
            .is_none());
        assert!(Transfer::tableau(0, 2)
            .create_offer(&board, TransferKind::Tableau)
            .is_none());
        assert!(Transfer::tableau(1, 0)
            .create_offer(&board, TransferKind::Tableau)
            .is_none());
    }

    #[test]
    fn broken_run_is_not_offered() {
        let board = board_with_tableau(vec![(
            0,
            vec![
                Card::new(Suit::Spades, Rank::King),
                Card::new(Suit::Clubs, Rank::Queen),
            ],
        )]);
        assert!(Transfer::tableau(0, 0)
            .create_offer(&board, TransferKind::Tableau)
            .is_none());
        assert!(Transfer::tableau(0, 1)
            .create_offer(&board, TransferKind::Tableau)
            .is_some());
    }

    #[test]
    fn rejected_offer_stays_unsigned() {
        let board = board_with_tableau(vec![
            (0, vec![Card::new(Suit::Hearts, Rank::Five)]),
            (1, vec![Card::new(Suit::Diamonds, Rank::Six)]),
        ]);
        let mut offer = Transfer::tableau(0, 0)
            .create_offer(&board, TransferKind::Tableau)
            .unwrap();
        let before = offer.clone();
        assert!(!Transfer::tableau_target(1).verify_offer(&board, &mut offer));
        assert!(!Transfer::stock().verify_offer(&board, &mut offer));
        assert!(!Transfer::foundation(Suit::Hearts).verify_offer(&board, &mut offer));
        assert_eq!(offer, before);
    }

    #[test]
    fn unsigned_offer_does_not_complete() {
        let mut board = board_with_tableau(vec![(0, vec![Card::new(Suit::Hearts, Rank::Ace)])]);
        let offer = Transfer::tableau(0, 0)
            .create_offer(&board, TransferKind::Foundation)
            .unwrap();
        let before = board.clone();
        assert!(!offer.complete(&mut board));
        assert_eq!(board, before);
    }

    #[test]
    fn face_down_card_is_never_offered() {
        let board = board_with_tableau(vec![
            (
                0,
                vec![
                    Card::face_down(Suit::Spades, Rank::Eight),
                    Card::new(Suit::Hearts, Rank::Seven),
                ],
            ),
            (1, vec![Card::new(Suit::Diamonds, Rank::Nine)]),
        ]);
        assert!(Transfer::tableau(0, 0)
            .create_offer(&board, TransferKind::Tableau)
            .is_none());
        assert!(Transfer::tableau(0, 1)
            .create_offer(&board, TransferKind::Tableau)
            .is_some());
    }

    #[test]
    fn signed_offer_is_refused_on_a_board_that_changed() {
        let mut checked = Board::default();
        checked.stock = crate::stock::Stock::new(vec![Card::new(Suit::Hearts, Rank::Ace)]);
        checked.stock.draw_cards(Difficulty::Easy);
        let mut offer = Transfer::stock()
            .create_offer(&checked, TransferKind::Foundation)
            .unwrap();
        assert!(Transfer::foundation(Suit::Hearts).verify_offer(&checked, &mut offer));

        let mut other = Board::default();
        other.stock = crate::stock::Stock::new(vec![Card::new(Suit::Clubs, Rank::Five)]);
        other.stock.draw_cards(Difficulty::Easy);
        let before = other.clone();
        assert!(!offer.clone().complete(&mut other));
        assert_eq!(other, before);
        assert_eq!(other.card_count(), 1);

        // Same source card, but the target has moved on.
        let mut filled = checked.clone();
        filled.foundations.place_card(Card::new(Suit::Hearts, Rank::Ace));
        let before = filled.clone();
        assert!(!offer.clone().complete(&mut filled));
        assert_eq!(filled, before);

        assert!(offer.complete(&mut checked));
        assert_eq!(checked.foundations.get(Suit::Hearts).len(), 1);
    }

    #[test]
    fn signed_run_is_refused_when_the_target_pile_changed() {
        let board = board_with_tableau(vec![
            (
                0,
                vec![
                    Card::new(Suit::Spades, Rank::Eight),
                    Card::new(Suit::Hearts, Rank::Seven),
                ],
            ),
            (1, vec![Card::new(Suit::Diamonds, Rank::Nine)]),
        ]);
        let mut offer = Transfer::tableau(0, 0)
            .create_offer(&board, TransferKind::Tableau)
            .unwrap();
        assert!(Transfer::tableau_target(1).verify_offer(&board, &mut offer));

        let mut changed = board.clone();
        changed.tableau.deal_card(Card::new(Suit::Clubs, Rank::Eight), 1);
        let before = changed.clone();
        assert!(!offer.complete(&mut changed));
        assert_eq!(changed, before);
    }

    #[test]
    fn run_moves_between_piles_and_reveals() {
        let mut board = board_with_tableau(vec![
            (
                0,
                vec![
                    Card::face_down(Suit::Clubs, Rank::Two),
                    Card::new(Suit::Spades, Rank::Eight),
                    Card::new(Suit::Hearts, Rank::Seven),
                ],
            ),
            (3, vec![Card::new(Suit::Diamonds, Rank::Nine)]),
        ]);
        let mut offer = Transfer::tableau(0, 1)
            .create_offer(&board, TransferKind::Tableau)
            .unwrap();
        assert!(Transfer::tableau_target(3).verify_offer(&board, &mut offer));
        assert!(offer.is_signed());
        assert!(offer.complete(&mut board));

        assert_eq!(board.tableau.pile_len(0), 1);
        assert!(!board.tableau.top_card(0).unwrap().hidden);
        assert_eq!(board.tableau.pile_len(3), 3);
        assert_eq!(board.tableau.top_card(3), Some(Card::new(Suit::Hearts, Rank::Seven)));
    }

    #[test]
    fn same_pile_is_never_a_target() {
        let board = board_with_tableau(vec![(
            0,
            vec![
                Card::new(Suit::Spades, Rank::King),
                Card::new(Suit::Hearts, Rank::Queen),
            ],
        )]);
        let mut offer = Transfer::tableau(0, 1)
            .create_offer(&board, TransferKind::Tableau)
            .unwrap();
        assert!(!Transfer::tableau_target(0).verify_offer(&board, &mut offer));
    }

    #[test]
    fn waste_to_foundation_and_back() {
        let mut board = Board::default();
        board.stock = crate::stock::Stock::new(vec![Card::new(Suit::Hearts, Rank::Ace)]);
        board.stock.draw_cards(Difficulty::Easy);

        let mut offer = Transfer::stock()
            .create_offer(&board, TransferKind::Foundation)
            .unwrap();
        assert!(!Transfer::foundation(Suit::Spades).verify_offer(&board, &mut offer));
        assert!(Transfer::foundation(Suit::Hearts).verify_offer(&board, &mut offer));
        assert!(offer.complete(&mut board));
        assert!(board.stock.is_empty());
        assert_eq!(board.foundations.get(Suit::Hearts).len(), 1);

        // An empty tableau pile takes only a king.
        let mut back = Transfer::foundation(Suit::Hearts)
            .create_offer(&board, TransferKind::Tableau)
            .unwrap();
        assert!(!Transfer::tableau_target(0).verify_offer(&board, &mut back));
    }

    #[test]
    fn foundation_card_returns_to_tableau() {
        let mut board = board_with_tableau(vec![(2, vec![Card::new(Suit::Spades, Rank::Three)])]);
        board.foundations.place_card(Card::new(Suit::Hearts, Rank::Ace));
        board.foundations.place_card(Card::new(Suit::Hearts, Rank::Two));

        let mut offer = Transfer::foundation(Suit::Hearts)
            .create_offer(&board, TransferKind::Tableau)
            .unwrap();
        assert!(Transfer::tableau_target(2).verify_offer(&board, &mut offer));
        assert!(offer.complete(&mut board));
        assert_eq!(board.tableau.top_card(2), Some(Card::new(Suit::Hearts, Rank::Two)));
        assert_eq!(board.foundations.top_card(Suit::Hearts), Some(Card::new(Suit::Hearts, Rank::Ace)));
    }

    #[test]
    fn empty_sources_offer_nothing() {
        let board = Board::default();
        assert!(Transfer::stock().create_offer(&board, TransferKind::Tableau).is_none());
        assert!(Transfer::foundation(Suit::Clubs)
            .create_offer(&board, TransferKind::Tableau)
            .is_none());
        assert!(Transfer::tableau(4, 0)
            .create_offer(&board, TransferKind::Foundation)
            .is_none());
    }
}
