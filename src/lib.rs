//! Klondike solitaire: a card-movement engine and a terminal front end.
//!
//! The engine is the [`game::Game`] orchestrator over a [`board::Board`]
//! (tableau, stock and foundations). Every move goes through the two-phase
//! offer protocol in [`transfer`], so a move either applies completely or
//! leaves the board exactly as it was.

pub mod board;
pub mod card;
pub mod command;
pub mod difficulty;
pub mod foundations;
pub mod game;
pub mod history;
pub mod pile;
pub mod renderer;
pub mod session;
pub mod stock;
pub mod tableau;
pub mod transfer;
