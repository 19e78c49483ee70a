//! Klondike solitaire rules engine.
//!
//! [`Game`] deals a shuffled layout and is the only type a front end needs:
//! it validates and applies moves, draws from the stock, keeps snapshots for
//! undo, suggests hints and reports a win. Everything else here is the pile
//! storage it is built on.

pub mod card;
pub mod error;
pub mod klondike;
pub mod piles;
pub mod stack;

pub use card::{Card, Color, Deck, Rank, Suit};
pub use error::{MoveError, PileError};
pub use klondike::{Game, GameConfig, Move, PileGroup, Snapshot, StockAction};
