use thiserror::Error;

use super::klondike::PileGroup;

/// Contract violations raised by the pile storage primitives.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PileError {
    #[error("pile is empty")]
    EmptyContainer,
    #[error("index {index} is out of range for a pile of {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

/// Why a move request was turned down. The game state is untouched
/// whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error("unsupported move type: {from} to {to}")]
    Unsupported { from: PileGroup, to: PileGroup },
    #[error("no such pile: {0}")]
    Pile(#[from] PileError),
}

impl MoveError {
    pub fn is_invalid(&self) -> bool {
        matches!(self, MoveError::Invalid(_))
    }
}
