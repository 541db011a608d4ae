//! Fatal conditions raised by the game core.
//!
//! None of these are recoverable at runtime: they signal a broken invariant
//! or a malformed mode instruction, and the binary exits on them.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("attempted to fire with an empty quiver")]
    EmptyQuiver,

    #[error("unknown mode '{0}' in instruction")]
    UnknownMode(String),

    #[error("unknown action '{0}' in instruction")]
    UnknownAction(String),

    #[error("malformed instruction '{0}', expected \"<Mode> <Action>\"")]
    MalformedInstruction(String),
}
