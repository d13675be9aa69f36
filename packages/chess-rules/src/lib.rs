//! Chess rules engine for the relay.
//!
//! Wraps the `chess` crate's move generator behind the small surface the
//! session broker needs: load a position, ask whose turn it is, apply a move,
//! overwrite a square, and read terminal conditions. Positions serialise to
//! full six-field FEN, including the move clocks the underlying board does not
//! track itself.

pub mod error;
pub mod moves;
pub mod position;
mod san;
pub mod types;

#[cfg(test)]
mod tests_position;
#[cfg(test)]
mod tests_props_position;

pub use error::RulesError;
pub use moves::{AppliedMove, MoveSpec};
pub use position::{Outcome, Position, STANDARD_FEN};
pub use types::{Color, PieceKind, Square};
