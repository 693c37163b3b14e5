/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

use crate::Square;

/// Every way an engine operation can fail.
///
/// All variants are recoverable and leave the session untouched: a rejected
/// move can simply be re-prompted, and a failed position load does not
/// corrupt the game it was meant to replace.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The game has already ended; no further moves are accepted.
    #[error("the game is over")]
    GameOver,

    /// The origin square of the attempted move holds no piece.
    #[error("no piece on {0}")]
    EmptyOrigin(Square),

    /// The origin square holds a piece of the player not on turn.
    #[error("the piece on {0} does not belong to the side to move")]
    WrongSide(Square),

    /// The destination is not in the piece's legal-move set.
    #[error("{from}{to} is not a legal move")]
    IllegalDestination { from: Square, to: Square },

    /// A pawn reached the final rank without a promotion piece specified.
    ///
    /// The session was not mutated; re-invoke with a chosen
    /// [`PieceKind`](crate::PieceKind).
    #[error("the move {from}{to} promotes a pawn and requires a promotion piece")]
    PromotionRequired { from: Square, to: Square },

    /// An externally supplied position (FEN) could not be parsed or violates
    /// a board invariant, such as missing a king.
    #[error("malformed position: {0}")]
    MalformedPosition(String),
}

impl EngineError {
    /// Returns `true` for the rejection variants a caller handles by simply
    /// prompting for a different move.
    #[inline(always)]
    pub const fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            Self::GameOver
                | Self::EmptyOrigin(_)
                | Self::WrongSide(_)
                | Self::IllegalDestination { .. }
        )
    }
}
