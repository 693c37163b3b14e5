/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::{Piece, PieceKind, Square};

/// Maximum possible number of moves in a given chess position.
///
/// Found [here](<https://www.chessprogramming.org/Chess_Position#cite_note-4>)
pub const MAX_NUM_MOVES: usize = 218;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// Represents a move between two squares, with an optional promotion piece.
///
/// A move carries no game state of its own. It is only meaningful relative to
/// the position it was generated for, and must not be replayed against a
/// different position.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// The square the moving piece starts on.
    pub from: Square,

    /// The square the moving piece lands on.
    pub to: Square,

    /// The kind a pawn reaching the final rank becomes.
    ///
    /// `None` for every non-promoting move.
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a new, non-promoting [`Move`] from `from` to `to`.
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a new [`Move`] that promotes a pawn to `kind` upon reaching `to`.
    #[inline(always)]
    pub const fn promoting(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Parses a [`Move`] from coordinate notation: two squares and an optional
    /// promotion char, like `e2e4` or `e7e8q`.
    ///
    /// This performs no legality checking; the move is validated against a
    /// position when it is applied.
    ///
    /// # Example
    /// ```
    /// # use stoat::{Move, PieceKind, Square};
    /// let mv = Move::from_uci("e7e8q").unwrap();
    /// assert_eq!(mv.from, Square::E7);
    /// assert_eq!(mv.to, Square::E8);
    /// assert_eq!(mv.promotion, Some(PieceKind::Queen));
    /// ```
    pub fn from_uci(mv: &str) -> Result<Self> {
        let mv = mv.trim();
        if !mv.is_ascii() || !(4..=5).contains(&mv.len()) {
            bail!("Move must be 4 or 5 characters, like e2e4 or e7e8q. Found {mv:?}");
        }

        let from = Square::from_uci(&mv[0..2])?;
        let to = Square::from_uci(&mv[2..4])?;

        let promotion = match mv.chars().nth(4) {
            Some(c) => match PieceKind::from_uci(c)? {
                kind @ (PieceKind::Queen
                | PieceKind::Rook
                | PieceKind::Bishop
                | PieceKind::Knight) => Some(kind),
                kind => bail!("Cannot promote to a {}", kind.name()),
            },
            None => None,
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_uci())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// A move that has been applied to a game, as stored in the session history.
///
/// Keeps the metadata a presentation layer needs to replay or display the
/// move, along with its recorded notation, like `pawne2-e4`, `pawnd5-e6 e.p.`
/// or `pawne7-e8=queen`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    /// The square the piece moved from.
    pub from: Square,

    /// The square the piece moved to.
    pub to: Square,

    /// The piece that moved, before any promotion.
    pub piece: Piece,

    /// The piece removed from the board by this move, if any.
    pub captured: Option<Piece>,

    /// The kind the moving pawn promoted to, if this move was a promotion.
    pub promotion: Option<PieceKind>,

    /// Whether this move captured en passant.
    pub en_passant: bool,

    /// The recorded notation of this move.
    pub notation: String,
}

impl MoveRecord {
    /// Builds a record for a move of `piece` from `from` to `to`.
    pub(crate) fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        promotion: Option<PieceKind>,
        en_passant: bool,
    ) -> Self {
        let mut notation = format!("{}{from}-{to}", piece.kind().name());
        if en_passant {
            notation.push_str(" e.p.");
        }
        if let Some(kind) = promotion {
            notation.push('=');
            notation.push_str(kind.name());
        }

        Self {
            from,
            to,
            piece,
            captured,
            promotion,
            en_passant,
            notation,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation)
    }
}
