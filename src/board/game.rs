/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{select_move, Difficulty, EngineError};

use super::{
    in_check, legal_destinations, legal_moves, Color, Destinations, File, Move, MoveRecord,
    PieceKind, Position, Rank, Square,
};

/// The status of a game, derived from the legal-move count and check status
/// of the side about to move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// The game continues and the side to move is not in check.
    #[default]
    Playing,

    /// The side to move is in check but has at least one legal move.
    Check,

    /// The side to move is in check with no legal moves. Terminal.
    Checkmate,

    /// The side to move is not in check but has no legal moves. Terminal.
    Stalemate,

    /// Drawn by the fifty-move rule or insufficient material. Terminal.
    Draw,
}

impl GameStatus {
    /// Returns `true` if this status ends the game.
    #[inline(always)]
    pub const fn is_game_over(&self) -> bool {
        matches!(self, Self::Checkmate | Self::Stalemate | Self::Draw)
    }

    /// Fetches a human-readable name for this [`GameStatus`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Check => "check",
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
            Self::Draw => "draw",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Derives the [`GameStatus`] and check flag of a position, evaluated for
/// the side about to move.
pub fn compute_status(position: &Position) -> (GameStatus, bool) {
    let color = position.side_to_move();
    let checked = in_check(position, color);

    let status = if legal_moves(position, color).is_empty() {
        if checked {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    } else if position.can_draw_by_fifty() || position.has_insufficient_material() {
        GameStatus::Draw
    } else if checked {
        GameStatus::Check
    } else {
        GameStatus::Playing
    };

    (status, checked)
}

/// A complete game of chess: the current [`Position`], the move history, and
/// the derived status.
///
/// This is the aggregate the presentation layer and the AI consume. The
/// session exclusively owns its position; it is mutated only through
/// [`GameSession::apply_move`] and [`GameSession::reset`], and every change
/// is all-or-nothing. Read access goes through the accessor methods, which
/// hand out values and immutable views only.
///
/// There is no hidden shared instance: construct a session and pass it
/// wherever it is needed.
#[derive(Clone, Debug)]
pub struct GameSession {
    /// The current position of the game.
    position: Position,

    /// Every move applied since the session was created, oldest first.
    history: Vec<MoveRecord>,

    /// The status of the position, for the side about to move.
    status: GameStatus,

    /// Whether the side about to move is in check.
    checked: bool,
}

impl GameSession {
    /// Creates a session at the standard starting position: White to move,
    /// full castling rights, no en passant available.
    ///
    /// # Example
    /// ```
    /// # use stoat::{Color, GameSession, GameStatus};
    /// let session = GameSession::new();
    /// assert_eq!(session.side_to_move(), Color::White);
    /// assert_eq!(session.status(), GameStatus::Playing);
    /// assert!(session.history().is_empty());
    /// ```
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            position: Position::new_game(),
            history: Vec::new(),
            status: GameStatus::Playing,
            checked: false,
        }
    }

    /// Creates a session from the provided FEN string, with an empty history.
    ///
    /// The status is computed immediately, so loading a mate or stalemate
    /// position yields a session that is already over.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let position = Position::from_fen(fen)?;
        let (status, checked) = compute_status(&position);
        Ok(Self {
            position,
            history: Vec::new(),
            status,
            checked,
        })
    }

    /// Discards all state and reinitializes to the standard starting position.
    #[inline(always)]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Fetches the current [`Position`] of this session.
    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the current [`GameStatus`].
    #[inline(always)]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the [`Color`] of the player whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// Returns `true` if the side to move is in check (including checkmate).
    #[inline(always)]
    pub const fn in_check(&self) -> bool {
        self.checked
    }

    /// Every move applied to this session, oldest first.
    #[inline(always)]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Enumerates the squares the piece on `from` may legally move to.
    ///
    /// Empty when `from` is unoccupied, when the piece belongs to the player
    /// not on turn, or when the game is over.
    ///
    /// # Example
    /// ```
    /// # use stoat::{GameSession, Square};
    /// let session = GameSession::new();
    /// // White to move: a Black piece yields no destinations
    /// assert_eq!(session.legal_destinations(Square::E2).len(), 2);
    /// assert_eq!(session.legal_destinations(Square::E7).len(), 0);
    /// ```
    pub fn legal_destinations(&self, from: Square) -> Destinations {
        if self.status.is_game_over() {
            return Destinations::new();
        }
        match self.position.piece_at(from) {
            Some(piece) if piece.color() == self.side_to_move() => {
                legal_destinations(&self.position, from)
            }
            _ => Destinations::new(),
        }
    }

    /// Applies a move from `from` to `to` for the side on turn, producing the
    /// record appended to the history.
    ///
    /// The move is validated in full before anything changes, so any error
    /// leaves the session exactly as it was:
    ///
    /// * [`EngineError::GameOver`] if the game has ended.
    /// * [`EngineError::EmptyOrigin`] if `from` is unoccupied.
    /// * [`EngineError::WrongSide`] if the piece belongs to the other player.
    /// * [`EngineError::IllegalDestination`] if `to` is not a legal
    ///   destination for the piece.
    /// * [`EngineError::PromotionRequired`] if a pawn reaches the final rank
    ///   and `promotion` is `None`; re-invoke with a chosen kind.
    ///
    /// On success the move is executed atomically: board and counters
    /// update, the record is appended, the side to move flips, and the
    /// status and check flag are recomputed for the new side on turn.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveRecord, EngineError> {
        if self.status.is_game_over() {
            return Err(EngineError::GameOver);
        }

        let piece = self
            .position
            .piece_at(from)
            .ok_or(EngineError::EmptyOrigin(from))?;
        if piece.color() != self.side_to_move() {
            return Err(EngineError::WrongSide(from));
        }
        if !legal_destinations(&self.position, from).contains(&to) {
            return Err(EngineError::IllegalDestination { from, to });
        }

        let promoting = piece.is_pawn() && to.rank() == Rank::promotion_rank(piece.color());
        if promoting && promotion.is_none() {
            return Err(EngineError::PromotionRequired { from, to });
        }

        let mv = Move {
            from,
            to,
            promotion: promotion.filter(|_| promoting),
        };
        let Some(applied) = self.position.apply(mv) else {
            // Unreachable after the checks above; kept so a logic error
            // cannot leave a half-applied session
            return Err(EngineError::EmptyOrigin(from));
        };

        let record = MoveRecord::new(
            from,
            to,
            applied.piece,
            applied.captured,
            applied.promoted,
            applied.en_passant,
        );
        self.history.push(record.clone());

        let (status, checked) = compute_status(&self.position);
        self.status = status;
        self.checked = checked;

        Ok(record)
    }

    /// Picks a move for the side on turn at the given [`Difficulty`].
    ///
    /// This is a pure computation over a snapshot of the position; the
    /// session is not modified. Apply the result with
    /// [`GameSession::apply_move`]. Returns `None` when the game is over or
    /// no legal move exists.
    #[inline(always)]
    pub fn ai_move(&self, difficulty: Difficulty) -> Option<Move> {
        if self.status.is_game_over() {
            return None;
        }
        select_move(&self.position, difficulty)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameSession {
    /// Formats this session as a board diagram with rank/file labels,
    /// followed by the side to move and status.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_index in (0..8u8).rev() {
            write!(f, "{}", rank_index + 1)?;
            for file_index in 0..8u8 {
                let square = Square::new(File(file_index), Rank(rank_index));
                match self.position.piece_at(square) {
                    Some(piece) => write!(f, " {piece}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        writeln!(f)?;
        write!(
            f,
            "{} to move, status: {}",
            self.side_to_move().name(),
            self.status
        )
    }
}
