/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt::{self, Write};

use crate::EngineError;

use super::{Color, File, Move, Piece, PieceKind, Rank, Square};

/// FEN string for the starting position of chess.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Piece arrangement of a back rank in the starting position, from the a-file to the h-file.
const BACK_RANK: [PieceKind; File::COUNT] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Represents the castling rights of a single player.
///
/// Rights are revoked when the King moves, when a Rook leaves its corner, or
/// when a Rook is captured on its corner. This engine does not generate
/// castling moves; the record exists so that session state and FEN strings
/// round-trip faithfully.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct CastlingRights {
    /// Whether castling kingside (O-O) is still permitted.
    pub short: bool,

    /// Whether castling queenside (O-O-O) is still permitted.
    pub long: bool,
}

impl CastlingRights {
    /// Creates a new [`CastlingRights`] permitting castling on both sides.
    #[inline(always)]
    pub const fn all() -> Self {
        Self {
            short: true,
            long: true,
        }
    }

    /// Creates a new [`CastlingRights`] permitting no castling.
    #[inline(always)]
    pub const fn none() -> Self {
        Self {
            short: false,
            long: false,
        }
    }
}

/// The most recently applied move, kept on the [`Position`] it produced.
///
/// This is the sole source of en passant eligibility: a pawn may capture en
/// passant exactly when the last move was a two-square pawn advance landing
/// beside it. Because every applied move overwrites this record, the
/// opportunity lasts for exactly one ply.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LastMove {
    /// The square the piece moved from.
    pub from: Square,

    /// The square the piece moved to.
    pub to: Square,

    /// The piece now standing on `to` (the promoted piece, if the move promoted).
    pub piece: Piece,

    /// Whether this move was a two-square pawn advance.
    pub was_double_push: bool,
}

/// The result of applying a [`Move`] to a [`Position`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Applied {
    /// The piece that moved, before any promotion.
    pub piece: Piece,

    /// The piece removed from the board, if any.
    pub captured: Option<Piece>,

    /// The kind the moving pawn became, if the move promoted.
    pub promoted: Option<PieceKind>,

    /// Whether the capture was en passant.
    pub en_passant: bool,
}

/// Represents the state of a chess game at a single ply.
///
/// This is analogous to a FEN string: piece placements, side to move,
/// castling rights, en passant state (kept as the [`LastMove`] record), and
/// the move counters. It possesses no knowledge of the game's history; for a
/// full session, use [`GameSession`](crate::GameSession).
///
/// [`Position`] is a plain value and is cheap to copy. Every hypothetical
/// ("what if") board used for check testing or candidate scoring is an
/// independent copy produced by [`Position::with_applied`]; a shared board is
/// never mutated and rolled back.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// The piece (if any) standing on each square, indexed by [`Square::index`].
    board: [Option<Piece>; Square::COUNT],

    /// The [`Color`] of the player whose turn it is.
    side_to_move: Color,

    /// Castling rights for each player, indexed by [`Color::index`].
    castling_rights: [CastlingRights; Color::COUNT],

    /// The most recently applied move, if any. Gates en passant.
    last_move: Option<LastMove>,

    /// Number of plies since the last capture or pawn advance.
    ///
    /// Used to enforce the fifty-move rule.
    halfmove: usize,

    /// Number of moves since the beginning of the game.
    ///
    /// A fullmove is a complete turn by white and then by black.
    fullmove: usize,
}

impl Position {
    /// Creates a new, empty [`Position`] with the following properties:
    /// * No pieces on the board
    /// * White moves first
    /// * No castling rights
    /// * No previous move (so no en passant available)
    /// * Halfmove counter set to 0
    /// * Fullmove counter set to 1
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            board: [None; Square::COUNT],
            side_to_move: Color::White,
            castling_rights: [CastlingRights::none(); Color::COUNT],
            last_move: None,
            halfmove: 0,
            fullmove: 1,
        }
    }

    /// Creates a [`Position`] with the standard chess starting setup.
    ///
    /// # Example
    /// ```
    /// # use stoat::Position;
    /// let pos = Position::new_game();
    /// assert_eq!(pos.to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    /// ```
    pub fn new_game() -> Self {
        let mut pos = Self::new();

        for color in Color::all() {
            for (file, kind) in BACK_RANK
                .into_iter()
                .enumerate()
                .map(|(f, kind)| (File(f as u8), kind))
            {
                pos.place(
                    Piece::new(color, kind),
                    Square::new(file, Rank::back_rank(color)),
                );
                pos.place(
                    Piece::new(color, PieceKind::Pawn),
                    Square::new(file, Rank::pawn_rank(color)),
                );
            }

            pos.castling_rights[color.index()] = CastlingRights::all();
        }

        pos
    }

    /// Creates a [`Position`] from the provided FEN string.
    ///
    /// Fails with [`EngineError::MalformedPosition`] if any field is invalid
    /// or either side does not have exactly one King. A failed load corrupts
    /// nothing: the error carries no partially-built state.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let malformed = |msg: String| EngineError::MalformedPosition(msg);

        let mut pos = Self::new();
        let mut fields = fen.trim().split(' ');

        let placements = fields
            .next()
            .ok_or_else(|| malformed("FEN string must have piece placements".into()))?;
        let ranks: Vec<&str> = placements.split('/').collect();
        if ranks.len() != Rank::COUNT {
            return Err(malformed(format!(
                "FEN placements must have 8 ranks. Found {}",
                ranks.len()
            )));
        }

        // Placements run from rank 8 down to rank 1
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = Rank(7 - i as u8);
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                } else {
                    if file >= 8 {
                        return Err(malformed(format!("Rank {rank} has more than 8 squares")));
                    }
                    let piece = Piece::from_uci(c).map_err(|e| malformed(e.to_string()))?;
                    pos.place(piece, Square::new(File(file), rank));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(malformed(format!("Rank {rank} does not cover 8 squares")));
            }
        }

        for color in Color::all() {
            let kings = pos
                .pieces()
                .filter(|(_, p)| p.is_king() && p.color() == color)
                .count();
            if kings != 1 {
                return Err(malformed(format!(
                    "Position must have exactly one {color} king. Found {kings}"
                )));
            }
        }

        let side = fields.next().unwrap_or("w");
        pos.side_to_move = side
            .parse()
            .map_err(|e: anyhow::Error| malformed(e.to_string()))?;

        let castling = fields.next().unwrap_or("-");
        if castling
            .chars()
            .any(|c| c != '-' && !"KQkq".contains(c))
        {
            return Err(malformed(format!("Invalid castling rights {castling:?}")));
        }
        pos.castling_rights[Color::White.index()] = CastlingRights {
            short: castling.contains('K'),
            long: castling.contains('Q'),
        };
        pos.castling_rights[Color::Black.index()] = CastlingRights {
            short: castling.contains('k'),
            long: castling.contains('q'),
        };

        let ep = fields.next().unwrap_or("-");
        if ep != "-" {
            let ep_square = Square::from_uci(ep).map_err(|e| malformed(e.to_string()))?;
            pos.last_move = Some(pos.last_move_for_ep(ep_square)?);
        }

        let halfmove = fields.next().unwrap_or("0");
        pos.halfmove = halfmove
            .parse()
            .map_err(|_| malformed(format!("Invalid halfmove counter {halfmove:?}")))?;

        let fullmove = fields.next().unwrap_or("1");
        pos.fullmove = fullmove
            .parse()
            .map_err(|_| malformed(format!("Invalid fullmove counter {fullmove:?}")))?;

        Ok(pos)
    }

    /// Reconstructs the [`LastMove`] record implied by a FEN en passant target square.
    ///
    /// The opponent of the side to move must have just double-pushed a pawn
    /// over `ep_square`, so that pawn must stand one rank beyond it.
    fn last_move_for_ep(&self, ep_square: Square) -> Result<LastMove, EngineError> {
        let mover = self.side_to_move.opponent();
        let expected_rank = match mover {
            Color::White => Rank::THREE,
            Color::Black => Rank::SIX,
        };
        let (from, to) = match (
            ep_square.rank() == expected_rank,
            ep_square.forward_by(mover, 1),
            ep_square.forward_by(mover.opponent(), 1),
        ) {
            (true, Some(to), Some(from)) => (from, to),
            _ => {
                return Err(EngineError::MalformedPosition(format!(
                    "Invalid en passant square {ep_square}"
                )))
            }
        };

        let pawn = Piece::new(mover, PieceKind::Pawn);
        if self.piece_at(to) != Some(pawn) {
            return Err(EngineError::MalformedPosition(format!(
                "En passant square {ep_square} has no {} pawn beyond it",
                mover.name()
            )));
        }

        Ok(LastMove {
            from,
            to,
            piece: pawn,
            was_double_push: true,
        })
    }

    /// Generates a FEN string from this [`Position`].
    #[inline(always)]
    pub fn to_fen(&self) -> String {
        format!("{self}")
    }

    /// Fetches the piece standing on `square`, if any.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    /// Returns `true` if there is no piece on `square`.
    #[inline(always)]
    pub const fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Searches for `color`'s King.
    ///
    /// Yields `None` only for malformed or handcrafted test positions; any
    /// position produced by normal play or a successful FEN load has both
    /// Kings.
    #[inline(always)]
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is_king() && p.color() == color)
            .map(|(square, _)| square)
    }

    /// Iterates over all occupied squares and the pieces standing on them.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, piece)| piece.map(|p| (Square::from_index(i), p)))
    }

    /// Returns the current player as a [`Color`].
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the [`CastlingRights`] for `color` in the current position.
    #[inline(always)]
    pub const fn castling_rights(&self, color: Color) -> CastlingRights {
        self.castling_rights[color.index()]
    }

    /// Returns the most recently applied move, if any.
    #[inline(always)]
    pub const fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// If en passant can be performed, returns the en passant target [`Square`]
    /// (the empty square a capturing pawn would land on).
    #[inline(always)]
    pub fn ep_square(&self) -> Option<Square> {
        let last = self.last_move?;
        if !last.was_double_push {
            return None;
        }
        // The target is the square the double-pushed pawn skipped over
        last.to.forward_by(last.piece.color().opponent(), 1)
    }

    /// Returns the half-move counter of the current position.
    #[inline(always)]
    pub const fn halfmove(&self) -> usize {
        self.halfmove
    }

    /// Returns the full-move counter of the current position.
    #[inline(always)]
    pub const fn fullmove(&self) -> usize {
        self.fullmove
    }

    /// Returns `true` if the half-move counter is 100 or greater.
    ///
    /// Since "half-move" increases with ply, the fifty-move rule takes effect at 100 ply.
    #[inline(always)]
    pub const fn can_draw_by_fifty(&self) -> bool {
        self.halfmove >= 100
    }

    /// Returns `true` if there is insufficient material on the board for
    /// either side to deliver checkmate.
    ///
    /// Covers the dead positions K vs K, K+minor vs K, and K+B vs K+B with
    /// both bishops on same-colored squares.
    pub fn has_insufficient_material(&self) -> bool {
        let mut knights = [0usize; Color::COUNT];
        let mut bishops = [0usize; Color::COUNT];
        let mut bishop_light = [false; Color::COUNT];

        for (square, piece) in self.pieces() {
            let i = piece.color().index();
            match piece.kind() {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => knights[i] += 1,
                PieceKind::Bishop => {
                    bishops[i] += 1;
                    bishop_light[i] = square.is_light();
                }
            }
        }

        let minors = [knights[0] + bishops[0], knights[1] + bishops[1]];
        match minors[0] + minors[1] {
            0 | 1 => true,
            2 => {
                // One minor each: dead only for same-colored bishops
                minors[0] == 1
                    && minors[1] == 1
                    && bishops[0] == 1
                    && bishops[1] == 1
                    && bishop_light[0] == bishop_light[1]
            }
            _ => false,
        }
    }

    /// The piece `mv` would remove from the board, accounting for en passant.
    ///
    /// Unlike a plain [`Position::piece_at`] on the destination, this
    /// resolves an en passant capture to the pawn *beside* the mover rather
    /// than the (empty) destination square.
    pub fn capture_target(&self, mv: Move) -> Option<Piece> {
        if let Some(piece) = self.piece_at(mv.to) {
            return Some(piece);
        }

        let piece = self.piece_at(mv.from)?;
        if piece.is_pawn() && mv.from.file() != mv.to.file() && Some(mv.to) == self.ep_square() {
            self.piece_at(Square::new(mv.to.file(), mv.from.rank()))
        } else {
            None
        }
    }

    /// Places `piece` on `square`, replacing whatever was there.
    #[inline(always)]
    pub(crate) fn place(&mut self, piece: Piece, square: Square) {
        self.board[square.index()] = Some(piece);
    }

    /// Applies `mv` to this position, updating all derived state: captures
    /// (including en passant removal), promotion, castling-rights revocation,
    /// the move counters, the last-move record, and the side to move.
    ///
    /// Returns `None` (and mutates nothing) if the origin square is empty.
    /// No other validation is performed; callers must only apply moves
    /// produced by the move generator, or validate separately as
    /// [`GameSession::apply_move`](crate::GameSession::apply_move) does.
    ///
    /// A pawn reaching the final rank without a promotion kind in `mv`
    /// becomes a Queen; rejecting such moves is the session's responsibility.
    pub fn apply(&mut self, mv: Move) -> Option<Applied> {
        let piece = self.piece_at(mv.from)?;
        let color = piece.color();

        // Resolve en passant *before* the board and last-move record change
        let ep_square = self.ep_square();

        self.board[mv.from.index()] = None;
        let mut captured = self.piece_at(mv.to);

        // En passant: the captured pawn is beside the mover, not on the
        // (empty) destination square
        let mut en_passant = false;
        if piece.is_pawn()
            && captured.is_none()
            && mv.from.file() != mv.to.file()
            && Some(mv.to) == ep_square
        {
            let victim_square = Square::new(mv.to.file(), mv.from.rank());
            if self
                .piece_at(victim_square)
                .is_some_and(|p| p.is_pawn() && p.color() != color)
            {
                captured = self.board[victim_square.index()].take();
                en_passant = true;
            }
        }

        let mut moved = piece;
        let mut promoted = None;
        if piece.is_pawn() && mv.to.rank() == Rank::promotion_rank(color) {
            let kind = mv.promotion.unwrap_or(PieceKind::Queen);
            moved = Piece::new(color, kind);
            promoted = Some(kind);
        }

        self.board[mv.to.index()] = Some(moved);

        if piece.is_king() {
            self.castling_rights[color.index()] = CastlingRights::none();
        }
        self.revoke_castling_at(mv.from);
        self.revoke_castling_at(mv.to);

        if piece.is_pawn() || captured.is_some() {
            self.halfmove = 0;
        } else {
            self.halfmove += 1;
        }
        if color.is_black() {
            self.fullmove += 1;
        }

        self.last_move = Some(LastMove {
            from: mv.from,
            to: mv.to,
            piece: moved,
            was_double_push: piece.is_pawn() && mv.from.rank().abs_diff(mv.to.rank()) == 2,
        });
        self.side_to_move = color.opponent();

        Some(Applied {
            piece,
            captured,
            promoted,
            en_passant,
        })
    }

    /// Copies `self` and returns the [`Position`] after having applied the
    /// provided [`Move`], or `None` if the origin square is empty.
    #[inline(always)]
    pub fn with_applied(&self, mv: Move) -> Option<Self> {
        let mut next = *self;
        next.apply(mv)?;
        Some(next)
    }

    /// Revokes the castling right tied to a corner square once a piece moves
    /// from it or a capture lands on it.
    fn revoke_castling_at(&mut self, square: Square) {
        match square {
            Square::A1 => self.castling_rights[Color::White.index()].long = false,
            Square::H1 => self.castling_rights[Color::White.index()].short = false,
            Square::A8 => self.castling_rights[Color::Black.index()].long = false,
            Square::H8 => self.castling_rights[Color::Black.index()].short = false,
            _ => {}
        }
    }
}

impl Default for Position {
    /// The standard chess starting position.
    fn default() -> Self {
        Self::new_game()
    }
}

impl fmt::Display for Position {
    /// Formats this [`Position`] as a FEN string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_index in (0..8u8).rev() {
            let mut empty = 0;
            for file_index in 0..8u8 {
                match self.piece_at(Square::new(File(file_index), Rank(rank_index))) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank_index > 0 {
                f.write_char('/')?;
            }
        }

        let mut castling = String::with_capacity(4);
        if self.castling_rights(Color::White).short {
            castling.push('K');
        }
        if self.castling_rights(Color::White).long {
            castling.push('Q');
        }
        if self.castling_rights(Color::Black).short {
            castling.push('k');
        }
        if self.castling_rights(Color::Black).long {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self
            .ep_square()
            .map_or(String::from("-"), |sq| sq.to_string());

        write!(
            f,
            " {} {castling} {ep} {} {}",
            self.side_to_move.to_uci(),
            self.halfmove,
            self.fullmove
        )
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
