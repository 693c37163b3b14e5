/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Move generation is layered in two tiers:
//!
//! 1. *Pseudo-legal* generation ([`raw_destinations`]) applies only piece
//!    geometry and occupancy rules, ignoring whether the mover's own King
//!    would be left in check.
//! 2. *Legal* filtering ([`legal_destinations`]) applies each pseudo-legal
//!    move to a private copy of the position and discards it if the mover's
//!    King is attacked on the resulting board. This is the only place check
//!    safety is enforced.
//!
//! Castling moves are never generated. See DESIGN.md.

use arrayvec::ArrayVec;

use super::{Color, Move, MoveList, PieceKind, Position, Rank, Square};

/// Maximum number of destinations a single piece can have (a Queen near the center).
const MAX_PIECE_MOVES: usize = 27;

/// An alias for an [`arrayvec::ArrayVec`] of one piece's destination squares.
pub type Destinations = ArrayVec<Square, MAX_PIECE_MOVES>;

/// The four orthogonal ray directions, as `(file, rank)` deltas.
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// The four diagonal ray directions, as `(file, rank)` deltas.
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The eight L-shaped Knight jumps, as `(file, rank)` deltas.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// The eight adjacent King steps, as `(file, rank)` deltas.
const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Enumerates the pseudo-legal destinations of the piece on `from`.
///
/// Returns an empty list if `from` is unoccupied. King safety is *not*
/// considered here; see [`legal_destinations`].
pub fn raw_destinations(position: &Position, from: Square) -> Destinations {
    let mut out = Destinations::new();
    let Some(piece) = position.piece_at(from) else {
        return out;
    };

    let color = piece.color();
    match piece.kind() {
        PieceKind::Pawn => pawn_destinations(position, from, color, &mut out),
        PieceKind::Knight => leap(position, from, color, &KNIGHT_JUMPS, &mut out),
        PieceKind::King => leap(position, from, color, &KING_STEPS, &mut out),
        PieceKind::Rook => slide(position, from, color, &ORTHOGONALS, &mut out),
        PieceKind::Bishop => slide(position, from, color, &DIAGONALS, &mut out),
        PieceKind::Queen => {
            slide(position, from, color, &ORTHOGONALS, &mut out);
            slide(position, from, color, &DIAGONALS, &mut out);
        }
    }

    out
}

/// Walks each ray outward from `from` until a piece or the board edge stops it.
///
/// An occupied square is included as a destination only if it holds an enemy
/// piece, and ends the ray either way.
fn slide(
    position: &Position,
    from: Square,
    color: Color,
    rays: &[(i8, i8)],
    out: &mut Destinations,
) {
    for &(file_delta, rank_delta) in rays {
        let mut square = from;
        while let Some(next) = square.offset(file_delta, rank_delta) {
            match position.piece_at(next) {
                None => out.push(next),
                Some(blocker) => {
                    if blocker.color() != color {
                        out.push(next);
                    }
                    break;
                }
            }
            square = next;
        }
    }
}

/// Adds each in-bounds offset square not occupied by a friendly piece.
fn leap(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Destinations,
) {
    for &(file_delta, rank_delta) in offsets {
        if let Some(next) = from.offset(file_delta, rank_delta) {
            if position.piece_at(next).is_none_or(|p| p.color() != color) {
                out.push(next);
            }
        }
    }
}

/// Pawn moves: single push, double push from the starting rank, diagonal
/// captures, and en passant.
///
/// The en passant destination is an *empty* square; the captured pawn stands
/// beside the mover, and eligibility comes from the position's last-move
/// record (a two-square advance by an opposing pawn on the previous ply).
fn pawn_destinations(position: &Position, from: Square, color: Color, out: &mut Destinations) {
    if let Some(one) = from.forward_by(color, 1) {
        if position.is_empty(one) {
            out.push(one);

            if from.rank() == Rank::pawn_rank(color) {
                if let Some(two) = from.forward_by(color, 2) {
                    if position.is_empty(two) {
                        out.push(two);
                    }
                }
            }
        }
    }

    let ep_square = position.ep_square();
    for file_delta in [-1, 1] {
        let Some(target) = from.offset(file_delta, color.forward()) else {
            continue;
        };
        match position.piece_at(target) {
            Some(victim) if victim.color() != color => out.push(target),
            None => {
                let opposing_push = position
                    .last_move()
                    .is_some_and(|last| last.piece.color() != color);
                if Some(target) == ep_square && opposing_push {
                    out.push(target);
                }
            }
            _ => {}
        }
    }
}

/// Returns `true` if any piece of `by` pseudo-legally reaches `target`.
///
/// Callers probe squares that are occupied (a King under test), so pawn
/// pushes, which require an empty destination, never count a blocked square
/// as attacked.
pub fn is_attacked(position: &Position, target: Square, by: Color) -> bool {
    position
        .pieces()
        .filter(|(_, piece)| piece.color() == by)
        .any(|(square, _)| raw_destinations(position, square).contains(&target))
}

/// Returns `true` if `color`'s King is attacked by the opponent.
///
/// A position without a `color` King (only reachable in handcrafted test
/// setups) is reported as not in check.
pub fn in_check(position: &Position, color: Color) -> bool {
    position
        .find_king(color)
        .is_some_and(|king| is_attacked(position, king, color.opponent()))
}

/// Enumerates the legal destinations of the piece on `from`: its
/// pseudo-legal destinations minus any that would leave the mover's own King
/// in check.
///
/// Each candidate is verified on an independent copy of the position, with
/// the move fully reflected (including the removal of an en-passant-captured
/// pawn).
///
/// # Example
/// ```
/// # use stoat::{Position, Square, legal_destinations};
/// let pos = Position::new_game();
/// assert_eq!(legal_destinations(&pos, Square::E2).len(), 2);
/// assert_eq!(legal_destinations(&pos, Square::D1).len(), 0);
/// ```
pub fn legal_destinations(position: &Position, from: Square) -> Destinations {
    let mut out = Destinations::new();
    let Some(piece) = position.piece_at(from) else {
        return out;
    };

    for to in raw_destinations(position, from) {
        // The promotion kind is irrelevant here: any replacement piece
        // occupies the same square, so check exposure is unchanged
        let Some(next) = position.with_applied(Move::new(from, to)) else {
            continue;
        };
        if !in_check(&next, piece.color()) {
            out.push(to);
        }
    }

    out
}

/// Enumerates every legal move available to `color`, with each
/// promotion-eligible pawn move expanded into four candidates, one per
/// promotion kind (Queen first).
pub fn legal_moves(position: &Position, color: Color) -> MoveList {
    let mut out = MoveList::new();

    for (from, piece) in position.pieces() {
        if piece.color() != color {
            continue;
        }

        let promoting = piece.is_pawn();
        for to in legal_destinations(position, from) {
            if promoting && to.rank() == Rank::promotion_rank(color) {
                for kind in PieceKind::PROMOTIONS {
                    out.push(Move::promoting(from, to, kind));
                }
            } else {
                out.push(Move::new(from, to));
            }
        }
    }

    out
}
