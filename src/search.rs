/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The computer opponent.
//!
//! There is no deep search here: every legal move is simulated one ply,
//! scored with the [evaluator](crate::evaluate), and the ranked list is
//! sampled with a difficulty-specific randomness profile. Difficulty tiers
//! differ only in how tightly they cling to the top of the ranking, not in
//! search depth.

use rand::Rng;

use crate::{evaluate, legal_moves, value_of, Move, PieceKind, Position, Score};

/// Scores within this margin of the best are "equally good" to the expert tier.
const EXPERT_WINDOW: Score = Score(10);

/// How strongly the AI favors highly ranked moves.
///
/// The `Default` tier is [`Difficulty::Medium`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    /// 30% chance of the best move; otherwise any of the top 5.
    Easy,

    /// 50% chance of one of the top 3; otherwise any of the top 8.
    #[default]
    Medium,

    /// 80% chance of one of the top 2; otherwise any of the top 4.
    Hard,

    /// Any move scoring within a tenth of a pawn of the best.
    Expert,
}

impl Difficulty {
    /// An array of all difficulty tiers, weakest first.
    #[inline(always)]
    pub const fn all() -> [Self; 4] {
        [Self::Easy, Self::Medium, Self::Hard, Self::Expert]
    }

    /// Fetches a human-readable name for this [`Difficulty`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A legal move together with the score of the position it leads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankedMove {
    /// The candidate move.
    pub mv: Move,

    /// The score of the resulting position, from the mover's perspective.
    pub score: Score,
}

/// Enumerates and scores every legal move for the side on turn, best first.
///
/// Each candidate is applied to a private copy of the position and the
/// result is evaluated from the mover's perspective. On top of that
/// evaluation:
///
/// * captures earn half the captured piece's material value. The post-move
///   evaluation already reflects the capture, so captures are deliberately
///   double-weighted relative to quiet positional gains;
/// * promotion-eligible pawn moves appear four times, once per promotion
///   kind, with a bonus of 800 for a Queen, 400 for a Rook, and 200 for a
///   Bishop or Knight.
///
/// The sort is stable, so equally scored moves keep their generation order.
pub fn ranked_moves(position: &Position) -> Vec<RankedMove> {
    let color = position.side_to_move();
    let mut ranked = Vec::new();

    for mv in legal_moves(position, color) {
        let captured = position.capture_target(mv);
        let Some(next) = position.with_applied(mv) else {
            continue;
        };

        let mut score = evaluate(&next, color);
        if let Some(victim) = captured {
            score += value_of(victim.kind()) / 2;
        }
        if let Some(kind) = mv.promotion {
            score += promotion_bonus(kind);
        }

        ranked.push(RankedMove { mv, score });
    }

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// How attractive each promotion kind is to the AI, beyond its board value.
#[inline(always)]
const fn promotion_bonus(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Queen => Score(800),
        PieceKind::Rook => Score(400),
        PieceKind::Bishop | PieceKind::Knight => Score(200),
        _ => Score(0),
    }
}

/// Picks a move for the side on turn using the provided random source.
///
/// Returns `None` if no legal move exists (the caller treats this as game
/// over). The position is read-only; simulation happens on private copies.
pub fn select_move_with<R: Rng>(
    position: &Position,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move> {
    let ranked = ranked_moves(position);
    if ranked.is_empty() {
        return None;
    }

    let index = match difficulty {
        Difficulty::Easy => {
            if rng.random_bool(0.3) {
                0
            } else {
                rng.random_range(0..ranked.len().min(5))
            }
        }
        Difficulty::Medium => {
            if rng.random_bool(0.5) {
                rng.random_range(0..ranked.len().min(3))
            } else {
                rng.random_range(0..ranked.len().min(8))
            }
        }
        Difficulty::Hard => {
            if rng.random_bool(0.8) {
                rng.random_range(0..ranked.len().min(2))
            } else {
                rng.random_range(0..ranked.len().min(4))
            }
        }
        Difficulty::Expert => {
            let best = ranked[0].score;
            let contenders = ranked
                .iter()
                .take_while(|candidate| best - candidate.score < EXPERT_WINDOW)
                .count();
            rng.random_range(0..contenders)
        }
    };

    Some(ranked[index].mv)
}

/// Picks a move for the side on turn, drawing randomness from the thread RNG.
///
/// See [`select_move_with`].
#[inline(always)]
pub fn select_move(position: &Position, difficulty: Difficulty) -> Option<Move> {
    select_move_with(position, difficulty, &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn no_moves_yields_none() {
        // Black is mated: the queen on e7 is defended by the king on e6
        let pos = Position::from_fen("4k3/4Q3/4K3/8/8/8/8/8 b - - 0 1").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for difficulty in Difficulty::all() {
            assert_eq!(select_move_with(&pos, difficulty, &mut rng), None);
        }
    }

    #[test]
    fn hanging_queen_is_taken() {
        // White rook on a1 can take the undefended queen on a8
        let pos = Position::from_fen("q3k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let ranked = ranked_moves(&pos);
        assert_eq!(ranked[0].mv, Move::new(crate::Square::A1, crate::Square::A8));
    }

    #[test]
    fn promotions_expand_and_prefer_queen() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let ranked = ranked_moves(&pos);
        let promotions: Vec<_> = ranked
            .iter()
            .filter(|c| c.mv.promotion.is_some())
            .collect();
        assert_eq!(promotions.len(), 4);
        assert_eq!(ranked[0].mv.promotion, Some(PieceKind::Queen));
    }
}
