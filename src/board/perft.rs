/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{legal_moves, Position};

/// Recursively applies every legal move available until the supplied depth
/// is reached, returning the total number of leaf positions.
///
/// Promotion-eligible pawn moves count four ways, one per promotion kind.
/// Useful for validating the move generator against known node counts.
pub fn perft(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(position, position.side_to_move());

    // Bulk counting: at the last level, the move count is the node count
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .filter_map(|mv| position.with_applied(mv))
        .map(|next| perft(&next, depth - 1))
        .sum()
}

/// Performs a split perft, printing the node count of each root move before
/// returning the total.
pub fn print_perft(position: &Position, depth: usize) -> u64 {
    let mut total = 0;

    for mv in legal_moves(position, position.side_to_move()) {
        let Some(next) = position.with_applied(mv) else {
            continue;
        };
        let nodes = if depth > 0 { perft(&next, depth - 1) } else { 1 };
        println!("{mv}: {nodes}");
        total += nodes;
    }

    println!("{total}");
    total
}
