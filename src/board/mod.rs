/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The game session aggregate and status machine.
mod game;

/// Pseudo-legal and legal move generation.
mod movegen;

/// Move and move-record types.
mod moves;

/// Node counting for move-generator validation.
mod perft;

/// Colors, piece kinds, and pieces.
mod piece;

/// The per-ply state of a game: board, rights, counters.
mod position;

/// Squares, files, and ranks.
mod square;

pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
