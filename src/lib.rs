/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Board representation, move generation, and game sessions.
mod board;

/// Command definitions for the interactive CLI.
mod cli;

/// The engine's input loop and command execution.
mod engine;

/// Typed, recoverable engine errors.
mod error;

/// Evaluation of chess positions.
mod eval;

/// Fixed-point score type.
mod score;

/// Difficulty-tiered move selection.
mod search;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use error::*;
pub use eval::*;
pub use score::*;
pub use search::*;
