/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::{builder::PossibleValue, Parser, ValueEnum};

use crate::{Difficulty, Square};

/// A command to be sent to the engine.
#[derive(Debug, Clone, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<ENGINE COMMAND>")
)]
pub enum EngineCommand {
    /// Let the engine pick and play a move for the side on turn.
    Ai {
        /// The difficulty tier to select the move with.
        #[arg(default_value = "medium")]
        difficulty: Difficulty,
    },

    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Print an evaluation of the current position for the side on turn.
    Eval,

    /// Quit the engine.
    #[command(alias = "quit")]
    Exit,

    /// Generate and print a FEN string for the current position.
    Fen,

    /// Print every move played so far, oldest first.
    History,

    /// Show all legal moves in the current position, or for a specific piece.
    Moves {
        /// The square whose piece to enumerate moves for.
        square: Option<Square>,
    },

    /// Start a new game from the standard starting position.
    #[command(alias = "reset")]
    New,

    /// Perform a perft on the current position at the supplied depth, printing per-move and total node counts.
    Perft { depth: usize },

    /// Replace the current game with a position parsed from a FEN string.
    Position {
        /// The FEN fields, like `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`.
        #[arg(num_args = 1.., required = true)]
        fen: Vec<String>,
    },

    /// Apply a move in coordinate notation, like `e2e4` or `e7e8q`.
    #[command(alias = "mv")]
    Play { mv_string: String },

    /// Print the game status and the side to move.
    Status,
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    /// Attempt to parse an [`EngineCommand`] from a line of input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}

impl ValueEnum for Difficulty {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Expert,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        // Each tier can also be given by its first letter
        let name = self.name();
        Some(PossibleValue::new(name).alias(&name[..1]))
    }
}
