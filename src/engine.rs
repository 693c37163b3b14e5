/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io,
    sync::mpsc::{channel, Receiver, Sender},
    thread,
};

use anyhow::{bail, Context, Result};

use crate::{
    evaluate, legal_moves, print_perft, EngineCommand, GameSession, Move, Square,
};

/// The Stoat chess engine.
///
/// Owns a single [`GameSession`] and executes [`EngineCommand`]s against it,
/// one at a time. Commands arrive over a channel, fed by a thread reading
/// `stdin`; every select-then-execute step therefore runs on one thread and
/// never races a concurrent move submission.
#[derive(Debug)]
pub struct Engine {
    /// The current game, as known to the engine.
    ///
    /// This is modified whenever moves are played or new positions are given,
    /// and is reset whenever the engine is told to start a new game.
    session: GameSession,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`].
    pub fn new() -> Self {
        let (sender, receiver) = channel();

        Self {
            session: GameSession::new(),
            sender,
            receiver,
        }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Sends an [`EngineCommand`] to the engine to be executed.
    pub fn send_command(&self, command: EngineCommand) {
        // Safe unwrap: `send` can only fail if its corresponding receiver doesn't exist,
        //  and the only way our engine's `Receiver` can no longer exist is when our engine
        //  doesn't exist either, so this is always safe.
        self.sender.send(command).unwrap();
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    pub fn run(&mut self) -> Result<()> {
        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                eprintln!("Input handler thread stopping after fatal error: {err}");
            }
        });

        // Loop on user input
        while let Ok(cmd) = self.receiver.recv() {
            match cmd {
                EngineCommand::Ai { difficulty } => match self.session.ai_move(difficulty) {
                    Some(mv) => self.play_move(mv),
                    None => println!("(no legal moves)"),
                },

                EngineCommand::Display => println!("{}", self.session),

                EngineCommand::Eval => {
                    let position = self.session.position();
                    println!("{}", evaluate(position, position.side_to_move()));
                }

                EngineCommand::Fen => println!("{}", self.session.position()),

                EngineCommand::History => {
                    for (i, record) in self.session.history().iter().enumerate() {
                        println!("{}. {record}", i + 1);
                    }
                }

                EngineCommand::Moves { square } => self.moves(square),

                EngineCommand::New => self.session.reset(),

                EngineCommand::Perft { depth } => {
                    print_perft(self.session.position(), depth);
                }

                EngineCommand::Position { fen } => match GameSession::from_fen(&fen.join(" ")) {
                    Ok(session) => self.session = session,
                    Err(e) => eprintln!("Error: {e}"),
                },

                EngineCommand::Play { mv_string } => match Move::from_uci(&mv_string) {
                    Ok(mv) => self.play_move(mv),
                    Err(e) => eprintln!("Error: {e}"),
                },

                EngineCommand::Status => println!(
                    "{} to move, status: {}",
                    self.session.side_to_move().name(),
                    self.session.status()
                ),

                EngineCommand::Exit => break,
            };
        }

        Ok(())
    }

    /// Applies `mv` to the session, printing the recorded notation, or the
    /// rejection if the move is not legal. The session is unchanged on error.
    fn play_move(&mut self, mv: Move) {
        match self.session.apply_move(mv.from, mv.to, mv.promotion) {
            Ok(record) => {
                println!("{record}");
                if self.session.status().is_game_over() {
                    println!("status: {}", self.session.status());
                }
            }
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    /// Executes the `moves` command: all legal moves of the side on turn, or
    /// the legal destinations of the piece on `square`.
    fn moves(&self, square: Option<Square>) {
        let moves_string = if let Some(square) = square {
            let destinations = self.session.legal_destinations(square);
            if destinations.is_empty() {
                String::from("(none)")
            } else {
                destinations
                    .into_iter()
                    .map(|to| to.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        } else {
            let moves = legal_moves(self.session.position(), self.session.side_to_move());
            if moves.is_empty() {
                String::from("(none)")
            } else {
                moves
                    .into_iter()
                    .map(|mv| mv.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        };

        println!("{moves_string}");
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(2048);

    loop {
        // Clear the buffer, read input, and trim the trailing newline
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line when parsing commands")?;

        // For ctrl + d
        if 0 == bytes {
            // Send the Exit command and stop this thread
            sender
                .send(EngineCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            bail!("Engine received input of 0 bytes and is quitting");
        }

        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match buf.parse::<EngineCommand>() {
            // If successful, send the command to the engine
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to engine")?,

            // If an invalid command was received, just print the error and continue running
            Err(err) => eprintln!("{err}"),
        }
    }
}
