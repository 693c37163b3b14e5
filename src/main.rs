use clap::Parser;
use stoat::{Engine, EngineCommand};

fn main() {
    let mut engine = Engine::new();

    // Skip the executable name
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    // Any arguments are treated as a single command to execute before the
    // input loop starts, like `stoat moves` or `stoat perft 4`
    if !args.is_empty() {
        match EngineCommand::try_parse_from(&args) {
            Ok(cmd) => engine.send_command(cmd),
            Err(e) => {
                // `--help` and `--version` land here too; clap renders them
                println!("{e}");
                return;
            }
        }
    }

    if let Err(e) = engine.run() {
        eprintln!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
    }
}
