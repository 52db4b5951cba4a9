use agenda::cli::commands::{Cli, Commands};
use agenda::cli::handlers;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            // Init is handled before file discovery
            if let Err(e) = handlers::cmd_init() {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        _ => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
