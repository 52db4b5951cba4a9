use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "agn", about = concat!("[!] agenda v", env!("CARGO_PKG_VERSION"), " - what is due, what is late, what is done"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task file to use instead of discovering agenda.json
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<String>,

    /// Evaluate statuses at this RFC 3339 time instead of now
    #[arg(long = "at", global = true, value_name = "TIMESTAMP")]
    pub at: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a starter agenda.json in the current directory
    Init,
    /// Show the nested outline (the default when no command is given)
    List(ListArgs),
    /// Show time-sensitive tasks grouped by Late / Due / Complete
    Flat,
}

#[derive(Args, Default)]
pub struct ListArgs {
    /// Include done tasks whose visibility window has expired
    #[arg(long)]
    pub all: bool,
}
