mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::cli::commands::{Cli, Commands, ListArgs};
use crate::cli::output::*;
use crate::io::task_io;
use crate::model::tree::TaskTree;
use crate::view::{render_flat, render_hierarchy};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let now = resolve_now(cli.at.as_deref())?;
    let tree = load_tree(cli.file.as_deref())?;

    match cli.command {
        // No subcommand → default outline
        None => cmd_list(ListArgs::default(), json, &tree, now),
        Some(Commands::List(args)) => cmd_list(args, json, &tree, now),
        Some(Commands::Flat) => cmd_flat(json, &tree, now),
        // Init is handled in main.rs before file discovery
        Some(Commands::Init) => unreachable!("init dispatched in main"),
    }
}

/// Parse the `--at` override, defaulting to the current time.
fn resolve_now(at: Option<&str>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match at {
        None => Ok(Utc::now()),
        Some(text) => {
            let parsed = DateTime::parse_from_rfc3339(text)
                .map_err(|e| format!("invalid --at timestamp '{}': {}", text, e))?;
            Ok(parsed.with_timezone(&Utc))
        }
    }
}

fn load_tree(file: Option<&str>) -> Result<TaskTree, Box<dyn std::error::Error>> {
    let path: PathBuf = match file {
        Some(f) => Path::new(f).to_path_buf(),
        None => task_io::discover_file(&std::env::current_dir()?)?,
    };
    Ok(task_io::load_tree(&path)?)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(
    args: ListArgs,
    json: bool,
    tree: &TaskTree,
    now: DateTime<Utc>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = render_hierarchy(tree, now, args.all);
    if json {
        println!("{}", serde_json::to_string_pretty(&hierarchy_to_json(&rows))?);
    } else {
        for line in format_hierarchy(&rows) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_flat(
    json: bool,
    tree: &TaskTree,
    now: DateTime<Utc>,
) -> Result<(), Box<dyn std::error::Error>> {
    let view = render_flat(tree, now);
    if json {
        println!("{}", serde_json::to_string_pretty(&flat_to_json(&view))?);
    } else {
        for line in format_flat(&view) {
            println!("{}", line);
        }
    }
    Ok(())
}
