use std::path::Path;

use crate::io::task_io::{TASK_FILE, write_starter_file};

/// Create a starter task file in the current directory.
pub fn cmd_init() -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(TASK_FILE);
    write_starter_file(path)?;
    println!("created {}", TASK_FILE);
    Ok(())
}
