use crate::core::{commands::CommandTable, help};
use anyhow::Result;
use colored::*;

/// Prints the help title followed by every entry, or just the requested one.
pub fn handle(table: &CommandTable, topics: &[String]) -> Result<()> {
    let entries = help::render_entries(table, topics)?;

    println!("{}", t!("help.title").yellow().bold());
    for entry in entries {
        println!("{}", entry);
    }
    Ok(())
}
