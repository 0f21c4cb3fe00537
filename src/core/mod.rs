//! # Core Logic
//!
//! Everything that decides *what* jwx does, independent of how processes are
//! started.
//!
//! - **`project`**: reads the `package.json` manifest of the current directory.
//! - **`script_commands`**: turns manifest scripts into `npm run` commands.
//! - **`commands`**: the built-in registry and the per-directory command table.
//! - **`help`**: builds and formats the help listing.

pub mod commands;
pub mod help;
pub mod project;
pub mod script_commands;
