//! # System Interaction Layer
//!
//! This module is the boundary between the dispatcher and the operating system.
//! It turns a logical command into a process the host can actually start.
//!
//! ## Modules
//!
//! - **`platform`**: host detection (Windows, Cygwin/MSYS, POSIX), environment
//!   snapshot and the current user's identity.
//! - **`resolver`**: locates an executable on `PATH`, honouring `PATHEXT` on
//!   Windows and permission bits elsewhere.
//! - **`shebang`**: reads the interpreter out of a script's `#!` line.
//! - **`escape`**: caret and quote escaping for `cmd.exe` command lines.
//! - **`planner`**: rewrites a spawn request into what Windows can execute,
//!   routing scripts and batch files through `cmd.exe`.
//! - **`executor`**: starts the planned process with inherited stdio, waits for
//!   it and reports a single outcome.

pub mod escape;
pub mod executor;
pub mod planner;
pub mod platform;
pub mod resolver;
pub mod shebang;
