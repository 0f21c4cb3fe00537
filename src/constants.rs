// src/constants.rs

/// The project manifest read from the current directory.
pub const MANIFEST_FILENAME: &str = "package.json";

/// The package manager used for script commands and installs.
pub const PACKAGE_MANAGER: &str = "npm";

/// Number of leading bytes inspected when looking for a `#!` line.
pub const SHEBANG_READ_LIMIT: usize = 150;

/// Executable extensions assumed on Windows-like hosts when `PATHEXT` is unset.
pub const DEFAULT_PATHEXT: &str = ".EXE;.CMD;.BAT;.COM";

/// Command interpreter used when `COMSPEC` is unset.
pub const DEFAULT_COMSPEC: &str = "cmd.exe";

/// Flags that make `cmd.exe` run a single verbatim command line and exit.
/// `/d` skips AutoRun, `/s` keeps the outer quotes literal, `/c` runs and exits.
pub const COMSPEC_FLAGS: [&str; 3] = ["/d", "/s", "/c"];

/// POSIX shell used for explicitly requested shell execution.
pub const POSIX_SHELL: &str = "/bin/sh";

/// The pseudo-program that routes a command to the help renderer.
pub const HELP_COMMAND: &str = "help";
