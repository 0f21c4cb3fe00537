// src/system/platform.rs

use crate::constants::DEFAULT_COMSPEC;
use std::collections::HashMap;
use std::path::PathBuf;

/// The flavour of host the spawning layer is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    /// Native Windows: PATHEXT executability, `cmd.exe` routing.
    Windows,
    /// A POSIX build running under Cygwin or MSYS. Searches like Windows,
    /// checks permissions like POSIX.
    WindowsLike,
    Posix,
}

impl HostPlatform {
    /// Detects the platform from the compile target and the `OSTYPE` variable.
    pub fn detect(ostype: Option<&str>) -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if matches!(ostype, Some("cygwin") | Some("msys")) {
            Self::WindowsLike
        } else {
            Self::Posix
        }
    }

    pub fn is_windows(self) -> bool {
        self == Self::Windows
    }

    /// True for every host whose shell resolves commands the Windows way.
    pub fn is_windows_like(self) -> bool {
        matches!(self, Self::Windows | Self::WindowsLike)
    }

    /// Separator between entries of `PATH` and `PATHEXT`.
    pub fn path_delimiter(self) -> char {
        if self.is_windows() { ';' } else { ':' }
    }

    /// Whether `c` separates path components for commands on this host.
    pub fn is_path_separator(self, c: char) -> bool {
        c == '/' || (self.is_windows_like() && c == '\\')
    }
}

/// Numeric identity of the running user, for POSIX permission checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserIdentity {
    pub uid: u32,
    pub gid: u32,
}

impl UserIdentity {
    #[cfg(unix)]
    pub fn current() -> Self {
        Self {
            uid: nix::unistd::getuid().as_raw(),
            gid: nix::unistd::getgid().as_raw(),
        }
    }

    #[cfg(not(unix))]
    pub fn current() -> Self {
        Self::default()
    }

    pub fn is_root(self) -> bool {
        self.uid == 0
    }
}

/// Everything the spawning layer reads from the process environment, captured once.
#[derive(Debug, Clone)]
pub struct HostContext {
    pub platform: HostPlatform,
    pub env: HashMap<String, String>,
    pub cwd: PathBuf,
    pub identity: UserIdentity,
}

impl HostContext {
    /// Snapshots the current process: environment, working directory and user.
    pub fn from_env() -> std::io::Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        let platform = HostPlatform::detect(env.get("OSTYPE").map(String::as_str));
        Ok(Self {
            platform,
            env,
            cwd: std::env::current_dir()?,
            identity: UserIdentity::current(),
        })
    }

    /// Looks up a variable in `env`, case-insensitively on Windows.
    pub fn lookup<'a>(&self, env: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
        if self.platform.is_windows() {
            env.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.as_str())
        } else {
            env.get(key).map(String::as_str)
        }
    }

    /// Looks up a variable in the captured host environment.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.lookup(&self.env, key)
    }

    /// The command interpreter used for shell routing on Windows.
    pub fn comspec(&self) -> &str {
        self.var("COMSPEC").unwrap_or(DEFAULT_COMSPEC)
    }
}
