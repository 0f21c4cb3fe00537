// src/system/resolver.rs

use crate::constants::DEFAULT_PATHEXT;
use crate::system::platform::{HostPlatform, UserIdentity};
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A `PATHEXT` value that disables extension filtering: only the bare name is
/// tried and any existing file counts.
pub const ANY_EXTENSION: &str = ";";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    #[error("not found: {command}")]
    NotFound { command: String },
}

/// Where and how to look for an executable.
///
/// The working directory is part of the context instead of being read from the
/// process, so resolving against a custom directory never touches global state.
#[derive(Debug, Clone)]
pub struct SearchContext {
    pub platform: HostPlatform,
    /// Raw `PATH` value, split on the platform delimiter at search time.
    pub path: String,
    /// Raw `PATHEXT` value (`;`-separated). Only meaningful on Windows-like hosts.
    pub pathext: String,
    pub cwd: PathBuf,
    pub identity: UserIdentity,
}

impl SearchContext {
    pub fn new(platform: HostPlatform, cwd: impl Into<PathBuf>, identity: UserIdentity) -> Self {
        Self {
            platform,
            path: String::new(),
            pathext: if platform.is_windows_like() {
                DEFAULT_PATHEXT.to_string()
            } else {
                String::new()
            },
            cwd: cwd.into(),
            identity,
        }
    }

    pub fn with_path(self, path: Option<&str>) -> Self {
        Self {
            path: path.unwrap_or_default().to_string(),
            ..self
        }
    }

    /// Sets the extension list. Empty or missing values keep the default.
    pub fn with_pathext(self, pathext: Option<&str>) -> Self {
        match pathext {
            Some(value) if !value.is_empty() && self.platform.is_windows_like() => Self {
                pathext: value.to_string(),
                ..self
            },
            _ => self,
        }
    }

    /// Directories to scan, in order. Windows-like hosts look in the cwd first.
    pub fn search_directories(&self) -> Vec<String> {
        let mut directories: Vec<String> = self
            .path
            .split(self.platform.path_delimiter())
            .map(str::to_string)
            .collect();
        if self.platform.is_windows_like() {
            directories.insert(0, self.cwd.to_string_lossy().into_owned());
        }
        directories
    }

    /// Suffixes appended to `command` for each directory, in order.
    pub fn candidate_extensions(&self, command: &str) -> Vec<String> {
        if !self.platform.is_windows_like() {
            return vec![String::new()];
        }
        let mut extensions: Vec<String> = self.pathext.split(';').map(str::to_string).collect();
        // A command that already looks like `name.ext` is tried as-is first.
        if command.contains('.') && extensions.first().is_some_and(|e| !e.is_empty()) {
            extensions.insert(0, String::new());
        }
        extensions
    }
}

/// Locates `command` on disk.
///
/// Commands containing a path separator are tested literally (relative to the
/// context cwd) and never searched for. The returned path is always absolute.
pub fn resolve(command: &str, ctx: &SearchContext) -> Result<PathBuf, ResolveError> {
    let has_separator = command.chars().any(|c| ctx.platform.is_path_separator(c));
    let directories = if has_separator {
        vec![String::new()]
    } else {
        ctx.search_directories()
    };
    let extensions = ctx.candidate_extensions(command);

    for directory in &directories {
        let directory = strip_quotes(directory);
        let base = if directory.is_empty() {
            PathBuf::from(command)
        } else {
            Path::new(directory).join(command)
        };

        for extension in &extensions {
            let mut candidate = base.clone().into_os_string();
            candidate.push(extension);
            let candidate: PathBuf = ctx.cwd.join(candidate).components().collect();

            if is_executable(&candidate, ctx) {
                log::trace!("Resolved '{}' to '{}'.", command, candidate.display());
                return Ok(candidate);
            }
        }
    }

    log::trace!("Could not resolve '{}' in {} directories.", command, directories.len());
    Err(ResolveError::NotFound {
        command: command.to_string(),
    })
}

fn strip_quotes(entry: &str) -> &str {
    entry
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(entry)
}

/// Executability test for a single candidate. Missing files are simply not executable.
pub fn is_executable(path: &Path, ctx: &SearchContext) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if ctx.platform.is_windows() {
        metadata.is_file() && matches_pathext(path, &ctx.pathext)
    } else {
        posix_executable(&metadata, ctx.identity)
    }
}

/// True when `path` ends with one of the `;`-separated extensions.
/// An empty list, or an empty entry in it, accepts everything.
pub fn matches_pathext(path: &Path, pathext: &str) -> bool {
    if pathext.is_empty() {
        return true;
    }
    let parts: Vec<&str> = pathext.split(';').collect();
    if parts.contains(&"") {
        return true;
    }
    let name = path.to_string_lossy().to_lowercase();
    parts
        .iter()
        .any(|ext| name.ends_with(&ext.to_lowercase()))
}

/// POSIX permission bits check against the invoking user's ownership.
pub fn mode_grants_execute(mode: u32, owner_uid: u32, owner_gid: u32, user: UserIdentity) -> bool {
    (mode & 0o001) != 0
        || ((mode & 0o010) != 0 && owner_gid == user.gid)
        || ((mode & 0o100) != 0 && owner_uid == user.uid)
        || ((mode & 0o110) != 0 && user.is_root())
}

#[cfg(unix)]
fn posix_executable(metadata: &Metadata, user: UserIdentity) -> bool {
    use std::os::unix::fs::MetadataExt;
    metadata.is_file() && mode_grants_execute(metadata.mode(), metadata.uid(), metadata.gid(), user)
}

#[cfg(not(unix))]
fn posix_executable(metadata: &Metadata, _user: UserIdentity) -> bool {
    metadata.is_file()
}
