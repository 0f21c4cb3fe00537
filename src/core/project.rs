// src/core/project.rs

use crate::{constants::MANIFEST_FILENAME, models::Manifest};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Could not read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{0}' is empty")]
    Empty(PathBuf),
    #[error("Could not parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and parses the manifest in `dir`.
pub fn read_manifest(dir: &Path) -> Result<Manifest, ManifestError> {
    let path = dir.join(MANIFEST_FILENAME);
    let contents = fs::read_to_string(&path).map_err(|source| ManifestError::Read {
        path: path.clone(),
        source,
    })?;
    if contents.is_empty() {
        return Err(ManifestError::Empty(path));
    }
    serde_json::from_str(&contents).map_err(|source| ManifestError::Parse { path, source })
}

/// Loads the manifest in `dir`, treating every failure as "no project here".
pub fn load_manifest(dir: &Path) -> Option<Manifest> {
    match read_manifest(dir) {
        Ok(manifest) => Some(manifest),
        Err(e @ ManifestError::Read { .. }) => {
            log::debug!("No project manifest: {}", e);
            None
        }
        Err(e) => {
            log::warn!("Ignoring project manifest. {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(contents: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), contents).unwrap();
        dir
    }

    #[test]
    fn test_scripts_are_loaded() {
        let dir = project(r#"{ "name": "app", "scripts": { "build": "webpack", "test": "jest" } }"#);
        let manifest = load_manifest(dir.path()).unwrap();
        assert_eq!(manifest.scripts.len(), 2);
        assert_eq!(manifest.scripts.get("build").map(String::as_str), Some("webpack"));
    }

    #[test]
    fn test_manifest_without_scripts_is_still_a_project() {
        let dir = project(r#"{ "name": "app" }"#);
        let manifest = load_manifest(dir.path()).unwrap();
        assert!(manifest.scripts.is_empty());
    }

    #[test]
    fn test_missing_manifest_is_absent() {
        let dir = TempDir::new().unwrap();
        assert!(load_manifest(dir.path()).is_none());
        assert!(matches!(read_manifest(dir.path()), Err(ManifestError::Read { .. })));
    }

    #[test]
    fn test_empty_or_invalid_manifest_is_absent() {
        assert!(matches!(read_manifest(project("").path()), Err(ManifestError::Empty(_))));
        assert!(load_manifest(project("{ not json").path()).is_none());
        assert!(load_manifest(project("null").path()).is_none());
        assert!(load_manifest(project(r#"{ "scripts": { "build": 1 } }"#).path()).is_none());
    }
}
