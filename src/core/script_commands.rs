// src/core/script_commands.rs

use crate::models::{Manifest, ScriptCommand};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A token is a run of quoted strings and bare non-space characters.
    static ref SCRIPT_TOKEN: Regex =
        Regex::new(r#"("[^"]*"|'[^']*'|\S+)+"#).expect("script token pattern is valid");
}

/// One `npm run <name>` command per entry of the manifest's `scripts` table.
pub fn script_commands(manifest: &Manifest) -> Vec<ScriptCommand> {
    manifest
        .scripts
        .iter()
        .map(|(name, script)| ScriptCommand {
            name: name.clone(),
            script: normalize_script(script),
        })
        .collect()
}

/// Collapses the whitespace between a script's tokens to single spaces.
pub fn normalize_script(script: &str) -> String {
    SCRIPT_TOKEN
        .captures_iter(script)
        .filter_map(|caps| caps.get(1))
        .map(|token| token.as_str())
        .filter(|token| !token.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(
            normalize_script("  webpack \t --mode=production\n"),
            "webpack --mode=production"
        );
    }

    #[test]
    fn test_normalize_keeps_quoted_tokens_whole() {
        assert_eq!(
            normalize_script(r#"echo   "hello   world"  'a  b'"#),
            r#"echo "hello   world" 'a  b'"#
        );
    }

    #[test]
    fn test_each_script_becomes_an_npm_run_command() {
        let mut scripts = BTreeMap::new();
        scripts.insert("build".to_string(), "webpack  --mode=production".to_string());
        let commands = script_commands(&Manifest { scripts });

        assert_eq!(commands.len(), 1);
        let build = commands.first().unwrap();
        assert_eq!(build.name, "build");
        assert_eq!(build.script, "webpack --mode=production");
        assert_eq!(build.program(), "npm");
        assert_eq!(build.args(), vec!["run", "build"]);
    }
}
