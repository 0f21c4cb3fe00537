// src/system/shebang.rs

use crate::constants::SHEBANG_READ_LIMIT;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Returns the interpreter named by the file's `#!` line, if it has one.
///
/// Read failures are treated as "no shebang". For `#!/usr/bin/env node` the
/// interpreter is `node`; otherwise it is the binary's file name followed by its
/// single argument, e.g. `sh -e`.
pub fn read_interpreter(path: &Path) -> Option<String> {
    let head = read_head(path)?;
    parse_shebang(&head)
}

fn read_head(path: &Path) -> Option<Vec<u8>> {
    let file = File::open(path).ok()?;
    let mut head = Vec::with_capacity(SHEBANG_READ_LIMIT);
    file.take(SHEBANG_READ_LIMIT as u64)
        .read_to_end(&mut head)
        .ok()?;
    Some(head)
}

/// Parses the interpreter out of the leading bytes of a script.
pub fn parse_shebang(head: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(head);
    let line = text.lines().next()?.trim_end_matches('\r');
    let directive = line.strip_prefix("#!")?;
    let directive = directive.strip_prefix(' ').unwrap_or(directive);

    let mut tokens = directive.split(' ');
    let binary = tokens
        .next()
        .and_then(|program| program.rsplit('/').next())
        .filter(|binary| !binary.is_empty())?;
    let arg = tokens.next().filter(|a| !a.is_empty());

    if binary == "env" {
        // `env` alone names no interpreter.
        return arg.map(str::to_string);
    }
    match arg {
        Some(arg) => Some(format!("{} {}", binary, arg)),
        None => Some(binary.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn script(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_env_shebang_yields_the_real_interpreter() {
        let file = script(b"#!/usr/bin/env node\nconsole.log('hi');\n");
        assert_eq!(read_interpreter(file.path()).as_deref(), Some("node"));
    }

    #[test]
    fn test_plain_shebang_yields_binary_name() {
        let file = script(b"#!/bin/sh\necho hi\n");
        assert_eq!(read_interpreter(file.path()).as_deref(), Some("sh"));
    }

    #[test]
    fn test_shebang_argument_is_kept() {
        assert_eq!(parse_shebang(b"#!/bin/bash -e\n").as_deref(), Some("bash -e"));
        assert_eq!(parse_shebang(b"#! /usr/bin/python3 -u\r\n").as_deref(), Some("python3 -u"));
    }

    #[test]
    fn test_env_without_argument_yields_none() {
        assert_eq!(parse_shebang(b"#!/usr/bin/env\n"), None);
        assert_eq!(parse_shebang(b"#!/usr/bin/env  node\n"), None);
    }

    #[test]
    fn test_missing_directive_yields_none() {
        let file = script(b"echo no shebang here\n");
        assert_eq!(read_interpreter(file.path()), None);
        assert_eq!(parse_shebang(b"# !/bin/sh"), None);
        assert_eq!(parse_shebang(b"#!\n"), None);
    }

    #[test]
    fn test_short_and_empty_files_yield_none() {
        assert_eq!(read_interpreter(script(b"#").path()), None);
        assert_eq!(read_interpreter(script(b"").path()), None);
    }

    #[test]
    fn test_unreadable_file_yields_none() {
        assert_eq!(read_interpreter(Path::new("definitely/not/here.sh")), None);
    }

    #[test]
    fn test_only_the_first_bytes_are_inspected() {
        let mut content = vec![b' '; SHEBANG_READ_LIMIT];
        content.extend_from_slice(b"#!/bin/sh\n");
        assert_eq!(read_interpreter(script(&content).path()), None);
    }
}
