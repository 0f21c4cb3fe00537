// src/system/escape.rs
//
// Quoting for `cmd.exe`, which uses `^` as its escape character and hands the
// rest of the line to the program's own argv parser.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref META_CHARS: Regex =
        Regex::new(r#"([()\]\[%!^"`<>&|;, *?])"#).expect("metacharacter pattern is valid");
    static ref BACKSLASHES_BEFORE_QUOTE: Regex =
        Regex::new(r#"(\\*)""#).expect("backslash-quote pattern is valid");
    static ref TRAILING_BACKSLASHES: Regex =
        Regex::new(r"(\\*)$").expect("trailing backslash pattern is valid");
}

/// Prefixes every `cmd.exe` metacharacter with `^`.
pub fn escape_meta_chars(value: &str) -> String {
    META_CHARS.replace_all(value, "^${1}").into_owned()
}

/// Quotes one argument so `cmd.exe` and the MSVC argv parser hand it back intact.
///
/// `double_escape` applies the caret pass twice, for arguments that go through
/// a `.cmd` shim and are therefore parsed by `cmd.exe` two times.
pub fn escape_argument(value: impl ToString, double_escape: bool) -> String {
    let arg = value.to_string();

    // Backslashes before a quote are literal only when doubled; the quote itself gets one.
    let arg = BACKSLASHES_BEFORE_QUOTE.replace_all(&arg, r#"${1}${1}\""#);
    // Trailing backslashes would swallow the closing quote added below.
    let arg = TRAILING_BACKSLASHES.replace(&arg, "${1}${1}");

    let quoted = format!("\"{}\"", arg);
    let escaped = escape_meta_chars(&quoted);

    if double_escape {
        escape_meta_chars(&escaped)
    } else {
        escaped
    }
}

/// Rewrites a command path the way Windows expects it: backslash separators,
/// no empty, `.` or resolvable `..` segments.
pub fn normalize_windows_path(path: &str) -> String {
    let unified = path.replace('/', "\\");

    let (prefix, rest) = if let Some(rest) = unified.strip_prefix("\\\\") {
        ("\\\\", rest)
    } else if unified.as_bytes().get(1) == Some(&b':')
        && unified.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
    {
        unified.split_at(2)
    } else {
        ("", unified.as_str())
    };
    let rooted = rest.starts_with('\\');

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('\\') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let mut normalized = String::from(prefix);
    if rooted {
        normalized.push('\\');
    }
    normalized.push_str(&segments.join("\\"));
    if !segments.is_empty() && rest.ends_with('\\') {
        normalized.push('\\');
    }
    if normalized.is_empty() {
        normalized.push('.');
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Undoes one `cmd.exe` pass: a caret makes the next character literal.
    fn cmd_unescape(line: &str) -> String {
        let mut out = String::new();
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            if c == '^' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Parses a single argument using the MSVC runtime's quoting rules.
    fn msvc_parse(arg: &str) -> String {
        let mut out = String::new();
        let mut backslashes = 0usize;
        for c in arg.chars() {
            match c {
                '\\' => backslashes += 1,
                '"' => {
                    out.push_str(&"\\".repeat(backslashes / 2));
                    if backslashes % 2 == 1 {
                        out.push('"');
                    }
                    backslashes = 0;
                }
                other => {
                    out.push_str(&"\\".repeat(backslashes));
                    backslashes = 0;
                    out.push(other);
                }
            }
        }
        out.push_str(&"\\".repeat(backslashes));
        out
    }

    #[test]
    fn test_plain_argument_is_quoted_and_caret_escaped() {
        assert_eq!(escape_argument("build", false), r#"^"build^""#);
    }

    #[test]
    fn test_spaces_and_operators_are_escaped() {
        assert_eq!(escape_argument("a b&c", false), r#"^"a^ b^&c^""#);
        assert_eq!(escape_argument("50%", false), r#"^"50^%^""#);
    }

    #[test]
    fn test_backslashes_before_quote_are_doubled() {
        // a\"b  ->  "a\\\"b"
        assert_eq!(escape_argument(r#"a\"b"#, false), r#"^"a\\\^"b^""#);
    }

    #[test]
    fn test_trailing_backslashes_are_doubled() {
        assert_eq!(escape_argument(r"C:\dir\", false), r#"^"C:\dir\\^""#);
    }

    #[test]
    fn test_double_escape_applies_the_caret_pass_twice() {
        assert_eq!(escape_argument("a&b", true), r#"^^^"a^^^&b^^^""#);
        let quoted = format!("\"{}\"", "x y");
        assert_eq!(
            escape_argument("x y", true),
            escape_meta_chars(&escape_meta_chars(&quoted))
        );
    }

    #[test]
    fn test_non_string_values_are_stringified() {
        assert_eq!(escape_argument(42, false), r#"^"42^""#);
    }

    #[test]
    fn test_round_trip_for_known_edge_cases() {
        for arg in ["hello world", r#"say "hi""#, r#"a\"b"#, r"trailing\\", "", "^%!"] {
            let escaped = escape_argument(arg, false);
            assert_eq!(msvc_parse(&cmd_unescape(&escaped)), arg, "arg: {arg:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_single_escape_survives_one_shell_pass(arg in r#"[a-z0-9 \\"^%!&|<>()*?;,`\[\]]{0,24}"#) {
            let escaped = escape_argument(&arg, false);
            prop_assert_eq!(msvc_parse(&cmd_unescape(&escaped)), arg);
        }

        #[test]
        fn prop_double_escape_survives_two_shell_passes(arg in r#"[a-z \\"&|%]{0,16}"#) {
            let escaped = escape_argument(&arg, true);
            prop_assert_eq!(msvc_parse(&cmd_unescape(&cmd_unescape(&escaped))), arg);
        }
    }

    // --- `normalize_windows_path` Tests ---

    #[test]
    fn test_normalize_converts_separators() {
        assert_eq!(normalize_windows_path("node_modules/.bin/tsc"), r"node_modules\.bin\tsc");
        assert_eq!(normalize_windows_path("C:/tools//bin/"), r"C:\tools\bin\");
    }

    #[test]
    fn test_normalize_resolves_dot_segments() {
        assert_eq!(normalize_windows_path("./a/../b"), "b");
        assert_eq!(normalize_windows_path("../x"), r"..\x");
        assert_eq!(normalize_windows_path("/../x"), r"\x");
        assert_eq!(normalize_windows_path("npm"), "npm");
        assert_eq!(normalize_windows_path(""), ".");
    }

    #[test]
    fn test_normalize_keeps_unc_prefix() {
        assert_eq!(normalize_windows_path("//server/share/x"), r"\\server\share\x");
    }
}
