// src/core/help.rs

use crate::core::commands::CommandTable;
use crate::models::{HelpEntry, HelpText};
use thiserror::Error;

const MAIN_PAD: usize = 3;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HelpError {
    #[error("There is no command named '{0}'.")]
    UnknownTopic(String),
}

/// Localized help for commands that have their own entry.
pub fn known_help(name: &str) -> Option<HelpText> {
    let help = match name {
        "new" => HelpText::new(t!("help.new.description"))
            .arg("<app-name>", t!("help.new.arg.app_name"))
            .arg("shortcut list", t!("help.new.arg.shortcut_list")),
        "localize" => HelpText::new(t!("help.localize.description")),
        "globalize" => HelpText::new(t!("help.globalize.description")),
        "build" => HelpText::new(t!("help.build.description")),
        "help" => HelpText::new(t!("help.help.description"))
            .arg("<command>", t!("help.help.arg.command")),
        _ => return None,
    };
    Some(help)
}

/// All listed commands, built-ins and known scripts first, each group by name.
pub fn collect_entries(table: &CommandTable) -> Vec<HelpEntry> {
    let mut entries: Vec<HelpEntry> = table
        .builtins()
        .map(|cmd| HelpEntry {
            name: cmd.name.to_string(),
            help: known_help(cmd.name).unwrap_or_default(),
            script_help: false,
        })
        .collect();

    for script in table.scripts() {
        if entries.iter().any(|entry| entry.name == script.name) {
            continue;
        }
        let script_line = format!("{} {}", t!("help.script.prefix"), script.script);
        let entry = match known_help(&script.name) {
            Some(mut help) => {
                let description = help.description.unwrap_or_default();
                help.description = Some(format!("{}\n{}", description, script_line));
                HelpEntry {
                    name: script.name.clone(),
                    help,
                    script_help: false,
                }
            }
            None => HelpEntry {
                name: script.name.clone(),
                help: HelpText::new(script_line),
                script_help: true,
            },
        };
        entries.push(entry);
    }

    entries.sort_by(|a, b| {
        a.script_help
            .cmp(&b.script_help)
            .then_with(|| a.name.cmp(&b.name))
    });
    entries
}

/// Formats one entry: the indented name, its description lines and an
/// aligned argument table.
pub fn render_entry(entry: &HelpEntry) -> String {
    let indent = " ".repeat(MAIN_PAD * 2);
    let mut out = format!("\n{}{}\n", " ".repeat(MAIN_PAD), entry.name);

    if let Some(description) = entry.help.description.as_deref().filter(|d| !d.is_empty()) {
        for line in description.split('\n') {
            out.push_str(&format!("{}{}\n", indent, line));
        }
    }

    if !entry.help.args.is_empty() {
        let width = entry
            .help
            .args
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);
        out.push('\n');
        for (name, description) in &entry.help.args {
            out.push_str(&format!("{}{:<width$} - {}\n", indent, name, description));
        }
    }

    out.trim_end().to_string()
}

/// Renders the entries to show for `help [topic]`. Only the first topic counts.
pub fn render_entries(table: &CommandTable, topics: &[String]) -> Result<Vec<String>, HelpError> {
    let entries = collect_entries(table);
    match topics.first() {
        Some(topic) => entries
            .iter()
            .find(|entry| &entry.name == topic)
            .map(|entry| vec![render_entry(entry)])
            .ok_or_else(|| HelpError::UnknownTopic(topic.clone())),
        None => Ok(entries.iter().map(render_entry).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Manifest;

    fn table(scripts: &[(&str, &str)]) -> CommandTable {
        let manifest = Manifest {
            scripts: scripts
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        CommandTable::new(Some(&manifest))
    }

    fn names(entries: &[HelpEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_entries_outside_a_project() {
        let entries = collect_entries(&CommandTable::new(None));
        assert_eq!(names(&entries), vec!["globalize", "help", "new"]);
    }

    #[test]
    fn test_script_entries_sort_after_described_ones() {
        let entries = collect_entries(&table(&[
            ("start", "webpack serve"),
            ("build", "webpack"),
            ("analyze", "webpack --analyze"),
        ]));
        assert_eq!(
            names(&entries),
            vec!["build", "globalize", "help", "localize", "new", "analyze", "start"]
        );
    }

    #[test]
    fn test_known_script_keeps_its_description() {
        let entries = collect_entries(&table(&[("build", "webpack  --mode=production")]));
        let build = entries.iter().find(|e| e.name == "build").unwrap();
        assert!(!build.script_help);
        assert_eq!(
            build.help.description.as_deref(),
            Some("Builds the app.\nnpm script: webpack --mode=production")
        );
    }

    #[test]
    fn test_script_named_like_a_builtin_is_not_listed_twice() {
        let entries = collect_entries(&table(&[("new", "echo custom")]));
        assert_eq!(entries.iter().filter(|e| e.name == "new").count(), 1);
    }

    #[test]
    fn test_render_entry_with_arguments() {
        let entry = HelpEntry {
            name: "new".to_string(),
            help: HelpText::new("Creates things.\nSecond line.")
                .arg("<app-name>", "Name")
                .arg("shortcut list", "Shortcuts"),
            script_help: false,
        };
        let expected = concat!(
            "\n   new\n",
            "      Creates things.\n",
            "      Second line.\n",
            "\n",
            "      <app-name>    - Name\n",
            "      shortcut list - Shortcuts",
        );
        assert_eq!(render_entry(&entry), expected);
    }

    #[test]
    fn test_render_entry_without_description() {
        let entry = HelpEntry {
            name: "bare".to_string(),
            help: HelpText::default(),
            script_help: false,
        };
        assert_eq!(render_entry(&entry), "\n   bare");
    }

    #[test]
    fn test_topic_selects_a_single_entry() {
        let rendered = render_entries(&table(&[]), &["help".to_string()]).unwrap();
        assert_eq!(rendered.len(), 1);
        assert!(rendered.first().unwrap().starts_with("\n   help\n"));
    }

    #[test]
    fn test_unknown_topic_is_an_error() {
        let err = render_entries(&CommandTable::new(None), &["deploy".to_string()]).unwrap_err();
        assert_eq!(err, HelpError::UnknownTopic("deploy".to_string()));
    }
}
