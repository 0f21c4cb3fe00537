// src/core/commands.rs

use crate::constants::{HELP_COMMAND, PACKAGE_MANAGER};
use crate::core::{project, script_commands};
use crate::models::{CommandAction, CommandDefinition, CommandEntry, Manifest, ScriptCommand};
use std::path::Path;

// --- Command Definition and Registry ---

/// Every built-in command. Script commands from the manifest are layered on top.
static BUILTIN_COMMANDS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "new",
        program: "npx",
        args: &["makes", "aurelia"],
        pass_through_args: true,
        requires_project: false,
    },
    CommandDefinition {
        name: "help",
        program: HELP_COMMAND,
        args: &[],
        pass_through_args: true,
        requires_project: false,
    },
    CommandDefinition {
        name: "localize",
        program: PACKAGE_MANAGER,
        args: &["install", "--save-dev", "jwx-"],
        pass_through_args: false,
        requires_project: true,
    },
    CommandDefinition {
        name: "globalize",
        program: PACKAGE_MANAGER,
        args: &["install", "-g", "jwx-"],
        pass_through_args: false,
        requires_project: false,
    },
];

/// Finds a built-in command by name, regardless of project state.
pub fn find_builtin(name: &str) -> Option<&'static CommandDefinition> {
    BUILTIN_COMMANDS.iter().find(|cmd| cmd.name == name)
}

/// The commands available in one working directory.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    scripts: Vec<ScriptCommand>,
    has_project: bool,
}

impl CommandTable {
    /// Builds the table from an optional project manifest.
    pub fn new(manifest: Option<&Manifest>) -> Self {
        Self {
            scripts: manifest.map(script_commands::script_commands).unwrap_or_default(),
            has_project: manifest.is_some(),
        }
    }

    /// Builds the table for the project rooted at `dir`, if any.
    pub fn load(dir: &Path) -> Self {
        Self::new(project::load_manifest(dir).as_ref())
    }

    pub fn has_project(&self) -> bool {
        self.has_project
    }

    /// Built-ins offered in this directory, in registry order.
    pub fn builtins(&self) -> impl Iterator<Item = &'static CommandDefinition> + '_ {
        BUILTIN_COMMANDS
            .iter()
            .filter(|cmd| self.has_project || !cmd.requires_project)
    }

    pub fn scripts(&self) -> &[ScriptCommand] {
        &self.scripts
    }

    /// Looks a command up by name. A script shadows a built-in of the same name.
    pub fn lookup(&self, name: &str) -> CommandEntry<'_> {
        if let Some(script) = self.scripts.iter().find(|s| s.name == name) {
            return CommandEntry::Script(script);
        }
        match self.builtins().find(|cmd| cmd.name == name) {
            Some(cmd) => CommandEntry::Builtin(cmd),
            None => CommandEntry::Unknown,
        }
    }

    /// Turns a command name and its trailing arguments into what should happen.
    ///
    /// Unknown commands fall back to the full help listing and their arguments
    /// are dropped.
    pub fn resolve(&self, name: &str, args: Vec<String>) -> CommandAction {
        let (program, mut fixed, pass_through) = match self.lookup(name) {
            CommandEntry::Builtin(cmd) => (
                cmd.program.to_string(),
                cmd.args.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
                cmd.pass_through_args,
            ),
            CommandEntry::Script(script) => (script.program().to_string(), script.args(), true),
            CommandEntry::Unknown => {
                log::debug!("Unknown command '{}'; showing help.", name);
                return CommandAction::Help { topics: Vec::new() };
            }
        };

        if pass_through {
            fixed.extend(args);
        }

        if program == HELP_COMMAND {
            CommandAction::Help { topics: fixed }
        } else {
            CommandAction::Spawn {
                program,
                args: fixed,
            }
        }
    }
}
