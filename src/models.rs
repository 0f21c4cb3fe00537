// src/models.rs

use crate::constants::PACKAGE_MANAGER;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

// --- SPAWNING MODELS ---
// A request goes in, the planner turns it into a plan, the runner turns the
// plan into exactly one outcome.

/// Caller-supplied knobs for a single spawn. Built once and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnOptions {
    /// Working directory for the child. Relative paths are taken from the host cwd.
    pub cwd: Option<PathBuf>,
    /// Replaces the inherited environment entirely when set.
    pub env: Option<HashMap<String, String>>,
    /// Run the command line through the host shell instead of spawning directly.
    pub shell: bool,
}

impl SpawnOptions {
    /// Returns a copy with the working directory set.
    pub fn with_cwd(self, cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
            ..self
        }
    }

    /// Returns a copy with an explicit environment.
    pub fn with_env(self, env: HashMap<String, String>) -> Self {
        Self {
            env: Some(env),
            ..self
        }
    }

    /// Returns a copy with explicit shell execution toggled.
    pub fn with_shell(self, shell: bool) -> Self {
        Self { shell, ..self }
    }
}

/// A logical command as the caller asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub command: String,
    pub args: Vec<String>,
    pub options: SpawnOptions,
}

impl SpawnRequest {
    /// Creates a request with default options.
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            options: SpawnOptions::default(),
        }
    }

    /// Replaces the options of this request.
    pub fn with_options(self, options: SpawnOptions) -> Self {
        Self { options, ..self }
    }
}

/// The concrete (program, arguments, options) triple handed to the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnPlan {
    pub command: String,
    pub args: Vec<String>,
    pub options: SpawnOptions,
    /// Arguments are already quoted for `cmd.exe` and must not be quoted again.
    pub verbatim_args: bool,
    /// Absolute path of the executable the original command resolved to, if any.
    pub file: Option<PathBuf>,
    pub original: SpawnRequest,
}

impl SpawnPlan {
    /// A plan that runs the request exactly as given.
    pub fn passthrough(request: SpawnRequest) -> Self {
        Self {
            command: request.command.clone(),
            args: request.args.clone(),
            options: request.options.clone(),
            verbatim_args: false,
            file: None,
            original: request,
        }
    }

    /// Whether planning located an executable for the original command.
    pub fn was_resolved(&self) -> bool {
        self.file.is_some()
    }
}

/// Why a process never produced a regular exit.
#[derive(Debug)]
pub enum SpawnFailure {
    /// The command interpreter reported a missing program (see `classify_exit`).
    CommandNotFound,
    /// The OS refused to create the process.
    Io(std::io::Error),
}

/// Terminal state of one spawn request.
#[derive(Debug)]
pub enum ProcessOutcome {
    Success,
    ExitFailure {
        code: Option<i32>,
        signal: Option<String>,
    },
    SpawnError {
        reason: SpawnFailure,
    },
}

// --- COMMAND TABLE MODELS ---

/// A built-in command and the process invocation it maps to.
#[derive(Debug)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub program: &'static str,
    pub args: &'static [&'static str],
    /// Append the user's arguments to `args`.
    pub pass_through_args: bool,
    /// Only offered when a project manifest is present.
    pub requires_project: bool,
}

/// A command derived from an entry in the manifest's `scripts` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCommand {
    pub name: String,
    /// The script body, whitespace-normalized for display.
    pub script: String,
}

impl ScriptCommand {
    /// Program that runs the script.
    pub fn program(&self) -> &'static str {
        PACKAGE_MANAGER
    }

    /// Fixed arguments that select the script.
    pub fn args(&self) -> Vec<String> {
        vec!["run".to_string(), self.name.clone()]
    }
}

/// Result of looking a name up in the command table.
#[derive(Debug, Clone, Copy)]
pub enum CommandEntry<'a> {
    Builtin(&'static CommandDefinition),
    Script(&'a ScriptCommand),
    Unknown,
}

/// What the dispatcher should do with an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Render help, optionally for the given topics only.
    Help { topics: Vec<String> },
    /// Run an external program.
    Spawn { program: String, args: Vec<String> },
}

/// The command name and trailing arguments taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
}

// --- `package.json` MODEL ---

/// The subset of `package.json` the dispatcher cares about.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Manifest {
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
}

// --- HELP MODELS ---

/// Description and argument list shown for a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpText {
    pub description: Option<String>,
    /// `(name, description)` pairs, in display order.
    pub args: Vec<(String, String)>,
}

impl HelpText {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.args.push((name.into(), description.into()));
        self
    }
}

/// One command as listed by `help`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub name: String,
    pub help: HelpText,
    /// Help was synthesized from the script body; such entries sort last.
    pub script_help: bool,
}
