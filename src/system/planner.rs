// src/system/planner.rs

use crate::constants::COMSPEC_FLAGS;
use crate::models::{SpawnOptions, SpawnPlan, SpawnRequest};
use crate::system::escape::{escape_argument, escape_meta_chars, normalize_windows_path};
use crate::system::platform::HostContext;
use crate::system::resolver::{self, ANY_EXTENSION, SearchContext};
use crate::system::shebang;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref NATIVE_EXECUTABLE: Regex =
        Regex::new(r"(?i)\.(?:com|exe)$").expect("executable pattern is valid");
    static ref CMD_SHIM: Regex = Regex::new(r"(?i)node_modules[\\/]\.bin[\\/][^\\/]+\.cmd$")
        .expect("cmd-shim pattern is valid");
}

/// Decides how a request is actually handed to the OS.
///
/// Outside Windows, or when the caller asked for a shell, the request runs as
/// given. On Windows the command is resolved on disk, shebang scripts are
/// redirected to their interpreter, and anything that is not a native `.exe` /
/// `.com` is wrapped into a single escaped `cmd.exe /d /s /c` line.
///
/// Resolution failures never abort planning: an unresolved command is simply
/// routed through `cmd.exe`, which then reports it at run time.
pub fn plan(request: SpawnRequest, host: &HostContext) -> SpawnPlan {
    if request.options.shell || !host.platform.is_windows() {
        return SpawnPlan::passthrough(request);
    }

    let file = resolve_command(&request.command, &request.options, host);
    let mut command = request.command.clone();
    let mut args = request.args.clone();

    let command_file = match file.as_deref().and_then(shebang::read_interpreter) {
        Some(interpreter) => {
            log::debug!(
                "'{}' is a script for '{}'; running it through the interpreter.",
                request.command,
                interpreter
            );
            if let Some(script) = &file {
                args.insert(0, script.to_string_lossy().into_owned());
            }
            command = interpreter;
            resolve_command(&command, &request.options, host)
        }
        None => file.clone(),
    };

    if let Some(executable) = command_file.as_deref().filter(|path| is_native_executable(path)) {
        log::debug!("'{}' is a native executable; spawning it directly.", executable.display());
        // The OS search would skip the cwd, so the resolved path is spawned instead.
        return SpawnPlan {
            command: executable.to_string_lossy().into_owned(),
            args,
            options: request.options.clone(),
            verbatim_args: false,
            file,
            original: request,
        };
    }

    let double_escape = command_file.as_deref().is_some_and(is_cmd_shim);
    if double_escape {
        log::debug!("'{}' is a cmd-shim; double escaping arguments.", command);
    }

    let shell_line = std::iter::once(escape_meta_chars(&normalize_windows_path(&command)))
        .chain(args.iter().map(|arg| escape_argument(arg, double_escape)))
        .collect::<Vec<_>>()
        .join(" ");
    log::debug!("Routing through the command interpreter: {}", shell_line);

    let mut shell_args: Vec<String> = COMSPEC_FLAGS.iter().map(|flag| flag.to_string()).collect();
    shell_args.push(format!("\"{}\"", shell_line));

    SpawnPlan {
        command: host.comspec().to_string(),
        args: shell_args,
        options: request.options.clone(),
        verbatim_args: true,
        file,
        original: request,
    }
}

/// Resolves `command` for the given options, first honouring PATHEXT and then
/// accepting any file with the bare name. Failures are logged and swallowed.
fn resolve_command(command: &str, options: &SpawnOptions, host: &HostContext) -> Option<PathBuf> {
    let cwd = match &options.cwd {
        Some(dir) => host.cwd.join(dir),
        None => host.cwd.clone(),
    };
    let env = options.env.as_ref().unwrap_or(&host.env);

    let ctx = SearchContext::new(host.platform, cwd, host.identity)
        .with_path(host.lookup(env, "PATH").or_else(|| host.var("PATH")))
        .with_pathext(host.var("PATHEXT"));

    resolver::resolve(command, &ctx)
        .or_else(|_| resolver::resolve(command, &ctx.clone().with_pathext(Some(ANY_EXTENSION))))
        .map_err(|e| log::debug!("{}; falling back to the command interpreter.", e))
        .ok()
}

fn is_native_executable(path: &Path) -> bool {
    NATIVE_EXECUTABLE.is_match(&path.to_string_lossy())
}

fn is_cmd_shim(path: &Path) -> bool {
    CMD_SHIM.is_match(&path.to_string_lossy())
}
