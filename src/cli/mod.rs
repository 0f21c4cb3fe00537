use crate::constants::HELP_COMMAND;
use crate::models::Invocation;
use clap::Parser;

pub mod dispatcher;
pub mod handlers;

/// jwx: scaffolds, builds and runs Aurelia projects through npm and npx.
///
/// Every token after the command name is forwarded untouched, so clap's own
/// `--help`/`--version` handling is switched off.
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// The command to run. Defaults to `help`.
    #[arg(allow_hyphen_values = true)]
    pub command: Option<String>,

    /// Arguments passed on to the command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    pub fn into_invocation(self) -> Invocation {
        Invocation {
            command: self.command.unwrap_or_else(|| HELP_COMMAND.to_string()),
            args: self.args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(argv: &[&str]) -> Invocation {
        Cli::try_parse_from(argv).unwrap().into_invocation()
    }

    #[test]
    fn test_no_command_means_help() {
        let inv = invocation(&["jwx"]);
        assert_eq!(inv.command, "help");
        assert!(inv.args.is_empty());
    }

    #[test]
    fn test_flags_after_the_command_are_forwarded() {
        let inv = invocation(&["jwx", "build", "--watch", "-p", "3000"]);
        assert_eq!(inv.command, "build");
        assert_eq!(inv.args, vec!["--watch", "-p", "3000"]);
    }

    #[test]
    fn test_plain_arguments_are_forwarded() {
        let inv = invocation(&["jwx", "new", "my-app"]);
        assert_eq!(inv.command, "new");
        assert_eq!(inv.args, vec!["my-app"]);
    }
}
