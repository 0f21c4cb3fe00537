use crate::{
    cli::handlers,
    core::commands::CommandTable,
    models::{CommandAction, Invocation},
    system::platform::HostContext,
};
use anyhow::Result;

/// Routes one invocation to the help renderer or to a spawned process.
///
/// The command table is built from the manifest in the host's working
/// directory, so script commands are only known inside a project.
pub async fn dispatch(invocation: Invocation, host: &HostContext) -> Result<()> {
    log::debug!("Dispatching {:?}", invocation);

    let table = CommandTable::load(&host.cwd);
    let action = table.resolve(&invocation.command, invocation.args);
    log::debug!("Resolved '{}' to {:?}", invocation.command, action);

    match action {
        CommandAction::Help { topics } => handlers::help::handle(&table, &topics),
        CommandAction::Spawn { program, args } => handlers::run::handle(&program, &args, host).await,
    }
}
