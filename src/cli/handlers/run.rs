use crate::system::{executor, platform::HostContext};
use anyhow::Result;
use std::path::Path;

/// Runs a program in the current directory and waits for it.
pub async fn handle(program: &str, args: &[String], host: &HostContext) -> Result<()> {
    log::debug!("Running '{}' with args {:?}", program, args);
    executor::run(host, program, args, Path::new(".")).await?;
    Ok(())
}
