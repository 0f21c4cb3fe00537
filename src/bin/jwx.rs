// src/bin/jwx.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use jwx::{
    cli::{Cli, dispatcher},
    system::platform::HostContext,
};

/// The main entry point of the `jwx` application.
/// It sets up logging, prints the banner, dispatches the command and performs
/// centralized error handling.
#[tokio::main]
async fn main() {
    env_logger::init();
    println!("{}\n", format!("jwx v{}", env!("CARGO_PKG_VERSION")).dimmed());

    if let Err(e) = run_cli(Cli::parse()).await {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let host = HostContext::from_env().context("Could not read the current directory")?;
    dispatcher::dispatch(cli.into_invocation(), &host).await
}
