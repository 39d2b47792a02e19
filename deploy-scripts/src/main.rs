//! Entrypoint for the deploy scripts

use clap::{CommandFactory, Parser};
use deploy_scripts::{cli::Cli, commands::run, errors::ScriptError};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    // Neither mode selected is a no-op, not an error: print usage guidance
    if !cli.deploy && !cli.publish {
        Cli::command().print_help().ok();
        return Ok(());
    }

    run(cli).await
}
