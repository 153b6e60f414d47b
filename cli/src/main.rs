#[macro_use]
mod macros;
mod cmd;
mod core;
mod resources;
use std::fmt;

use clap::{Parser, Subcommand};
use thiserror::Error;

#[derive(Parser)]
#[command(author, version)]
#[command(about = "Fetch the source of any deployed smart contract for auditing")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a contract address to its verified source, or its bytecode
    Fetch(cmd::fetch::Fetch),
    /// Flatten a multi-file Etherscan source into one Solidity file
    Flatten(cmd::flatten::Flatten),
}

/// Represents an error that can occur while running the CLI tool
#[derive(Error, Debug)]
enum CliError {
    /// Error related to the fetch command
    FetchError(cmd::fetch::FetchError),
    /// Error related to the flatten command
    FlattenError(cmd::flatten::FlattenError),
    /// No subcommand was given
    MissingCommand,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::FetchError(err) => write!(f, "Fetch error: {}", err),
            CliError::FlattenError(err) => write!(f, "Flatten error: {}", err),
            CliError::MissingCommand => write!(f, "No command given, see --help for usage."),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Fetch(fetch)) => {
            fetch.run().await.map_err(CliError::FetchError)?;
            Ok(())
        }
        Some(Commands::Flatten(flatten)) => {
            flatten.run().map_err(CliError::FlattenError)?;
            Ok(())
        }
        None => Err(CliError::MissingCommand),
    }
}
