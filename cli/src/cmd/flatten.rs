use std::{fs, path::PathBuf};

use clap::Args;
use thiserror::Error;

use crate::core::actions::persist::flatten_sources;

#[derive(Args)]
pub struct Flatten {
    /// An Etherscan source file, either plain Solidity or a standard JSON document
    pub file: PathBuf,
}

#[derive(Error, Debug)]
pub enum FlattenError {
    /// Error related to reading the source file
    #[error("IoError: {0}")]
    IoError(#[from] std::io::Error),
}

/// Prints a source file the way `fetch --save` would write it.
impl Flatten {
    pub fn run(&self) -> Result<(), FlattenError> {
        print!("{}", self.render()?);
        Ok(())
    }

    fn render(&self) -> Result<String, FlattenError> {
        let raw = fs::read_to_string(&self.file)?;
        Ok(flatten_sources(&raw))
    }
}
