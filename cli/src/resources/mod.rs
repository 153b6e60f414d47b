pub mod artifacts;
pub mod bytecode;
pub mod etherscan;
pub mod sourcify;
