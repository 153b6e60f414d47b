pub mod actions;
pub mod address;
pub mod config;
pub mod network;
pub mod resources;
