pub mod commands;

pub use commands::{execute, run, Cli, Operation};
