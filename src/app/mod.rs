// Application layer: command dispatch and output rendering for the CLI.

pub mod commands;
pub mod render;

pub use commands::execute;
