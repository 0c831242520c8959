//! CLI subcommand implementations for the `hn-front` binary.

pub mod args;
pub mod doctor;
pub mod output;
pub mod progress;
pub mod top_cmd;

pub use args::{Cli, Commands, TopArgs};
