//! Command-line interface module.

mod args;
pub mod init;
pub mod process;
pub mod status;

pub use args::{Cli, Commands};
