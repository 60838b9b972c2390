//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the apod binary.

mod commands;
mod handlers;

pub use commands::{BackendArg, Cli, CollectArgs, Commands, RenderArgs};
pub use handlers::{collect, fetch, peers, render, run};
