//! Command implementations for pit.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod plan;
mod run;

use crate::cli::{Command, GlobalArgs};
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, global: &GlobalArgs) -> Result<()> {
    match command {
        Command::Run(args) => run::cmd_run(global, args),
        Command::Plan(args) => plan::cmd_plan(global, args),
    }
}
