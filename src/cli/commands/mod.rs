//! CLI subcommand implementations

pub mod add;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod shell;
pub mod stats;
pub mod version;

use anyhow::{anyhow, Result};

use crate::data_paths::DataPaths;
use crate::history::fund_commands::FundCommand;
use crate::history::{CommandStack, ExecuteOutcome};
use crate::portfolio::storage::PortfolioStore;
use crate::portfolio::Portfolio;

/// Apply a single mutation for a one-shot CLI command
///
/// Loads the portfolio, routes the command through a session-scoped stack,
/// persists, and returns the resulting portfolio plus the command's
/// description for the confirmation message. The stack is volatile by
/// design, so one-shot invocations cannot undo earlier runs; the `shell`
/// subcommand is the surface for that.
pub(crate) fn apply_and_save(
    data_paths: &DataPaths,
    command: FundCommand,
) -> Result<(Portfolio, String)> {
    let store = PortfolioStore::new(data_paths)?;
    let mut portfolio = store.load()?;
    let mut stack: CommandStack<FundCommand> = CommandStack::new();

    match stack.execute(command, &mut portfolio) {
        ExecuteOutcome::Applied => {}
        ExecuteOutcome::Failed(e) => return Err(anyhow!(e)),
    }

    store.save(&portfolio)?;
    let description = stack
        .undo_description()
        .unwrap_or_else(|| "Mutation".to_string());
    Ok((portfolio, description))
}
