//! Delete command: remove one or more funds by position

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::cli::args::parse_index;
use crate::data_paths::DataPaths;
use crate::history::fund_commands::FundCommand;

use super::apply_and_save;

#[derive(Args, Clone)]
pub struct DeleteArgs {
    /// Fund positions as shown by `list` (1-based)
    #[arg(required = true, num_args = 1.., value_parser = parse_index)]
    pub positions: Vec<usize>,
}

pub struct DeleteCommand {
    args: DeleteArgs,
}

impl DeleteCommand {
    pub fn new(args: DeleteArgs) -> Self {
        Self { args }
    }

    pub fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let indices: Vec<usize> = self.args.positions.iter().map(|p| p - 1).collect();

        let command = if indices.len() == 1 {
            FundCommand::delete(indices[0])
        } else {
            FundCommand::bulk_delete(indices)
        };

        let (portfolio, description) = apply_and_save(&data_paths, command)?;

        println!("{} {}", "✓".green(), description);
        println!("  {} funds remaining", portfolio.len());
        Ok(())
    }
}
