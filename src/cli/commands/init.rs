//! Init command: bootstrap the data directory and portfolio file

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::info;

use crate::data_paths::DataPaths;
use crate::portfolio::storage::PortfolioStore;
use crate::portfolio::Portfolio;

#[derive(Args, Clone)]
pub struct InitArgs {
    /// Reset an existing portfolio to empty
    #[arg(long)]
    pub force: bool,
}

pub struct InitCommand {
    args: InitArgs,
}

impl InitCommand {
    pub fn new(args: InitArgs) -> Self {
        Self { args }
    }

    pub fn execute(&self, data_paths: DataPaths) -> Result<()> {
        data_paths.ensure_directories()?;
        let store = PortfolioStore::new(&data_paths)?;

        let path = store.portfolio_path();
        if path.exists() && !self.args.force {
            println!(
                "{} Portfolio already exists at {}",
                "✓".green(),
                path.display()
            );
            println!("  Use {} to reset it to empty", "--force".yellow());
            return Ok(());
        }

        store.save(&Portfolio::new())?;
        info!(path = %path.display(), "Initialized empty portfolio");

        println!(
            "{} Initialized empty portfolio at {}",
            "✓".green(),
            path.display()
        );
        Ok(())
    }
}
