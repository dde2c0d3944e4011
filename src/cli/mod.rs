//! CLI module for fundtrack
//!
//! Command-line interface for the portfolio tracker. Uses clap for argument
//! parsing and a structured command pattern: one module per subcommand, each
//! with an `Args` struct and a command type executing it.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod args;
pub mod commands;

pub use args::{parse_amount, parse_index};
use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};
use crate::logging::{init_logging, LogMode, LoggingConfig};

use commands::add::{AddArgs, AddCommand};
use commands::delete::{DeleteArgs, DeleteCommand};
use commands::edit::{EditArgs, EditCommand};
use commands::init::{InitArgs, InitCommand};
use commands::list::{ListArgs, ListCommand};
use commands::shell::{ShellArgs, ShellCommand};
use commands::stats::{StatsArgs, StatsCommand};
use commands::version::{VersionArgs, VersionCommand};

#[derive(Parser)]
#[command(name = "fundtrack")]
#[command(version)]
#[command(about = "CLI personal investment portfolio tracker with undo/redo", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory path (default: ./data)
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the data directory and an empty portfolio
    Init(InitArgs),

    /// Add a fund to the portfolio
    Add(AddArgs),

    /// Edit a fund by position
    Edit(EditArgs),

    /// Delete one or more funds by position
    Delete(DeleteArgs),

    /// Show the portfolio as a table
    List(ListArgs),

    /// Show portfolio statistics
    Stats(StatsArgs),

    /// Interactive session with undo/redo history
    Shell(ShellArgs),

    /// Show version information
    Version(VersionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let data_paths = DataPaths::new(&self.data_dir);
        data_paths.ensure_directories()?;

        // Raise the default log level when -v is given; RUST_LOG still wins
        if self.verbose > 0 && std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", "debug");
        }

        // The shell owns the terminal, so its logs go to file only
        let mode = match self.command {
            Commands::Shell(_) => LogMode::FileOnly,
            _ => LogMode::ConsoleAndFile,
        };
        init_logging(LoggingConfig::new(mode, data_paths.clone()))?;

        match self.command {
            Commands::Init(args) => InitCommand::new(args).execute(data_paths),
            Commands::Add(args) => AddCommand::new(args).execute(data_paths),
            Commands::Edit(args) => EditCommand::new(args).execute(data_paths),
            Commands::Delete(args) => DeleteCommand::new(args).execute(data_paths),
            Commands::List(args) => ListCommand::new(args).execute(data_paths),
            Commands::Stats(args) => StatsCommand::new(args).execute(data_paths),
            Commands::Shell(args) => ShellCommand::new(args).execute(data_paths),
            Commands::Version(args) => VersionCommand::new(args).execute(data_paths),
        }
    }
}
