//! Edit command: change fields of an existing fund

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Args;
use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use crate::cli::args::{parse_amount, parse_date, parse_index};
use crate::data_paths::DataPaths;
use crate::history::fund_commands::FundCommand;
use crate::portfolio::storage::PortfolioStore;

use super::apply_and_save;

#[derive(Args, Clone)]
pub struct EditArgs {
    /// Fund position as shown by `list` (1-based)
    #[arg(value_parser = parse_index)]
    pub position: usize,

    /// New fund name
    #[arg(long)]
    pub name: Option<String>,

    /// New producer
    #[arg(long)]
    pub producer: Option<String>,

    /// New invested amount
    #[arg(long, value_parser = parse_amount)]
    pub investment: Option<Decimal>,

    /// New current value
    #[arg(long, value_parser = parse_amount)]
    pub value: Option<Decimal>,

    /// New investment date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

pub struct EditCommand {
    args: EditArgs,
}

impl EditCommand {
    pub fn new(args: EditArgs) -> Self {
        Self { args }
    }

    pub fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let index = self.args.position - 1;

        // Build the replacement from the current record plus the overrides
        let store = PortfolioStore::new(&data_paths)?;
        let portfolio = store.load()?;
        let mut replacement = portfolio
            .get(index)
            .ok_or_else(|| {
                anyhow!(
                    "no fund at position {} (portfolio has {} funds)",
                    self.args.position,
                    portfolio.len()
                )
            })?
            .clone();

        if let Some(name) = &self.args.name {
            replacement.name = name.clone();
        }
        if let Some(producer) = &self.args.producer {
            replacement.producer = producer.clone();
        }
        if let Some(investment) = self.args.investment {
            replacement.investment = investment;
        }
        if let Some(value) = self.args.value {
            replacement.value = value;
        }
        if let Some(date) = self.args.date {
            replacement.investment_date = date;
        }

        let command = FundCommand::edit(index, replacement)?;
        let (_, description) = apply_and_save(&data_paths, command)?;

        println!("{} {}", "✓".green(), description);
        Ok(())
    }
}
