//! Add command: record a new fund holding

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use crate::cli::args::{parse_amount, parse_date};
use crate::data_paths::DataPaths;
use crate::history::fund_commands::FundCommand;
use crate::portfolio::FundData;

use super::apply_and_save;

#[derive(Args, Clone)]
pub struct AddArgs {
    /// Fund name
    pub name: String,

    /// Issuing company / fund producer
    pub producer: String,

    /// Invested amount
    #[arg(value_parser = parse_amount)]
    pub investment: Decimal,

    /// Current value (defaults to the invested amount)
    #[arg(value_parser = parse_amount)]
    pub value: Option<Decimal>,

    /// Investment date, YYYY-MM-DD (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

pub struct AddCommand {
    args: AddArgs,
}

impl AddCommand {
    pub fn new(args: AddArgs) -> Self {
        Self { args }
    }

    pub fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let date = self
            .args
            .date
            .unwrap_or_else(|| Local::now().date_naive());
        let value = self.args.value.unwrap_or(self.args.investment);

        let fund = FundData::new(
            self.args.name.clone(),
            self.args.producer.clone(),
            self.args.investment,
            value,
            date,
        );

        let command = FundCommand::add(fund)?;
        let (portfolio, description) = apply_and_save(&data_paths, command)?;

        println!("{} {}", "✓".green(), description);
        println!(
            "  Portfolio: {} funds, total value {}",
            portfolio.len(),
            portfolio.total_value().to_string().bright_cyan()
        );
        Ok(())
    }
}
