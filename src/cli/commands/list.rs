//! List command: render the portfolio as a table

use anyhow::Result;
use clap::Args;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use crate::data_paths::DataPaths;
use crate::portfolio::storage::PortfolioStore;
use crate::portfolio::Portfolio;

#[derive(Args, Clone)]
pub struct ListArgs {}

pub struct ListCommand {
    _args: ListArgs,
}

impl ListCommand {
    pub fn new(args: ListArgs) -> Self {
        Self { _args: args }
    }

    pub fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let store = PortfolioStore::new(&data_paths)?;
        let portfolio = store.load()?;

        if portfolio.is_empty() {
            println!("Portfolio is empty. Add a fund with {}", "fundtrack add".yellow());
            return Ok(());
        }

        println!("{}", render_table(&portfolio));

        let gain = portfolio.total_gain();
        let gain_str = format_gain(gain, portfolio.total_gain_percentage());
        println!(
            "Total: invested {}, value {}, gain {}",
            portfolio.total_investment(),
            portfolio.total_value(),
            gain_str
        );
        Ok(())
    }
}

pub(crate) fn render_table(portfolio: &Portfolio) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "#", "Name", "Producer", "Invested", "Value", "Gain", "Gain %", "Date",
    ]);

    for (i, fund) in portfolio.funds.iter().enumerate() {
        let gain_pct = fund
            .gain_percentage()
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&fund.name),
            Cell::new(&fund.producer),
            Cell::new(fund.investment).set_alignment(CellAlignment::Right),
            Cell::new(fund.value).set_alignment(CellAlignment::Right),
            Cell::new(fund.gain()).set_alignment(CellAlignment::Right),
            Cell::new(gain_pct).set_alignment(CellAlignment::Right),
            Cell::new(fund.investment_date),
        ]);
    }

    table
}

pub(crate) fn format_gain(gain: Decimal, percentage: Option<Decimal>) -> String {
    let pct = percentage
        .map(|p| format!(" ({:.2}%)", p))
        .unwrap_or_default();
    if gain.is_sign_negative() {
        format!("{}{}", gain, pct).red().to_string()
    } else {
        format!("+{}{}", gain, pct).green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::FundData;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_table_has_all_rows() {
        let portfolio = Portfolio {
            funds: vec![FundData::new(
                "World Index",
                "Acme Invest",
                dec!(1000),
                dec!(1100),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            )],
        };

        let rendered = render_table(&portfolio).to_string();
        assert!(rendered.contains("World Index"));
        assert!(rendered.contains("Acme Invest"));
        assert!(rendered.contains("1100"));
    }

    #[test]
    fn test_format_gain_sign() {
        assert!(format_gain(dec!(50), Some(dec!(5))).contains("+50"));
        assert!(format_gain(dec!(-50), Some(dec!(-5))).contains("-50"));
    }
}
