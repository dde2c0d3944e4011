//! Stats command: portfolio analytics summary

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use rust_decimal::prelude::ToPrimitive;

use crate::data_paths::DataPaths;
use crate::portfolio::analytics;
use crate::portfolio::storage::PortfolioStore;

#[derive(Args, Clone)]
pub struct StatsArgs {
    /// Confidence level for value-at-risk (e.g. 0.95)
    #[arg(long, default_value_t = 0.95)]
    pub confidence: f64,
}

pub struct StatsCommand {
    args: StatsArgs,
}

impl StatsCommand {
    pub fn new(args: StatsArgs) -> Self {
        Self { args }
    }

    pub fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let store = PortfolioStore::new(&data_paths)?;
        let portfolio = store.load()?;

        if portfolio.is_empty() {
            println!("Portfolio is empty, nothing to analyze");
            return Ok(());
        }

        println!("{}", "Portfolio statistics".bright_yellow().bold());
        println!("  Funds:            {}", portfolio.len());
        println!("  Total invested:   {}", portfolio.total_investment());
        println!("  Total value:      {}", portfolio.total_value());
        if let Some(pct) = portfolio.total_gain_percentage() {
            println!(
                "  Total gain:       {} ({:.2}%)",
                portfolio.total_gain(),
                pct
            );
        }

        println!();
        println!("{}", "Allocation by value".bright_yellow().bold());
        for (name, weight) in analytics::allocation_weights(&portfolio) {
            println!("  {:<30} {:>6.1}%", name, weight * 100.0);
        }

        // Cross-sectional figures over the holdings' individual returns;
        // indicative only, this tracker keeps no valuation history
        let returns = analytics::fund_returns(&portfolio);
        println!();
        println!("{}", "Return statistics (across holdings)".bright_yellow().bold());
        if let Some(m) = analytics::mean(&returns) {
            println!("  Mean return:      {:>7.2}%", m * 100.0);
        }
        if let Some(sd) = analytics::std_deviation(&returns) {
            println!("  Std deviation:    {:>7.2}%", sd * 100.0);
        }
        match analytics::sharpe_ratio(&returns, 0.0) {
            Some(sharpe) => println!("  Sharpe ratio:     {:>7.2}", sharpe),
            None => println!("  Sharpe ratio:     n/a (needs dispersion)"),
        }
        match analytics::value_at_risk(&returns, self.args.confidence) {
            Some(var) => println!(
                "  VaR ({:.0}%):        {:>7.2}%",
                self.args.confidence * 100.0,
                var * 100.0
            ),
            None => println!("  VaR:              n/a"),
        }

        // Drawdown over portfolio value accumulated in investment-date order
        let mut funds = portfolio.funds.clone();
        funds.sort_by_key(|f| f.investment_date);
        let mut running = 0.0;
        let series: Vec<f64> = funds
            .iter()
            .filter_map(|f| {
                f.value.to_f64().map(|v| {
                    running += v;
                    running
                })
            })
            .collect();
        if let Some(dd) = analytics::max_drawdown(&series) {
            println!("  Max drawdown:     {:>7.2}%", dd * 100.0);
        }

        Ok(())
    }
}
