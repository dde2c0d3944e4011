//! Portfolio persistence layer
//!
//! Stores the portfolio as a single JSON document:
//! - data/portfolio/portfolio.json
//!
//! `save` is idempotent and fire-and-forget from the caller's perspective:
//! it rewrites the full document on every call, so saving the same state
//! twice is harmless.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::data_paths::DataPaths;
use crate::portfolio::Portfolio;

const PORTFOLIO_FILE: &str = "portfolio.json";

/// File-backed portfolio store
#[derive(Clone)]
pub struct PortfolioStore {
    portfolio_dir: PathBuf,
}

impl PortfolioStore {
    pub fn new(data_paths: &DataPaths) -> Result<Self> {
        let portfolio_dir = data_paths.portfolio();
        fs::create_dir_all(&portfolio_dir)
            .with_context(|| format!("creating {}", portfolio_dir.display()))?;

        Ok(Self { portfolio_dir })
    }

    pub fn portfolio_path(&self) -> PathBuf {
        self.portfolio_dir.join(PORTFOLIO_FILE)
    }

    /// Load the portfolio, returning an empty one when no file exists yet
    pub fn load(&self) -> Result<Portfolio> {
        let path = self.portfolio_path();
        if !path.exists() {
            debug!("No portfolio file at {}, starting empty", path.display());
            return Ok(Portfolio::new());
        }

        let json = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let portfolio: Portfolio = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", path.display()))?;

        debug!(funds = portfolio.len(), "Loaded portfolio");
        Ok(portfolio)
    }

    /// Persist the full portfolio document
    pub fn save(&self, portfolio: &Portfolio) -> Result<()> {
        let path = self.portfolio_path();
        let json = serde_json::to_string_pretty(portfolio)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;

        info!(funds = portfolio.len(), "Portfolio saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::FundData;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PortfolioStore {
        let paths = DataPaths::new(dir.path());
        paths.ensure_directories().unwrap();
        PortfolioStore::new(&paths).unwrap()
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let portfolio = store.load().unwrap();
        assert!(portfolio.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let portfolio = Portfolio {
            funds: vec![FundData::new(
                "World Index",
                "Acme Invest",
                dec!(2500),
                dec!(2710.50),
                NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            )],
        };

        store.save(&portfolio).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, portfolio);
    }

    #[test]
    fn test_save_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let portfolio = Portfolio::new();
        store.save(&portfolio).unwrap();
        store.save(&portfolio).unwrap();

        assert_eq!(store.load().unwrap(), portfolio);
    }
}
