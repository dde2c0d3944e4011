//! Portfolio domain types with strong typing

pub mod analytics;
pub mod storage;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single fund holding in the portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundData {
    /// Stable record id, assigned at creation
    pub id: Uuid,
    /// Fund name as shown to the user
    pub name: String,
    /// Issuing company / fund producer
    pub producer: String,
    /// Amount originally invested
    pub investment: Decimal,
    /// Current market value of the holding
    pub value: Decimal,
    /// Date the investment was made
    pub investment_date: NaiveDate,
}

impl FundData {
    pub fn new(
        name: impl Into<String>,
        producer: impl Into<String>,
        investment: Decimal,
        value: Decimal,
        investment_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            producer: producer.into(),
            investment,
            value,
            investment_date,
        }
    }

    /// Absolute gain (or loss, when negative) of this holding
    pub fn gain(&self) -> Decimal {
        self.value - self.investment
    }

    /// Gain as a percentage of the invested amount
    pub fn gain_percentage(&self) -> Option<Decimal> {
        if self.investment.is_zero() {
            None
        } else {
            Some((self.gain() / self.investment) * Decimal::from(100))
        }
    }
}

/// Ordered collection of fund holdings
///
/// Order is significant: funds are addressed by position in the UI and by
/// the undo/redo commands, so every mutation must preserve or exactly
/// restore positional order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub funds: Vec<FundData>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.funds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FundData> {
        self.funds.get(index)
    }

    /// Sum of all invested amounts
    pub fn total_investment(&self) -> Decimal {
        self.funds.iter().map(|f| f.investment).sum()
    }

    /// Sum of all current values
    pub fn total_value(&self) -> Decimal {
        self.funds.iter().map(|f| f.value).sum()
    }

    /// Portfolio-wide absolute gain
    pub fn total_gain(&self) -> Decimal {
        self.total_value() - self.total_investment()
    }

    /// Portfolio-wide gain as a percentage of total investment
    pub fn total_gain_percentage(&self) -> Option<Decimal> {
        let invested = self.total_investment();
        if invested.is_zero() {
            None
        } else {
            Some((self.total_gain() / invested) * Decimal::from(100))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fund(name: &str, investment: Decimal, value: Decimal) -> FundData {
        FundData::new(
            name,
            "Test Capital",
            investment,
            value,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_fund_gain() {
        let f = fund("Global Equity", dec!(1000), dec!(1250));
        assert_eq!(f.gain(), dec!(250));
        assert_eq!(f.gain_percentage(), Some(dec!(25)));
    }

    #[test]
    fn test_fund_gain_zero_investment() {
        let f = fund("Freebie", dec!(0), dec!(10));
        assert_eq!(f.gain(), dec!(10));
        assert_eq!(f.gain_percentage(), None);
    }

    #[test]
    fn test_portfolio_totals() {
        let portfolio = Portfolio {
            funds: vec![
                fund("A", dec!(1000), dec!(1100)),
                fund("B", dec!(500), dec!(450)),
            ],
        };

        assert_eq!(portfolio.total_investment(), dec!(1500));
        assert_eq!(portfolio.total_value(), dec!(1550));
        assert_eq!(portfolio.total_gain(), dec!(50));
    }

    #[test]
    fn test_empty_portfolio_percentage() {
        let portfolio = Portfolio::new();
        assert!(portfolio.is_empty());
        assert_eq!(portfolio.total_gain_percentage(), None);
    }
}
