//! Financial statistics helpers
//!
//! Statistics are computed over `f64` return series, kept separate from the
//! `Decimal` bookkeeping: these figures are indicative display math, not
//! money that needs exact arithmetic.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::portfolio::Portfolio;

/// Fractional return of each holding (value / investment - 1)
///
/// Holdings with a zero investment are skipped.
pub fn fund_returns(portfolio: &Portfolio) -> Vec<f64> {
    portfolio
        .funds
        .iter()
        .filter(|f| !f.investment.is_zero())
        .filter_map(|f| (f.value / f.investment - Decimal::ONE).to_f64())
        .collect()
}

/// Allocation weight of each holding by current value, as `(name, weight)`
///
/// Weights sum to 1.0 unless the total value is zero, in which case the
/// result is empty.
pub fn allocation_weights(portfolio: &Portfolio) -> Vec<(String, f64)> {
    let total = portfolio.total_value();
    if total.is_zero() {
        return Vec::new();
    }

    portfolio
        .funds
        .iter()
        .filter_map(|f| {
            (f.value / total)
                .to_f64()
                .map(|w| (f.name.clone(), w))
        })
        .collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator)
pub fn std_deviation(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Sharpe ratio of a return series against a risk-free rate
///
/// Returns `None` when the series is too short or has zero dispersion.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> Option<f64> {
    let m = mean(returns)?;
    let sd = std_deviation(returns)?;
    if sd == 0.0 {
        return None;
    }
    Some((m - risk_free_rate) / sd)
}

/// Historical value-at-risk at the given confidence level (e.g. 0.95)
///
/// Reported as a positive loss fraction: the return at the (1 - confidence)
/// quantile of the sorted series, negated and floored at zero.
pub fn value_at_risk(returns: &[f64], confidence: f64) -> Option<f64> {
    if returns.is_empty() || !(0.0..1.0).contains(&confidence) {
        return None;
    }

    let mut sorted = returns.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let idx = ((1.0 - confidence) * sorted.len() as f64).floor() as usize;
    let idx = idx.min(sorted.len() - 1);
    Some((-sorted[idx]).max(0.0))
}

/// Maximum drawdown of a value series, as a fraction of the running peak
///
/// Returns 0.0 for monotonically rising series; `None` for an empty one.
pub fn max_drawdown(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut peak = f64::MIN;
    let mut worst = 0.0f64;
    for &v in values {
        if v > peak {
            peak = v;
        }
        if peak > 0.0 {
            let drawdown = (peak - v) / peak;
            if drawdown > worst {
                worst = drawdown;
            }
        }
    }
    Some(worst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::FundData;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_portfolio() -> Portfolio {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Portfolio {
            funds: vec![
                FundData::new("A", "P", dec!(1000), dec!(1100), date),
                FundData::new("B", "P", dec!(1000), dec!(900), date),
            ],
        }
    }

    #[test]
    fn test_fund_returns() {
        let returns = fund_returns(&sample_portfolio());
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.10).abs() < 1e-9);
        assert!((returns[1] + 0.10).abs() < 1e-9);
    }

    #[test]
    fn test_allocation_weights_sum_to_one() {
        let weights = allocation_weights(&sample_portfolio());
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!((weights[0].1 - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_sharpe_ratio() {
        let returns = [0.02, 0.01, 0.03, -0.01, 0.02];
        let sharpe = sharpe_ratio(&returns, 0.0).unwrap();
        assert!(sharpe > 0.0);

        // Zero dispersion has no meaningful ratio
        assert_eq!(sharpe_ratio(&[0.01, 0.01, 0.01], 0.0), None);
    }

    #[test]
    fn test_value_at_risk() {
        let returns = [-0.08, -0.02, 0.01, 0.02, 0.03, 0.04, 0.05, 0.01, 0.02, 0.03];
        let var = value_at_risk(&returns, 0.95).unwrap();
        assert!((var - 0.08).abs() < 1e-9);

        assert_eq!(value_at_risk(&[], 0.95), None);
        // Gains-only series has zero VaR
        assert_eq!(value_at_risk(&[0.01, 0.02, 0.05], 0.6), Some(0.0));
    }

    #[test]
    fn test_max_drawdown() {
        let values = [100.0, 120.0, 90.0, 110.0, 130.0];
        let dd = max_drawdown(&values).unwrap();
        assert!((dd - 0.25).abs() < 1e-9);

        assert_eq!(max_drawdown(&[1.0, 2.0, 3.0]), Some(0.0));
        assert_eq!(max_drawdown(&[]), None);
    }
}
