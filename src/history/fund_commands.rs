//! Reversible mutations over the fund portfolio

use crate::errors::CommandError;
use crate::history::Command;
use crate::portfolio::{FundData, Portfolio};

/// The write operations a user can perform on the portfolio
///
/// Each variant carries what it needs to re-apply itself plus the state
/// captured during apply that makes an exact revert possible.
#[derive(Debug, Clone)]
pub enum FundCommand {
    Add {
        fund: FundData,
    },
    Delete {
        index: usize,
        /// Captured on apply so revert can reinsert at the same position
        removed: Option<FundData>,
    },
    Edit {
        index: usize,
        replacement: FundData,
        /// Captured on apply
        previous: Option<FundData>,
    },
    BulkDelete {
        indices: Vec<usize>,
        /// `(index, fund)` pairs in descending index order, captured on apply
        removed: Vec<(usize, FundData)>,
    },
}

impl FundCommand {
    pub fn add(fund: FundData) -> Result<Self, CommandError> {
        validate_fund(&fund)?;
        Ok(Self::Add { fund })
    }

    pub fn delete(index: usize) -> Self {
        Self::Delete {
            index,
            removed: None,
        }
    }

    pub fn edit(index: usize, replacement: FundData) -> Result<Self, CommandError> {
        validate_fund(&replacement)?;
        Ok(Self::Edit {
            index,
            replacement,
            previous: None,
        })
    }

    pub fn bulk_delete(mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self::BulkDelete {
            indices,
            removed: Vec::new(),
        }
    }
}

fn validate_fund(fund: &FundData) -> Result<(), CommandError> {
    if fund.name.trim().is_empty() {
        return Err(CommandError::InvalidFund("fund name must not be empty".into()));
    }
    if fund.investment.is_sign_negative() {
        return Err(CommandError::InvalidFund(
            "investment amount must not be negative".into(),
        ));
    }
    Ok(())
}

fn check_index(index: usize, len: usize) -> Result<(), CommandError> {
    if index >= len {
        Err(CommandError::IndexOutOfRange { index, len })
    } else {
        Ok(())
    }
}

impl Command for FundCommand {
    type Target = Portfolio;

    fn apply(&mut self, portfolio: &mut Portfolio) -> Result<(), CommandError> {
        match self {
            FundCommand::Add { fund } => {
                portfolio.funds.push(fund.clone());
                Ok(())
            }
            FundCommand::Delete { index, removed } => {
                check_index(*index, portfolio.len())?;
                *removed = Some(portfolio.funds.remove(*index));
                Ok(())
            }
            FundCommand::Edit {
                index,
                replacement,
                previous,
            } => {
                check_index(*index, portfolio.len())?;
                *previous = Some(std::mem::replace(
                    &mut portfolio.funds[*index],
                    replacement.clone(),
                ));
                Ok(())
            }
            FundCommand::BulkDelete { indices, removed } => {
                // Validate everything before mutating anything
                for &index in indices.iter() {
                    check_index(index, portfolio.len())?;
                }

                // Remove highest index first so lower indices stay valid
                removed.clear();
                for &index in indices.iter().rev() {
                    removed.push((index, portfolio.funds.remove(index)));
                }
                Ok(())
            }
        }
    }

    fn revert(&mut self, portfolio: &mut Portfolio) -> Result<(), CommandError> {
        match self {
            FundCommand::Add { .. } => {
                portfolio.funds.pop();
                Ok(())
            }
            FundCommand::Delete { index, removed } => {
                // Kept (not taken) so the history description still names the fund
                let fund = removed.clone().ok_or_else(|| {
                    CommandError::InvalidFund("delete was never applied".into())
                })?;
                if *index > portfolio.len() {
                    return Err(CommandError::IndexOutOfRange {
                        index: *index,
                        len: portfolio.len(),
                    });
                }
                portfolio.funds.insert(*index, fund);
                Ok(())
            }
            FundCommand::Edit { index, previous, .. } => {
                check_index(*index, portfolio.len())?;
                let fund = previous.take().ok_or_else(|| {
                    CommandError::InvalidFund("edit was never applied".into())
                })?;
                portfolio.funds[*index] = fund;
                Ok(())
            }
            FundCommand::BulkDelete { removed, .. } => {
                // Validate every reinsertion against the length it will see,
                // keeping the captured rows intact if anything is off
                let mut len = portfolio.len();
                for (index, _) in removed.iter().rev() {
                    if *index > len {
                        return Err(CommandError::IndexOutOfRange { index: *index, len });
                    }
                    len += 1;
                }

                // Reinsert lowest index first, restoring original positions
                for (index, fund) in removed.drain(..).rev() {
                    portfolio.funds.insert(index, fund);
                }
                Ok(())
            }
        }
    }

    fn description(&self) -> String {
        match self {
            FundCommand::Add { fund } => format!("Add fund '{}'", fund.name),
            FundCommand::Delete { index, removed } => match removed {
                Some(fund) => format!("Delete fund '{}'", fund.name),
                None => format!("Delete fund #{}", index + 1),
            },
            FundCommand::Edit { replacement, .. } => {
                format!("Edit fund '{}'", replacement.name)
            }
            FundCommand::BulkDelete { indices, .. } => {
                format!("Delete {} funds", indices.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{CommandStack, ExecuteOutcome, StepOutcome};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn fund(name: &str) -> FundData {
        FundData::new(
            name,
            "Test Capital",
            dec!(1000),
            dec!(1050),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
    }

    fn portfolio_of(names: &[&str]) -> Portfolio {
        Portfolio {
            funds: names.iter().map(|n| fund(n)).collect(),
        }
    }

    fn names(portfolio: &Portfolio) -> Vec<String> {
        portfolio.funds.iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn test_add_and_revert() {
        let mut portfolio = Portfolio::new();
        let mut cmd = FundCommand::add(fund("New Fund")).unwrap();

        cmd.apply(&mut portfolio).unwrap();
        assert_eq!(names(&portfolio), ["New Fund"]);

        cmd.revert(&mut portfolio).unwrap();
        assert!(portfolio.is_empty());
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let result = FundCommand::add(fund("   "));
        assert!(matches!(result, Err(CommandError::InvalidFund(_))));
    }

    #[test]
    fn test_delete_restores_position() {
        let mut portfolio = portfolio_of(&["X", "Y", "Z"]);
        let before = portfolio.clone();

        let mut cmd = FundCommand::delete(1);
        cmd.apply(&mut portfolio).unwrap();
        assert_eq!(names(&portfolio), ["X", "Z"]);

        cmd.revert(&mut portfolio).unwrap();
        assert_eq!(portfolio, before);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut portfolio = portfolio_of(&["X"]);
        let mut cmd = FundCommand::delete(3);

        let err = cmd.apply(&mut portfolio).unwrap_err();
        assert!(matches!(
            err,
            CommandError::IndexOutOfRange { index: 3, len: 1 }
        ));
        assert_eq!(names(&portfolio), ["X"]);
    }

    #[test]
    fn test_edit_and_revert() {
        let mut portfolio = portfolio_of(&["X", "Y"]);
        let before = portfolio.clone();

        let mut updated = portfolio.funds[1].clone();
        updated.value = dec!(2000);
        updated.name = "Y renamed".into();

        let mut cmd = FundCommand::edit(1, updated).unwrap();
        cmd.apply(&mut portfolio).unwrap();
        assert_eq!(names(&portfolio), ["X", "Y renamed"]);
        assert_eq!(portfolio.funds[1].value, dec!(2000));

        cmd.revert(&mut portfolio).unwrap();
        assert_eq!(portfolio, before);
    }

    #[test]
    fn test_bulk_delete_restores_original_order() {
        // Indices [0, 2] over [X, Y, Z] leave [Y]; revert restores [X, Y, Z]
        let mut portfolio = portfolio_of(&["X", "Y", "Z"]);
        let before = portfolio.clone();

        let mut cmd = FundCommand::bulk_delete(vec![0, 2]);
        cmd.apply(&mut portfolio).unwrap();
        assert_eq!(names(&portfolio), ["Y"]);

        cmd.revert(&mut portfolio).unwrap();
        assert_eq!(portfolio, before);
    }

    #[test]
    fn test_bulk_delete_revert_keeps_rows_on_invalid_state() {
        let mut portfolio = portfolio_of(&["X", "Y", "Z"]);
        let mut cmd = FundCommand::bulk_delete(vec![0, 2]);
        cmd.apply(&mut portfolio).unwrap();

        // Simulate state drift: the portfolio shrank underneath the command
        portfolio.funds.clear();

        assert!(cmd.revert(&mut portfolio).is_err());

        // The captured rows survive the failed revert
        match &cmd {
            FundCommand::BulkDelete { removed, .. } => assert_eq!(removed.len(), 2),
            _ => unreachable!(),
        }
        assert!(portfolio.is_empty());
    }

    #[test]
    fn test_bulk_delete_validates_before_mutating() {
        let mut portfolio = portfolio_of(&["X", "Y"]);

        let mut cmd = FundCommand::bulk_delete(vec![0, 5]);
        assert!(cmd.apply(&mut portfolio).is_err());
        assert_eq!(names(&portfolio), ["X", "Y"]);
    }

    #[test]
    fn test_round_trip_through_stack() {
        let mut portfolio = portfolio_of(&["A", "B", "C"]);
        let before = portfolio.clone();
        let mut stack: CommandStack<FundCommand> = CommandStack::new();

        let ops = vec![
            FundCommand::add(fund("D")).unwrap(),
            FundCommand::delete(0),
            FundCommand::edit(0, fund("B2")).unwrap(),
            FundCommand::bulk_delete(vec![0, 1]),
        ];
        for op in ops {
            assert!(matches!(
                stack.execute(op, &mut portfolio),
                ExecuteOutcome::Applied
            ));
        }

        for _ in 0..4 {
            assert!(stack.undo(&mut portfolio).is_applied());
        }
        assert_eq!(portfolio, before);

        // And forward again
        for _ in 0..4 {
            assert!(stack.redo(&mut portfolio).is_applied());
        }
        assert!(matches!(stack.redo(&mut portfolio), StepOutcome::Nothing));
        assert_eq!(names(&portfolio), ["D"]);
    }

    #[test]
    fn test_failed_delete_not_recorded_by_stack() {
        let mut portfolio = portfolio_of(&["A"]);
        let mut stack: CommandStack<FundCommand> = CommandStack::new();

        let outcome = stack.execute(FundCommand::delete(9), &mut portfolio);
        assert!(matches!(outcome, ExecuteOutcome::Failed(_)));
        assert!(stack.is_empty());
        assert!(!stack.can_undo());
        assert_eq!(names(&portfolio), ["A"]);
    }
}
