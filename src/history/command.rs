//! Reversible command abstraction

use chrono::{DateTime, Utc};

use crate::errors::CommandError;

/// A reified, reversible unit of mutation over some target state
///
/// `apply` and `revert` must be exact inverses: reverting immediately after
/// a successful apply restores the target to the same content and order it
/// had before. The target is passed in explicitly on every call; commands
/// hold no reference to it, so a command alone can never mutate anything.
pub trait Command {
    type Target;

    /// Perform the mutation. Called once by `CommandStack::execute` and
    /// again for every redo.
    fn apply(&mut self, target: &mut Self::Target) -> Result<(), CommandError>;

    /// Reverse the mutation performed by the most recent `apply`.
    fn revert(&mut self, target: &mut Self::Target) -> Result<(), CommandError>;

    /// Human-readable label for history views and announcements
    fn description(&self) -> String;
}

/// A command recorded in the history, stamped at execution time
#[derive(Debug, Clone)]
pub struct HistoryEntry<C> {
    command: C,
    executed_at: DateTime<Utc>,
}

impl<C: Command> HistoryEntry<C> {
    pub(crate) fn new(command: C) -> Self {
        Self {
            command,
            executed_at: Utc::now(),
        }
    }

    pub(crate) fn command_mut(&mut self) -> &mut C {
        &mut self.command
    }

    pub fn description(&self) -> String {
        self.command.description()
    }

    pub fn executed_at(&self) -> DateTime<Utc> {
        self.executed_at
    }
}
