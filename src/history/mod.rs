//! Bounded undo/redo history
//!
//! `CommandStack` keeps an ordered history of executed commands with a
//! cursor marking the most recently applied one. Executing while positioned
//! mid-history discards the redo tail; branching is not supported. History
//! length is capped, evicting the oldest entry (and with it the ability to
//! undo past that point).
//!
//! The stack never touches the target state on its own: the target is
//! passed into each operation as an exclusive borrow, which also makes
//! re-entrant invocation (a command calling back into the stack from inside
//! its own apply) unrepresentable.

mod command;
pub mod fund_commands;

pub use command::{Command, HistoryEntry};

use std::num::NonZeroUsize;
use tracing::{debug, warn};

use crate::errors::CommandError;

/// Default history capacity
pub const DEFAULT_MAX_SIZE: usize = 50;

/// Result of `CommandStack::execute`
#[derive(Debug)]
pub enum ExecuteOutcome {
    /// Command applied and recorded
    Applied,
    /// Command failed; history and cursor are unchanged and the command
    /// was not recorded
    Failed(CommandError),
}

/// Result of a single `undo` or `redo` step
#[derive(Debug)]
pub enum StepOutcome {
    /// Step applied; carries the command's description for announcements
    Applied { description: String },
    /// Nothing to undo (cursor at the bottom) or redo (cursor at the top)
    Nothing,
    /// The command failed; the cursor did not move
    Failed(CommandError),
}

impl StepOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, StepOutcome::Applied { .. })
    }
}

/// Result of `CommandStack::jump_to_index`
#[derive(Debug)]
pub enum JumpOutcome {
    /// Cursor reached the target, taking `steps` undo/redo steps
    Completed { steps: usize },
    /// Target index is outside the history; nothing was done
    OutOfRange,
    /// A step failed; `completed` steps were applied before stopping
    Stopped {
        completed: usize,
        error: CommandError,
    },
}

/// Cursor-addressable bounded history of reversible commands
pub struct CommandStack<C: Command> {
    entries: Vec<HistoryEntry<C>>,
    /// Index of the most recently applied entry; `None` when everything
    /// has been undone (or the history is empty)
    cursor: Option<usize>,
    max_size: NonZeroUsize,
}

impl<C: Command> Default for CommandStack<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Command> CommandStack<C> {
    pub fn new() -> Self {
        Self::with_max_size(
            NonZeroUsize::new(DEFAULT_MAX_SIZE).unwrap_or(NonZeroUsize::MIN),
        )
    }

    pub fn with_max_size(max_size: NonZeroUsize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_size,
        }
    }

    /// Number of entries currently in the history
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size.get()
    }

    /// Index of the most recently applied entry, `None` when fully undone
    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        match self.cursor {
            None => !self.entries.is_empty(),
            Some(i) => i + 1 < self.entries.len(),
        }
    }

    /// Description of the command the next `undo` would revert
    pub fn undo_description(&self) -> Option<String> {
        self.cursor.map(|i| self.entries[i].description())
    }

    /// Description of the command the next `redo` would re-apply
    pub fn redo_description(&self) -> Option<String> {
        let next = self.cursor.map_or(0, |i| i + 1);
        self.entries.get(next).map(|e| e.description())
    }

    /// Iterate over the recorded history, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry<C>> {
        self.entries.iter()
    }

    /// Apply a command and record it
    ///
    /// On success the redo tail (entries past the cursor) is discarded, the
    /// command is appended, and the history is trimmed to capacity. A failed
    /// command leaves history and cursor untouched.
    pub fn execute(&mut self, mut command: C, target: &mut C::Target) -> ExecuteOutcome {
        if let Err(e) = command.apply(target) {
            warn!(command = %command.description(), error = %e, "Command failed, not recorded");
            return ExecuteOutcome::Failed(e);
        }

        // Executing mid-history permanently discards the redo tail
        let keep = self.cursor.map_or(0, |i| i + 1);
        if keep < self.entries.len() {
            debug!(discarded = self.entries.len() - keep, "Discarding redo tail");
            self.entries.truncate(keep);
        }

        self.entries.push(HistoryEntry::new(command));
        self.cursor = Some(self.entries.len() - 1);

        if self.entries.len() > self.max_size.get() {
            self.entries.remove(0);
            self.cursor = match self.cursor {
                Some(0) | None => None,
                Some(i) => Some(i - 1),
            };
            debug!(max_size = self.max_size.get(), "Evicted oldest history entry");
        }

        ExecuteOutcome::Applied
    }

    /// Revert the command at the cursor and step back
    ///
    /// The cursor only moves when the revert succeeds.
    pub fn undo(&mut self, target: &mut C::Target) -> StepOutcome {
        let Some(i) = self.cursor else {
            return StepOutcome::Nothing;
        };

        let entry = &mut self.entries[i];
        match entry.command_mut().revert(target) {
            Ok(()) => {
                let description = entry.description();
                self.cursor = i.checked_sub(1);
                debug!(command = %description, "Undo applied");
                StepOutcome::Applied { description }
            }
            Err(e) => {
                warn!(error = %e, "Undo failed, cursor unchanged");
                StepOutcome::Failed(e)
            }
        }
    }

    /// Re-apply the command after the cursor and step forward
    ///
    /// The cursor only moves when the re-apply succeeds.
    pub fn redo(&mut self, target: &mut C::Target) -> StepOutcome {
        let next = self.cursor.map_or(0, |i| i + 1);
        if next >= self.entries.len() {
            return StepOutcome::Nothing;
        }

        let entry = &mut self.entries[next];
        match entry.command_mut().apply(target) {
            Ok(()) => {
                let description = entry.description();
                self.cursor = Some(next);
                debug!(command = %description, "Redo applied");
                StepOutcome::Applied { description }
            }
            Err(e) => {
                warn!(error = %e, "Redo failed, cursor unchanged");
                StepOutcome::Failed(e)
            }
        }
    }

    /// Forget the entire history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Walk the cursor to `index` one undo/redo step at a time
    ///
    /// `None` targets the state before the first entry. Each step runs the
    /// command's full side effects; on a failed step the walk stops where
    /// it is. Targets outside the history are rejected without stepping.
    pub fn jump_to_index(
        &mut self,
        index: Option<usize>,
        target: &mut C::Target,
    ) -> JumpOutcome {
        if let Some(i) = index {
            if i >= self.entries.len() {
                return JumpOutcome::OutOfRange;
            }
        }

        let mut steps = 0;
        loop {
            if self.cursor == index {
                return JumpOutcome::Completed { steps };
            }

            // Option<usize> orders None before Some, matching "before the
            // first entry" being the lowest position
            let outcome = if index < self.cursor {
                self.undo(target)
            } else {
                self.redo(target)
            };

            match outcome {
                StepOutcome::Applied { .. } => steps += 1,
                StepOutcome::Nothing => {
                    // Unreachable given the range check above, but never loop
                    return JumpOutcome::Completed { steps };
                }
                StepOutcome::Failed(error) => {
                    return JumpOutcome::Stopped {
                        completed: steps,
                        error,
                    }
                }
            }
        }
    }
}
