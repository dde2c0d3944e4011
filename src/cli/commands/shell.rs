//! Interactive shell: a session-scoped undo/redo surface
//!
//! One `CommandStack` lives for the duration of the session; the portfolio
//! is persisted after every successful mutation, undo, and redo. The stack
//! itself is volatile and dies with the session.

use anyhow::Result;
use chrono::Local;
use clap::Args;
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use tracing::info;

use crate::cli::args::{parse_amount, parse_date, parse_index};
use crate::data_paths::DataPaths;
use crate::history::fund_commands::FundCommand;
use crate::history::{CommandStack, ExecuteOutcome, StepOutcome};
use crate::portfolio::storage::PortfolioStore;
use crate::portfolio::{FundData, Portfolio};

use super::list::{format_gain, render_table};

#[derive(Args, Clone)]
pub struct ShellArgs {}

pub struct ShellCommand {
    _args: ShellArgs,
}

impl ShellCommand {
    pub fn new(args: ShellArgs) -> Self {
        Self { _args: args }
    }

    pub fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let store = PortfolioStore::new(&data_paths)?;
        let portfolio = store.load()?;
        info!(funds = portfolio.len(), "Shell session started");

        let mut session = ShellSession {
            store,
            portfolio,
            stack: CommandStack::new(),
        };

        println!(
            "{} interactive session. Type {} for commands, {} to leave.",
            "fundtrack".bright_blue().bold(),
            "help".yellow(),
            "quit".yellow()
        );

        let stdin = io::stdin();
        loop {
            print!("{} ", "fundtrack>".bright_blue());
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break; // EOF
            }

            match session.dispatch(line.trim()) {
                Ok(ControlFlow::Continue) => {}
                Ok(ControlFlow::Quit) => break,
                Err(e) => println!("{} {}", "✗".red(), e),
            }
        }

        info!("Shell session ended");
        Ok(())
    }
}

enum ControlFlow {
    Continue,
    Quit,
}

struct ShellSession {
    store: PortfolioStore,
    portfolio: Portfolio,
    stack: CommandStack<FundCommand>,
}

impl ShellSession {
    fn dispatch(&mut self, line: &str) -> Result<ControlFlow> {
        if line.is_empty() {
            return Ok(ControlFlow::Continue);
        }

        let tokens = tokenize(line);
        let Some((cmd, args)) = tokens.split_first() else {
            return Ok(ControlFlow::Continue);
        };
        let cmd = cmd.as_str();

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => return Ok(ControlFlow::Quit),
            "list" => self.list(),
            "add" => self.add(args)?,
            "edit" => self.edit(args)?,
            "delete" => self.delete(args)?,
            "undo" => self.undo()?,
            "redo" => self.redo()?,
            "history" => self.history(),
            "jump" => self.jump(args)?,
            "clear" => {
                self.stack.clear();
                announce("History cleared");
            }
            other => {
                println!(
                    "{} Unknown command '{}'. Type {} for a list.",
                    "✗".red(),
                    other,
                    "help".yellow()
                );
            }
        }
        Ok(ControlFlow::Continue)
    }

    fn list(&self) {
        if self.portfolio.is_empty() {
            println!("Portfolio is empty");
            return;
        }
        println!("{}", render_table(&self.portfolio));
        println!(
            "Total gain: {}",
            format_gain(
                self.portfolio.total_gain(),
                self.portfolio.total_gain_percentage()
            )
        );
    }

    fn add(&mut self, args: &[String]) -> Result<()> {
        if args.len() < 3 || args.len() > 5 {
            anyhow::bail!("usage: add <name> <producer> <investment> [value] [date]");
        }

        let investment = parse_amount(&args[2]).map_err(anyhow::Error::msg)?;
        let value = match args.get(3) {
            Some(v) => parse_amount(v).map_err(anyhow::Error::msg)?,
            None => investment,
        };
        let date = match args.get(4) {
            Some(d) => parse_date(d).map_err(anyhow::Error::msg)?,
            None => Local::now().date_naive(),
        };

        let fund = FundData::new(args[0].clone(), args[1].clone(), investment, value, date);
        self.run(FundCommand::add(fund)?)
    }

    fn edit(&mut self, args: &[String]) -> Result<()> {
        if args.len() != 3 {
            anyhow::bail!("usage: edit <position> <name|producer|investment|value|date> <new value>");
        }

        let index = parse_index(&args[0]).map_err(anyhow::Error::msg)? - 1;
        let mut replacement = self
            .portfolio
            .get(index)
            .ok_or_else(|| anyhow::anyhow!("no fund at position {}", args[0]))?
            .clone();

        match args[1].as_str() {
            "name" => replacement.name = args[2].clone(),
            "producer" => replacement.producer = args[2].clone(),
            "investment" => {
                replacement.investment = parse_amount(&args[2]).map_err(anyhow::Error::msg)?
            }
            "value" => replacement.value = parse_amount(&args[2]).map_err(anyhow::Error::msg)?,
            "date" => {
                replacement.investment_date =
                    parse_date(&args[2]).map_err(anyhow::Error::msg)?
            }
            other => anyhow::bail!("unknown field '{}'", other),
        }

        self.run(FundCommand::edit(index, replacement)?)
    }

    fn delete(&mut self, args: &[String]) -> Result<()> {
        if args.is_empty() {
            anyhow::bail!("usage: delete <position> [position...]");
        }

        let mut indices = Vec::with_capacity(args.len());
        for arg in args {
            indices.push(parse_index(arg).map_err(anyhow::Error::msg)? - 1);
        }

        let command = if indices.len() == 1 {
            FundCommand::delete(indices[0])
        } else {
            FundCommand::bulk_delete(indices)
        };
        self.run(command)
    }

    /// Route a mutation through the stack and persist on success
    fn run(&mut self, command: FundCommand) -> Result<()> {
        match self.stack.execute(command, &mut self.portfolio) {
            ExecuteOutcome::Applied => {
                self.store.save(&self.portfolio)?;
                let description = self
                    .stack
                    .undo_description()
                    .unwrap_or_else(|| "Done".to_string());
                announce(&description);
                Ok(())
            }
            ExecuteOutcome::Failed(e) => Err(e.into()),
        }
    }

    fn undo(&mut self) -> Result<()> {
        match self.stack.undo(&mut self.portfolio) {
            StepOutcome::Applied { description } => {
                self.store.save(&self.portfolio)?;
                announce(&format!("Undid: {}", description));
            }
            StepOutcome::Nothing => println!("Nothing to undo"),
            StepOutcome::Failed(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn redo(&mut self) -> Result<()> {
        match self.stack.redo(&mut self.portfolio) {
            StepOutcome::Applied { description } => {
                self.store.save(&self.portfolio)?;
                announce(&format!("Redid: {}", description));
            }
            StepOutcome::Nothing => println!("Nothing to redo"),
            StepOutcome::Failed(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn history(&self) {
        if self.stack.is_empty() {
            println!("History is empty");
            return;
        }

        let current = self.stack.current_index();
        let marker_none = if current.is_none() { "→" } else { " " };
        println!("{} {:>3}  (session start)", marker_none, "-");

        for (i, entry) in self.stack.entries().enumerate() {
            let marker = if current == Some(i) { "→" } else { " " };
            println!(
                "{} {:>3}  {}  {}",
                marker,
                i + 1,
                entry.executed_at().with_timezone(&Local).format("%H:%M:%S"),
                entry.description()
            );
        }
        println!(
            "{} of {} entries applied (capacity {})",
            current.map_or(0, |i| i + 1),
            self.stack.len(),
            self.stack.max_size()
        );
    }

    fn jump(&mut self, args: &[String]) -> Result<()> {
        if args.len() != 1 {
            anyhow::bail!("usage: jump <entry|start>");
        }

        let target = if args[0] == "start" {
            None
        } else {
            Some(parse_index(&args[0]).map_err(anyhow::Error::msg)? - 1)
        };

        if let Some(i) = target {
            if i >= self.stack.len() {
                anyhow::bail!("entry {} is outside the history", args[0]);
            }
        }

        // Walk one step at a time so every mutation is persisted and
        // announced, just like a manual undo/redo sequence
        let mut steps = 0;
        while self.stack.current_index() != target {
            let backwards = target < self.stack.current_index();
            let outcome = if backwards {
                self.stack.undo(&mut self.portfolio)
            } else {
                self.stack.redo(&mut self.portfolio)
            };

            match outcome {
                StepOutcome::Applied { description } => {
                    self.store.save(&self.portfolio)?;
                    let verb = if backwards { "Undid" } else { "Redid" };
                    announce(&format!("{}: {}", verb, description));
                    steps += 1;
                }
                StepOutcome::Nothing => break,
                StepOutcome::Failed(e) => {
                    anyhow::bail!("jump stopped after {} steps: {}", steps, e)
                }
            }
        }

        announce(&format!("Jumped {} steps", steps));
        Ok(())
    }
}

fn announce(message: &str) {
    println!("{} {}", "✓".green(), message);
}

fn print_help() {
    println!("Commands:");
    println!("  list                                     show the portfolio");
    println!("  add <name> <producer> <inv> [val] [date] add a fund (quote names with spaces)");
    println!("  edit <pos> <field> <value>               change name|producer|investment|value|date");
    println!("  delete <pos> [pos...]                    remove funds by position");
    println!("  undo / redo                              step through the session history");
    println!("  history                                  show the command history and cursor");
    println!("  jump <entry|start>                       walk the cursor to a history entry");
    println!("  clear                                    forget the history");
    println!("  quit                                     leave the session");
}

/// Split a line into tokens, honoring double quotes
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
