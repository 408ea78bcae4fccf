use std::{io, sync::Arc};

use thiserror::Error;

use crate::{
    cli::{
        io::{parse_amount, Prompter},
        output,
    },
    config::Config,
    core::{
        services::{ExpenseService, SummaryService},
        time::Clock,
    },
    errors::TrackerError,
    ledger::Rollover,
};

pub const SCRIPT_ENV: &str = "EXPENSE_TRACKER_CLI_SCRIPT";

const MENU_PROMPT: &str = "Choose an option";
const AMOUNT_PROMPT: &str = "How much did you spend?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if std::env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Record,
    Exit,
    ShowTotals,
}

const MENU: [(&str, &str, MenuAction); 3] = [
    ("1", "Record an expense", MenuAction::Record),
    ("2", "Exit", MenuAction::Exit),
    ("3", "Show current totals", MenuAction::ShowTotals),
];

/// State shared by the shell loop: the tracker service, clock, display settings and input.
pub struct ShellContext {
    service: ExpenseService,
    clock: Arc<dyn Clock>,
    currency: String,
    prompter: Prompter,
}

impl ShellContext {
    pub fn new(
        service: ExpenseService,
        clock: Arc<dyn Clock>,
        config: &Config,
        prompter: Prompter,
    ) -> Self {
        Self {
            service,
            clock,
            currency: config.currency.clone(),
            prompter,
        }
    }

    /// Rolls the totals forward to today and prints the start-up banner.
    pub fn start(&mut self) {
        let rollover = match self.service.refresh() {
            Ok(rollover) => rollover,
            Err(err) => {
                output::warning(format!("Could not save the rolled-over totals: {err}"));
                Rollover::None
            }
        };
        output::section("Expense tracker");
        output::info(format!("Today: {}", self.clock.today().format("%Y-%m-%d")));
        if let Some(note) = SummaryService::describe_rollover(rollover) {
            output::info(note);
        }
        self.print_totals();
    }

    pub(crate) fn step(&mut self) -> Result<LoopControl, CliError> {
        output::section("Menu");
        let entries: Vec<(&str, &str)> = MENU
            .iter()
            .map(|(key, label, _)| (*key, *label))
            .collect();
        let Some(choice) = self.prompter.select(MENU_PROMPT, &entries)? else {
            return Ok(LoopControl::Exit);
        };
        let action = MENU
            .iter()
            .find(|(key, _, _)| *key == choice)
            .map(|(_, _, action)| *action);
        match action {
            Some(MenuAction::Record) => self.record(),
            Some(MenuAction::ShowTotals) => {
                self.show_totals();
                Ok(LoopControl::Continue)
            }
            Some(MenuAction::Exit) => {
                output::info("Closing the expense tracker.");
                Ok(LoopControl::Exit)
            }
            None => {
                output::warning("Invalid choice. Please pick one of the listed options.");
                Ok(LoopControl::Continue)
            }
        }
    }

    fn record(&mut self) -> Result<LoopControl, CliError> {
        let amount = loop {
            let Some(raw) = self.prompter.text(AMOUNT_PROMPT)? else {
                return Ok(LoopControl::Exit);
            };
            match parse_amount(&raw) {
                Ok(amount) => break amount,
                Err(err) => output::warning(err),
            }
        };
        match self.service.record_expense(amount) {
            Ok(_) => output::success(format!("Recorded {amount} {}.", self.currency)),
            Err(err @ TrackerError::AmountOverflow { .. }) => {
                output::error(err);
                return Ok(LoopControl::Continue);
            }
            Err(err) => output::warning(format!(
                "Recorded {amount} {} but could not save to {}: {err}",
                self.currency,
                self.service.storage_location()
            )),
        }
        self.print_totals();
        Ok(LoopControl::Continue)
    }

    fn show_totals(&mut self) {
        if let Err(err) = self.service.refresh() {
            output::warning(format!("Could not save the rolled-over totals: {err}"));
        }
        self.print_totals();
    }

    fn print_totals(&self) {
        let summary =
            SummaryService::summarize(self.service.totals(), self.clock.today(), &self.currency);
        output::info(summary);
    }
}
