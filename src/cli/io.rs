use std::io::{self, BufRead, Write};

use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::cli::core::{CliError, CliMode};

/// Reasons a typed amount is turned away before it reaches the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountInputError {
    NotANumber(String),
    NotPositive(i64),
}

impl std::fmt::Display for AmountInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmountInputError::NotANumber(raw) => {
                write!(f, "`{raw}` is not a whole number. Please enter digits only.")
            }
            AmountInputError::NotPositive(value) => {
                write!(f, "{value} is not a positive amount.")
            }
        }
    }
}

pub fn parse_amount(raw: &str) -> Result<i64, AmountInputError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<i64>()
        .map_err(|_| AmountInputError::NotANumber(trimmed.to_string()))?;
    if value <= 0 {
        return Err(AmountInputError::NotPositive(value));
    }
    Ok(value)
}

/// Reads menu choices and amounts either through dialoguer widgets or plain stdin lines.
pub struct Prompter {
    mode: CliMode,
    theme: ColorfulTheme,
    input: Box<dyn BufRead>,
}

impl Prompter {
    pub fn new(mode: CliMode) -> Self {
        Self::with_input(mode, Box::new(io::BufReader::new(io::stdin())))
    }

    pub fn with_input(mode: CliMode, input: Box<dyn BufRead>) -> Self {
        Self {
            mode,
            theme: ColorfulTheme::default(),
            input,
        }
    }

    /// Returns the chosen menu key, or `None` when input is exhausted or cancelled.
    pub fn select(
        &mut self,
        prompt: &str,
        items: &[(&str, &str)],
    ) -> Result<Option<String>, CliError> {
        match self.mode {
            CliMode::Interactive => {
                let labels: Vec<&str> = items.iter().map(|(_, label)| *label).collect();
                let picked = Select::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .items(&labels)
                    .default(0)
                    .interact_opt()?;
                Ok(picked
                    .and_then(|idx| items.get(idx))
                    .map(|(key, _)| key.to_string()))
            }
            CliMode::Script => {
                for (key, label) in items {
                    println!("{key}. {label}");
                }
                self.read_line(prompt)
            }
        }
    }

    /// Asks for free-form text. `None` means the input stream ended.
    pub fn text(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        match self.mode {
            CliMode::Interactive => {
                let value = Input::<String>::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .interact_text()?;
                Ok(Some(value))
            }
            CliMode::Script => self.read_line(prompt),
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        print!("{prompt}: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_positive_integers() {
        assert_eq!(parse_amount(" 250 "), Ok(250));
        assert_eq!(parse_amount("+7"), Ok(7));
    }

    #[test]
    fn parse_amount_rejects_bad_input() {
        assert_eq!(
            parse_amount("12.5"),
            Err(AmountInputError::NotANumber("12.5".into()))
        );
        assert_eq!(
            parse_amount("lunch"),
            Err(AmountInputError::NotANumber("lunch".into()))
        );
        assert_eq!(parse_amount("0"), Err(AmountInputError::NotPositive(0)));
        assert_eq!(parse_amount("-40"), Err(AmountInputError::NotPositive(-40)));
    }

    #[test]
    fn script_prompter_reads_lines_until_eof() {
        let input = io::Cursor::new("1\n  300 \n");
        let mut prompter = Prompter::with_input(CliMode::Script, Box::new(input));
        let choice = prompter
            .select("Choose", &[("1", "Record an expense"), ("2", "Exit")])
            .unwrap();
        assert_eq!(choice.as_deref(), Some("1"));
        assert_eq!(prompter.text("Amount").unwrap().as_deref(), Some("300"));
        assert_eq!(prompter.text("Amount").unwrap(), None);
    }
}
