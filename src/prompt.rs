//! User input and interaction handling.
//! Variable values that are not overridden are collected through a
//! [`Prompter`], so the resolver never talks to the console directly.

use crate::error::{Error, Result};
use dialoguer::Input;
use std::cell::RefCell;
use std::io::{self, BufRead, IsTerminal, Write};

/// Supplies values for variables that need user input.
pub trait Prompter {
    /// Asks for the value of `name`.
    ///
    /// Returns `Ok(Some(text))` with the raw (possibly blank) input, or
    /// `Ok(None)` when no input can be collected at all (non-interactive
    /// session, end of input). Blank input and defaults are handled by the
    /// caller.
    fn ask(&self, name: &str, question: &str, default: Option<&str>) -> Result<Option<String>>;
}

fn format_question(name: &str, question: &str, default: Option<&str>) -> String {
    match default {
        Some(default) => format!("{name} ({question}) [{default}]"),
        None => format!("{name} ({question})"),
    }
}

/// Terminal prompts rendered with dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, name: &str, question: &str, default: Option<&str>) -> Result<Option<String>> {
        let input: String = Input::new()
            .with_prompt(format_question(name, question, default))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))?;
        Ok(Some(input))
    }
}

/// Line-based prompts for piped input: one answer per line, `None` at end of input.
pub struct LinePrompter<R: BufRead> {
    reader: RefCell<R>,
}

impl<R: BufRead> LinePrompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader: RefCell::new(reader) }
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn ask(&self, name: &str, question: &str, default: Option<&str>) -> Result<Option<String>> {
        print!("{}: ", format_question(name, question, default));
        io::stdout().flush()?;

        let mut line = String::new();
        let read = self.reader.borrow_mut().read_line(&mut line)?;
        if read == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Never collects input; variables fall back to their defaults.
#[derive(Debug, Default)]
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn ask(&self, _name: &str, _question: &str, _default: Option<&str>) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Picks dialoguer on a terminal and line-based reading when stdin is piped.
pub fn default_prompter() -> Box<dyn Prompter> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        Box::new(DialoguerPrompter::new())
    } else {
        Box::new(LinePrompter::new(stdin.lock()))
    }
}
