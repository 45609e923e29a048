//! Shared prompt helpers for the interactive session.
//!
//! [`TerminalPrompt`] drives a real terminal through dialoguer; tests use the
//! generated `MockPromptOps` instead.

use std::io;
use std::io::IsTerminal;

use anyhow::Result;
use console::Term;
use dialoguer::Confirm;
use dialoguer::Input;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
#[cfg(test)]
use mockall::automock;

use crate::error::Error;

// -----------------------------------------------------------------------------
// PromptOps trait

/// Validation applied to a line of text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRule {
    Any,
    /// Re-ask until the trimmed answer is non-empty.
    NonBlank,
}

/// Operations for talking to the user
#[cfg_attr(test, automock)]
pub trait PromptOps {
    /// Read one line of text. The answer is returned trimmed.
    fn input(&self, prompt: &str, default: Option<String>, rule: InputRule) -> Result<String>;

    /// Pick one entry from `items`, returning its index.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Block until a single key is pressed.
    fn pause(&self, prompt: &str) -> Result<()>;
}

// -----------------------------------------------------------------------------
// TerminalPrompt

/// Checks if both stdin and stdout are connected to a terminal.
pub fn is_interactive_terminal() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Real implementation backed by dialoguer
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn require_interactive(&self) -> Result<()> {
        if !is_interactive_terminal() {
            return Err(Error::NotInteractive.into());
        }
        Ok(())
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptOps for TerminalPrompt {
    fn input(&self, prompt: &str, default: Option<String>, rule: InputRule) -> Result<String> {
        self.require_interactive()?;

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(rule == InputRule::Any);
        if let Some(default) = default {
            input = input.default(default);
        }
        if rule == InputRule::NonBlank {
            input = input.validate_with(|answer: &String| -> Result<(), &'static str> {
                if answer.trim().is_empty() {
                    Err("A value is required")
                } else {
                    Ok(())
                }
            });
        }

        let answer = input.interact_text().map_err(prompt_error)?;
        Ok(answer.trim().to_string())
    }

    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        self.require_interactive()?;

        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        self.require_interactive()?;

        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn pause(&self, prompt: &str) -> Result<()> {
        self.require_interactive()?;

        let term = Term::stdout();
        term.write_line(prompt).map_err(io_error)?;
        term.read_key().map_err(io_error)?;
        Ok(())
    }
}

fn prompt_error(err: dialoguer::Error) -> anyhow::Error {
    let dialoguer::Error::IO(err) = err;
    io_error(err)
}

fn io_error(err: io::Error) -> anyhow::Error {
    match err.kind() {
        io::ErrorKind::Interrupted => Error::Interrupted.into(),
        io::ErrorKind::NotConnected => Error::NotInteractive.into(),
        _ => anyhow::Error::new(err).context("Failed to read from terminal"),
    }
}
