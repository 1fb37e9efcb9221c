//! Synchronous interactive prompt port.
//!
//! The rename collector talks to the operator through this trait so the
//! engine stays pure and testable without a real terminal. The terminal
//! implementation prompts on stderr and reads stdin; the scripted
//! implementation replays canned answers.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

pub trait PromptPort {
    /// Ask a free-text question. An empty reply resolves to `default`
    /// when one is given.
    fn ask(&self, question: &str, default: Option<&str>) -> Result<String>;

    /// Ask a yes/no question.
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;

    /// Show a message to the operator (stderr; never stdout).
    fn message(&self, text: &str);
}

/// Prompt on stderr, read answers from stdin.
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }

    pub fn is_interactive() -> bool {
        io::stdin().is_terminal() && io::stdout().is_terminal()
    }

    fn read_line(&self) -> Result<String> {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::internal_io(e.to_string(), Some("read stdin".to_string())))?;
        Ok(line.trim().to_string())
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptPort for TerminalPrompt {
    fn ask(&self, question: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(d) => eprint!("{} [{}]: ", question, d),
            None => eprint!("{}: ", question),
        }
        io::stderr().flush().ok();

        let answer = self.read_line()?;
        if answer.is_empty() {
            if let Some(d) = default {
                return Ok(d.to_string());
            }
        }
        Ok(answer)
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let suffix = if default { "[Y/n]" } else { "[y/N]" };
        eprint!("{} {}: ", question, suffix);
        io::stderr().flush().ok();

        let answer = self.read_line()?.to_lowercase();
        if answer.is_empty() {
            return Ok(default);
        }
        Ok(answer.starts_with('y'))
    }

    fn message(&self, text: &str) {
        eprintln!("{}", text);
    }
}

/// Replays a fixed sequence of answers. Empty strings select the default.
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<String>>,
    confirmations: RefCell<VecDeque<bool>>,
    pub transcript: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str], confirmations: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            confirmations: RefCell::new(confirmations.iter().copied().collect()),
            transcript: RefCell::new(Vec::new()),
        }
    }
}

impl PromptPort for ScriptedPrompt {
    fn ask(&self, question: &str, default: Option<&str>) -> Result<String> {
        self.transcript.borrow_mut().push(question.to_string());
        let answer = self
            .answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::internal_unexpected("scripted prompt ran out of answers"))?;
        if answer.is_empty() {
            if let Some(d) = default {
                return Ok(d.to_string());
            }
        }
        Ok(answer)
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        self.transcript.borrow_mut().push(question.to_string());
        Ok(self
            .confirmations
            .borrow_mut()
            .pop_front()
            .unwrap_or(default))
    }

    fn message(&self, text: &str) {
        self.transcript.borrow_mut().push(text.to_string());
    }
}
