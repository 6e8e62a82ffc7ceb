//! Interactive value entry.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Asks a person for a variable's value.
pub trait Prompt {
    /// Asks for `label`, showing `current` as the value kept on an empty
    /// answer. Returns `None` when the answer is empty or input has ended.
    fn ask(&mut self, label: &str, current: Option<&str>) -> io::Result<Option<String>>;
}

/// Line-based prompter over any reader and writer.
#[derive(Debug)]
pub struct TermPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TermPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl TermPrompt<StdinLock<'static>, Stdout> {
    /// Prompts on standard output and reads standard input.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for TermPrompt<R, W> {
    fn ask(&mut self, label: &str, current: Option<&str>) -> io::Result<Option<String>> {
        match current {
            Some(current) => write!(self.output, "{label} [{current}]: ")?,
            None => write!(self.output, "{label}: ")?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim_end_matches(['\r', '\n']);
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }
}
