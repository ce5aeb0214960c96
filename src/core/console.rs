//! Terminal collaborator - the blocking prompt/read pair the session runs on
//!
//! Every interactive operation goes through this trait so the whole session
//! can be exercised in tests with a scripted console instead of a TTY.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// A blocking line-oriented terminal.
pub trait Console {
    /// Print `prompt` without a trailing newline and block for one line of
    /// input. The returned line is trimmed. End of input is an
    /// `UnexpectedEof` error, never an empty string.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Print one line of output.
    fn write_line(&mut self, text: &str);
}

/// Production console over stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(line.trim().to_string())
    }

    fn write_line(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Scripted console replaying a fixed sequence of inputs.
///
/// Prompts and output lines are captured for assertions. Reading past the
/// end of the script fails the same way a closed stdin does.
#[derive(Debug, Default)]
pub struct ReplayConsole {
    inputs: VecDeque<String>,
    output: Vec<String>,
}

impl ReplayConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Everything written so far: prompts and output lines, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn output_text(&self) -> String {
        self.output.join("\n")
    }

    /// Inputs not yet consumed by the session.
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ReplayConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.output.push(prompt.to_string());
        self.inputs
            .pop_front()
            .map(|line| line.trim().to_string())
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn write_line(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}
