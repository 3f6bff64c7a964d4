//! # Console
//!
//! Line-oriented prompt/response over any reader and writer. The binary
//! wires it to stdin/stdout; tests drive it with `Cursor` and `Vec<u8>`.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::{AppError, AppResult};

/// Width of banners and rules printed on screen.
pub const SCREEN_WIDTH: usize = 50;

/// Prompt/response console.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console over `input` and `output`.
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Prints `text` without a newline, flushes, and reads one line.
    ///
    /// Returns the trimmed line, or `None` once input is exhausted.
    pub fn prompt(&mut self, text: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Console::prompt`], but running out of input is an input error.
    pub fn ask(&mut self, text: &str) -> AppResult<String> {
        self.prompt(text)?
            .ok_or_else(|| AppError::input("No input received."))
    }

    /// Prints one line.
    pub fn line(&mut self, text: impl Display) -> AppResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Prints a rule of `ch` across the screen.
    pub fn rule(&mut self, ch: char) -> AppResult<()> {
        self.line(ch.to_string().repeat(SCREEN_WIDTH))
    }

    /// Prints `text` centered on the screen.
    pub fn centered(&mut self, text: &str) -> AppResult<()> {
        self.line(format!("{:^width$}", text, width = SCREEN_WIDTH))
    }

    /// Consumes the console, returning the reader and writer.
    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_prompt_trims_and_echoes() {
        let mut console = console("  b \n");
        assert_eq!(console.prompt("Choice: ").unwrap(), Some("b".to_string()));
        let (_, out) = console.into_parts();
        assert_eq!(out, b"Choice: ");
    }

    #[test]
    fn test_prompt_eof() {
        let mut console = console("");
        assert_eq!(console.prompt("Choice: ").unwrap(), None);
    }

    #[test]
    fn test_ask_eof_is_input_error() {
        let mut console = console("");
        let err = console.ask("Amount: ").unwrap_err();
        assert_eq!(err.code, ErrorCode::Input);
    }

    #[test]
    fn test_rule_and_centered() {
        let mut console = console("");
        console.rule('-').unwrap();
        console.centered("HP").unwrap();
        let (_, out) = console.into_parts();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].len(), SCREEN_WIDTH);
        assert_eq!(lines[1].trim(), "HP");
        assert_eq!(lines[1].len(), SCREEN_WIDTH);
    }
}
