//! # Console
//!
//! Line-oriented terminal I/O for the menu.
//!
//! Generic over `BufRead` / `Write` so a whole session can be driven from
//! a `Cursor` in tests and captured into a `Vec<u8>`.

use std::io::{BufRead, Write};

use crate::error::{AppError, AppResult};

/// Reads operator input and prints responses.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Prints one line.
    pub fn say(&mut self, line: impl AsRef<str>) -> AppResult<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Prints `prompt` without a newline and reads one line of input.
    ///
    /// The returned text has surrounding whitespace removed. Bytes that are
    /// not UTF-8 come back as U+FFFD, so garbage is rejected by the parser
    /// that reads the answer. Closed input is [`AppError::EndOfInput`].
    pub fn prompt(&mut self, prompt: &str) -> AppResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(AppError::EndOfInput);
        }

        Ok(String::from_utf8_lossy(&raw).trim().to_string())
    }

    /// Consumes the console and returns the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_trimmed_lines() {
        let mut console = Console::new(Cursor::new("  7 \nCash\n"), Vec::new());

        assert_eq!(console.prompt("Enter Product ID: ").unwrap(), "7");
        assert_eq!(console.prompt("Payment: ").unwrap(), "Cash");
        assert!(matches!(console.prompt("More: "), Err(AppError::EndOfInput)));

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "Enter Product ID: Payment: More: ");
    }

    #[test]
    fn test_prompt_tolerates_invalid_utf8() {
        let input: &[u8] = &[0xff, 0xfe, b'\n', b'4', b'\n'];
        let mut console = Console::new(Cursor::new(input), Vec::new());

        let garbled = console.prompt("Enter Product ID: ").unwrap();
        assert_eq!(garbled, "\u{fffd}\u{fffd}");
        assert!(garbled.parse::<i64>().is_err());
        assert_eq!(console.prompt("Enter Quantity: ").unwrap(), "4");
    }

    #[test]
    fn test_say_appends_newline() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        console.say("Sale canceled.").unwrap();
        assert_eq!(String::from_utf8(console.into_output()).unwrap(), "Sale canceled.\n");
    }
}
