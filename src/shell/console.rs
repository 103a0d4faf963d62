//! Line-oriented terminal I/O for the interactive shell.
//!
//! Generic over reader/writer so the menus can be driven from a script in tests.

use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console on the process's stdin/stdout.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a line.
    pub fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    /// Write without a newline and flush (for "Sending... Sent!").
    pub fn print(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        write!(self.output, "{}", text.as_ref())?;
        self.output.flush()
    }

    /// Show `label`, read one line, and return it trimmed.
    ///
    /// `None` means the input is closed (Ctrl-D or end of a piped script).
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.print(label)?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_trims_and_detects_eof() {
        let mut console = Console::new(Cursor::new("  hello \n"), Vec::new());
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("hello"));
        assert_eq!(console.prompt("> ").unwrap(), None);

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.starts_with("> > "));
    }

    #[test]
    fn test_blank_line_is_empty_string() {
        let mut console = Console::new(Cursor::new("\n"), Vec::new());
        assert_eq!(console.prompt("").unwrap().as_deref(), Some(""));
    }
}
