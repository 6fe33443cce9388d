//! Where `print` statements go.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// A line-oriented text sink. Its only contract is "append this line".
pub trait Output {
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Writes each line to the process's standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();

        writeln!(stdout, "{}", line)?;
        stdout.flush()
    }
}

/// Collects lines in memory. Clones share the same buffer, so a caller can
/// hand one clone to an interpreter and read the lines back through another.
#[derive(Debug, Default, Clone)]
pub struct CapturedOutput {
    lines: Rc<RefCell<Vec<String>>>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Output for CapturedOutput {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.borrow_mut().push(line.to_owned());

        Ok(())
    }
}
