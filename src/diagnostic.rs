//! Turns a [`LoxError`] plus the source it came from into a human report:
//!
//! ```text
//! [line 2] Runtime Error: Operand must be a number.
//! print -"x";
//!       ^
//! ```
//!
//! Line and column are only computed here, never while scanning.

use std::fmt;

use memchr::{memchr, memchr_iter};

use crate::error::{LoxError, Stage};

/// A position resolved against the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// 1-based line number.
    pub line: usize,

    /// 0-based column, in characters.
    pub column: usize,

    /// The full text of the line, without its terminator.
    pub line_text: String,
}

impl Location {
    /// Resolve a byte `offset` in `source`. Offsets past the end (the EOF
    /// token) land after the last character.
    pub fn locate(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }

        let bytes = source.as_bytes();
        let before = &bytes[..offset];

        let line = memchr_iter(b'\n', before).count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |pos| pos + 1);
        let line_end = memchr(b'\n', &bytes[offset..]).map_or(source.len(), |pos| offset + pos);

        let line_text = source[line_start..line_end].trim_end_matches('\r');
        let column = source[line_start..offset].chars().count();

        Self {
            line,
            column,
            line_text: line_text.to_owned(),
        }
    }
}

/// One rendered error report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
    pub location: Option<Location>,
}

impl Diagnostic {
    pub fn new(source: &str, error: &LoxError) -> Self {
        Self {
            stage: error.stage(),
            message: error.to_string(),
            location: error.offset().map(|offset| Location::locate(source, offset)),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => {
                writeln!(
                    f,
                    "[line {}] {} Error: {}",
                    location.line, self.stage, self.message
                )?;
                writeln!(f, "{}", location.line_text)?;
                write!(f, "{}^", " ".repeat(location.column))
            }
            None => write!(f, "{} Error: {}", self.stage, self.message),
        }
    }
}
