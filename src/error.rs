//! Centralised error hierarchy for the interpreter.
//!
//! The scanner, parser and evaluator convert their failure modes into one of
//! the variants defined here. Each variant keeps the raw location it refers
//! to (a byte offset, or the offending [`Token`]) together with a message;
//! turning that into a `[line N] ...` report is the job of
//! [`crate::diagnostic`].
//!
//! The module **does not** print diagnostics itself.

use std::fmt;
use std::io;

use log::info;
use thiserror::Error;

use crate::token::Token;

/// The pipeline stage that raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scanner,
    Parser,
    Runtime,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Scanner => "Scanner",
            Stage::Parser => "Parser",
            Stage::Runtime => "Runtime",
        };

        f.write_str(name)
    }
}

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error. Non-fatal: the scanner keeps going.
    #[error("{message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// Byte offset of the start of the offending lexeme.
        offset: usize,
    },

    /// Syntactic (parser) error. Aborts the current parse.
    #[error("{message}")]
    Parse { message: String, token: Token },

    /// Runtime evaluation error. Aborts the current program unit.
    #[error("{message}")]
    Runtime { message: String, token: Token },

    /// A `return` signal escaped the outermost program.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Wrapper around `std::io::Error` (transparent), raised by the print sink.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(offset: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: offset={}, msg={}", offset, message);

        LoxError::Lex { message, offset }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating Parse error: token={:?}, msg={}",
            token.lexeme, message
        );

        LoxError::Parse {
            message,
            token: token.clone(),
        }
    }

    /// Helper constructor for the **evaluator**.
    pub fn runtime<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating Runtime error: token={:?}, msg={}",
            token.lexeme, message
        );

        LoxError::Runtime {
            message,
            token: token.clone(),
        }
    }

    /// The stage that raised this error.
    pub fn stage(&self) -> Stage {
        match self {
            LoxError::Lex { .. } => Stage::Scanner,
            LoxError::Parse { .. } => Stage::Parser,
            LoxError::Runtime { .. } | LoxError::Internal(_) | LoxError::Io(_) => Stage::Runtime,
        }
    }

    /// Byte offset into the source this error points at, if it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            LoxError::Lex { offset, .. } => Some(*offset),
            LoxError::Parse { token, .. } | LoxError::Runtime { token, .. } => Some(token.offset),
            LoxError::Internal(_) | LoxError::Io(_) => None,
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;
