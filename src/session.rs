use log::{debug, info};

use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::output::Output;
use crate::parser::{Parser, ParserConfig};
use crate::scanner::scan_all;
use crate::stmt::Stmt;

/// One interpreter plus the parser options to feed it with. Globals,
/// functions and variables survive from one [`Session::run`] to the next,
/// which is what the interactive prompt relies on.
pub struct Session {
    interpreter: Interpreter,
    config: ParserConfig,
}

impl Session {
    pub fn new(output: Box<dyn Output>, config: ParserConfig) -> Self {
        Self {
            interpreter: Interpreter::with_output(output),
            config,
        }
    }

    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    /// Scan, parse and execute `source`.
    ///
    /// Every lexical error is returned (and nothing is parsed); otherwise at
    /// most one parse or runtime error is.
    pub fn run(&mut self, source: &str) -> Result<(), Vec<LoxError>> {
        let statements = self.compile(source)?;

        self.interpreter
            .interpret(&statements)
            .map_err(|e| vec![e])?;

        info!("Session ran {} statements", statements.len());

        Ok(())
    }

    /// Scan and parse `source` without executing it.
    pub fn compile(&self, source: &str) -> Result<Vec<Stmt>, Vec<LoxError>> {
        let (tokens, errors) = scan_all(source);

        if !errors.is_empty() {
            debug!("Aborting before parse: {} lexical errors", errors.len());

            return Err(errors);
        }

        Parser::with_config(tokens, self.config)
            .parse()
            .map_err(|e| vec![e])
    }
}
