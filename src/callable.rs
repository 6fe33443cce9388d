use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::environment::{EnvRef, Environment};
use crate::error::Result;
use crate::interpreter::{Flow, Interpreter};
use crate::stmt::FunctionDecl;
use crate::value::Value;

/// Anything a call expression can invoke: user functions and natives.
///
/// The interpreter checks the argument count against [`Callable::arity`]
/// before calling, so implementations may index `arguments` freely.
pub trait Callable: fmt::Debug + fmt::Display {
    fn name(&self) -> &str;

    fn arity(&self) -> usize;

    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value>;
}

/// A user-defined function together with the scope it was declared in.
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: EnvRef,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: EnvRef) -> Self {
        Self {
            declaration,
            closure,
        }
    }
}

impl Callable for LoxFunction {
    fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// Runs the body in a fresh child of the *closure*, not of the caller's
    /// scope, so free variables resolve lexically.
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value> {
        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));

        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(&param.lexeme, argument);
        }

        match interpreter.execute_block(&self.declaration.body, environment.into_ref())? {
            Flow::Return(value) => {
                debug!("'{}' returned {}", self.name(), value);
                Ok(value)
            }
            Flow::Normal => Ok(Value::Nil),
        }
    }
}

// The closure may (transitively) contain this very function, so it is
// deliberately left out of the debug output.
impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxFunction")
            .field("name", &self.name())
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}
