use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;

/// Shared handle to a scope. Blocks and calls hold one while they run;
/// closures hold one for as long as they are reachable.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One lexical scope: its own bindings plus a link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wrap in a shared handle.
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Bind `name` in *this* scope, shadowing any outer binding and
    /// replacing an existing one here.
    pub fn define(&mut self, name: &str, value: Value) {
        debug!("define '{}' = {}", name, value);

        self.values.insert(name.to_string(), value);
    }

    /// Look `name` up, walking outwards through enclosing scopes.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undeclared(name))
        }
    }

    /// Overwrite the nearest existing binding of `name`. Never creates one.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undeclared(name))
        }
    }
}

fn undeclared(name: &Token) -> LoxError {
    LoxError::runtime(name, format!("Undeclared variable '{}'.", name.lexeme))
}
