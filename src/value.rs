use std::fmt;
use std::rc::Rc;

use crate::callable::Callable;
use crate::token::LiteralValue;

/// A runtime value. The set is closed: there are no user-defined types.
#[derive(Debug, Clone)]
pub enum Value {
    Callable(Rc<dyn Callable>),
    Number(f64),
    String(String),
    Bool(bool),
    Nil,
}

impl Value {
    /// Short name of the value's kind, for logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Callable(_) => "callable",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Nil => "nil",
        }
    }
}

impl From<LiteralValue> for Value {
    fn from(literal: LiteralValue) -> Self {
        match literal {
            LiteralValue::Number(n) => Value::Number(n),
            LiteralValue::Str(s) => Value::String(s),
            LiteralValue::Bool(b) => Value::Bool(b),
            LiteralValue::Nil => Value::Nil,
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        Value::from(literal.clone())
    }
}

/// `nil` equals only `nil`; callables compare by identity; everything else
/// by value (so `NaN != NaN`).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Callable(callable) => write!(f, "{}", callable),

            // f64's Display already prints 3.0 as "3" and 2.5 as "2.5".
            Value::Number(n) => write!(f, "{}", n),

            Value::String(s) => write!(f, "{}", s),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Nil => write!(f, "nil"),
        }
    }
}
