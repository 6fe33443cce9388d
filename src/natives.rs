//! Native bindings installed into the global scope of every interpreter.

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use log::debug;

use crate::callable::Callable;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// `clock()`: seconds elapsed since the binding was created, from a
/// monotonic clock.
#[derive(Debug)]
pub struct Clock {
    started: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Callable for Clock {
    fn name(&self) -> &str {
        "clock"
    }

    fn arity(&self) -> usize {
        0
    }

    fn call(&self, _interpreter: &mut Interpreter, _arguments: Vec<Value>) -> Result<Value> {
        let elapsed: f64 = self.started.elapsed().as_secs_f64();

        debug!("Native function 'clock' returned: {}", elapsed);

        Ok(Value::Number(elapsed))
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name())
    }
}

/// The default native set.
pub fn standard() -> Vec<Rc<dyn Callable>> {
    let clock: Rc<dyn Callable> = Rc::new(Clock::new());

    vec![clock]
}
