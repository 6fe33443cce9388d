//! Tree‑walking evaluator.
//!
//! Statements and expressions are closed enums, so evaluation is one
//! exhaustive `match` per node family. Statement execution returns a
//! [`Flow`] instead of unwinding: `return` travels back up as
//! `Flow::Return(value)` until the enclosing call in
//! [`crate::callable::LoxFunction`] turns it into the call's result.
//!
//! The interpreter owns exactly one "current" scope. Blocks and calls swap
//! in a child scope and put the previous one back on every exit path,
//! including errors.

use std::mem;
use std::rc::Rc;

use log::{debug, info};

use crate::callable::{Callable, LoxFunction};
use crate::environment::{EnvRef, Environment};
use crate::error::{LoxError, Result};
use crate::expr::Expr;
use crate::natives;
use crate::output::{Output, StdoutOutput};
use crate::stmt::Stmt;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Fell off the end; carry on with the next statement.
    Normal,

    /// A `return` is unwinding towards the nearest call boundary.
    Return(Value),
}

pub struct Interpreter {
    globals: EnvRef,
    environment: EnvRef,
    output: Box<dyn Output>,
}

impl Interpreter {
    /// An interpreter printing to standard output.
    pub fn new() -> Self {
        Self::with_output(Box::new(StdoutOutput))
    }

    /// An interpreter printing to `output`, with the standard natives
    /// (such as `clock`) defined as globals.
    pub fn with_output(output: Box<dyn Output>) -> Self {
        info!("Initializing Interpreter");

        let globals: EnvRef = Environment::new().into_ref();

        let mut interpreter = Self {
            environment: Rc::clone(&globals),
            globals,
            output,
        };

        for native in natives::standard() {
            interpreter.define_native(native);
        }

        interpreter
    }

    /// Bind a native callable in the global scope under its own name.
    pub fn define_native(&mut self, native: Rc<dyn Callable>) {
        debug!("Defining native function '{}'", native.name());

        let name: String = native.name().to_owned();
        self.globals
            .borrow_mut()
            .define(&name, Value::Callable(native));
    }

    pub fn globals(&self) -> &EnvRef {
        &self.globals
    }

    /// Interprets a list of statements (a "program"). Stops at the first
    /// runtime error; output already emitted stays emitted.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                return Err(LoxError::Internal(format!(
                    "return signal carrying {} escaped the program",
                    value
                )));
            }
        }

        info!("Interpretation completed successfully");

        Ok(())
    }

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt) -> Result<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;
                debug!("Printing value: {}", value);
                self.output.write_line(&value.to_string())?;
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                self.environment.borrow_mut().define(&name.lexeme, value);
            }

            Stmt::Block(statements) => {
                let scope = Environment::with_enclosing(Rc::clone(&self.environment));

                return self.execute_block(statements, scope.into_ref());
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if is_truthy(&self.evaluate(condition)?) {
                    return self.execute(then_branch);
                } else if let Some(else_branch) = else_branch {
                    return self.execute(else_branch);
                }
            }

            Stmt::While { condition, body } => {
                while is_truthy(&self.evaluate(condition)?) {
                    if let flow @ Flow::Return(_) = self.execute(body)? {
                        return Ok(flow);
                    }
                }
            }

            Stmt::Function(declaration) => {
                debug!("Defining function '{}'", declaration.name.lexeme);

                let function = LoxFunction::new(Rc::clone(declaration), Rc::clone(&self.environment));

                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Value::Callable(Rc::new(function)));
            }

            Stmt::Return { value, .. } => {
                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Returning value: {}", value);

                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    /// Run `statements` with `environment` as the current scope, restoring
    /// the previous scope however the block ends.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: EnvRef) -> Result<Flow> {
        let previous: EnvRef = mem::replace(&mut self.environment, environment);

        let result = self.execute_all(statements);

        self.environment = previous;

        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> Result<Flow> {
        for stmt in statements {
            if let flow @ Flow::Return(_) = self.execute(stmt)? {
                return Ok(flow);
            }
        }

        Ok(Flow::Normal)
    }

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),

            Expr::Variable(name) => self.environment.borrow().get(name),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Assign { name, value } => {
                let value: Value = self.evaluate(value)?;

                self.environment
                    .borrow_mut()
                    .assign(name, value.clone())?;

                Ok(value)
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left: Value = self.evaluate(left)?;

                let short_circuits = match operator.token_type {
                    TokenType::OR => is_truthy(&left),
                    _ => !is_truthy(&left),
                };

                if short_circuits {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee: Value = self.evaluate(callee)?;

                let mut values: Vec<Value> = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }

                self.invoke_callable(&callee, paren, values)
            }
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> Result<Value> {
        let right: Value = self.evaluate(right)?;

        match operator.token_type {
            TokenType::MINUS => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(LoxError::runtime(operator, "Operand must be a number.")),
            },

            TokenType::BANG => Ok(Value::Bool(!is_truthy(&right))),

            _ => Err(LoxError::runtime(operator, "Invalid unary operator.")),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        let left: Value = self.evaluate(left)?;
        let right: Value = self.evaluate(right)?;

        debug!(
            "Binary '{}' on {} and {}",
            operator.lexeme,
            left.type_name(),
            right.type_name()
        );

        let value = match operator.token_type {
            TokenType::PLUS => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
                (Value::String(a), Value::String(b)) => Value::String(a + &b),
                _ => {
                    return Err(LoxError::runtime(
                        operator,
                        "Operands must be two numbers or two strings.",
                    ))
                }
            },

            TokenType::EQUAL_EQUAL => Value::Bool(left == right),
            TokenType::BANG_EQUAL => Value::Bool(left != right),

            TokenType::MINUS => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Value::Number(a - b)
            }
            TokenType::STAR => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Value::Number(a * b)
            }
            TokenType::SLASH => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Value::Number(a / b)
            }
            TokenType::GREATER => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Value::Bool(a > b)
            }
            TokenType::GREATER_EQUAL => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Value::Bool(a >= b)
            }
            TokenType::LESS => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Value::Bool(a < b)
            }
            TokenType::LESS_EQUAL => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Value::Bool(a <= b)
            }

            _ => return Err(LoxError::runtime(operator, "Invalid binary operator.")),
        };

        Ok(value)
    }

    /// Invokes a callable (native or user-defined function).
    fn invoke_callable(
        &mut self,
        callee: &Value,
        paren: &Token,
        arguments: Vec<Value>,
    ) -> Result<Value> {
        let Value::Callable(callable) = callee else {
            return Err(LoxError::runtime(paren, "Call target can not be called."));
        };

        if arguments.len() != callable.arity() {
            return Err(LoxError::runtime(
                paren,
                format!(
                    "{} arguments expected but got {}.",
                    callable.arity(),
                    arguments.len()
                ),
            ));
        }

        debug!("Calling '{}' with {} arguments", callable.name(), arguments.len());

        callable.call(self, arguments)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Only `nil` and `false` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Nil | Value::Bool(false))
}

/// Both operands as numbers, checking the left one first.
fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64)> {
    let Value::Number(a) = left else {
        return Err(LoxError::runtime(operator, "Left operand must be a number."));
    };

    let Value::Number(b) = right else {
        return Err(LoxError::runtime(operator, "Right operand must be a number."));
    };

    Ok((*a, *b))
}
