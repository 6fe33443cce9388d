pub mod ast_printer;
pub mod callable;
pub mod diagnostic;
pub mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod natives;
pub mod output;
pub mod parser;
pub mod scanner;
pub mod session;
pub mod stmt;
pub mod token;
pub mod value;
