//! Scanner and expression parser for the Lox language.
//!
//! `source text → scanner::scan → Vec<Token> → parser::parse → Expr`, with a
//! [`diagnostics::Diagnostics`] collector threaded through both passes.

pub mod ast;
pub mod cli;
pub mod diagnostics;
pub mod driver;
pub mod limits;
pub mod parser;
pub mod printer;
pub mod scanner;
pub mod token;
