// Parser module - recursive descent over a fixed precedence grammar
//
//   expression → equality ;
//   equality   → comparison ( ( "!=" | "==" ) comparison )* ;
//   comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
//   term       → factor ( ( "-" | "+" ) factor )* ;
//   factor     → unary ( ( "/" | "*" ) unary )* ;
//   unary      → ( "!" | "-" ) unary | primary ;
//   primary    → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")" ;
mod error;
mod expressions;
mod helpers;

// Public exports
pub use error::ParseError;

use log::debug;

use crate::ast::Expr;
use crate::diagnostics::Diagnostics;
use crate::limits::CompilerLimits;
use crate::token::Token;

// Parser structure
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize, // Only moves forward
    eof: Token,     // Stands in if the sequence lacks its end-of-input token
    limits: &'a CompilerLimits,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Parser<'a> {
    pub fn new(
        tokens: &'a [Token],
        limits: &'a CompilerLimits,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            tokens,
            current: 0,
            eof: Token::eof(),
            limits,
            diagnostics,
        }
    }

    /// Parse a single expression.
    ///
    /// On failure the diagnostic has already been recorded and no partial
    /// tree is returned.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        let result = self.expression(0);
        match &result {
            Ok(expr) => debug!("parsed expression: {:?}", expr),
            Err(_) => debug!("parse aborted at token {}", self.current),
        }
        result
    }
}

// Public API function
pub fn parse(
    tokens: &[Token],
    limits: &CompilerLimits,
    diagnostics: &mut Diagnostics,
) -> Result<Expr, ParseError> {
    Parser::new(tokens, limits, diagnostics).parse()
}
