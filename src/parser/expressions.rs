use super::{ParseError, Parser};
use crate::ast::Expr;
use crate::token::{Literal, TokenKind};

type Production<'a> = fn(&mut Parser<'a>, usize) -> Result<Expr, ParseError>;

// Recursive expression parsing methods, lowest precedence first
impl<'a> Parser<'a> {
    pub(super) fn expression(&mut self, depth: usize) -> Result<Expr, ParseError> {
        self.check_depth(depth)?;
        self.equality(depth)
    }

    fn equality(&mut self, depth: usize) -> Result<Expr, ParseError> {
        self.left_associative(
            depth,
            &[TokenKind::BangEqual, TokenKind::EqualEqual],
            Self::comparison,
        )
    }

    fn comparison(&mut self, depth: usize) -> Result<Expr, ParseError> {
        self.left_associative(
            depth,
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::term,
        )
    }

    fn term(&mut self, depth: usize) -> Result<Expr, ParseError> {
        self.left_associative(depth, &[TokenKind::Minus, TokenKind::Plus], Self::factor)
    }

    fn factor(&mut self, depth: usize) -> Result<Expr, ParseError> {
        self.left_associative(depth, &[TokenKind::Slash, TokenKind::Star], Self::unary)
    }

    /// One binary precedence level: an operand, then any number of
    /// `operator operand` pairs folded left to right
    fn left_associative(
        &mut self,
        depth: usize,
        operators: &[TokenKind],
        operand: Production<'a>,
    ) -> Result<Expr, ParseError> {
        let mut expr = operand(self, depth)?;

        while self.match_kinds(operators) {
            let operator = self.previous().clone();
            let right = operand(self, depth)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn unary(&mut self, depth: usize) -> Result<Expr, ParseError> {
        if self.match_kinds(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous().clone();
            self.check_depth(depth + 1)?;
            let operand = self.unary(depth + 1)?;
            return Ok(Expr::unary(operator, operand));
        }

        self.primary(depth)
    }

    fn primary(&mut self, depth: usize) -> Result<Expr, ParseError> {
        match self.current_token().kind {
            TokenKind::False => {
                self.advance();
                Ok(Expr::literal(Some(Literal::Boolean(false))))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::literal(Some(Literal::Boolean(true))))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(Expr::nil())
            }
            TokenKind::Number | TokenKind::String => {
                let value = self.current_token().literal.clone();
                self.advance();
                Ok(Expr::literal(value))
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.expression(depth + 1)?;
                self.consume(TokenKind::RightParen, "expected ')' after expression.")?;
                Ok(Expr::grouping(inner))
            }
            _ => Err(self.error_at_current("expression expected")),
        }
    }
}
