use super::error::ParseError;
use crate::token::{Token, TokenKind};

// Parser helper methods
impl<'a> super::Parser<'a> {
    /// Record a syntax error at the current token and produce the abort signal
    pub(super) fn error_at_current(&mut self, message: &str) -> ParseError {
        let token = self.current_token().clone();
        self.diagnostics.report_at(&token, message);
        ParseError
    }

    // Helper: Check recursion depth limit
    pub(super) fn check_depth(&mut self, depth: usize) -> Result<(), ParseError> {
        if depth >= self.limits.max_expr_depth {
            let message = format!(
                "Expression nesting too deep (max {} levels).",
                self.limits.max_expr_depth
            );
            return Err(self.error_at_current(&message));
        }
        Ok(())
    }

    /// Helper: Consume a specific token kind or report `message`
    pub(super) fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance();
            return Ok(self.previous().clone());
        }
        Err(self.error_at_current(message))
    }

    /// Helper: Consume the current token if it is one of `kinds`
    pub(super) fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|kind| self.check(*kind)) {
            self.advance();
            return true;
        }
        false
    }

    /// Helper: Is the current token of `kind`? Never true at end of input.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.current_token().kind == kind
    }

    /// Helper: Advance to the next token, never past end of input
    pub(super) fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current_token().is_eof()
    }

    // Helper: Get current token
    pub(super) fn current_token(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    // Helper: Get the most recently consumed token
    pub(super) fn previous(&self) -> &Token {
        self.current
            .checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
            .unwrap_or(&self.eof)
    }

    /// Discard tokens until a statement boundary.
    ///
    /// Stops just after a `;` or in front of a keyword that starts a
    /// declaration or statement, so a statement-level caller can resume
    /// parsing after a syntax error.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            if self.current_token().kind.starts_statement() {
                return;
            }

            self.advance();
        }
    }
}
