use std::iter::Peekable;
use std::str::CharIndices;

use log::trace;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::limits::CompilerLimits;
use crate::token::{self, Literal, Token, TokenKind};

// Scanner

/// Single-pass scanner over one source text.
///
/// Scanning is total: lexical errors go to the diagnostics collector, the
/// offending text is dropped, and the returned sequence always ends with
/// exactly one end-of-input token.
pub struct Scanner<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    start: usize,   // Byte offset where the current token began
    current: usize, // Byte offset of the next unread character
    line: usize,
    tokens: Vec<Token>,
    token_limit_hit: bool,
    limits: &'a CompilerLimits,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Scanner<'a> {
    pub fn new(
        source: &'a str,
        limits: &'a CompilerLimits,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            token_limit_hit: false,
            limits,
            diagnostics,
        }
    }

    // Main scanning loop

    pub fn scan_tokens(mut self) -> Vec<Token> {
        if self.source.len() > self.limits.max_input_size {
            self.diagnostics.error(
                DiagnosticKind::Limit,
                1,
                format!(
                    "Input too large: {} bytes (max: {} bytes).",
                    self.source.len(),
                    self.limits.max_input_size
                ),
            );
        } else {
            while !self.is_at_end() && !self.token_limit_hit {
                self.start = self.current;
                self.scan_token();
            }
        }

        self.tokens.push(Token::eof());
        self.tokens
    }

    fn scan_token(&mut self) {
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '!' => self.add_either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.add_either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.add_either('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.add_either('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '/' => {
                if self.match_char('/') {
                    // Line comment runs up to, not including, the newline
                    while self.peek_char().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if is_ident_start(c) => self.identifier(),
            c => self.diagnostics.error(
                DiagnosticKind::Lexical,
                self.line,
                format!("Unexpected character '{}'.", c),
            ),
        }
    }

    // Character navigation methods

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, ch) = self.chars.next()?;
        self.current = pos + ch.len_utf8();
        Some(ch)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_char2(&mut self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.peek().map(|(_, c)| *c)
    }

    /// Consume the next character only if it is `expected`
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // Token emission

    fn add_either(&mut self, second: char, double: TokenKind, single: TokenKind) {
        let kind = if self.match_char(second) { double } else { single };
        self.add_token(kind);
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_token_with_literal(kind, None);
    }

    fn add_token_with_literal(&mut self, kind: TokenKind, literal: Option<Literal>) {
        if self.tokens.len() >= self.limits.max_token_count {
            self.token_limit_hit = true;
            self.diagnostics.error(
                DiagnosticKind::Limit,
                self.line,
                format!(
                    "Token limit exceeded: max {} tokens.",
                    self.limits.max_token_count
                ),
            );
            return;
        }

        let source = self.source;
        let lexeme = &source[self.start..self.current];
        trace!("line {}: {} {:?}", self.line, kind, lexeme);
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    // Literal scanning

    fn string(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.diagnostics
                .error(DiagnosticKind::Lexical, self.line, "Unterminated string.");
            return;
        }

        // The closing quote
        self.advance();

        // Quotes are single bytes, so trimming them keeps char boundaries
        let source = self.source;
        let value = &source[self.start + 1..self.current - 1];
        if value.len() > self.limits.max_string_length {
            self.diagnostics.error(
                DiagnosticKind::Limit,
                self.line,
                format!(
                    "String literal too long: {} bytes (max: {} bytes).",
                    value.len(),
                    self.limits.max_string_length
                ),
            );
            return;
        }

        self.add_token_with_literal(TokenKind::String, Some(Literal::String(value.to_string())));
    }

    fn number(&mut self) {
        self.consume_digits();

        // A trailing '.' without a digit after it is not part of the number
        if self.peek_char() == Some('.') && self.peek_char2().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
        }

        let source = self.source;
        let text = &source[self.start..self.current];
        match text.parse::<f64>() {
            Ok(value) => self.add_token_with_literal(TokenKind::Number, Some(Literal::Number(value))),
            Err(err) => self.diagnostics.error(
                DiagnosticKind::Lexical,
                self.line,
                format!("Invalid number '{}': {}.", text, err),
            ),
        }
    }

    fn consume_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn identifier(&mut self) {
        while self.peek_char().is_some_and(is_ident_continue) {
            self.advance();
        }

        let source = self.source;
        let text = &source[self.start..self.current];
        let kind = token::keyword(text).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }
}

// Helper functions

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// Public API

pub fn scan(source: &str, limits: &CompilerLimits, diagnostics: &mut Diagnostics) -> Vec<Token> {
    Scanner::new(source, limits, diagnostics).scan_tokens()
}

// Tests
