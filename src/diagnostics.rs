use std::fmt;

use log::debug;

use crate::token::Token;

/// Which pass detected the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Unexpected character, unterminated string, malformed number.
    Lexical,
    /// Unmet token expectation in the parser.
    Syntax,
    /// A configured resource limit was exceeded.
    Limit,
}

/// A single reported error, tagged with its source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: usize,
    /// Location suffix such as ` at end` or ` at '+'`; empty for lexical errors.
    pub location: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[line {}] Error{}: {}",
            self.line, self.location, self.message
        )
    }
}

/// Session-scoped error collector.
///
/// One value is threaded through a scan and a parse. Lexical errors are
/// collected and scanning continues; syntax errors are collected right before
/// the parser unwinds. The driver reads [`Diagnostics::had_error`] afterwards
/// and must call [`Diagnostics::reset`] between independent prompt lines.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    had_error: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error at `line` with no location suffix
    pub fn error(&mut self, kind: DiagnosticKind, line: usize, message: impl Into<String>) {
        self.report(kind, line, "", message);
    }

    /// Record an error and raise the error flag
    pub fn report(
        &mut self,
        kind: DiagnosticKind,
        line: usize,
        location: &str,
        message: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            line,
            location: location.to_string(),
            message: message.into(),
        };
        debug!("{:?} diagnostic: {}", kind, diagnostic);
        self.entries.push(diagnostic);
        self.had_error = true;
    }

    /// Record a syntax error anchored at `token`
    pub fn report_at(&mut self, token: &Token, message: impl Into<String>) {
        if token.is_eof() {
            self.report(DiagnosticKind::Syntax, token.line, " at end", message);
        } else {
            let location = format!(" at '{}'", token.lexeme);
            self.report(DiagnosticKind::Syntax, token.line, &location, message);
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Clear the flag and every collected entry
    pub fn reset(&mut self) {
        self.entries.clear();
        self.had_error = false;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
