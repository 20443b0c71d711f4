use thiserror::Error;

/// Signals that the current parse was abandoned.
///
/// Carries no message: the diagnostic is recorded in the collector at the
/// point of failure, before this value starts unwinding the precedence levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("parse aborted after a syntax error")]
pub struct ParseError;
