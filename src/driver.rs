use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::cli::Emit;
use crate::diagnostics::Diagnostics;
use crate::limits::CompilerLimits;
use crate::parser;
use crate::printer::AstPrinter;
use crate::scanner;

/// Exit status for a script that produced diagnostics
pub const EXIT_DATA_ERROR: u8 = 69;

pub const USAGE: &str = "Usage: lox [script]";

const PROMPT: &str = "> ";

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Failed to read {path}: {source}")]
    ReadScript {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Feeds source text through the scanner and parser and writes the results.
///
/// Rendered tokens or trees go to `out`, diagnostics to `err`.
pub struct Driver<'a> {
    limits: &'a CompilerLimits,
    emit: Emit,
}

impl<'a> Driver<'a> {
    pub fn new(limits: &'a CompilerLimits, emit: Emit) -> Self {
        Self { limits, emit }
    }

    /// Scan and parse one input, recording errors in `diagnostics`
    pub fn run<W: Write, E: Write>(
        &self,
        source: &str,
        diagnostics: &mut Diagnostics,
        out: &mut W,
        err: &mut E,
    ) -> Result<(), DriverError> {
        let tokens = scanner::scan(source, self.limits, diagnostics);
        debug!("scanned {} tokens", tokens.len());

        match self.emit {
            Emit::Tokens => {
                for token in &tokens {
                    writeln!(out, "{}", token)?;
                }
            }
            Emit::Ast => {
                if let Ok(expr) = parser::parse(&tokens, self.limits, diagnostics) {
                    writeln!(out, "{}", AstPrinter::new().print(&expr))?;
                }
            }
        }

        for diagnostic in diagnostics.iter() {
            writeln!(err, "{}", diagnostic)?;
        }

        Ok(())
    }

    /// Run a whole file once. Returns whether any diagnostic was reported.
    pub fn run_file<W: Write, E: Write>(
        &self,
        path: &Path,
        out: &mut W,
        err: &mut E,
    ) -> Result<bool, DriverError> {
        info!("reading script {}", path.display());
        let source = fs::read_to_string(path).map_err(|source| DriverError::ReadScript {
            path: path.display().to_string(),
            source,
        })?;

        let mut diagnostics = Diagnostics::new();
        self.run(&source, &mut diagnostics, out, err)?;
        Ok(diagnostics.had_error())
    }

    /// Interactive loop: one line per input until end of input or an empty line
    pub fn run_prompt<R: BufRead, W: Write, E: Write>(
        &self,
        mut input: R,
        out: &mut W,
        err: &mut E,
    ) -> Result<(), DriverError> {
        let mut diagnostics = Diagnostics::new();
        let mut line = String::new();

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let source = line.trim_end_matches(['\n', '\r']);
            if source.trim().is_empty() {
                break;
            }

            self.run(source, &mut diagnostics, out, err)?;
            out.flush()?;

            // Each line is an independent input
            diagnostics.reset();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_source(source: &str, emit: Emit) -> (String, String, bool) {
        let limits = CompilerLimits::default();
        let driver = Driver::new(&limits, emit);
        let mut diagnostics = Diagnostics::new();
        let mut out = Vec::new();
        let mut err = Vec::new();
        driver
            .run(source, &mut diagnostics, &mut out, &mut err)
            .unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            diagnostics.had_error(),
        )
    }

    fn run_prompt(input: &str) -> (String, String) {
        let limits = CompilerLimits::default();
        let driver = Driver::new(&limits, Emit::Ast);
        let mut out = Vec::new();
        let mut err = Vec::new();
        driver
            .run_prompt(input.as_bytes(), &mut out, &mut err)
            .unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_run_prints_tree() {
        let (out, err, had_error) = run_source("-1 + 2", Emit::Ast);
        assert_eq!(out, "(+ (- 1) 2)\n");
        assert!(err.is_empty());
        assert!(!had_error);
    }

    #[test]
    fn test_run_prints_tokens() {
        let (out, _, had_error) = run_source("(1.5)", Emit::Tokens);
        assert_eq!(
            out,
            "LEFT_PAREN ( nil\nNUMBER 1.5 1.5\nRIGHT_PAREN ) nil\nEOF  nil\n"
        );
        assert!(!had_error);
    }

    #[test]
    fn test_run_reports_syntax_error() {
        let (out, err, had_error) = run_source("(1 + 2", Emit::Ast);
        assert!(out.is_empty());
        assert_eq!(err, "[line 0] Error at end: expected ')' after expression.\n");
        assert!(had_error);
    }

    #[test]
    fn test_run_reports_lexical_error_and_still_prints() {
        let (out, err, had_error) = run_source("1 # 2", Emit::Tokens);
        assert_eq!(out.lines().count(), 3);
        assert_eq!(err, "[line 1] Error: Unexpected character '#'.\n");
        assert!(had_error);
    }

    #[test]
    fn test_prompt_resets_between_lines() {
        let (out, err) = run_prompt("(1\n2 * 3\n");
        assert_eq!(out, "> > (* 2 3)\n> ");
        assert_eq!(err.lines().count(), 1);
    }

    #[test]
    fn test_prompt_stops_on_empty_line() {
        let (out, _) = run_prompt("1\n\n2\n");
        assert_eq!(out, "> 1\n> ");
    }

    #[test]
    fn test_prompt_handles_crlf() {
        let (out, err) = run_prompt("1 + 2\r\n");
        assert_eq!(out, "> (+ 1 2)\n> ");
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_file_missing() {
        let limits = CompilerLimits::default();
        let driver = Driver::new(&limits, Emit::Ast);
        let result = driver.run_file(
            Path::new("definitely/not/here.lox"),
            &mut Vec::<u8>::new(),
            &mut Vec::<u8>::new(),
        );
        assert!(matches!(result, Err(DriverError::ReadScript { .. })));
    }

    #[test]
    fn test_run_file_flags_errors() {
        let path = std::env::temp_dir().join("lox_front_driver_error.lox");
        fs::write(&path, "1 +").unwrap();

        let limits = CompilerLimits::default();
        let driver = Driver::new(&limits, Emit::Ast);
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        let had_error = driver.run_file(&path, &mut out, &mut err).unwrap();

        assert!(had_error);
        assert!(out.is_empty());
        let _ = fs::remove_file(&path);
    }
}
