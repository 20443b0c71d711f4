// Front end safety limits
//
// Guards the scanner and parser against:
// - Stack overflow from deeply nested groupings and prefix operators
// - Memory exhaustion from very large inputs
//
// Defaults are permissive; any subset can be overridden in lox.toml

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "lox.toml";

/// Scanner and parser limits with permissive defaults
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerLimits {
    // Scanner limits
    pub max_input_size: usize,    // Maximum source size in bytes
    pub max_token_count: usize,   // Maximum number of tokens per input
    pub max_string_length: usize, // Maximum string literal length in bytes

    // Parser limits
    pub max_expr_depth: usize, // Maximum expression recursion depth
}

impl Default for CompilerLimits {
    fn default() -> Self {
        Self {
            max_input_size: 10_000_000,    // 10 MB
            max_token_count: 1_000_000,    // 1M tokens
            max_string_length: 10_000_000, // 10 MB
            max_expr_depth: 256,
        }
    }
}

impl CompilerLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load limits from a TOML file, falling back to defaults
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn from_project_toml<P: AsRef<Path>>(path: P) -> Result<Self, LimitError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| LimitError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|err| match err {
            LimitError::Parse { message, .. } => LimitError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse limits from TOML text, overriding only the keys present
    pub fn from_toml_str(content: &str) -> Result<Self, LimitError> {
        let config: ProjectConfig = toml::from_str(content).map_err(|e| LimitError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;

        let mut limits = Self::default();

        if let Some(limits_config) = config.limits {
            if let Some(v) = limits_config.max_input_size {
                limits.max_input_size = v;
            }
            if let Some(v) = limits_config.max_token_count {
                limits.max_token_count = v;
            }
            if let Some(v) = limits_config.max_string_length {
                limits.max_string_length = v;
            }
            if let Some(v) = limits_config.max_expr_depth {
                limits.max_expr_depth = v;
            }
        }

        limits.validate()?;
        Ok(limits)
    }

    /// Validate that all limits are positive and not absurdly large
    pub fn validate(&self) -> Result<(), LimitError> {
        const MAX_REASONABLE: usize = 100_000_000; // 100 MB

        if self.max_input_size == 0 || self.max_input_size > MAX_REASONABLE {
            return Err(LimitError::invalid("max_input_size", self.max_input_size));
        }

        if self.max_token_count == 0 {
            return Err(LimitError::invalid("max_token_count", self.max_token_count));
        }

        if self.max_string_length == 0 || self.max_string_length > MAX_REASONABLE {
            return Err(LimitError::invalid(
                "max_string_length",
                self.max_string_length,
            ));
        }

        if self.max_expr_depth == 0 || self.max_expr_depth > 10_000 {
            return Err(LimitError::invalid("max_expr_depth", self.max_expr_depth));
        }

        Ok(())
    }
}

/// TOML configuration structures for deserialization
#[derive(Debug, Deserialize)]
struct ProjectConfig {
    limits: Option<LimitsConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LimitsConfig {
    max_input_size: Option<usize>,
    max_token_count: Option<usize>,
    max_string_length: Option<usize>,
    max_expr_depth: Option<usize>,
}

/// Error type for limit loading and validation
#[derive(Debug, Error)]
pub enum LimitError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid limit '{name}': {value} (must be positive and reasonable)")]
    Invalid { name: &'static str, value: usize },
}

impl LimitError {
    fn invalid(name: &'static str, value: usize) -> Self {
        LimitError::Invalid { name, value }
    }
}
