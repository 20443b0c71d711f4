use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(about = "Scan and parse Lox expressions")]
pub struct Cli {
    /// Script to run; starts the interactive prompt when omitted
    pub scripts: Vec<PathBuf>,

    /// What to print for each input
    #[arg(long, value_enum, default_value_t = Emit::Ast)]
    pub emit: Emit,

    /// Limits file (defaults to ./lox.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// Parse and print the expression tree in prefix form
    Ast,
    /// Print the scanned token sequence
    Tokens,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_starts_prompt() {
        let cli = Cli::try_parse_from(["lox"]).unwrap();
        assert!(cli.scripts.is_empty());
        assert_eq!(cli.emit, Emit::Ast);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_script_and_options() {
        let cli = Cli::try_parse_from([
            "lox",
            "--emit",
            "tokens",
            "--config",
            "limits.toml",
            "main.lox",
        ])
        .unwrap();
        assert_eq!(cli.scripts, vec![PathBuf::from("main.lox")]);
        assert_eq!(cli.emit, Emit::Tokens);
        assert_eq!(cli.config, Some(PathBuf::from("limits.toml")));
    }

    #[test]
    fn test_extra_scripts_are_accepted_for_usage_check() {
        let cli = Cli::try_parse_from(["lox", "a.lox", "b.lox"]).unwrap();
        assert_eq!(cli.scripts.len(), 2);
    }

    #[test]
    fn test_unknown_emit_rejected() {
        assert!(Cli::try_parse_from(["lox", "--emit", "bytecode"]).is_err());
    }
}
