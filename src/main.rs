use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;

use lox_front::cli::Cli;
use lox_front::driver::{self, Driver};
use lox_front::limits::{CompilerLimits, DEFAULT_CONFIG_FILE};

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.scripts.len() > 1 {
        println!("{}", driver::USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    let config_path = match &cli.config {
        Some(path) if !path.exists() => bail!("config file {} not found", path.display()),
        Some(path) => path.clone(),
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };
    let limits = CompilerLimits::from_project_toml(&config_path)
        .with_context(|| format!("loading limits from {}", config_path.display()))?;

    let driver = Driver::new(&limits, cli.emit);
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();

    match cli.scripts.first() {
        Some(script) => {
            let had_error = driver.run_file(script, &mut out, &mut err)?;
            if had_error {
                return Ok(ExitCode::from(driver::EXIT_DATA_ERROR));
            }
        }
        None => driver.run_prompt(io::stdin().lock(), &mut out, &mut err)?,
    }

    Ok(ExitCode::SUCCESS)
}
