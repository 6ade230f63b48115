//! Command-line front end over ledger snapshot files.

pub mod commands;
pub mod output;

use std::{env, path::PathBuf};

use crate::{
    config::{Config, ConfigManager},
    errors::{Result, SpendError},
    utils::paths::resolve_base,
};

pub use output::Formatter;

const USAGE: &[(&str, &str)] = &[
    ("stats <ledger.json> [week|month|year]", "Spending buckets and top categories"),
    ("budget <ledger.json> [yyyy-MM]", "Budget progress for a month"),
    ("alerts <ledger.json>", "Evaluate budget thresholds and show new alerts"),
    ("reset-alerts", "Forget every alert already sent"),
    ("version", "Show build information"),
];

/// Data directory and configuration shared by every command.
pub struct CliContext {
    pub base: PathBuf,
    pub config: Config,
    pub formatter: Formatter,
}

impl CliContext {
    pub fn load() -> Result<Self> {
        let base = resolve_base(None);
        let config = ConfigManager::with_base_dir(Some(base.clone())).load()?;
        Ok(Self {
            base,
            config,
            formatter: Formatter::new(),
        })
    }
}

pub fn run_cli() -> Result<()> {
    run(env::args().skip(1).collect())
}

pub fn run(args: Vec<String>) -> Result<()> {
    let Some((command, rest)) = args.split_first() else {
        print_usage();
        return Ok(());
    };
    match command.as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            commands::version();
            Ok(())
        }
        "stats" => commands::stats(&CliContext::load()?, rest),
        "budget" => commands::budget(&CliContext::load()?, rest),
        "alerts" => commands::alerts(&CliContext::load()?, rest),
        "reset-alerts" => commands::reset_alerts(&CliContext::load()?),
        other => Err(SpendError::InvalidInput(format!(
            "unknown command `{other}`; run `spendwise_cli help` for usage"
        ))),
    }
}

fn print_usage() {
    let formatter = Formatter::new();
    formatter.print_header("spendwise_cli");
    let entries: Vec<(String, String)> = USAGE
        .iter()
        .map(|(usage, about)| (usage.to_string(), about.to_string()))
        .collect();
    formatter.print_two_column(&entries);
}
