//! CLI interface for diffmatch.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::data::audit::{AuditReport, OutputFormat};

pub mod check;
pub mod formatting;
pub mod hook;
pub mod log;

/// Environment variable selecting the default output format.
pub const FORMAT_ENV: &str = "DIFFMATCH_FORMAT";

/// diffmatch: checks whether commit messages match their diffs.
#[derive(Parser)]
#[command(name = "diffmatch")]
#[command(about = "Checks whether commit messages match their diffs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Audits a single commit.
    Check(check::CheckCommand),
    /// Audits the most recent commits reachable from HEAD.
    Log(log::LogCommand),
    /// Installs or removes the commit-msg hook.
    Hook(hook::HookCommand),
}

impl Cli {
    /// Executes the CLI command and returns the process exit code.
    pub fn execute(self) -> Result<i32> {
        match self.command {
            Commands::Check(cmd) => cmd.execute(),
            Commands::Log(cmd) => cmd.execute(),
            Commands::Hook(cmd) => cmd.execute(),
        }
    }
}

/// Resolves the output format from the flag, then `DIFFMATCH_FORMAT`, then text.
pub(crate) fn resolve_format(flag: Option<&str>) -> Result<OutputFormat> {
    let configured = match flag {
        Some(value) => Some(value.to_string()),
        None => crate::utils::get_env_var(FORMAT_ENV).ok(),
    };

    match configured {
        Some(value) => value
            .parse::<OutputFormat>()
            .map_err(anyhow::Error::msg)
            .context("Unsupported output format"),
        None => Ok(OutputFormat::Text),
    }
}

/// Returns `true` when stdout is a terminal and colours should be used.
pub(crate) fn use_color() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}

/// Prints a serializable value as JSON or YAML.
pub(crate) fn print_structured<T: serde::Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = crate::data::to_yaml(value).context("Failed to serialize output to YAML")?;
            print!("{yaml}");
        }
        OutputFormat::Text => {}
    }
    Ok(())
}

/// Prints a multi-commit report in the requested format.
pub(crate) fn print_report(report: &AuditReport, format: OutputFormat, verbose: bool) -> Result<()> {
    if format != OutputFormat::Text {
        return print_structured(report, format);
    }

    let color = use_color();
    println!();
    println!(
        "{}",
        formatting::format_log_header(report.outcomes.len(), color)
    );
    println!("{}", formatting::rule());
    for outcome in &report.outcomes {
        for line in formatting::format_outcome(outcome, verbose, color) {
            println!("{line}");
        }
    }
    println!("{}", formatting::rule());
    println!("{}", formatting::format_summary(&report.summary, color));
    println!();
    Ok(())
}
