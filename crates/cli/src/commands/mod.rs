//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.
//! Every command that touches resources reports each one through the printer
//! selected by the global `--output` flag.

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use rp_core::ConfigManager;

use crate::exit_code::ExitCode;
use crate::output::{OUTPUT_FLAG, OutputConfig, PrintFlags, RegisterFlags};

mod apply;
mod completions;
mod create;
mod delete;
mod get;
mod manifest;

/// rp - record resource manifests and report what happened to them
///
/// Each resource touched by a command is reported as `kind[.group]/name`
/// followed by the operation, e.g. `pod/foo created`.
#[derive(Parser, Debug)]
#[command(name = "rp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record new resources from a manifest
    Create(create::CreateArgs),

    /// Create or update resources from a manifest
    Apply(apply::ApplyArgs),

    /// Remove resources by manifest or by kind/name
    Delete(delete::DeleteArgs),

    /// List recorded resources
    Get(get::GetArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Build the full clap command, including flags registered by printers
pub fn build_command() -> clap::Command {
    PrintFlags::default().add_flags(Cli::command())
}

/// Parse arguments into the CLI and the requested output format
pub fn parse_from<I, T>(args: I) -> Result<(Cli, Option<String>), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_command().try_get_matches_from(args)?;
    let cli = Cli::from_arg_matches(&matches)?;
    let output_format = matches.get_one::<String>(OUTPUT_FLAG).cloned();
    Ok((cli, output_format))
}

/// Execute the CLI command and return an exit code
pub fn execute(cli: Cli, output_format: Option<String>) -> ExitCode {
    let config = match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: Failed to load configuration: {e}");
            return ExitCode::from_error(&e);
        }
    };

    let format = output_format.or_else(|| {
        Some(config.defaults.output.clone()).filter(|output| !output.is_empty())
    });
    tracing::debug!(?format, "resolved output format");

    let output_config = OutputConfig {
        json: format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json")),
        no_color: cli.no_color || config.defaults.color == "never",
        force_color: !cli.no_color && config.defaults.color == "always",
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Create(args) => create::execute(args, format, output_config),
        Commands::Apply(args) => apply::execute(args, format, output_config),
        Commands::Delete(args) => delete::execute(args, format, output_config),
        Commands::Get(args) => get::execute(args, format, output_config),
        Commands::Completions(args) => completions::execute(args),
    }
}
