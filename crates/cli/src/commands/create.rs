//! create command - Record new resources
//!
//! Reads a manifest and records every object in it. Objects that already
//! exist are reported as conflicts; the remaining ones are still created.

use clap::Args;
use rp_core::ResourceStore;

use super::manifest;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, PrintFlags};

/// Record new resources from a manifest
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Manifest file to read objects from ("-" for stdin)
    #[arg(short = 'f', long = "filename", value_name = "FILE")]
    pub filename: String,

    /// Only report what would be created
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the create command
pub fn execute(args: CreateArgs, format: Option<String>, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let printer = match PrintFlags::new("created", args.dry_run)
        .with_output_format(format)
        .printer()
    {
        Ok(p) => p,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let objects = match manifest::read_objects(&args.filename) {
        Ok(objects) => objects,
        Err(e) => {
            formatter.error(&format!("{e:#}"));
            return ExitCode::UsageError;
        }
    };

    let store = match ResourceStore::new() {
        Ok(s) => s,
        Err(e) => {
            formatter.error(&format!("Failed to open resource store: {e}"));
            return ExitCode::from_error(&e);
        }
    };
    let mut session = match store.session() {
        Ok(s) => s,
        Err(e) => {
            formatter.error(&format!("Failed to load resource store: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let mut exit_code = ExitCode::Success;
    for obj in &objects {
        let result = match session.create(obj) {
            Ok(_) => formatter
                .print_resource(printer.as_ref(), obj)
                .map_err(|e| (ExitCode::GeneralError, e.to_string())),
            Err(e) => Err((ExitCode::from_error(&e), e.to_string())),
        };

        if let Err((code, message)) = result {
            formatter.error(&message);
            if exit_code == ExitCode::Success {
                exit_code = code;
            }
        }
    }

    if !args.dry_run
        && let Err(e) = session.commit()
    {
        formatter.error(&format!("Failed to save resource store: {e}"));
        return ExitCode::from_error(&e);
    }

    exit_code
}
