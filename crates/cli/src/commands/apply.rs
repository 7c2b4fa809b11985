//! apply command - Create or update resources
//!
//! Each object is reported with its own outcome: created, configured or
//! unchanged.

use clap::Args;
use rp_core::ResourceStore;

use super::manifest;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, PrintFlags, PrintFlagsSelector};

/// Create or update resources from a manifest
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Manifest file to read objects from ("-" for stdin)
    #[arg(short = 'f', long = "filename", value_name = "FILE")]
    pub filename: String,

    /// Only report what would be applied
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the apply command
pub fn execute(args: ApplyArgs, format: Option<String>, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let print_flags = PrintFlags::default().with_output_format(format);

    // Reject the format before anything is written
    if let Err(e) = print_flags.printer() {
        formatter.error(&e.to_string());
        return ExitCode::UsageError;
    }

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

    let output_format = print_flags.output_format.as_deref().unwrap_or("");
    let mut exit_code = ExitCode::Success;
    for obj in &objects {
        let result = match session.apply(obj) {
            Ok((_, outcome)) => PrintFlags::new(outcome.verb(), args.dry_run)
                .to_printer(output_format)
                .and_then(|printer| formatter.print_resource(printer.as_ref(), obj))
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
