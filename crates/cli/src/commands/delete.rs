//! delete command - Remove resources
//!
//! Resources are selected by `kind[.group]/name` references, by the objects
//! of a manifest, or both.

use clap::Args;
use rp_core::{ObjectTyper, ResourceRef, ResourceStore, UnstructuredTyper, parse_resource_ref};

use super::manifest;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, PrintFlags};

/// Remove resources by manifest or by kind/name
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Resources to remove (kind[.group]/name)
    #[arg(required_unless_present = "filename")]
    pub resources: Vec<String>,

    /// Manifest whose objects should be removed ("-" for stdin)
    #[arg(short = 'f', long = "filename", value_name = "FILE")]
    pub filename: Option<String>,

    /// Only report what would be removed
    #[arg(long)]
    pub dry_run: bool,

    /// Treat missing resources as already removed
    #[arg(long)]
    pub ignore_not_found: bool,
}

/// Execute the delete command
pub fn execute(args: DeleteArgs, format: Option<String>, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let printer = match PrintFlags::new("deleted", args.dry_run)
        .with_output_format(format)
        .printer()
    {
        Ok(p) => p,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let references = match collect_references(&args) {
        Ok(references) => references,
        Err(message) => {
            formatter.error(&message);
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
    for reference in &references {
        let result = match session.delete(reference) {
            Ok(removed) => formatter
                .print_resource(printer.as_ref(), &removed.object)
                .map_err(|e| (ExitCode::GeneralError, e.to_string())),
            Err(rp_core::Error::NotFound(_)) if args.ignore_not_found => {
                tracing::debug!(resource = %reference, "ignoring missing resource");
                Ok(())
            }
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

/// Gather references from positional arguments and the manifest, in order
fn collect_references(args: &DeleteArgs) -> Result<Vec<ResourceRef>, String> {
    let mut references = Vec::new();

    for resource in &args.resources {
        references.push(parse_resource_ref(resource).map_err(|e| e.to_string())?);
    }

    if let Some(filename) = &args.filename {
        let objects = manifest::read_objects(filename).map_err(|e| format!("{e:#}"))?;
        for obj in &objects {
            references.push(UnstructuredTyper.resolve(obj).map_err(|e| e.to_string())?);
        }
    }

    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(resources: &[&str]) -> DeleteArgs {
        DeleteArgs {
            resources: resources.iter().map(|r| r.to_string()).collect(),
            filename: None,
            dry_run: false,
            ignore_not_found: false,
        }
    }

    #[test]
    fn test_collect_references_from_args() {
        let references = collect_references(&args(&["pod/foo", "deployment.apps/web"])).unwrap();
        assert_eq!(references.len(), 2);
        assert_eq!(references[1].to_string(), "deployment.apps/web");
    }

    #[test]
    fn test_collect_references_invalid() {
        assert!(collect_references(&args(&["pod"])).is_err());
    }
}
