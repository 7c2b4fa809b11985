//! get command - List recorded resources
//!
//! The default output prints one `kind[.group]/name` per resource;
//! `--output=json` prints a single `List` object holding every manifest.

use clap::Args;
use rp_core::{GroupKind, ResourceStore};
use serde_json::{Value, json};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, PrintFlags};

/// List recorded resources
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Only list resources of this kind (kind[.group])
    pub kind: Option<String>,
}

/// Execute the get command
pub fn execute(args: GetArgs, format: Option<String>, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let printer = match PrintFlags::default().with_output_format(format).printer() {
        Ok(p) => p,
        Err(e) => {
            formatter.error(&e.to_string());
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

    let resources = match store.list() {
        Ok(resources) => resources,
        Err(e) => {
            formatter.error(&format!("Failed to list resources: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let filter = args.kind.as_deref().map(parse_group_kind);
    let items: Vec<Value> = resources
        .into_iter()
        .filter(|r| {
            filter
                .as_ref()
                .is_none_or(|gk| r.reference.group_kind.matches(gk))
        })
        .map(|r| r.object)
        .collect();

    if items.is_empty() {
        formatter.warning("No resources found.");
    }

    let list = json!({
        "apiVersion": "v1",
        "kind": "List",
        "items": items,
    });
    match formatter.print_resource(printer.as_ref(), &list) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::GeneralError
        }
    }
}

/// Parse `kind[.group]`
fn parse_group_kind(value: &str) -> GroupKind {
    let (kind, group) = value.split_once('.').unwrap_or((value, ""));
    GroupKind::new(group, kind)
}
