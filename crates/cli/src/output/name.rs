//! Name printer
//!
//! Prints `kind[.group]/name` for each object, optionally followed by the
//! operation that was performed on it.

use std::io::Write;
use std::sync::Arc;

use rp_core::{ObjectTyper, list_items};
use serde_json::Value;

use super::{PrintError, ResourcePrinter};

/// Printer for `--output=name` and the default success message
///
/// Built by [`NamePrintFlags`](super::NamePrintFlags); not mutated afterwards.
pub struct NamePrinter {
    operation: String,
    short_output: bool,
    typer: Arc<dyn ObjectTyper>,
}

impl NamePrinter {
    /// Create a printer that appends `operation` to each name
    pub fn new(operation: impl Into<String>, typer: Arc<dyn ObjectTyper>) -> Self {
        Self {
            operation: operation.into(),
            short_output: false,
            typer,
        }
    }

    /// Only print names, never the operation
    pub fn short(mut self) -> Self {
        self.short_output = true;
        self
    }
}

impl std::fmt::Debug for NamePrinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamePrinter")
            .field("operation", &self.operation)
            .field("short_output", &self.short_output)
            .finish_non_exhaustive()
    }
}

impl ResourcePrinter for NamePrinter {
    fn print_obj(&self, obj: &Value, w: &mut dyn Write) -> Result<(), PrintError> {
        if let Some(items) = list_items(obj) {
            for item in items {
                self.print_obj(item, w)?;
            }
            return Ok(());
        }

        let reference = self.typer.resolve(obj)?;
        if reference.kind().is_empty() {
            return Err(PrintError::MissingKind {
                name: reference.name,
            });
        }

        if self.short_output || self.operation.is_empty() {
            writeln!(w, "{reference}")?;
        } else {
            writeln!(w, "{reference} {}", self.operation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_core::UnstructuredTyper;
    use serde_json::json;

    fn render(printer: &NamePrinter, obj: &Value) -> String {
        let mut buf = Vec::new();
        printer.print_obj(obj, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn printer(operation: &str) -> NamePrinter {
        NamePrinter::new(operation, Arc::new(UnstructuredTyper))
    }

    #[test]
    fn test_message_mode() {
        let obj = json!({"apiVersion": "v1", "kind": "Pod", "metadata": {"name": "foo"}});
        assert_eq!(render(&printer("created"), &obj), "pod/foo created\n");
    }

    #[test]
    fn test_short_mode_drops_operation() {
        let obj = json!({"apiVersion": "v1", "kind": "Pod", "metadata": {"name": "foo"}});
        assert_eq!(render(&printer("deleted").short(), &obj), "pod/foo\n");
    }

    #[test]
    fn test_group_is_rendered() {
        let obj = json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "web"}
        });
        assert_eq!(
            render(&printer("configured"), &obj),
            "deployment.apps/web configured\n"
        );
        assert_eq!(render(&printer("").short(), &obj), "deployment.apps/web\n");
    }

    #[test]
    fn test_empty_operation_prints_name_only() {
        let obj = json!({"apiVersion": "v1", "kind": "Pod", "metadata": {"name": "foo"}});
        assert_eq!(render(&printer(""), &obj), "pod/foo\n");
    }

    #[test]
    fn test_list_prints_each_item() {
        let list = json!({
            "apiVersion": "v1",
            "kind": "List",
            "items": [
                {"apiVersion": "v1", "kind": "Pod", "metadata": {"name": "a"}},
                {"apiVersion": "v1", "kind": "Service", "metadata": {"name": "b"}}
            ]
        });
        insta::assert_snapshot!(render(&printer("created"), &list).trim_end(), @r"
        pod/a created
        service/b created
        ");
    }

    #[test]
    fn test_missing_kind() {
        let obj = json!({"apiVersion": "v1", "metadata": {"name": "foo"}});
        let mut buf = Vec::new();
        let err = printer("created").print_obj(&obj, &mut buf).unwrap_err();
        assert!(matches!(err, PrintError::MissingKind { ref name } if name == "foo"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_error_propagates() {
        let mut buf = Vec::new();
        let err = printer("created").print_obj(&json!("nope"), &mut buf).unwrap_err();
        assert!(matches!(err, PrintError::Decode(_)));
    }
}
