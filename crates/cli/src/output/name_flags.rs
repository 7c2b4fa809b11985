//! Name print flags
//!
//! Selects the [`NamePrinter`] for `--output=name` and for the default
//! (empty) output format, baking the operation message into it.

use std::sync::Arc;

use rp_core::{ObjectTyper, UnstructuredTyper};

use super::{
    NamePrinter, NoCompatiblePrinterError, PrintError, PrintFlagsSelector, RegisterFlags,
    ResourcePrinter, SelectorOptions,
};

/// Suffix appended to the operation of a dry run
const DRY_RUN_SUFFIX: &str = " (dry run)";

/// Options for printing a resource's `kind.group/name`, or a message about
/// what happened to it when an operation is given
#[derive(Clone)]
pub struct NamePrintFlags {
    /// Append "(dry run)" to the operation message
    pub dry_run: bool,
    /// Action that took place on the object, e.g. "created"
    pub operation: String,
    typer: Arc<dyn ObjectTyper>,
}

impl NamePrintFlags {
    /// Create name print flags for `operation`
    pub fn new(operation: impl Into<String>, dry_run: bool) -> Self {
        Self {
            dry_run,
            operation: operation.into(),
            typer: Arc::new(UnstructuredTyper),
        }
    }

    /// Snapshot of the configuration, for diagnostics
    pub fn options(&self) -> SelectorOptions {
        SelectorOptions {
            operation: self.operation.clone(),
            dry_run: self.dry_run,
        }
    }

    /// Resolve objects with `typer` in the printers built from these flags
    pub fn with_typer(mut self, typer: Arc<dyn ObjectTyper>) -> Self {
        self.typer = typer;
        self
    }
}

impl std::fmt::Debug for NamePrintFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamePrintFlags")
            .field("dry_run", &self.dry_run)
            .field("operation", &self.operation)
            .finish_non_exhaustive()
    }
}

impl RegisterFlags for NamePrintFlags {
    fn add_flags(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }
}

impl PrintFlagsSelector for NamePrintFlags {
    fn to_printer(&self, output_format: &str) -> Result<Box<dyn ResourcePrinter>, PrintError> {
        let mut operation = self.operation.clone();
        if self.dry_run {
            operation.push_str(DRY_RUN_SUFFIX);
        }
        let printer = NamePrinter::new(operation, Arc::clone(&self.typer));

        match output_format.to_lowercase().as_str() {
            "name" => Ok(Box::new(printer.short())),
            "" => Ok(Box::new(printer)),
            _ => {
                let err = NoCompatiblePrinterError::new(output_format, self.allowed_formats())
                    .with_options(self.options());
                Err(err.into())
            }
        }
    }

    fn allowed_formats(&self) -> Vec<&'static str> {
        vec!["name"]
    }
}
