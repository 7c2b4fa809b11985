//! Output formatting utilities
//!
//! Commands report each resource they touch through a [`ResourcePrinter`].
//! Printers are obtained from print-flag selectors: each selector owns the
//! options of one output family and either produces a printer for the
//! requested `--output` value or rejects it with
//! [`PrintError::NoCompatiblePrinter`], so a composite can try the next one.

mod formatter;
mod json;
mod name;
mod name_flags;
mod print_flags;

use std::io::Write;

use serde_json::Value;
use thiserror::Error;

pub use formatter::Formatter;
pub use json::{JsonPrintFlags, JsonPrinter};
pub use name::NamePrinter;
pub use name_flags::NamePrintFlags;
pub use print_flags::{OUTPUT_FLAG, PrintFlags};

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Diagnostics are emitted as JSON
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Style output even when stderr is not a terminal
    pub force_color: bool,
    /// Suppress non-error output
    pub quiet: bool,
}

/// Renders objects to a writer
pub trait ResourcePrinter: Send + Sync {
    /// Write `obj` to `w`
    fn print_obj(&self, obj: &Value, w: &mut dyn Write) -> Result<(), PrintError>;
}

/// Registers command-line flags onto a clap command
pub trait RegisterFlags {
    /// Bind the flags this type needs onto `cmd`
    ///
    /// Must be safe to call any number of times.
    fn add_flags(&self, cmd: clap::Command) -> clap::Command;
}

/// Maps an `--output` value to a printer
pub trait PrintFlagsSelector: RegisterFlags + Send + Sync {
    /// Build a printer for `output_format`
    ///
    /// Returns [`PrintError::NoCompatiblePrinter`] when the format is not one
    /// of [`allowed_formats`](Self::allowed_formats).
    fn to_printer(&self, output_format: &str) -> Result<Box<dyn ResourcePrinter>, PrintError>;

    /// Formats this selector accepts, for diagnostics
    fn allowed_formats(&self) -> Vec<&'static str>;
}

/// Options of the selector that rejected a format
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorOptions {
    /// Operation message the selector would have printed
    pub operation: String,
    /// Whether the selector was set up for a dry run
    pub dry_run: bool,
}

/// A selector was asked for an output format it does not support
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "unable to match a printer suitable for the output format \"{output_format}\", allowed formats are: {}",
    .allowed_formats.join(",")
)]
pub struct NoCompatiblePrinterError {
    /// The rejected format, as requested
    pub output_format: String,
    /// What the rejecting selector would have accepted
    pub allowed_formats: Vec<&'static str>,
    /// Configuration of the rejecting selector, when it has any
    pub options: Option<SelectorOptions>,
}

impl NoCompatiblePrinterError {
    pub fn new(output_format: &str, allowed_formats: Vec<&'static str>) -> Self {
        Self {
            output_format: output_format.to_string(),
            allowed_formats,
            options: None,
        }
    }

    /// Attach the rejecting selector's configuration
    pub fn with_options(mut self, options: SelectorOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Errors raised while selecting or running a printer
#[derive(Error, Debug)]
pub enum PrintError {
    /// Unsupported output format
    #[error(transparent)]
    NoCompatiblePrinter(#[from] NoCompatiblePrinterError),

    /// Object resolved to an empty kind
    #[error("missing kind for resource with name {name}")]
    MissingKind { name: String },

    /// Object could not be resolved
    #[error(transparent)]
    Decode(#[from] rp_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrintError {
    /// Whether this is the "no compatible printer" condition
    pub fn is_no_compatible_printer(&self) -> bool {
        matches!(self, PrintError::NoCompatiblePrinter(_))
    }
}
