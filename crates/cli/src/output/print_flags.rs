//! Composite print flags
//!
//! Owns the `--output` flag and asks each output family in turn for a
//! printer. A family that rejects the format hands over to the next one;
//! any other error ends the search.

use clap::Arg;

use super::{
    JsonPrintFlags, NamePrintFlags, NoCompatiblePrinterError, PrintError, PrintFlagsSelector,
    RegisterFlags, ResourcePrinter,
};

/// Argument id of the output format flag
pub const OUTPUT_FLAG: &str = "output";

/// All printing options of a command
#[derive(Debug, Clone)]
pub struct PrintFlags {
    /// Requested output format; `None` means the default message output
    pub output_format: Option<String>,
    /// Name and message printing
    pub name: NamePrintFlags,
    /// JSON printing
    pub json: JsonPrintFlags,
}

impl PrintFlags {
    /// Print flags for a command performing `operation`
    pub fn new(operation: impl Into<String>, dry_run: bool) -> Self {
        Self {
            output_format: None,
            name: NamePrintFlags::new(operation, dry_run),
            json: JsonPrintFlags,
        }
    }

    /// Set the requested output format
    pub fn with_output_format(mut self, output_format: Option<String>) -> Self {
        self.output_format = output_format;
        self
    }

    /// Build the printer for the configured output format
    pub fn printer(&self) -> Result<Box<dyn ResourcePrinter>, PrintError> {
        self.to_printer(self.output_format.as_deref().unwrap_or(""))
    }

    fn selectors(&self) -> [&dyn PrintFlagsSelector; 2] {
        [&self.name, &self.json]
    }
}

impl Default for PrintFlags {
    fn default() -> Self {
        Self::new("", false)
    }
}

impl RegisterFlags for PrintFlags {
    fn add_flags(&self, cmd: clap::Command) -> clap::Command {
        let cmd = if cmd.get_arguments().any(|a| a.get_id() == OUTPUT_FLAG) {
            cmd
        } else {
            cmd.arg(
                Arg::new(OUTPUT_FLAG)
                    .short('o')
                    .long("output")
                    .global(true)
                    .value_name("FORMAT")
                    .help(format!(
                        "Output format. One of: {}",
                        self.allowed_formats().join("|")
                    )),
            )
        };

        self.selectors()
            .into_iter()
            .fold(cmd, |cmd, selector| selector.add_flags(cmd))
    }
}

impl PrintFlagsSelector for PrintFlags {
    fn to_printer(&self, output_format: &str) -> Result<Box<dyn ResourcePrinter>, PrintError> {
        for selector in self.selectors() {
            match selector.to_printer(output_format) {
                Err(e) if e.is_no_compatible_printer() => continue,
                result => return result,
            }
        }
        let err = NoCompatiblePrinterError::new(output_format, self.allowed_formats())
            .with_options(self.name.options());
        Err(err.into())
    }

    fn allowed_formats(&self) -> Vec<&'static str> {
        self.selectors()
            .into_iter()
            .flat_map(|selector| selector.allowed_formats())
            .collect()
    }
}
