//! JSON printer

use std::io::Write;

use serde_json::Value;

use super::{
    NoCompatiblePrinterError, PrintError, PrintFlagsSelector, RegisterFlags, ResourcePrinter,
};

/// Prints each object as pretty JSON followed by a newline
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPrinter;

impl ResourcePrinter for JsonPrinter {
    fn print_obj(&self, obj: &Value, w: &mut dyn Write) -> Result<(), PrintError> {
        serde_json::to_writer_pretty(&mut *w, obj)?;
        writeln!(w)?;
        Ok(())
    }
}

/// Selects the [`JsonPrinter`] for `--output=json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPrintFlags;

impl RegisterFlags for JsonPrintFlags {
    fn add_flags(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }
}

impl PrintFlagsSelector for JsonPrintFlags {
    fn to_printer(&self, output_format: &str) -> Result<Box<dyn ResourcePrinter>, PrintError> {
        if output_format.eq_ignore_ascii_case("json") {
            Ok(Box::new(JsonPrinter))
        } else {
            Err(NoCompatiblePrinterError::new(output_format, self.allowed_formats()).into())
        }
    }

    fn allowed_formats(&self) -> Vec<&'static str> {
        vec!["json"]
    }
}
