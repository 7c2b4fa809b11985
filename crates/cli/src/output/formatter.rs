//! Output formatter for resource lines and diagnostics
//!
//! Resource lines go to stdout through the selected printer; errors and
//! warnings go to stderr, as JSON when `--output=json` was requested.

use console::{StyledObject, style};
use serde_json::Value;

use super::{OutputConfig, PrintError, ResourcePrinter};

/// Formatter for CLI output
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    /// Print an object through `printer` to stdout (respects quiet mode)
    pub fn print_resource(
        &self,
        printer: &dyn ResourcePrinter,
        obj: &Value,
    ) -> Result<(), PrintError> {
        if self.config.quiet {
            return Ok(());
        }
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        printer.print_obj(obj, &mut lock)
    }

    /// Output an error message
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({
                "error": message
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
            );
        } else {
            eprintln!("{} {message}", self.label(style("error:").red().bold()));
        }
    }

    /// Output a warning message
    pub fn warning(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }

        eprintln!("{} {message}", self.label(style("warning:").yellow()));
    }

    /// Render a stderr label, styled only when colors apply
    fn label(&self, styled: StyledObject<&str>) -> String {
        if !self.colors_enabled() {
            return styled.force_styling(false).to_string();
        }
        let styled = styled.for_stderr();
        if self.config.force_color {
            styled.force_styling(true).to_string()
        } else {
            styled.to_string()
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}
