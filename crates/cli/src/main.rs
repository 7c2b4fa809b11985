//! rp - resource printer CLI
//!
//! Records resource manifests in a local store and reports each outcome
//! as `kind[.group]/name <operation>`.

use resprint::commands;
use resprint::exit_code::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let (cli, output_format) = match commands::parse_from(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::UsageError
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli, output_format);

    std::process::exit(exit_code.as_i32());
}
