//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use kmstyle_cli::CliError;

fn main() {
    env_logger::init();
    match kmstyle_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("kmstyle: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}
