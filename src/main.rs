//! pxdna - command-line tool for encoding and decoding avatar DNA

use std::process::ExitCode;

use pixeldna::cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run()
}
