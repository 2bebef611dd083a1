//! Entry point for the `api-lie-detector` binary.
//!
//! Exit code 1 is reserved for usage problems: missing or malformed
//! arguments and an expected response that is not JSON. Every completed
//! investigation exits 0, whatever the verdict.

use std::io::{self, Write};
use std::process::ExitCode;

use api_lie_detector::cli_args::{EXAMPLE, USAGE};
use api_lie_detector::{Args, Executor, detect_lies};
use clap::Parser;
use clap::error::ErrorKind;
use log::debug;

fn print_usage() {
    println!("{USAGE}");
    println!("{EXAMPLE}");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            err.print()?;
            print_usage();
            return Ok(ExitCode::FAILURE);
        }
    };

    let expected = match args.expected() {
        Ok(expected) => expected,
        Err(err) => {
            debug!("{err:?}");
            println!("Error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let executor = Executor::new()?;
    let spec = args.request_spec();
    let mut stdout = io::stdout().lock();
    detect_lies(&mut stdout, &executor, &spec, &expected).await?;
    stdout.flush()?;
    Ok(ExitCode::SUCCESS)
}
