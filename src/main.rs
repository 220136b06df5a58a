//! `list-reader` prints the decoded, filtered lines of a list file.

pub(crate) mod args;
pub(crate) mod output;
pub(crate) mod verbose;

use std::process;

use anyhow::Result;
use clap::Parser;

use args::Args;
use list_reader::{ExitCode, ListFileReader};
use output::Output;
use verbose::{Verbose, VerboseData};

fn main() -> process::ExitCode {
    env_logger::init();

    let code = match Args::try_parse() {
        Ok(args) => match run(&args) {
            Ok(()) => ExitCode::Success,
            Err(err) => {
                eprintln!("Error: {err:#}");
                ExitCode::from(&err)
            }
        },
        // Help and version output also arrive here
        Err(err) => match err.print() {
            Ok(()) => ExitCode::from(&err),
            Err(_) => ExitCode::Io,
        },
    };

    code.into()
}

fn run(args: &Args) -> Result<()> {
    let reader = ListFileReader::new(&args.input, args.to_config())?;
    let report = args.verbose.then(|| VerboseData::from_reader(&reader));

    let mut output = Output::new(args.output.as_deref())?;
    let lines = output.write_records(reader.records(), args.format, args.numbered)?;

    if let Some(report) = report {
        Verbose::default().write_verbose_info(&report.with_lines(lines), args.format)?;
    }

    Ok(())
}
