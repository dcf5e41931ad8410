use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one request per input row and write the success/failure reports.
    Run {
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        log: LogArgs,
        #[command(flatten)]
        request: RequestArgs,
        #[command(flatten)]
        dispatch: DispatchArgs,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Check the input file and request config without sending anything.
    Validate {
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        request: RequestArgs,
    },
}
