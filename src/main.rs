use clap::Parser;
use vnfeed::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
