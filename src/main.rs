//

use std::io::{stdin, stdout, BufReader, Write};
use std::process::exit;

use clap::Parser;
use env_logger::Env;
use log::error;

use handoff::util::source::TokenReader;
use handoff::util::trace::{StderrTrace, TraceSink};
use handoff::{Cli, Pipeline, Result};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    // any argument count outside 2..=3 exits with 1, help and version included
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            exit(1);
        }
    };

    if let Err(err) = run(cli) {
        error!("{}", err);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config();
    let trace: Option<&dyn TraceSink> = if config.debug {
        Some(&StderrTrace)
    } else {
        None
    };
    let pipeline = Pipeline::new(config)?;
    let source = TokenReader::new(BufReader::new(stdin()));
    let report = pipeline.run(source, trace)?;
    writeln!(stdout(), "{}", report.total)?;
    Ok(())
}
