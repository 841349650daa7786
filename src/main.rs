mod report;

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use ticketfield::{Notes, validate};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() -> ExitCode {
    if let Err(err) = init_tracing() {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let path = match parse_args() {
        Ok(Command::Help) => {
            println!("{}", usage());
            println!("{}", help_text());
            return ExitCode::SUCCESS;
        }
        Ok(Command::Run(path)) => path,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

enum Command {
    Help,
    Run(PathBuf),
}

fn parse_args() -> Result<Command, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [flag] if flag == "-h" || flag == "--help" => Ok(Command::Help),
        [path] => Ok(Command::Run(PathBuf::from(path))),
        _ => Err(format!("{}\nRun with -h for more help", usage())),
    }
}

fn run(path: &Path) -> Result<(), String> {
    let text = std::fs::read_to_string(path).map_err(|err| format!("Couldn't open \"{}\" ({err})", path.display()))?;

    let notes = Notes::parse(&text).map_err(|err| format!("error: {err}"))?;
    let color = io::stdout().is_terminal();

    // The error rate stands on its own; report it even if resolution fails.
    let validation = validate(&notes);
    report::print_error_rate(validation.error_rate, color);

    let analysis = validation.resolve(&notes.rules).map_err(|err| format!("error: {err}"))?.analysis;
    let product = analysis.departure_product(&notes.your_ticket).map_err(|err| format!("error: {err}"))?;
    report::print_departure_product(product, color);
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .map_err(|err| format!("error: invalid log filter: {err}"))?;
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true).with_writer(io::stderr);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
    Ok(())
}

fn usage() -> String {
    format!(
        "
Usage:
  {bin} <FILENAME>
  where <FILENAME> is the path to the input file with ticket information
",
        bin = env!("CARGO_PKG_NAME")
    )
}

fn help_text() -> &'static str {
    "\
Given a file of ticket information, determine which tickets are invalid and
which column of the tickets holds which field.

The file is divided into three sections, separated by blank lines.

The first section is rules indicating valid range(s) of values (inclusive)
for various named fields. Each rule is on a separate line, e.g.
  class: 1-3 or 5-7

The second section, headed \"your ticket:\", is your ticket: a line of
comma-separated field values. The field corresponding to each value is
unknown.

The third section, headed \"nearby tickets:\", lists other tickets, one per
line, in the same format. The fields are always in the same order.

Output:
  Error rate                   sum of nearby-ticket values no rule accepts
  Product of departure fields  product of your ticket's values for the
                               fields whose name starts with \"departure\"

Exit codes:
  0  Success.
  1  Invalid arguments, unreadable file, malformed notes or unresolvable
     fields.

Set RUST_LOG=ticketfield=debug to trace field resolution on stderr.
"
}
