use std::process;

use calctree::cli::args::GrafCli;
use calctree::cli::commands::execute_reach;
use calctree::cli::logging::setup_logging;
use calctree::cli::output;
use calctree::exitcode;
use clap::Parser;

fn main() {
    let cli = match GrafCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                exitcode::FAILURE
            } else {
                exitcode::OK
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    setup_logging(cli.debug);

    if let Err(e) = execute_reach(&cli) {
        output::error(&e);
        process::exit(e.exit_code());
    }
}
