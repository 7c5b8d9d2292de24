//! Command execution for both binaries

use std::io::{self, BufRead};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::application::services::CalcOutput;
use crate::cli::args::{Cli, GrafCli};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::ToTermTree;
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(shell) = cli.completions {
        print_completions(shell);
        return Ok(());
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.tree |= cli.tree;
    settings.labels |= cli.labels;

    if cli.show_config {
        output::info(&settings.to_toml()?);
        return Ok(());
    }

    let file = cli
        .file
        .as_deref()
        .ok_or_else(|| CliError::InvalidArgs("missing input file".to_string()))?;
    let container = ServiceContainer::new(settings);
    _calc(&container, file)
}

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[instrument(skip(container))]
fn _calc(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let report = container.calc_service().run(file)?;
    info!(
        "collapsed {} subtrees, {} -> {} nodes",
        report.collapsed,
        report.original.len(),
        report.reduced.len()
    );
    print_report(&report, &container.settings);
    Ok(())
}

/// The two result lines: original and reduced tree in prefix form.
pub fn report_lines(report: &CalcOutput, settings: &Settings) -> [String; 2] {
    if settings.labels {
        [
            format!("original: {}", report.original),
            format!("reduced: {}", report.reduced),
        ]
    } else {
        [report.original.to_string(), report.reduced.to_string()]
    }
}

fn print_report(report: &CalcOutput, settings: &Settings) {
    for line in report_lines(report, settings) {
        output::info(&line);
    }
    if settings.tree {
        output::header("original");
        output::info(&report.original.to_term_tree());
        output::header("reduced");
        output::info(&report.reduced.to_term_tree());
    }
}

pub fn execute_reach(cli: &GrafCli) -> CliResult<()> {
    let container = ServiceContainer::new(Settings::default());
    let service = container.reach_service();
    let graph = service.load(&cli.file)?;

    let (first, second, max_hops) = match (cli.first, cli.second, cli.max_hops) {
        (Some(k1), Some(k2), Some(l)) => (k1, k2, l),
        _ => {
            output::prompt("Enter cities K1 and K2 (1-based) and the maximum number of roads L:");
            read_query(&mut io::stdin().lock())?
        }
    };
    debug!("query: K1={} K2={} L={}", first, second, max_hops);

    let common = service.common(&graph, first, second, max_hops)?;
    output::info(&format_common(&common));
    Ok(())
}

/// Reads three non-negative integers, possibly spread over several lines.
pub fn read_query(reader: &mut impl BufRead) -> CliResult<(usize, usize, usize)> {
    let mut numbers = Vec::with_capacity(3);
    let mut line = String::new();
    while numbers.len() < 3 {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(CliError::InvalidArgs(format!(
                "expected K1 K2 L, got {} value(s)",
                numbers.len()
            )));
        }
        for word in line.split_whitespace() {
            let n = word
                .parse::<usize>()
                .map_err(|_| CliError::InvalidArgs(format!("not a non-negative integer: '{}'", word)))?;
            numbers.push(n);
        }
    }
    match numbers.as_slice() {
        [k1, k2, l] => Ok((*k1, *k2, *l)),
        _ => Err(CliError::InvalidArgs(format!(
            "expected K1 K2 L, got {} values",
            numbers.len()
        ))),
    }
}

/// Space-separated cities, or `-1` when there are none.
pub fn format_common(cities: &[usize]) -> String {
    if cities.is_empty() {
        "-1".to_string()
    } else {
        cities.iter().join(" ")
    }
}
