//! `ctest-runner` binary entry point

use std::io::Write;

use ctest_runner::{build_cli, logging, run, CliArgs, RunnerConfig};

fn main() -> anyhow::Result<()> {
    logging::init();

    let matches = build_cli().get_matches();
    let args = CliArgs::from_matches(&matches);
    let config = RunnerConfig::default();

    let mut stdout = std::io::stdout();
    let outcome = run(&config, &args, &mut stdout)?;

    // Exit status stays 0 on a failed test run; the report line is the signal.
    writeln!(stdout, "{}", outcome.report_line())?;
    Ok(())
}
