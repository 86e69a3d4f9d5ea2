//! Tally CLI: sequential calculator in the terminal
//!
//! ## Usage
//!
//! ```bash
//! tally                          # Interactive calculator
//! tally keys "2+3*4="            # Prints 20
//! tally keys "5/0=" --trace      # One line per key
//! tally keys "9.1*6=" -f json    # Full report as JSON
//! ```

use clap::Parser;
use std::process::ExitCode;
use tally_cli::{
    logging, terminal, Cli, CliConfig, CliError, CliResult, ColorChoice, Commands, KeysArgs,
    KeysReport, LogTarget, Printer, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli);
    console::set_colors_enabled(config.use_color());

    match cli.command {
        None | Some(Commands::Tui) => {
            logging::init(&config, LogTarget::Interactive);
            terminal::run_tui()
        }
        Some(Commands::Keys(args)) => {
            logging::init(&config, LogTarget::Stderr);
            run_keys(&config, &args)
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new().with_verbosity(verbosity).with_color(color)
}

fn run_keys(config: &CliConfig, args: &KeysArgs) -> CliResult<()> {
    if args.sequence.is_empty() {
        return Err(CliError::invalid_argument("key sequence is empty"));
    }

    let report = KeysReport::run(&args.sequence);
    let printer = Printer::new(config.use_color(), config.verbosity.is_quiet());
    printer.report(&report, args.format, args.trace)?;

    if args.strict {
        if let Some(error) = report.first_problem() {
            return Err(error.into());
        }
    } else {
        printer.summary(&report)?;
    }
    Ok(())
}
