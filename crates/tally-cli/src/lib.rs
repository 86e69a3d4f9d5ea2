//! Tally CLI Library
//!
//! Command-line and terminal front end for the tally calculator.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod keys;
pub mod logging;
mod output;
pub mod terminal;

pub use commands::{Cli, ColorArg, Commands, KeysArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use keys::{KeyStep, KeysReport, StepOutcome};
pub use logging::LogTarget;
pub use output::{format_step, summary_line, OutputFormat, Printer};
