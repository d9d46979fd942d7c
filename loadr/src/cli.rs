use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable log lines.
    Text,
    /// One JSON object per log line.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "loadr",
    version,
    about = "Discover load-test scenarios in compiled modules and run them",
    long_about = "loadr loads each MODULE (a shared library built against loadr-abi), collects the scenarios its declared providers produce, and hands them, in argument order, to the load-generation engine.\n\nA module that fails to load, or a provider that fails to construct, is reported and skipped; the remaining modules still run.\n\nLog verbosity follows RUST_LOG (default: info).",
    after_help = "Examples:\n  loadr target/release/libloadr_demo.so\n  loadr ./checkout.so ./search.so\n  loadr --list target/release/libloadr_demo.so\n  RUST_LOG=loadr_core=debug loadr ./checkout.so"
)]
pub struct Cli {
    /// Compiled modules to load, in order
    #[arg(value_name = "MODULE", required = true)]
    pub modules: Vec<PathBuf>,

    /// Print the discovered scenario names and exit without running them
    #[arg(long)]
    pub list: bool,

    /// Log output format
    #[arg(long, value_enum, env = "LOADR_LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
