mod cli;
mod engine;
mod exit_codes;
mod logging;
mod run;
mod run_error;

use clap::Parser;

use crate::exit_codes::ExitCode;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::for_clap(&err).into();
        }
    };

    logging::init(cli.log_format);

    match run::run(cli).await {
        Ok(()) => ExitCode::Success.into(),
        Err(err) => {
            eprintln!("loadr: {err}");
            err.exit_code().into()
        }
    }
}
