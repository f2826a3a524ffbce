mod cmd;

use clap::Parser;
use cmd::Cli;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter
const LOG_ENV: &str = "FIXTUREGEN_LOG";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("fixturegen=debug,fixturegen_sqlalchemy=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cmd::run(cli) {
        eprintln!("{}", cmd::error_message(&e));
        std::process::exit(1);
    }
}
