//! CLI entrypoint for `class-safelist`.

use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use class_safelist::cli::Args;
use class_safelist::error::SafelistCliError;

fn main() -> Result<(), SafelistCliError> {
    init_logging()?;
    let args = Args::parse();
    class_safelist::run(&args)
}

fn init_logging() -> Result<(), SafelistCliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| SafelistCliError::Logging(err.to_string()))
}
