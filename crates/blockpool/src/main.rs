//! blockpool: exercise a fixed-size block pool from the command line.

use blockpool_lib::{app, config, errors, version};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = config::AppConfig::parse();

    // Logs go to stderr so JSON on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        )
        .init();
    tracing::debug!(version = %version::full_version(), "starting");

    let code = match app::run(&config) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            app::presenter(&config).present_error(&err);
            errors::exit_code(&err)
        }
    };
    std::process::exit(code);
}
