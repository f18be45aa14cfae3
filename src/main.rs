use docs_schema::{cli, config_loaded};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DOCS_SCHEMA_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let command_line_interface = cli::CommandLineInterface::load();
    init_logging(command_line_interface.verbose);
    config_loaded::mark_loaded();
    command_line_interface.run()
}
