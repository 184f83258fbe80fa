//! `captain` entry point.
//!
//! Resolves configuration from defaults, environment and flags, then installs
//! logging at the configured threshold. A bad flag prints usage and exits
//! non-zero before anything else runs.

use captain_config::{COMMAND_NAME, ConfigError};

fn main() {
    let resolution = match captain_config::resolve_from_process() {
        Ok(resolution) => resolution,
        // Prints usage (or help) and exits: 2 for errors, 0 for --help.
        Err(ConfigError::Flags(err)) => err.exit(),
        Err(err) => {
            eprintln!("{COMMAND_NAME}: {err}");
            std::process::exit(err.exit_code());
        }
    };

    if let Some(err) = captain_server::init_tracing(&resolution.settings.log) {
        tracing::warn!("{err}; using info");
    }
    tracing::info!("{COMMAND_NAME} v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = captain_server::startup(resolution);
    tracing::info!(
        server = %settings.server.address(),
        "startup configuration ready"
    );
}
