pub mod completions;
pub mod config;
pub mod setup;
pub mod version;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::error::CommitkitError;
use crate::logging::Logger;

/// Load the configuration named by `--config`, or the built-in defaults.
///
/// Only logs at debug level, since `config` prints its result to stdout.
///
/// # Errors
///
/// Returns [`CommitkitError::Config`] if the file cannot be read, parsed, or
/// validated.
pub fn load_config(global: &GlobalOpts, log: &Logger) -> Result<Config, CommitkitError> {
    let Some(path) = &global.config else {
        log.debug("using built-in configuration");
        return Ok(Config::default());
    };
    log.debug(&format!("config: {}", path.display()));
    let config = Config::load(path)?;
    log.debug(&format!(
        "{} hook files, {} cleanup commands",
        config.hook_files.len(),
        config.commands.cleanup.len()
    ));
    Ok(config)
}

/// Version string baked in at build time, or the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("COMMITKIT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}
