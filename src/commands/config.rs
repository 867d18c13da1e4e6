//! Command: print the effective configuration.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::logging::Logger;

/// Print the configuration selected by `--config` (or the defaults) as TOML.
///
/// The output is a complete config file that can be edited and passed back
/// with `--config`.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or rendered.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    print!("{}", render(global, log)?);
    Ok(())
}

/// Load the selected configuration and render it as TOML.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or rendered.
pub fn render(global: &GlobalOpts, log: &Logger) -> Result<String> {
    let config = super::load_config(global, log)?;
    config.to_toml()
}
