// src/config/loader.rs

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::model::Config;
use crate::config::validate::validate_config;

/// Load a configuration file from a given path and return the raw `Config`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (glob syntax, output containment). Use [`load_and_validate`]
/// for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading config file at {path:?}"))?;

    let config: Config =
        toml::from_str(&contents).with_context(|| format!("parsing TOML config from {path:?}"))?;

    Ok(config)
}

/// Load a configuration file and run validation, falling back to built-in
/// defaults when the file does not exist.
///
/// This is the recommended entry point for the rest of the application.
/// Configuration errors here are process-fatal: a bad glob or an output
/// directory escaping the build root is a setup mistake, not a runtime
/// condition to limp through.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();

    let config = if path.exists() {
        info!(config = %path.display(), "loading configuration");
        load_from_path(path)?
    } else {
        debug!(config = %path.display(), "config file absent; using built-in defaults");
        Config::default()
    };

    validate_config(&config)?;
    Ok(config)
}
