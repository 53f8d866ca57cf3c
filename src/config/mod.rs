// src/config/mod.rs

//! Configuration loading and validation for assetpipe.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`): the path table mapping
//!   each asset class to its source glob, output directory and watch glob.
//! - Load a config file from disk, or fall back to built-in defaults
//!   (`loader.rs`).
//! - Validate basic invariants like glob syntax and output-path containment
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{AssetClass, ClassPaths, Config, PathsSection, ServerSection};
pub use validate::validate_config;
