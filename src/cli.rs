// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The CLI surface is a single positional task name, mirroring the classic
//! task-runner invocation style (`assetpipe build`, `assetpipe html:build`).

use clap::{Parser, ValueEnum};

/// Command-line arguments for `assetpipe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "assetpipe",
    version,
    about = "Static-asset build pipeline with watch mode and live reload.",
    long_about = None
)]
pub struct CliArgs {
    /// Task to run.
    #[arg(value_enum, value_name = "TASK", default_value = "default")]
    pub task: TaskArg,

    /// Path to the config file (TOML).
    ///
    /// The file is optional; when absent, built-in defaults are used
    /// (`assets/src` -> `assets/build`).
    #[arg(long, value_name = "PATH", default_value = "Assetpipe.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ASSETPIPE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Invokable tasks as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskArg {
    /// Full build, then dev server + watcher.
    Default,
    /// One-shot full build (clean, then all asset classes).
    Build,
    /// Watcher without the dev server.
    Watch,
    /// Remove the build output directory contents.
    #[value(name = "clean:build")]
    CleanBuild,
    #[value(name = "html:build")]
    HtmlBuild,
    #[value(name = "css:build")]
    CssBuild,
    #[value(name = "scss:build")]
    ScssBuild,
    #[value(name = "js:build")]
    JsBuild,
    #[value(name = "min_js:build")]
    MinJsBuild,
    #[value(name = "min_css:build")]
    MinCssBuild,
    #[value(name = "image:build")]
    ImageBuild,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
