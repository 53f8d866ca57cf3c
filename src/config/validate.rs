// src/config/validate.rs

use anyhow::{Context, Result, anyhow};
use globset::Glob;

use crate::config::model::{AssetClass, Config};

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - the server port is non-zero
/// - every `src`, `watch` and `exclude` glob compiles
/// - every output directory lies under (or equals) the build root, so that
///   `clean` covers everything the class tasks write
///
/// Classes may share an output directory (css, min_css and scss all write
/// into the same one by default); file-level disjointness there is by naming
/// convention, which is the contract the path table expresses.
pub fn validate_config(cfg: &Config) -> Result<()> {
    validate_server(cfg)?;
    validate_globs(cfg)?;
    validate_output_containment(cfg)?;
    Ok(())
}

fn validate_server(cfg: &Config) -> Result<()> {
    if cfg.server.port == 0 {
        return Err(anyhow!("[server].port must be non-zero"));
    }
    Ok(())
}

fn validate_globs(cfg: &Config) -> Result<()> {
    for class in AssetClass::ALL {
        let paths = cfg.paths.class(class);

        Glob::new(&paths.src)
            .with_context(|| format!("invalid src glob for class '{class}': {}", paths.src))?;
        Glob::new(&paths.watch)
            .with_context(|| format!("invalid watch glob for class '{class}': {}", paths.watch))?;
        if let Some(exclude) = &paths.exclude {
            Glob::new(exclude).with_context(|| {
                format!("invalid exclude glob for class '{class}': {exclude}")
            })?;
        }
    }
    Ok(())
}

fn validate_output_containment(cfg: &Config) -> Result<()> {
    let root = &cfg.paths.build_root;

    for class in AssetClass::ALL {
        let dest = &cfg.paths.class(class).dest;
        if !dest.starts_with(root) {
            return Err(anyhow!(
                "output directory {dest:?} for class '{class}' is outside the build root {root:?}; \
                 clean would leave stale files behind"
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::Config;

    #[test]
    fn default_config_is_valid() {
        validate_config(&Config::default()).expect("defaults validate");
    }

    #[test]
    fn rejects_output_outside_build_root() {
        let mut cfg = Config::default();
        cfg.paths.img.dest = "somewhere/else/img".into();

        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("outside the build root"));
    }

    #[test]
    fn rejects_invalid_glob() {
        let mut cfg = Config::default();
        cfg.paths.js.src = "assets/src/js/[*.js".into();

        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn rejects_port_zero() {
        let mut cfg = Config::default();
        cfg.server.port = 0;

        assert!(validate_config(&cfg).is_err());
    }
}
