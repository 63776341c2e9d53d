use std::fs;
use std::path::Path;

use thiserror::Error;
use xml_equiv_core::DiffConfiguration;

/// Errors returned when loading a comparison settings file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load comparison settings from a TOML file. Missing keys keep their defaults.
pub fn load_configuration(path: &Path) -> Result<DiffConfiguration, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_configuration(&raw, path.display().to_string())
}

fn parse_configuration(raw: &str, path: String) -> Result<DiffConfiguration, ConfigLoadError> {
    toml::from_str(raw).map_err(|source| ConfigLoadError::Parse { path, source })
}
