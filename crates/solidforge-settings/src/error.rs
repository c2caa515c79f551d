//! Configuration errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to read, decode, encode, or write a configuration file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML config: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("Cannot encode config as TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}

/// A configuration that decoded but cannot be used
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// Only `.toml` and `.json` files are understood
    #[error("Config files must be .toml or .json, got '{0}'")]
    UnsupportedFormat(String),

    #[error("{key} = {value} is out of range")]
    OutOfRange { key: String, value: String },

    #[error("{0} must not be empty")]
    Empty(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
