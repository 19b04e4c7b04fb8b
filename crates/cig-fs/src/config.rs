//! Configuration files in any of the supported serde formats

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result, io};

/// Serialization format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// `.toml`, `.json`, `.yaml` or `.yml`, case-insensitive.
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    fn parse<T: DeserializeOwned>(self, content: &str) -> std::result::Result<T, String> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Loads typed configuration from TOML, JSON or YAML files.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Read `path` and deserialize it in the format its extension names.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = Format::from_path(path)?;
        let content = io::read_text(path)?;
        let value = format.parse(&content).map_err(|message| Error::ConfigParse {
            path: path.to_native(),
            format: format.name().to_string(),
            message,
        })?;
        tracing::debug!(path = %path, format = format.name(), "loaded config");
        Ok(value)
    }
}
