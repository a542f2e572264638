use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "scrollbox.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to load config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct Config {
    /// Session storage key carrying the sidebar scroll offset across one navigation.
    pub storage_key: String,
    /// Height of one sidebar row, in pixels.
    pub entry_height: f64,
    /// Height of the visible part of the sidebar, in pixels.
    pub viewport_height: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: "sidebar-scroll".to_string(),
            entry_height: 24.0,
            viewport_height: 480.0,
        }
    }
}

impl Config {
    pub fn load<T>(source_path: T) -> Result<Config, ConfigError>
    where
        T: AsRef<Path>,
    {
        let mut filename = source_path.as_ref().to_path_buf();
        filename.push(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&filename).map_err(|source| ConfigError::Io {
            path: filename.clone(),
            source,
        })?;
        contents.parse()
    }
}

impl FromStr for Config {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
