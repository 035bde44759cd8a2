//! Configuration management for locrun.
//!
//! The project configuration lists the locations to scan. It is discovered by
//! walking from the current directory up to the filesystem root and looking
//! for `.locrunrc` (YAML) or `.locrun.toml` (TOML) at each level.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// YAML configuration file name.
pub const CONFIG_FILE_NAME: &str = ".locrunrc";

/// TOML configuration file name, checked after [`CONFIG_FILE_NAME`].
pub const TOML_CONFIG_FILE_NAME: &str = ".locrun.toml";

/// Project configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locations to scan for commands
    pub locations: Vec<LocationSpec>,

    /// UI/TUI settings
    pub ui: UiConfig,
}

/// A location entry as written in the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSpec {
    /// Literal path or `dir/*` glob pattern
    pub location: String,

    /// Display name (defaults to the path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Parser type label (`auto` to detect)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,

    /// Explicit commands, always listed before generated ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
}

impl LocationSpec {
    /// Create a location spec for a path with no name, type or commands.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the parser type label.
    pub fn with_parser(mut self, parser: impl Into<String>) -> Self {
        self.parser = Some(parser.into());
        self
    }

    /// Set the explicit command list.
    pub fn with_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands = commands.into_iter().map(Into::into).collect();
        self
    }
}

/// UI/TUI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Color theme name (built-in: default, dracula, nord)
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
        }
    }
}

/// A configuration together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Path of the configuration file
    pub path: PathBuf,

    /// Parsed configuration
    pub config: Config,
}

impl LoadedConfig {
    /// Directory that relative location patterns are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

impl Config {
    /// Parse a configuration document.
    ///
    /// `.toml` files are decoded as TOML, everything else as YAML.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");

        let parsed = if is_toml {
            toml::from_str(content).map_err(|e| e.to_string())
        } else if content.trim().is_empty() {
            Ok(Self::default())
        } else {
            serde_yaml::from_str(content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<LoadedConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::parse(path, &content)?;

        tracing::debug!(
            path = %path.display(),
            locations = config.locations.len(),
            "Loaded config"
        );

        Ok(LoadedConfig {
            path: absolutize(path),
            config,
        })
    }

    /// Find and load the nearest configuration file above `start`.
    pub fn discover(start: &Path) -> Result<LoadedConfig> {
        let path = find_config_file(start)?;
        Self::load_from_file(&path)
    }
}

/// Search for a configuration file starting at `start` and walking up the
/// directory tree until one is found or the root is reached.
pub fn find_config_file(start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        for file_name in [CONFIG_FILE_NAME, TOML_CONFIG_FILE_NAME] {
            let candidate = dir.join(file_name);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "Found config file");
                return Ok(candidate);
            }
        }
    }

    Err(Error::Discovery {
        file_name: CONFIG_FILE_NAME,
        start: start.to_path_buf(),
    })
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
