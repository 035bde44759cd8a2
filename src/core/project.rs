//! A loaded project: configuration plus fully resolved locations.

use std::path::{Path, PathBuf};

use super::catalog::{CommandCatalog, DisplayStyle};
use super::config::{Config, LoadedConfig};
use super::error::{Error, Result};
use super::location::{self, ResolvedLocation};
use super::selection::{self, SelectionResult};
use crate::parser::ParserRegistry;

/// Resolved view of a configuration file.
#[derive(Debug, Clone)]
pub struct Project {
    /// Path of the configuration file
    pub config_path: PathBuf,

    /// Parsed configuration
    pub config: Config,

    /// Expanded locations with their merged command lists
    pub locations: Vec<ResolvedLocation>,
}

impl Project {
    /// Expand the configured locations and merge in parser-generated commands.
    ///
    /// Explicit commands come first, followed by generated commands in key
    /// order. Any parser or extraction failure aborts the load.
    pub fn load(loaded: LoadedConfig, registry: &ParserRegistry) -> Result<Self> {
        let mut locations = location::expand(&loaded.config.locations, loaded.base_dir())?;

        for location in &mut locations {
            let generated = registry
                .resolve(&location.directory, location.parser.as_deref())
                .map_err(|e| match e {
                    Error::ParserNotFound { name, .. } => Error::ParserNotFound {
                        location: location.path.clone(),
                        name,
                    },
                    other => other,
                })?;

            tracing::debug!(
                location = %location.path,
                explicit = location.commands.len(),
                generated = generated.len(),
                "Resolved location"
            );
            location.commands.extend(generated.into_values());
        }

        Ok(Self {
            config_path: loaded.path,
            config: loaded.config,
            locations,
        })
    }

    /// Discover the configuration above `start` and load it.
    pub fn discover(start: &Path, registry: &ParserRegistry) -> Result<Self> {
        Self::load(Config::discover(start)?, registry)
    }

    /// Distinct display names in first-appearance order.
    pub fn display_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for location in &self.locations {
            let name = location.display_name();
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Flatten every location's commands into a catalog.
    pub fn catalog(&self, style: DisplayStyle) -> CommandCatalog {
        CommandCatalog::flatten(&self.locations, style)
    }

    /// Resolve a raw display line back to a location.
    ///
    /// Locations sharing a display name resolve to the first of them.
    pub fn resolve_selection(&self, line: &str) -> Result<SelectionResult> {
        selection::resolve_display_line(&self.locations, line)
    }
}
