//! Core types and functionality for locrun.
//!
//! This module contains the resolution pipeline: configuration, location
//! expansion, the flattened command catalog, fuzzy ranking and selection.

mod catalog;
mod config;
mod error;
pub mod fuzzy;
mod location;
mod project;
mod selection;
mod shell;

pub use catalog::{CommandCatalog, CommandEntry, DisplayStyle};
pub use config::{
    find_config_file, Config, LoadedConfig, LocationSpec, UiConfig, CONFIG_FILE_NAME,
    TOML_CONFIG_FILE_NAME,
};
pub use error::{Error, Result};
pub use location::{expand, is_glob, resolve_directory, validate_glob_pattern, ResolvedLocation};
pub use project::Project;
pub use selection::{find_location, parse_display_line, resolve_display_line, SelectionResult};
pub use shell::{get_shell, shell_command};
