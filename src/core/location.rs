//! Location pattern expansion.
//!
//! A location is either a literal path or a single-level glob of the form
//! `dir/*`, which expands to every directory directly inside `dir`. Paths are
//! resolved against the directory holding the configuration file.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use super::config::LocationSpec;
use super::error::{Error, Result};

const WILDCARD: char = '*';

/// A concrete directory with its display name and commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocation {
    /// Explicit display name from the configuration
    pub name: Option<String>,

    /// Path as written, or the expanded match for globs
    pub path: String,

    /// Absolute directory used for subprocesses and selection results
    pub directory: PathBuf,

    /// Parser type label
    pub parser: Option<String>,

    /// Explicit commands followed by generated commands
    pub commands: Vec<String>,
}

impl ResolvedLocation {
    /// Human-facing label: the explicit name, else the path.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }

    fn from_spec(spec: &LocationSpec, path: String, directory: PathBuf) -> Self {
        Self {
            name: spec.name.clone(),
            path,
            directory,
            parser: spec.parser.clone(),
            commands: spec.commands.clone(),
        }
    }
}

/// Whether a location string contains a wildcard.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(WILDCARD)
}

/// Check that a glob pattern has the supported `dir/*` shape.
pub fn validate_glob_pattern(pattern: &str) -> Result<()> {
    let invalid = |reason: &'static str| -> Result<()> {
        Err(Error::GlobPattern {
            pattern: pattern.to_string(),
            reason,
        })
    };

    if pattern.matches(WILDCARD).count() > 1 {
        return invalid("multiple wildcards are not supported, only patterns like 'path/*'");
    }
    if !pattern.ends_with(WILDCARD) {
        return invalid("the wildcard must be the last character of the pattern");
    }
    let before = pattern[..pattern.len() - 1].chars().next_back();
    if !before.is_some_and(std::path::is_separator) {
        return invalid("the wildcard must be preceded by a path separator (e.g. 'path/*')");
    }
    Ok(())
}

/// Expand location specs into resolved locations.
///
/// Every glob is validated before the filesystem is touched, so a single bad
/// pattern aborts the whole expansion. Expansions are emitted in place of
/// their pattern, sorted by path.
pub fn expand(locations: &[LocationSpec], base_dir: &Path) -> Result<Vec<ResolvedLocation>> {
    for spec in locations.iter().filter(|spec| is_glob(&spec.location)) {
        validate_glob_pattern(&spec.location)?;
    }

    let mut resolved = Vec::with_capacity(locations.len());
    for spec in locations {
        if is_glob(&spec.location) {
            let matches = expand_glob(spec, base_dir);
            tracing::debug!(pattern = %spec.location, matches = matches.len(), "Expanded glob");
            resolved.extend(matches);
        } else {
            let directory = resolve_directory(base_dir, &spec.location);
            let location = ResolvedLocation::from_spec(spec, spec.location.clone(), directory);
            resolved.push(location);
        }
    }

    Ok(resolved)
}

/// Expand a validated `dir/*` pattern to its directory children.
fn expand_glob(spec: &LocationSpec, base_dir: &Path) -> Vec<ResolvedLocation> {
    let prefix = &spec.location[..spec.location.len() - 1];
    let parent = resolve_directory(base_dir, prefix);

    let mut paths: Vec<String> = WalkDir::new(&parent)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| format!("{prefix}{}", entry.file_name().to_string_lossy()))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let directory = resolve_directory(base_dir, &path);
            ResolvedLocation::from_spec(spec, path, directory)
        })
        .collect()
}

/// Expand `~` and join a location path onto the base directory.
pub fn resolve_directory(base_dir: &Path, path: &str) -> PathBuf {
    let expanded = shellexpand::tilde(path);
    base_dir.join(expanded.as_ref())
}
