//! Command key extraction strategies.
//!
//! Each [`ExtractionStrategy`] tag has exactly one [`Extractor`]
//! implementation, looked up through [`extractor_for`].

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;

use once_cell::sync::Lazy;
use serde_json::Value;

use super::{ExtractionStrategy, ParserDefinition};
use crate::core::{shell_command, Error, Result};

/// Keys produced by the `standard-set` strategy.
pub const STANDARD_SET: &[&str] = &[
    "run", "build", "test", "fmt", "vet", "mod", "clean", "install", "get", "generate", "doc",
    "version",
];

const DEFAULT_MANIFEST: &str = "package.json";
const DEFAULT_MANIFEST_FIELD: &str = "scripts";

/// Trait for command key extractors.
pub trait Extractor: Send + Sync {
    /// Strategy tag this extractor implements.
    fn strategy(&self) -> ExtractionStrategy;

    /// Extract command keys for `directory` using the parser definition.
    fn extract(
        &self,
        parser: &str,
        definition: &ParserDefinition,
        directory: &Path,
    ) -> Result<Vec<String>>;
}

static EXTRACTORS: Lazy<HashMap<ExtractionStrategy, Box<dyn Extractor>>> = Lazy::new(|| {
    let extractors: Vec<Box<dyn Extractor>> = vec![
        Box::new(NoneExtractor),
        Box::new(ManifestScriptsExtractor),
        Box::new(StandardSetExtractor),
        Box::new(ShellCommandExtractor),
    ];
    extractors.into_iter().map(|e| (e.strategy(), e)).collect()
});

/// Look up the extractor for a strategy tag.
pub fn extractor_for(strategy: ExtractionStrategy) -> &'static dyn Extractor {
    // Every variant is registered above.
    EXTRACTORS
        .get(&strategy)
        .map(|e| &**e)
        .unwrap_or(&NoneExtractor)
}

/// Yields no keys.
struct NoneExtractor;

impl Extractor for NoneExtractor {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::None
    }

    fn extract(
        &self,
        _parser: &str,
        _definition: &ParserDefinition,
        _directory: &Path,
    ) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Yields [`STANDARD_SET`] regardless of directory contents.
struct StandardSetExtractor;

impl Extractor for StandardSetExtractor {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::StandardSet
    }

    fn extract(
        &self,
        _parser: &str,
        _definition: &ParserDefinition,
        _directory: &Path,
    ) -> Result<Vec<String>> {
        Ok(STANDARD_SET.iter().map(|key| (*key).to_string()).collect())
    }
}

/// Reads string-valued entries of a map field in a manifest document.
struct ManifestScriptsExtractor;

impl Extractor for ManifestScriptsExtractor {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::ManifestScripts
    }

    fn extract(
        &self,
        parser: &str,
        definition: &ParserDefinition,
        directory: &Path,
    ) -> Result<Vec<String>> {
        let manifest = definition
            .manifest
            .as_deref()
            .or_else(|| definition.detect_files.first().map(String::as_str))
            .unwrap_or(DEFAULT_MANIFEST);
        let field = definition
            .manifest_field
            .as_deref()
            .unwrap_or(DEFAULT_MANIFEST_FIELD);
        let path = directory.join(manifest);

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::extraction(parser, directory, e))?;
        let document = decode_manifest(&path, &content)
            .map_err(|e| Error::extraction(parser, directory, e))?;

        Ok(string_keys(&document, field))
    }
}

/// Decode a manifest by file extension into a generic document.
fn decode_manifest(path: &Path, content: &str) -> std::result::Result<Value, String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        Some("toml") => toml::from_str(content).map_err(|e| e.to_string()),
        _ => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Keys of `field` whose values are strings, sorted ascending.
fn string_keys(document: &Value, field: &str) -> Vec<String> {
    let Some(entries) = document.get(field).and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut keys: Vec<String> = entries
        .iter()
        .filter(|(_, value)| value.is_string())
        .map(|(key, _)| key.clone())
        .collect();
    keys.sort();
    keys
}

/// Runs a shell command in the directory and reads one key per output line.
struct ShellCommandExtractor;

impl Extractor for ShellCommandExtractor {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::ShellCommand
    }

    fn extract(
        &self,
        parser: &str,
        definition: &ParserDefinition,
        directory: &Path,
    ) -> Result<Vec<String>> {
        let Some(command) = definition.shell_command.as_deref() else {
            return Ok(Vec::new());
        };

        tracing::debug!(
            parser,
            command,
            directory = %directory.display(),
            "Running parser command"
        );

        let output = shell_command(command)
            .current_dir(directory)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| Error::extraction(parser, directory, e))?;

        if !output.status.success() {
            let message = format!("parser command '{command}' exited with {}", output.status);
            return Err(Error::extraction(parser, directory, message));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }
}
