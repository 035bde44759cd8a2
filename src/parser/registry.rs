//! Parser registry.
//!
//! The registry merges the built-in parsers with an optional user override
//! document. The merge runs at most once per registry, on first use, and the
//! merged set is shared for the registry's lifetime.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use serde::Deserialize;

use super::{default_parsers, CommandMap, ParserDefinition};
use crate::core::{Error, Result};

/// Parser type label that selects a parser by detection.
pub const AUTO_DETECT: &str = "auto";

/// File name of the user override document inside `~/.locrun/`.
pub const PARSERS_FILE_NAME: &str = "parsers.yaml";

/// Where to look for the user override document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideSource {
    /// `~/.locrun/parsers.yaml`
    UserHome,
    /// An explicit file path
    File(PathBuf),
    /// Built-in defaults only
    Disabled,
}

impl OverrideSource {
    fn path(&self) -> Option<PathBuf> {
        match self {
            Self::UserHome => dirs::home_dir()
                .map(|home| home.join(".locrun").join(PARSERS_FILE_NAME)),
            Self::File(path) => Some(path.clone()),
            Self::Disabled => None,
        }
    }
}

/// User override document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ParsersFile {
    parsers: BTreeMap<String, ParserDefinition>,
}

/// Registry of parser definitions, keyed by name.
///
/// Construct one at startup and pass it by reference to whatever resolves
/// locations. Names are kept sorted, so detection visits candidates in name
/// order.
#[derive(Debug)]
pub struct ParserRegistry {
    /// Override document location
    source: OverrideSource,

    /// Set once the merge has completed
    initialized: Mutex<bool>,

    /// Merged parser definitions
    parsers: RwLock<BTreeMap<String, ParserDefinition>>,
}

impl ParserRegistry {
    /// Create a registry that will read overrides from `source` on first use.
    pub fn new(source: OverrideSource) -> Self {
        Self {
            source,
            initialized: Mutex::new(false),
            parsers: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a registry holding only the built-in parsers.
    pub fn with_defaults() -> Self {
        Self::new(OverrideSource::Disabled)
    }

    /// Run the merge if it has not run yet.
    pub fn ensure_initialized(&self) -> Result<()> {
        let mut initialized = self.initialized.lock();
        if *initialized {
            return Ok(());
        }

        let merged = merge_overrides(default_parsers(), self.load_overrides()?);
        tracing::debug!(parsers = merged.len(), "Initialized parser registry");

        *self.parsers.write() = merged;
        *initialized = true;
        Ok(())
    }

    fn load_overrides(&self) -> Result<Option<BTreeMap<String, ParserDefinition>>> {
        let Some(path) = self.source.path() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No parser overrides");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        parse_overrides(&path, &content).map(Some)
    }

    /// Get a parser definition by name.
    pub fn get(&self, name: &str) -> Result<Option<ParserDefinition>> {
        self.ensure_initialized()?;
        Ok(self.parsers.read().get(name).cloned())
    }

    /// All parser names, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        self.ensure_initialized()?;
        Ok(self.parsers.read().keys().cloned().collect())
    }

    /// Find the first parser, by name order, with a detection file present in
    /// `directory`.
    pub fn detect(&self, directory: &Path) -> Result<Option<(String, ParserDefinition)>> {
        self.ensure_initialized()?;
        let parsers = self.parsers.read();
        Ok(parsers
            .iter()
            .find(|(_, parser)| parser.detects(directory))
            .map(|(name, parser)| (name.clone(), parser.clone())))
    }

    /// Produce the command map for a directory and a location's type label.
    ///
    /// With no label the map is empty. `auto` picks a parser by detection.
    /// Any other label must name a registered parser, which applies when it
    /// lists no detection files or one of them is present.
    pub fn resolve(&self, directory: &Path, parser_type: Option<&str>) -> Result<CommandMap> {
        let Some(label) = parser_type else {
            return Ok(CommandMap::new());
        };

        let found = if label == AUTO_DETECT {
            self.detect(directory)?
        } else {
            let parser = self.get(label)?.ok_or_else(|| Error::ParserNotFound {
                location: directory.display().to_string(),
                name: label.to_string(),
            })?;
            let applies = parser.detect_files.is_empty() || parser.detects(directory);
            applies.then(|| (label.to_string(), parser))
        };

        match found {
            Some((name, parser)) => parser.build_commands(&name, directory),
            None => {
                tracing::debug!(
                    directory = %directory.display(),
                    parser = label,
                    "No manifest detected"
                );
                Ok(CommandMap::new())
            }
        }
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new(OverrideSource::UserHome)
    }
}

/// Replace defaults with overrides, whole record per name.
fn merge_overrides(
    mut defaults: BTreeMap<String, ParserDefinition>,
    overrides: Option<BTreeMap<String, ParserDefinition>>,
) -> BTreeMap<String, ParserDefinition> {
    if let Some(overrides) = overrides {
        defaults.extend(overrides);
    }
    defaults
}

fn parse_overrides(path: &Path, content: &str) -> Result<BTreeMap<String, ParserDefinition>> {
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let file: ParsersFile = serde_yaml::from_str(content).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(file.parsers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ExtractionStrategy;
    use serial_test::serial;
    use std::sync::Arc;
    use tempfile::TempDir;

    const NPM_CI_OVERRIDE: &str = "parsers:\n  npm:\n    base_commands:\n      install: npm ci\n";

    fn registry_with_overrides(content: &str) -> (TempDir, ParserRegistry) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(PARSERS_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        (temp, ParserRegistry::new(OverrideSource::File(path)))
    }

    #[test]
    fn test_override_replaces_whole_record() {
        let (_temp, registry) = registry_with_overrides(NPM_CI_OVERRIDE);

        let npm = registry.get("npm").unwrap().unwrap();
        assert_eq!(
            npm.base_commands,
            BTreeMap::from([("install".to_string(), "npm ci".to_string())])
        );
        assert!(npm.detect_files.is_empty());
        assert_eq!(npm.strategy, None);
        assert_eq!(npm.command_template, None);

        // Untouched defaults survive
        let yarn = registry.get("yarn").unwrap().unwrap();
        assert_eq!(yarn.detect_files, vec!["package.json"]);
    }

    #[test]
    fn test_override_adds_new_parser() {
        let (_temp, registry) = registry_with_overrides(concat!(
            "parsers:\n",
            "  make:\n",
            "    detect_files: [Makefile]\n",
            "    shell_command: \"echo all\"\n",
            "    command_template: \"make {key}\"\n",
        ));

        let names = registry.names().unwrap();
        assert_eq!(names, vec!["go", "make", "npm", "pnpm", "yarn"]);
        let make = registry.get("make").unwrap().unwrap();
        assert_eq!(make.effective_strategy(), ExtractionStrategy::ShellCommand);
    }

    #[test]
    fn test_missing_override_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.yaml");
        let registry = ParserRegistry::new(OverrideSource::File(path));
        assert_eq!(registry.names().unwrap(), vec!["go", "npm", "pnpm", "yarn"]);
    }

    #[test]
    fn test_unparsable_override_is_fatal() {
        let (_temp, registry) = registry_with_overrides("parsers: [this is: not a map");
        assert!(matches!(registry.names(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_merge_happens_once() {
        let (temp, registry) =
            registry_with_overrides("parsers:\n  custom:\n    detect_files: [x]\n");
        assert!(registry.get("custom").unwrap().is_some());

        // Later edits are not observed by an initialized registry
        std::fs::write(temp.path().join(PARSERS_FILE_NAME), "parsers: {}\n").unwrap();
        assert!(registry.get("custom").unwrap().is_some());
    }

    #[test]
    fn test_concurrent_initialization() {
        let registry = Arc::new(ParserRegistry::with_defaults());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.names().unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().len(), 4);
        }
    }

    #[test]
    fn test_detect_uses_name_order() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("package.json"), "{}").unwrap();

        let registry = ParserRegistry::with_defaults();
        let (name, _) = registry.detect(temp.path()).unwrap().unwrap();
        assert_eq!(name, "npm");
    }

    #[test]
    fn test_detect_without_manifest() {
        let temp = TempDir::new().unwrap();
        let registry = ParserRegistry::with_defaults();
        assert!(registry.detect(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_resolve_named_parser() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"scripts": {"dev": "vite", "install": "x"}}"#,
        )
        .unwrap();

        let registry = ParserRegistry::with_defaults();
        let commands = registry.resolve(temp.path(), Some("pnpm")).unwrap();
        assert_eq!(
            commands,
            BTreeMap::from([
                ("audit".to_string(), "pnpm audit".to_string()),
                ("dev".to_string(), "pnpm run dev".to_string()),
                ("install".to_string(), "pnpm run install".to_string()),
            ])
        );
    }

    #[test]
    fn test_resolve_auto_detects_go() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("go.mod"), "module example.com/app\n").unwrap();

        let registry = ParserRegistry::with_defaults();
        let commands = registry.resolve(temp.path(), Some(AUTO_DETECT)).unwrap();
        assert_eq!(commands["test"], "go test ./...");
        assert_eq!(commands.len(), 5);
    }

    #[test]
    fn test_resolve_unknown_parser() {
        let temp = TempDir::new().unwrap();
        let registry = ParserRegistry::with_defaults();
        let err = registry.resolve(temp.path(), Some("gradle")).unwrap_err();
        assert!(matches!(err, Error::ParserNotFound { ref name, .. } if name == "gradle"));
    }

    #[test]
    fn test_named_parser_without_detect_files_always_applies() {
        let (temp, registry) = registry_with_overrides(NPM_CI_OVERRIDE);
        let web = temp.path().join("web");
        std::fs::create_dir_all(&web).unwrap();

        let commands = registry.resolve(&web, Some("npm")).unwrap();
        assert_eq!(commands.get("install").map(String::as_str), Some("npm ci"));
        assert_eq!(commands.len(), 1);

        // Detection still needs a detection file
        assert!(registry.detect(&web).unwrap().is_none());
        let detected = registry.resolve(&web, Some(AUTO_DETECT)).unwrap();
        assert!(detected.is_empty());
    }

    #[test]
    fn test_resolve_without_manifest_is_empty() {
        let temp = TempDir::new().unwrap();
        let registry = ParserRegistry::with_defaults();
        let named = registry.resolve(temp.path(), Some("npm")).unwrap();
        assert!(named.is_empty());
        assert!(registry.resolve(temp.path(), None).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    #[serial(home_env)]
    fn test_user_home_override() {
        let home = TempDir::new().unwrap();
        let dir = home.path().join(".locrun");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(PARSERS_FILE_NAME),
            "parsers:\n  custom:\n    base_commands:\n      hello: echo hello\n",
        )
        .unwrap();

        let original = std::env::var("HOME").ok();
        std::env::set_var("HOME", home.path());
        let result = ParserRegistry::default().get("custom");
        match original {
            Some(val) => std::env::set_var("HOME", val),
            None => std::env::remove_var("HOME"),
        }

        let custom = result.unwrap().unwrap();
        assert_eq!(custom.base_commands["hello"], "echo hello");
    }
}
