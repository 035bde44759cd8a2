//! Parsers for generating per-directory commands.
//!
//! A parser is detected by the presence of one of its detection files in a
//! directory. It contributes a fixed set of base commands plus commands
//! extracted by one of the strategies in [`extract`], rendered through an
//! optional `{key}` template.

mod defaults;
mod extract;
mod registry;

pub use defaults::default_parsers;
pub use extract::{extractor_for, Extractor, STANDARD_SET};
pub use registry::{OverrideSource, ParserRegistry, AUTO_DETECT, PARSERS_FILE_NAME};

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Final key → command map for a directory.
pub type CommandMap = BTreeMap<String, String>;

/// Placeholder substituted with an extracted key in a command template.
pub const KEY_PLACEHOLDER: &str = "{key}";

/// Strategy used to extract command keys from a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionStrategy {
    /// No extracted keys, only base commands
    None,
    /// String-valued entries of a map field in a manifest document
    ManifestScripts,
    /// A fixed list of keys
    StandardSet,
    /// One key per line of a shell command's output
    ShellCommand,
}

impl ExtractionStrategy {
    /// Tag name as written in parser definitions.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ManifestScripts => "manifest-scripts",
            Self::StandardSet => "standard-set",
            Self::ShellCommand => "shell-command",
        }
    }
}

/// A single parser definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserDefinition {
    /// Files whose presence selects this parser
    pub detect_files: Vec<String>,

    /// Commands that are always available
    pub base_commands: BTreeMap<String, String>,

    /// Extraction strategy (inferred when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<ExtractionStrategy>,

    /// Shell command printing one key per line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_command: Option<String>,

    /// Template for extracted keys, e.g. `npm run {key}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_template: Option<String>,

    /// Manifest read by `manifest-scripts` (defaults to the first detect file)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,

    /// Map field read by `manifest-scripts` (defaults to `scripts`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_field: Option<String>,
}

impl ParserDefinition {
    /// The strategy in effect: explicit, else `shell-command` when a shell
    /// command is configured, else `none`.
    pub fn effective_strategy(&self) -> ExtractionStrategy {
        match (self.strategy, &self.shell_command) {
            (Some(strategy), _) => strategy,
            (None, Some(_)) => ExtractionStrategy::ShellCommand,
            (None, None) => ExtractionStrategy::None,
        }
    }

    /// Whether any detection file exists in `directory`.
    pub fn detects(&self, directory: &Path) -> bool {
        self.detect_files
            .iter()
            .any(|file| directory.join(file).is_file())
    }

    /// Render a final command string for an extracted key.
    pub fn render(&self, key: &str) -> String {
        match &self.command_template {
            Some(template) => template.replace(KEY_PLACEHOLDER, key),
            None => key.to_string(),
        }
    }

    /// Merge base commands with extracted keys.
    ///
    /// Base commands are inserted first, so an extracted key with the same
    /// name replaces the base command.
    pub fn assemble<I, S>(&self, keys: I) -> CommandMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut commands = self.base_commands.clone();
        for key in keys {
            let key = key.as_ref();
            commands.insert(key.to_string(), self.render(key));
        }
        commands
    }

    /// Extract keys in `directory` and assemble the final command map.
    pub fn build_commands(&self, name: &str, directory: &Path) -> Result<CommandMap> {
        let strategy = self.effective_strategy();
        let keys = extractor_for(strategy).extract(name, self, directory)?;

        tracing::debug!(
            parser = name,
            strategy = strategy.as_str(),
            directory = %directory.display(),
            keys = keys.len(),
            "Extracted command keys"
        );

        Ok(self.assemble(keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npm_like() -> ParserDefinition {
        ParserDefinition {
            detect_files: vec!["package.json".to_string()],
            base_commands: BTreeMap::from([("install".to_string(), "npm install".to_string())]),
            strategy: Some(ExtractionStrategy::ManifestScripts),
            command_template: Some("npm run {key}".to_string()),
            ..ParserDefinition::default()
        }
    }

    #[test]
    fn test_assemble_templates_extracted_keys() {
        let commands = npm_like().assemble(["start"]);
        assert_eq!(
            commands,
            BTreeMap::from([
                ("install".to_string(), "npm install".to_string()),
                ("start".to_string(), "npm run start".to_string()),
            ])
        );
    }

    #[test]
    fn test_extracted_key_overwrites_base_command() {
        let commands = npm_like().assemble(["start", "install"]);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands["install"], "npm run install");
    }

    #[test]
    fn test_render_without_template_uses_key() {
        let parser = ParserDefinition::default();
        assert_eq!(parser.render("make all"), "make all");
    }

    #[test]
    fn test_render_replaces_every_placeholder() {
        let parser = ParserDefinition {
            command_template: Some("echo {key} && run {key}".to_string()),
            ..ParserDefinition::default()
        };
        assert_eq!(parser.render("lint"), "echo lint && run lint");
    }

    #[test]
    fn test_effective_strategy_inference() {
        let mut parser = ParserDefinition::default();
        assert_eq!(parser.effective_strategy(), ExtractionStrategy::None);

        parser.shell_command = Some("ls".to_string());
        assert_eq!(parser.effective_strategy(), ExtractionStrategy::ShellCommand);

        parser.strategy = Some(ExtractionStrategy::StandardSet);
        assert_eq!(parser.effective_strategy(), ExtractionStrategy::StandardSet);
    }

    #[test]
    fn test_strategy_tags_deserialize() {
        let yaml = "detect_files: [Makefile]\nstrategy: shell-command\nshell_command: make -qp\n";
        let parser: ParserDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parser.strategy, Some(ExtractionStrategy::ShellCommand));
        assert!(parser.base_commands.is_empty());
        assert_eq!(ExtractionStrategy::ManifestScripts.as_str(), "manifest-scripts");
    }
}
