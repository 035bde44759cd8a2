//! Flattened command listing.
//!
//! The catalog turns resolved locations into one entry per command, in
//! resolution order, each with a rendered display line.

use std::path::PathBuf;

use serde::Serialize;

use super::location::ResolvedLocation;
use super::selection::SelectionResult;

/// How a catalog entry is rendered as a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayStyle {
    /// `<name>:<command>`
    #[default]
    Plain,
    /// `[<name>] <command>`
    Bracketed,
}

impl DisplayStyle {
    /// Render a display line.
    pub fn render(self, name: &str, command: &str) -> String {
        match self {
            Self::Plain => format!("{name}:{command}"),
            Self::Bracketed => format!("[{name}] {command}"),
        }
    }
}

/// One command at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandEntry {
    /// Display name of the location
    pub display_name: String,

    /// Directory the command runs in
    pub directory: PathBuf,

    /// Command string
    pub command: String,

    /// Rendered display line
    #[serde(skip)]
    pub display: String,
}

impl CommandEntry {
    /// The selection result for this entry.
    pub fn selection(&self) -> SelectionResult {
        SelectionResult {
            directory: self.directory.clone(),
            command: self.command.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// Ordered list of command entries.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    entries: Vec<CommandEntry>,
}

impl CommandCatalog {
    /// Flatten resolved locations into entries rendered with `style`.
    pub fn flatten(locations: &[ResolvedLocation], style: DisplayStyle) -> Self {
        let entries = locations
            .iter()
            .flat_map(|location| {
                let name = location.display_name();
                location.commands.iter().map(move |command| CommandEntry {
                    display_name: name.to_string(),
                    directory: location.directory.clone(),
                    command: command.clone(),
                    display: style.render(name, command),
                })
            })
            .collect();

        Self { entries }
    }

    /// All entries, in order.
    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Display lines, in order.
    pub fn lines(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.display.as_str())
            .collect()
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the catalog, returning its entries.
    pub fn into_entries(self) -> Vec<CommandEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(name: Option<&str>, path: &str, commands: &[&str]) -> ResolvedLocation {
        ResolvedLocation {
            name: name.map(ToString::to_string),
            path: path.to_string(),
            directory: PathBuf::from("/repo").join(path),
            parser: None,
            commands: commands.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_plain_lines() {
        let locations = [
            location(Some("frontend"), "packages/frontend", &["npm start", "npm test"]),
            location(None, "scripts", &["./deploy.sh"]),
        ];
        let catalog = CommandCatalog::flatten(&locations, DisplayStyle::Plain);
        assert_eq!(
            catalog.lines(),
            vec!["frontend:npm start", "frontend:npm test", "scripts:./deploy.sh"]
        );
    }

    #[test]
    fn test_bracketed_lines() {
        let locations = [location(None, "packages/backend", &["cargo run"])];
        let catalog = CommandCatalog::flatten(&locations, DisplayStyle::Bracketed);
        assert_eq!(catalog.lines(), vec!["[packages/backend] cargo run"]);
        assert_eq!(
            catalog.entries()[0].directory,
            PathBuf::from("/repo/packages/backend")
        );
    }

    #[test]
    fn test_entry_selection() {
        let locations = [location(Some("api"), "services/api", &["cargo run"])];
        let catalog = CommandCatalog::flatten(&locations, DisplayStyle::Bracketed);

        let selection = catalog.entries()[0].selection();
        assert_eq!(selection.directory, PathBuf::from("/repo/services/api"));
        assert_eq!(selection.command, "cargo run");
        assert_eq!(selection.display_name, "api");
    }

    #[test]
    fn test_location_without_commands_has_no_entries() {
        let locations = [
            location(Some("empty"), "empty", &[]),
            location(Some("one"), "one", &["ls"]),
        ];
        let catalog = CommandCatalog::flatten(&locations, DisplayStyle::Plain);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].display_name, "one");
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = CommandCatalog::flatten(&[], DisplayStyle::Bracketed);
        assert!(catalog.is_empty());
        assert!(catalog.into_entries().is_empty());
    }
}
