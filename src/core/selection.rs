//! Selection results and display-line parsing.
//!
//! When an external picker chooses a raw display line, the line is parsed
//! back into a location display name and a command, and the name is looked
//! up among the resolved locations.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::error::{Error, Result};
use super::location::ResolvedLocation;

static BRACKETED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\]]+)\]\s+(.+)$").expect("bracketed line pattern is valid"));

static PLAIN_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:]+):\s*(.+)$").expect("plain line pattern is valid"));

/// The command a user picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionResult {
    /// Directory the command should run in
    pub directory: PathBuf,

    /// Command to run
    pub command: String,

    /// Display name of the location
    pub display_name: String,
}

/// Split a display line into `(display_name, command)`.
///
/// Accepts `[<name>] <command>` and `<name>:<command>`; in the plain form the
/// first colon separates the name from the command.
pub fn parse_display_line(line: &str) -> Result<(String, String)> {
    let line = line.trim();
    let pattern = if line.starts_with('[') { &*BRACKETED_LINE } else { &*PLAIN_LINE };

    pattern
        .captures(line)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .ok_or_else(|| Error::SelectionParse(line.to_string()))
}

/// Find the first location with the given display name.
pub fn find_location<'a>(
    locations: &'a [ResolvedLocation],
    display_name: &str,
) -> Option<&'a ResolvedLocation> {
    locations.iter().find(|location| location.display_name() == display_name)
}

/// Turn a raw display line into a selection result.
pub fn resolve_display_line(locations: &[ResolvedLocation], line: &str) -> Result<SelectionResult> {
    let (display_name, command) = parse_display_line(line)?;
    let location = find_location(locations, &display_name)
        .ok_or_else(|| Error::LocationNotFound(display_name.clone()))?;

    Ok(SelectionResult {
        directory: location.directory.clone(),
        command,
        display_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locations() -> Vec<ResolvedLocation> {
        let mk = |name: Option<&str>, path: &str| ResolvedLocation {
            name: name.map(ToString::to_string),
            path: path.to_string(),
            directory: PathBuf::from("/repo").join(path),
            parser: None,
            commands: Vec::new(),
        };
        vec![
            mk(Some("frontend"), "packages/frontend"),
            mk(None, "packages/backend"),
            mk(Some("scripts"), "scripts"),
        ]
    }

    #[test]
    fn test_parse_bracketed() {
        assert_eq!(
            parse_display_line("[frontend] start").unwrap(),
            ("frontend".to_string(), "start".to_string())
        );
        assert_eq!(
            parse_display_line("[scripts] npm run build:prod").unwrap(),
            ("scripts".to_string(), "npm run build:prod".to_string())
        );
    }

    #[test]
    fn test_parse_plain_splits_on_first_colon() {
        assert_eq!(
            parse_display_line("frontend: npm run build:prod").unwrap(),
            ("frontend".to_string(), "npm run build:prod".to_string())
        );
        assert_eq!(
            parse_display_line("packages/backend:cargo run\n").unwrap(),
            ("packages/backend".to_string(), "cargo run".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        for line in [
            "",
            "frontend start",
            "[frontend start",
            "[frontend]",
            "[] start",
            "frontend:",
            ":start",
        ] {
            assert!(
                matches!(parse_display_line(line), Err(Error::SelectionParse(_))),
                "{line:?} should not parse"
            );
        }
    }

    #[test]
    fn test_resolve_by_name_and_by_path() {
        let locations = locations();

        let result = resolve_display_line(&locations, "[frontend] npm start").unwrap();
        assert_eq!(result.directory, PathBuf::from("/repo/packages/frontend"));
        assert_eq!(result.command, "npm start");
        assert_eq!(result.display_name, "frontend");

        let result = resolve_display_line(&locations, "packages/backend: cargo test").unwrap();
        assert_eq!(result.directory, PathBuf::from("/repo/packages/backend"));
    }

    #[test]
    fn test_unknown_location_is_distinct_error() {
        let err = resolve_display_line(&locations(), "[nowhere] ls").unwrap_err();
        assert!(matches!(err, Error::LocationNotFound(ref name) if name == "nowhere"));

        // A named location is not found by its path
        let err = resolve_display_line(&locations(), "[packages/frontend] ls").unwrap_err();
        assert!(matches!(err, Error::LocationNotFound(_)));
    }
}
