//! Built-in parser definitions.

use std::collections::BTreeMap;

use super::{ExtractionStrategy, ParserDefinition};

/// Return the default parser set, keyed by parser name.
pub fn default_parsers() -> BTreeMap<String, ParserDefinition> {
    let mut parsers = BTreeMap::new();

    for (name, manager_run) in [
        ("npm", "npm run {key}"),
        ("yarn", "yarn {key}"),
        ("pnpm", "pnpm run {key}"),
    ] {
        parsers.insert(
            name.to_string(),
            ParserDefinition {
                detect_files: vec!["package.json".to_string()],
                base_commands: base(&[
                    ("install", &format!("{name} install")),
                    ("audit", &format!("{name} audit")),
                ]),
                strategy: Some(ExtractionStrategy::ManifestScripts),
                command_template: Some(manager_run.to_string()),
                ..ParserDefinition::default()
            },
        );
    }

    parsers.insert(
        "go".to_string(),
        ParserDefinition {
            detect_files: vec!["go.mod".to_string()],
            base_commands: base(&[
                ("build", "go build ./..."),
                ("test", "go test ./..."),
                ("fmt", "go fmt ./..."),
                ("vet", "go vet ./..."),
                ("mod", "go mod tidy"),
            ]),
            ..ParserDefinition::default()
        },
    );

    parsers
}

fn base(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, cmd)| ((*key).to_string(), (*cmd).to_string()))
        .collect()
}
