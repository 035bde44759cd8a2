#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::case_sensitive_file_extension_comparisons)]

//! # locrun
//!
//! Discover and pick commands across the directories of a multi-project
//! workspace.
//!
//! A `.locrunrc` file lists locations (literal paths or single-level `dir/*`
//! globs), each with explicit commands and an optional parser type. Parsers
//! detect manifests such as `package.json` or `go.mod` and generate more
//! commands. The merged list is printed, fed to an external picker, or
//! searched in a built-in selector with a location filter.
//!
//! ## Quick Start
//!
//! ```bash
//! # List every command
//! locrun list
//!
//! # Pick one interactively and print it as JSON
//! lr select
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::significant_drop_tightening)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::use_self)]

pub mod app;
pub mod core;
pub mod parser;
pub mod picker;
pub mod tui;

// Re-export commonly used types
pub use app::App;
pub use crate::core::{
    CommandCatalog, Config, DisplayStyle, Error, Project, Result, SelectionResult,
};
pub use crate::parser::{OverrideSource, ParserRegistry};
pub use crate::picker::Picker;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "locrun";

/// Short alias
pub const APP_ALIAS: &str = "lr";
