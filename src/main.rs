//! locrun - discover and pick commands across project directories.
//!
//! Reads the nearest `.locrunrc`, resolves every location into a list of
//! commands, and prints, picks or resolves them.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use locrun::core::{Config, DisplayStyle, Error, Project, SelectionResult};
use locrun::parser::{OverrideSource, ParserRegistry};
use locrun::picker::{Picker, DEFAULT_PICKER};
use locrun::tui::{self, Theme};
use locrun::{App, APP_NAME};

/// Exit status for a selection the user backed out of.
const CANCELED_EXIT_CODE: i32 = 130;

/// Discover and pick commands across project directories
#[derive(Parser)]
#[command(name = "locrun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run (defaults to `select`)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of searching upward for .locrunrc
    #[arg(short, long, global = true, env = "LOCRUN_CONFIG")]
    config: Option<PathBuf>,

    /// Read parser overrides from this file instead of ~/.locrun/parsers.yaml
    #[arg(long, global = true, env = "LOCRUN_PARSERS")]
    parsers: Option<PathBuf>,

    /// Ignore parser overrides and use the built-in parsers only
    #[arg(long, global = true)]
    no_user_parsers: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every command, one per line
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ListFormat::Plain)]
        format: ListFormat,
    },

    /// Pick a command in the built-in selector and print it as JSON
    Select,

    /// Pick a command with an external picker and print it as JSON
    Pick {
        /// Picker command line. It reads `<index>\t[<name>] <command>` lines on
        /// stdin and prints the chosen line back on stdout.
        #[arg(short, long, env = "LOCRUN_PICKER", default_value = DEFAULT_PICKER)]
        picker: String,
    },

    /// Resolve a display line to its directory and command
    Resolve {
        /// Line such as "[web] npm start" or "web: npm start" (read from stdin if omitted)
        line: Option<String>,
    },

    /// List registered parsers
    Parsers,

    /// Show the resolved configuration
    Config {
        /// Show only the config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ListFormat {
    /// `<name>:<command>`
    Plain,
    /// `[<name>] <command>`
    Bracketed,
    /// JSON array of entries
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = EnvFilter::try_from_env("LOCRUN_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    match run(cli) {
        Err(e) if e.downcast_ref::<Error>().is_some_and(Error::is_canceled) => {
            std::process::exit(CANCELED_EXIT_CODE);
        }
        result => result,
    }
}

fn run(cli: Cli) -> Result<()> {
    let registry = ParserRegistry::new(override_source(&cli));

    match cli.command {
        Some(Commands::List { format }) => cmd_list(cli.config.as_deref(), &registry, format),
        None | Some(Commands::Select) => cmd_select(cli.config.as_deref(), &registry),
        Some(Commands::Pick { ref picker }) => cmd_pick(cli.config.as_deref(), &registry, picker),
        Some(Commands::Resolve { ref line }) => {
            cmd_resolve(cli.config.as_deref(), &registry, line.as_deref())
        }
        Some(Commands::Parsers) => cmd_parsers(&registry),
        Some(Commands::Config { path }) => cmd_config(cli.config.as_deref(), &registry, path),
        Some(Commands::Completions { shell }) => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

fn override_source(cli: &Cli) -> OverrideSource {
    match (&cli.parsers, cli.no_user_parsers) {
        (_, true) => OverrideSource::Disabled,
        (Some(path), false) => OverrideSource::File(path.clone()),
        (None, false) => OverrideSource::UserHome,
    }
}

/// Load the explicit config file, or discover one from the current directory.
fn load_project(config: Option<&Path>, registry: &ParserRegistry) -> Result<Project> {
    let project = match config {
        Some(path) => Project::load(Config::load_from_file(path)?, registry)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Project::discover(&cwd, registry)?
        }
    };

    tracing::debug!(
        config = %project.config_path.display(),
        locations = project.locations.len(),
        "Loaded project"
    );
    Ok(project)
}

/// Print every command.
fn cmd_list(config: Option<&Path>, registry: &ParserRegistry, format: ListFormat) -> Result<()> {
    let project = load_project(config, registry)?;

    match format {
        ListFormat::Json => {
            let catalog = project.catalog(DisplayStyle::Plain);
            println!("{}", serde_json::to_string_pretty(catalog.entries())?);
        }
        ListFormat::Plain | ListFormat::Bracketed => {
            let style = if format == ListFormat::Plain {
                DisplayStyle::Plain
            } else {
                DisplayStyle::Bracketed
            };
            for line in project.catalog(style).lines() {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// Run the built-in selector.
fn cmd_select(config: Option<&Path>, registry: &ParserRegistry) -> Result<()> {
    let project = load_project(config, registry)?;
    let catalog = project.catalog(DisplayStyle::Bracketed);
    if catalog.is_empty() {
        anyhow::bail!("No commands found in {}", project.config_path.display());
    }

    let theme = Theme::resolve(&project.config.ui.theme);
    let app = App::new(catalog, project.display_names()).with_theme(theme);

    print_selection(&tui::run_tui(app)?)
}

/// Run an external picker over the bracketed lines.
///
/// The picker answers with an entry index, so locations sharing a display
/// name each keep their own directory.
fn cmd_pick(config: Option<&Path>, registry: &ParserRegistry, picker: &str) -> Result<()> {
    let project = load_project(config, registry)?;
    let catalog = project.catalog(DisplayStyle::Bracketed);
    if catalog.is_empty() {
        anyhow::bail!("No commands found in {}", project.config_path.display());
    }

    let index = Picker::new(picker).pick(&catalog.lines())?;
    print_selection(&catalog.entries()[index].selection())
}

/// Resolve a display line from the argument or stdin.
fn cmd_resolve(
    config: Option<&Path>,
    registry: &ParserRegistry,
    line: Option<&str>,
) -> Result<()> {
    let project = load_project(config, registry)?;

    let line = match line {
        Some(line) => line.to_string(),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .lock()
                .read_line(&mut buffer)
                .context("Failed to read selection from stdin")?;
            buffer
        }
    };

    print_selection(&project.resolve_selection(&line)?)
}

fn print_selection(selection: &SelectionResult) -> Result<()> {
    println!("{}", serde_json::to_string(selection)?);
    Ok(())
}

/// List parser names and their detection files.
fn cmd_parsers(registry: &ParserRegistry) -> Result<()> {
    for name in registry.names()? {
        let detect = registry
            .get(&name)?
            .map(|parser| parser.detect_files.join(", "))
            .unwrap_or_default();
        if detect.is_empty() {
            println!("{name}");
        } else {
            println!("{name} ({detect})");
        }
    }
    Ok(())
}

/// Show the config file path, or the resolved locations.
fn cmd_config(config: Option<&Path>, registry: &ParserRegistry, show_path: bool) -> Result<()> {
    if show_path {
        let path = match config {
            Some(path) => path.to_path_buf(),
            None => locrun::core::find_config_file(&std::env::current_dir()?)?,
        };
        println!("{}", path.display());
        return Ok(());
    }

    let project = load_project(config, registry)?;
    println!("# {}", project.config_path.display());
    print!("{}", serde_yaml::to_string(&project.locations)?);
    Ok(())
}

/// Generate shell completions.
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, APP_NAME, &mut io::stdout());
}
