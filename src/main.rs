//! dirscribe - Turn indented text into directory trees, and back.
//!
//! Usage:
//!   dirscribe build STRUCTURE_FILE     Create directories and files from a structure file
//!   dirscribe tree [PATH]              Print the structure of a directory
//!   dirscribe files [PATH]             List files a content reader should process
//!   dirscribe --help                   Show help

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use itertools::Itertools;
use tracing_subscriber::EnvFilter;

use dirscribe_build::{BuildConfig, TreeBuilder};
use dirscribe_core::{DEFAULT_INDENT_UNIT, ExclusionRules, WalkConfig};
use dirscribe_walk::{IncludedFile, TreeWalker, encode};

#[derive(Parser)]
#[command(
    name = "dirscribe",
    version,
    about = "Turn indented text into directory trees, and directory trees into indented text",
    long_about = "dirscribe reads a structure file where indentation marks nesting and a \
                  trailing '/' marks a directory, and creates that tree on disk. It can also \
                  walk an existing directory and print it in the same format."
)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a directory and file structure from a structure file
    Build {
        /// Path to the structure file
        structure_file: PathBuf,

        /// Number of spaces per indentation level
        #[arg(long, default_value_t = DEFAULT_INDENT_UNIT, value_parser = parse_indent)]
        indent_size: usize,

        /// Directory to create the structure in (defaults to current directory)
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Print the directory structure of a path
    Tree {
        /// Root directory to describe
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        walk: WalkArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the files a content reader should process
    Files {
        /// Root directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        walk: WalkArgs,

        /// Only list files judged to hold text
        #[arg(long)]
        text_only: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct WalkArgs {
    /// Directory names to skip. Overrides the defaults.
    #[arg(long, num_args = 0..)]
    exclude_dirs: Option<Vec<String>>,

    /// File suffixes to skip, e.g. ".log". Overrides the defaults.
    #[arg(long, num_args = 0..)]
    exclude_types: Option<Vec<String>>,

    /// Number of spaces per indentation level
    #[arg(long, default_value_t = DEFAULT_INDENT_UNIT, value_parser = parse_indent)]
    indent_size: usize,

    /// Sort entries by name instead of using directory order
    #[arg(short, long)]
    sort: bool,
}

impl WalkArgs {
    fn into_config(self, root: PathBuf) -> Result<WalkConfig> {
        let mut exclusions = ExclusionRules::default();
        if let Some(dirs) = self.exclude_dirs {
            exclusions = exclusions.with_excluded_dirs(dirs);
        }
        if let Some(types) = self.exclude_types {
            exclusions = exclusions.with_excluded_extensions(types);
        }

        // Resolve "." and friends so the root line has a real name
        let root = root.canonicalize().unwrap_or(root);

        WalkConfig::builder()
            .root(root)
            .indent_unit(self.indent_size)
            .exclusions(exclusions)
            .sort_entries(self.sort)
            .build()
            .wrap_err("Invalid walk configuration")
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Build {
            structure_file,
            indent_size,
            output_dir,
        } => {
            run_build(&structure_file, indent_size, output_dir)?;
        }
        Command::Tree {
            path,
            walk,
            format,
            output,
        } => {
            run_tree(walk.into_config(path)?, format, output)?;
        }
        Command::Files {
            path,
            walk,
            text_only,
            format,
        } => {
            run_files(walk.into_config(path)?, text_only, format)?;
        }
    }

    Ok(())
}

/// Log to stderr without timestamps; `RUST_LOG` wins over the flags.
fn setup_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

/// Materialize a structure file.
fn run_build(structure_file: &Path, indent_size: usize, output_dir: PathBuf) -> Result<()> {
    let config = BuildConfig::builder()
        .output_root(output_dir)
        .indent_unit(indent_size)
        .build()
        .wrap_err("Invalid build configuration")?;

    let report = TreeBuilder::new()
        .build_from_file(structure_file, &config)
        .wrap_err_with(|| format!("Failed to build {}", structure_file.display()))?;

    let materialized = &report.materialized;
    eprintln!();
    eprintln!(
        " {} directories, {} files created, {} files left unchanged",
        materialized.dirs_ensured, materialized.files_created, materialized.files_preserved
    );

    let warnings = report.warnings().count();
    if warnings > 0 {
        eprintln!(" {warnings} warning(s), see log above");
    }
    eprintln!(
        " Project structure created in {}",
        config.output_root.display()
    );

    Ok(())
}

/// Walk a directory and print its structure.
fn run_tree(config: WalkConfig, format: OutputFormat, output: Option<PathBuf>) -> Result<()> {
    let tree = TreeWalker::new()
        .walk(&config)
        .wrap_err("Walk failed")?;

    let rendered = match format {
        OutputFormat::Text => {
            let mut text = String::from("Project Directory Structure:\n");
            for line in encode(&tree.root, config.indent_unit) {
                text.push_str(&line);
                text.push('\n');
            }
            text
        }
        OutputFormat::Json => serde_json::to_string_pretty(&tree)?,
    };

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, rendered)
                .wrap_err_with(|| format!("Failed to write {}", output_path.display()))?;
            eprintln!("Results written to {}", output_path.display());
        }
        None => print!("{rendered}"),
    }

    print_exclusions(&config.exclusions);
    Ok(())
}

/// Walk a directory and list the files a content reader should process.
fn run_files(config: WalkConfig, text_only: bool, format: OutputFormat) -> Result<()> {
    let walker = TreeWalker::new();
    let files = walker
        .included_files(&config)
        .wrap_err("Walk failed")?
        .filter(|f| !text_only || f.text_eligible);

    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Text => {
            for file in files {
                let marker = if file.text_eligible { "text" } else { "skip" };
                writeln!(stdout, "{marker}  {}", file.path.display())?;
            }
        }
        OutputFormat::Json => {
            let files: Vec<IncludedFile> = files.collect();
            writeln!(stdout, "{}", serde_json::to_string_pretty(&files)?)?;
        }
    }

    Ok(())
}

fn print_exclusions(rules: &ExclusionRules) {
    eprintln!(
        "Excluded directories: {}",
        rules.excluded_dirs.iter().join(", ")
    );
    eprintln!(
        "Excluded file types: {}",
        rules.excluded_extensions.iter().join(", ")
    );
}

/// Parse a positive indentation width.
fn parse_indent(s: &str) -> std::result::Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("indent size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indent() {
        assert_eq!(parse_indent("4"), Ok(4));
        assert!(parse_indent("0").is_err());
        assert!(parse_indent("-1").is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exclusion_flags_override() {
        let cli = Cli::parse_from(["dirscribe", "tree", "/tmp", "--exclude-dirs", "target"]);
        let Command::Tree { walk, .. } = cli.command else {
            panic!("expected tree command");
        };
        assert_eq!(walk.exclude_dirs, Some(vec!["target".to_string()]));
        assert_eq!(walk.exclude_types, None);

        let cli = Cli::parse_from(["dirscribe", "files", "--exclude-types"]);
        let Command::Files { walk, .. } = cli.command else {
            panic!("expected files command");
        };
        assert_eq!(walk.exclude_types, Some(Vec::new()));
    }
}
