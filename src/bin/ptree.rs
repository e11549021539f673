//! ptree - inspect JSON/YAML documents by path.

use std::fs;
use std::io::{self, Write};
use std::path::{Path as FsPath, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pathtree::value::{self, Value};
use pathtree::{Rule, Tree, ValidationOption};

#[derive(Debug, Parser)]
#[command(name = "ptree", version, about = "Inspect JSON/YAML documents by path")]
struct Cli {
    /// Output location. Use '-' for stdout.
    #[arg(short, long, global = true, default_value = "-")]
    output: String,

    /// Log debug events to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the full path of every leaf
    Keys {
        file: PathBuf,
        /// Prefix every path with this string
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Print the value at a path
    Get { file: PathBuf, path: String },
    /// Write a JSON value at a path and print the updated document
    Set {
        file: PathBuf,
        path: String,
        /// JSON literal, e.g. 3, "text" or {"a": 1}
        value: String,
    },
    /// Print every leaf as a single-level map
    Flatten { file: PathBuf },
    /// Compare the leaves of two documents
    Equal { lhs: PathBuf, rhs: PathBuf },
    /// Check that paths are present
    Require {
        file: PathBuf,
        /// Paths that must be present
        paths: Vec<String>,
        /// Paths that may be absent
        #[arg(long)]
        optional: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pathtree=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs a command. `Ok(false)` means the command completed with a negative
/// answer (unequal documents, missing paths).
///
/// Output is buffered and the `-o` target is only opened once every input
/// has been read, so a command may write back over its own input file.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    let answer = execute(cli.command, &mut buffer)?;

    if cli.output == "-" {
        io::stdout().write_all(&buffer)?;
    } else {
        fs::write(&cli.output, &buffer)
            .map_err(|e| format!("Failed to write output file {:?}: {}", cli.output, e))?;
    }
    Ok(answer)
}

fn execute(command: Command, output: &mut dyn Write) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Command::Keys { file, prefix } => {
            let tree = load(&file)?;
            let keys = match prefix {
                Some(prefix) => tree.prefixed_keys(&prefix),
                None => tree.keys(),
            };
            for key in keys {
                writeln!(output, "{}", key)?;
            }
            Ok(true)
        }
        Command::Get { file, path } => {
            let tree = load(&file)?;
            match tree.get(path.as_str()) {
                Some(found) => {
                    writeln!(output, "{}", value::to_json_pretty(found)?)?;
                    Ok(true)
                }
                None => {
                    eprintln!("{}: not found", path);
                    Ok(false)
                }
            }
        }
        Command::Set { file, path, value: raw } => {
            let mut tree = load(&file)?;
            let parsed: Value = value::from_json(&raw)
                .map_err(|e| format!("Failed to parse value {:?}: {}", raw, e))?;
            tree.set(path.as_str(), parsed)?;
            write_document(&file, tree.root(), output)?;
            Ok(true)
        }
        Command::Flatten { file } => {
            let tree = load(&file)?;
            let flat = Value::Map(tree.flatten());
            write_document(&file, &flat, output)?;
            Ok(true)
        }
        Command::Equal { lhs, rhs } => {
            let left = load(&lhs)?;
            let right = load(&rhs)?;
            let same = left.equal(right.root());
            writeln!(output, "{}", if same { "equal" } else { "different" })?;
            Ok(same)
        }
        Command::Require {
            file,
            paths,
            optional,
        } => {
            let tree = load(&file)?;
            let rules: Vec<Rule> = paths
                .iter()
                .map(|p| Rule::new(p.as_str()))
                .chain(optional.iter().map(|p| Rule::new(p.as_str()).optional()))
                .collect();
            match tree.first_violation(&rules, &[ValidationOption::SkipAbsentOptional])? {
                None => {
                    writeln!(output, "ok")?;
                    Ok(true)
                }
                Some(violation) => {
                    writeln!(output, "{}", violation)?;
                    Ok(false)
                }
            }
        }
    }
}

fn is_yaml(file: &FsPath) -> bool {
    matches!(
        file.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn load(file: &FsPath) -> Result<Tree, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file)
        .map_err(|e| format!("Failed to read file {:?}: {}", file, e))?;
    let tree = if is_yaml(file) {
        Tree::from_yaml(&content)
    } else {
        Tree::from_json(&content)
    };
    Ok(tree.map_err(|e| format!("Failed to load {:?}: {}", file, e))?)
}

fn write_document(
    like: &FsPath,
    doc: &Value,
    output: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    if is_yaml(like) {
        write!(output, "{}", value::to_yaml(doc)?)?;
    } else {
        writeln!(output, "{}", value::to_json_pretty(doc)?)?;
    }
    Ok(())
}
