//! imcortex - load brain data files from the command line
//!
//! Loads a spec file, a scene or single data files into a brain and prints
//! what ended up loaded: files, brain structures, models and any problems.

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use imcortex_core::{Brain, CortexPreferences, ProgressMonitor, ReloadAllMode};
use imcortex_io::{DataFileType, ReadContext, Structure};

use report::Inventory;

#[derive(Parser)]
#[command(name = "imcortex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Load spec files and scenes and report the loaded brain")]
struct Cli {
    /// Preferences file [default: <config dir>/imcortex/preferences.toml]
    #[arg(long, global = true, value_name = "FILE")]
    preferences: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the files selected in a spec file
    Spec {
        /// Spec file
        path: String,
    },
    /// Restore a scene from a scene file
    Scene {
        /// Scene file
        scene_file: String,
        /// Name of the scene
        #[arg(short, long)]
        name: String,
    },
    /// Read data files one after another
    Read {
        /// Files to read; the type comes from the extension
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,
        /// Structure assigned to surface-mapped files, e.g. CORTEX_LEFT
        #[arg(short, long)]
        structure: Option<String>,
    },
    /// List the files of a spec file that can be reloaded
    Reloadable {
        /// Spec file
        path: String,
    },
}

/// Logs progress of batch loads
struct LogProgress;

impl ProgressMonitor for LogProgress {
    fn is_cancelled(&self) -> bool {
        false
    }

    fn progress(&mut self, done: usize, total: usize, current: &str) {
        if !current.is_empty() {
            tracing::debug!("[{}/{}] {}", done + 1, total, current);
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns Ok(false) when the brain loaded with problems
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let preferences = match &cli.preferences {
        Some(path) => CortexPreferences::load(path)?,
        None => CortexPreferences::load_default()?,
    };
    let mut brain = Brain::new(preferences);
    let ctx = ReadContext::default();

    let problems = match cli.command {
        Command::Spec { path } => match brain.load_spec_file(&path, &ctx, &mut LogProgress) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.lines(),
        },
        Command::Scene { scene_file, name } => {
            let id = brain.read_data_file(DataFileType::Scene, Structure::Invalid, &scene_file, false, &ctx)?;
            let attributes = brain.restore_scene(id, &name, &ctx)?;
            attributes.error_messages().to_vec()
        }
        Command::Read { paths, structure } => {
            let structure = match structure {
                Some(name) => Structure::from_name(&name).ok_or_else(|| format!("Unknown structure {name}"))?,
                None => Structure::Invalid,
            };
            let mut problems = Vec::new();
            for path in paths {
                let file_type = DataFileType::from_file_name(&path);
                if let Err(e) = brain.read_data_file(file_type, structure, &path, false, &ctx) {
                    problems.push(e.to_string());
                }
            }
            problems
        }
        Command::Reloadable { path } => {
            let problems = match brain.load_spec_file(&path, &ctx, &mut LogProgress) {
                Ok(()) => Vec::new(),
                Err(errors) => errors.lines(),
            };
            let names = brain
                .reload_all_files(ReloadAllMode::Enumerate, &ctx)
                .map_err(|e| e.to_string())?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for name in &names {
                    println!("{name}");
                }
            }
            return Ok(problems.is_empty());
        }
    };

    let inventory = Inventory::of(&brain, problems);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&inventory)?);
    } else {
        inventory.print();
    }
    Ok(inventory.problems.is_empty())
}
