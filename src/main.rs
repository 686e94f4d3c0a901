//! skillpack builder CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use skillpack::config::Config;
use skillpack::pipeline::Pipeline;
use std::path::PathBuf;
use std::process::ExitCode;

/// Skill packaging toolkit: validate skill folders and bundle each one
/// into a single AGENTS.md artifact.
#[derive(Parser, Debug)]
#[command(name = "skillpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to skillpack.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the skills root directory
    #[arg(long, global = true, env = "SKILLPACK_SKILLS_DIR")]
    skills_dir: Option<PathBuf>,

    /// Override the distribution directory
    #[arg(long, global = true, env = "SKILLPACK_DIST_DIR")]
    dist_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate all skills and write their artifacts to the distribution directory
    Build,
    /// Check every skill folder's manifest without writing anything
    Validate,
    /// Write each skill's artifact in place, next to its manifest
    Compile,
    /// Remove generated AGENTS.md artifacts
    Clean,
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(skills_dir) = cli.skills_dir {
        config.skills_dir = skills_dir;
    }
    if let Some(dist_dir) = cli.dist_dir {
        config.dist_dir = dist_dir;
    }

    let pipeline = Pipeline::new(config);
    match cli.command {
        // build and compile keep going past bad folders; only a missing
        // skills root makes them fail the process.
        Commands::Build => {
            pipeline.build()?;
            Ok(true)
        }
        Commands::Validate => Ok(pipeline.validate()?.all_passed()),
        Commands::Compile => {
            pipeline.compile()?;
            Ok(true)
        }
        Commands::Clean => {
            pipeline.clean()?;
            Ok(true)
        }
    }
}
