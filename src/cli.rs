use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use crate::model::Dimension;
use crate::pattern::{DISABLED, preset, preset_keys};
use crate::runtime::AppContext;
use crate::workflow::save_report;

#[derive(Debug, Parser)]
#[command(
    name = "planestack",
    version,
    about = "Reassembles Z/C/T image volumes from collections of named 2D planes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Computes the output layout for a plane directory without assembling.
    Info {
        input: PathBuf,
        #[arg(long)]
        recipe: Option<PathBuf>,
    },
    /// Assembles one volume (or one per group) from a plane directory.
    Combine {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        recipe: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    Patterns {
        #[command(subcommand)]
        command: PatternsCommand,
    },
}

#[derive(Debug, Subcommand)]
enum PatternsCommand {
    List,
}

#[derive(Debug, Serialize)]
struct PresetInfo {
    dimension: String,
    key: &'static str,
    pattern: &'static str,
}

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let app = AppContext::new();

    match cli.command {
        Commands::Info { input, recipe } => {
            let spec = match recipe {
                Some(path) => app
                    .combine_service()
                    .load_spec(&path)
                    .map_err(|error| error.to_string())?,
                None => Default::default(),
            };
            let info = app
                .combine_service()
                .inspect_dir(&input, &spec)
                .map_err(|error| error.to_string())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&info).map_err(|error| error.to_string())?
            );
        }
        Commands::Combine {
            input,
            recipe,
            output,
            report,
        } => {
            let spec = app
                .combine_service()
                .load_spec(&recipe)
                .map_err(|error| error.to_string())?;
            let reports = app
                .combine_service()
                .run_dir(&input, &spec, &output)
                .map_err(|error| error.to_string())?;
            if let Some(report_path) = report {
                save_report(report_path, &reports).map_err(|error| error.to_string())?;
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&reports).map_err(|error| error.to_string())?
            );
        }
        Commands::Patterns { command } => match command {
            PatternsCommand::List => {
                let mut presets = Vec::new();
                for dimension in [Dimension::Channel, Dimension::Z, Dimension::Time] {
                    for key in preset_keys(dimension) {
                        presets.push(PresetInfo {
                            dimension: dimension.to_string(),
                            key,
                            pattern: preset(dimension, key).unwrap_or(DISABLED),
                        });
                    }
                }
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "disabled": DISABLED,
                        "presets": presets,
                    }))
                    .map_err(|error| error.to_string())?
                );
            }
        },
    }

    Ok(())
}
