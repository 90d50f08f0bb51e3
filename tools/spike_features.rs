//! Spike Dependence Feature Tool
//!
//! Configuration-driven tool that loads two spike trains, builds the primary
//! and secondary feature matrices for each configured reference label, and
//! exports them as NumPy arrays.
//!
//! # Output Format
//!
//! - `{prefix}_{X|Y}ref_primary.npy` - Shape `[tau, n_points]`
//! - `{prefix}_{X|Y}ref_secondary.npy` - Shape `[tau, n_points]`
//! - `{prefix}_{X|Y}ref_metadata.json`
//!
//! # Usage
//!
//! ```bash
//! # Run from a TOML config
//! cargo run --release --bin spike_features -- --config configs/session.toml --output out/
//!
//! # Generate sample config
//! cargo run --release --bin spike_features -- --generate-config session.toml
//! ```
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` for per-run detail.

use spike_dependence::{
    ExperimentMetadata, Label, NumpyExporter, Pipeline, PipelineConfig, Result,
};
use std::path::{Path, PathBuf};

const DEFAULT_OUTPUT_DIR: &str = "output";

/// Main entry point for the feature tool
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "--config" => {
            let Some(config_path) = args.get(2) else {
                eprintln!("Error: --config requires a path argument");
                std::process::exit(1);
            };
            let output_dir = match args.get(3).map(String::as_str) {
                Some("--output") => match args.get(4) {
                    Some(dir) => PathBuf::from(dir),
                    None => {
                        eprintln!("Error: --output requires a directory argument");
                        std::process::exit(1);
                    }
                },
                Some(other) => {
                    eprintln!("Unknown argument: {other}");
                    std::process::exit(1);
                }
                None => PathBuf::from(DEFAULT_OUTPUT_DIR),
            };
            run_from_config(Path::new(config_path), &output_dir)
        }
        "--generate-config" => {
            let Some(path) = args.get(2) else {
                eprintln!("Error: --generate-config requires a path argument");
                std::process::exit(1);
            };
            generate_sample_config(Path::new(path))
        }
        "--help" | "-h" => {
            print_usage(&args[0]);
            Ok(())
        }
        other => {
            eprintln!("Unknown argument: {other}");
            print_usage(&args[0]);
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn print_usage(program: &str) {
    eprintln!(
        r#"
Spike Dependence Feature Tool

Usage:
    {program} --config <path.toml> [--output <dir>]   Build and export feature matrices
    {program} --generate-config <path>                Generate sample config file
    {program} --help                                  Show this help

Default output directory: {DEFAULT_OUTPUT_DIR}
"#
    );
}

/// Generate a sample configuration file
fn generate_sample_config(path: &Path) -> Result<()> {
    let mut metadata = ExperimentMetadata::new("spike_dependence");
    metadata.description = Some("Lag features for an X/Y spike-train pair".to_string());

    let config = PipelineConfig::default()
        .with_tau(3)
        .with_reference_labels(vec![Label::Primary, Label::Secondary])
        .with_input("data/x_spikes.txt", "data/y_spikes.txt")
        .with_metadata(metadata);

    config.save_toml(path)?;
    println!("Sample config written to {}", path.display());
    Ok(())
}

fn run_from_config(config_path: &Path, output_dir: &Path) -> Result<()> {
    let config = PipelineConfig::load_toml(config_path)?;
    let prefix = config
        .metadata
        .as_ref()
        .map(|m| m.name.clone())
        .unwrap_or_else(|| "spikes".to_string());

    let pipeline = Pipeline::from_config(config)?;
    let output = pipeline.process()?;

    println!(
        "Merged {} spikes ({} X, {} Y), tau = {}",
        output.n_spikes, output.n_x, output.n_y, output.tau
    );

    let exporter = NumpyExporter::new(output_dir);
    for result in exporter.export_output(&prefix, &output)? {
        println!(
            "  {}ref: {} points -> {}",
            result.ref_label,
            result.n_points,
            result.primary_path.display()
        );
    }

    Ok(())
}
