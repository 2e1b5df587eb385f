// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Leaflet: offline generator for printable resource leaflets
//
// Entry point. Initialises logging, parses arguments, and runs one batch:
// a PNG logo and a JSON manifest in, one PDF per manifest entry out.

mod generate;
mod integrity;
mod manifest;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use leaflet_core::LeafletError;
use leaflet_core::human_errors::describe_error;

use generate::RunOptions;

/// Generate printable resource leaflets from a logo and a manifest.
#[derive(Parser, Debug)]
#[command(name = "leaflet")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// PNG logo (8-bit RGBA, non-interlaced)
    #[arg(long)]
    logo: PathBuf,

    /// JSON manifest listing the documents to generate
    #[arg(long)]
    manifest: PathBuf,

    /// Output directory, created if missing
    #[arg(long)]
    out: PathBuf,

    /// Pixel width the logo is downscaled to (overrides the manifest)
    #[arg(long = "logo-width", value_parser = clap::value_parser!(u32).range(1..))]
    logo_width: Option<u32>,

    /// Re-read every produced PDF and check its cross-reference table
    #[arg(long)]
    verify: bool,

    /// Number of worker threads (defaults to one per CPU)
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u64).range(1..))]
    jobs: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!("Leaflet starting");

    let options = RunOptions {
        logo: args.logo,
        manifest: args.manifest,
        out_dir: args.out,
        logo_width: args.logo_width,
        verify: args.verify,
        jobs: args.jobs.map(|n| n as usize),
    };

    match generate::run(&options) {
        Ok(written) => {
            tracing::info!(count = written.len(), "Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = format!("{err:#}"), "generation failed");
            match err.downcast_ref::<LeafletError>() {
                Some(leaflet_err) => eprintln!("{}", describe_error(leaflet_err)),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
