// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch generation: one prepared logo, many leaflets built in parallel, then
// written to the output directory with a fingerprint per file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use leaflet_core::config::RenderConfig;
use leaflet_core::error::{LeafletError, Result};
use leaflet_core::types::{DocumentLogo, DocumentSpec};
use leaflet_document::{PdfWriter, inspect_pdf, prepare_logo};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::integrity::fingerprint;
use crate::manifest::{Manifest, ManifestEntry};

/// Inputs for one generator run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub logo: PathBuf,
    pub manifest: PathBuf,
    pub out_dir: PathBuf,
    /// Overrides the manifest's `logo_width`.
    pub logo_width: Option<u32>,
    pub verify: bool,
    /// Worker threads; rayon's global pool when `None`.
    pub jobs: Option<usize>,
}

/// A leaflet held in memory before it is written.
#[derive(Debug, Clone)]
pub struct Leaflet {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A leaflet on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenLeaflet {
    pub path: PathBuf,
    pub bytes_len: usize,
    pub sha256: String,
}

/// Read inputs, build every leaflet and write them out.
pub fn run(options: &RunOptions) -> anyhow::Result<Vec<WrittenLeaflet>> {
    let manifest_text = fs::read_to_string(&options.manifest)
        .map_err(LeafletError::from)
        .with_context(|| format!("reading manifest {}", options.manifest.display()))?;
    let manifest = Manifest::from_json(&manifest_text)
        .with_context(|| format!("parsing manifest {}", options.manifest.display()))?;
    let config = manifest.render_config(options.logo_width, options.verify);

    let png = fs::read(&options.logo)
        .map_err(LeafletError::from)
        .with_context(|| format!("reading logo {}", options.logo.display()))?;
    let logo = prepare_logo(&png, config.logo_pixel_width)
        .with_context(|| format!("preparing logo {}", options.logo.display()))?;

    let leaflets = match options.jobs {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("starting worker pool")?
            .install(|| build_all(&manifest.documents, &logo, &config))?,
        None => build_all(&manifest.documents, &logo, &config)?,
    };

    let written = write_all(&options.out_dir, &leaflets)
        .with_context(|| format!("writing to {}", options.out_dir.display()))?;
    Ok(written)
}

/// Build every manifest entry against the shared logo.
///
/// Builds run on the current rayon pool; the first failure is returned and
/// nothing is written.
#[instrument(skip_all, fields(documents = entries.len(), verify = config.verify_output))]
pub fn build_all(
    entries: &[ManifestEntry],
    logo: &DocumentLogo,
    config: &RenderConfig,
) -> Result<Vec<Leaflet>> {
    let writer = PdfWriter::new(config.layout.clone());

    let leaflets = entries
        .par_iter()
        .map(|entry| {
            let spec = DocumentSpec::new(entry.title.clone(), entry.lines.clone(), logo);
            let bytes = writer.build(&spec)?;
            if config.verify_output {
                let report = inspect_pdf(&bytes)?;
                debug!(
                    title = %entry.title,
                    objects = report.object_count,
                    "Output structure verified"
                );
            }
            Ok(Leaflet {
                filename: entry.output_name(),
                bytes,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(count = leaflets.len(), "Leaflets built");
    Ok(leaflets)
}

/// Create `out_dir` if needed and write each leaflet into it.
pub fn write_all(out_dir: &Path, leaflets: &[Leaflet]) -> Result<Vec<WrittenLeaflet>> {
    fs::create_dir_all(out_dir)?;

    leaflets
        .iter()
        .map(|leaflet| {
            let path = out_dir.join(&leaflet.filename);
            fs::write(&path, &leaflet.bytes)?;
            let sha256 = fingerprint(&leaflet.bytes);
            info!(
                path = %path.display(),
                bytes = leaflet.bytes.len(),
                sha256 = %sha256,
                "Leaflet written"
            );
            Ok(WrittenLeaflet {
                path,
                bytes_len: leaflet.bytes.len(),
                sha256,
            })
        })
        .collect()
}
