// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Manifest: the JSON list of leaflets to generate in one run.

use std::collections::HashSet;
use std::path::Path;

use leaflet_core::config::{LayoutConfig, RenderConfig};
use leaflet_core::error::{LeafletError, Result};
use serde::{Deserialize, Serialize};

/// Top-level manifest document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub documents: Vec<ManifestEntry>,
    /// Layout override for every document; defaults apply when absent.
    #[serde(default)]
    pub layout: Option<LayoutConfig>,
    /// Pixel width the logo is downscaled to before embedding.
    #[serde(default)]
    pub logo_width: Option<u32>,
}

/// One leaflet to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub title: String,
    #[serde(default)]
    pub lines: Vec<String>,
    /// Output file name; derived from the title when absent.
    #[serde(default)]
    pub filename: Option<String>,
}

impl Manifest {
    /// Parse a manifest and check that its output names are usable.
    pub fn from_json(text: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(text)?;
        manifest.check_filenames()?;
        Ok(manifest)
    }

    /// Merge CLI flags over the manifest's own settings.
    ///
    /// A `--logo-width` flag wins over the manifest's `logo_width`.
    pub fn render_config(&self, logo_width_flag: Option<u32>, verify: bool) -> RenderConfig {
        let defaults = RenderConfig::default();
        RenderConfig {
            logo_pixel_width: logo_width_flag
                .or(self.logo_width)
                .unwrap_or(defaults.logo_pixel_width),
            verify_output: verify,
            layout: self.layout.clone().unwrap_or_default(),
        }
    }

    fn check_filenames(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.documents.len());
        for entry in &self.documents {
            let name = entry.output_name();
            let plain = Path::new(&name).file_name().is_some_and(|f| f == name.as_str());
            if !plain {
                return Err(LeafletError::InvalidManifest(format!(
                    "output name {name:?} must be a plain file name"
                )));
            }
            if !seen.insert(name.clone()) {
                return Err(LeafletError::InvalidManifest(format!(
                    "two documents would both be written to {name:?}"
                )));
            }
        }
        Ok(())
    }
}

impl ManifestEntry {
    /// The file name this entry is written to.
    pub fn output_name(&self) -> String {
        if let Some(name) = &self.filename {
            return name.clone();
        }
        let stem = match slug(&self.title) {
            s if s.is_empty() => slug(&LayoutConfig::default().fallback_title),
            s => s,
        };
        format!("{stem}.pdf")
    }
}

/// Lowercase, collapse every run of characters outside `[a-z0-9]` into a
/// single `-`, and trim `-` from both ends.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}
