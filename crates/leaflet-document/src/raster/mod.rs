// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module: PNG decoding, nearest-neighbour resampling, and compositing
// onto white. The three stages run once per logo; the result is shared
// read-only by every document built afterwards.

pub mod composite;
pub mod decoder;
pub mod filter;
pub mod resample;

use leaflet_core::error::Result;
use leaflet_core::types::DocumentLogo;
use tracing::{info, instrument};

pub use composite::{composite_on_white, flatten_logo};
pub use decoder::decode_png;
pub use resample::resample;

/// Decode a PNG logo, shrink it to `pixel_width` and flatten it onto white.
#[instrument(skip(png_bytes), fields(bytes_len = png_bytes.len()))]
pub fn prepare_logo(png_bytes: &[u8], pixel_width: u32) -> Result<DocumentLogo> {
    let decoded = decode_png(png_bytes)?;
    let resized = resample(decoded, pixel_width);
    let logo = flatten_logo(&resized);
    info!(
        width = logo.width,
        height = logo.height,
        rgb_bytes = logo.rgb_bytes.len(),
        "Logo prepared"
    );
    Ok(logo)
}
