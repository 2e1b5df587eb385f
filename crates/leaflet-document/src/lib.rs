// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// leaflet-document: Document generation for the Leaflet generator.
//
// Provides PNG decoding with hand-written scanline reconstruction, logo
// resampling and compositing, ASCII-safe text layout (wrapping and
// pagination), and a dependency-free PDF 1.4 writer with exact
// cross-reference offsets.

pub mod layout;
pub mod pdf;
pub mod raster;

// Re-export the primary entry points so callers can use
// `leaflet_document::PdfWriter` etc.
pub use pdf::inspect::inspect_pdf;
pub use pdf::writer::{PdfWriter, build_pdf};
pub use raster::{decode_png, prepare_logo};
