// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: object arena, page content streams, the leaflet writer, and a
// structure inspector for produced files.

pub mod content;
pub mod inspect;
pub mod objects;
pub mod writer;

pub use inspect::{XrefReport, inspect_pdf};
pub use objects::{ObjectId, ObjectTable};
pub use writer::{PdfWriter, build_pdf};
