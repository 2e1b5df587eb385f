// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module: ASCII normalisation, word wrapping, pagination, and page
// geometry.

pub mod geometry;
pub mod normalize;
pub mod paginate;
pub mod wrap;

pub use geometry::PageGeometry;
pub use normalize::normalize_ascii;
pub use paginate::paginate;
pub use wrap::{wrap_line, wrap_lines};
