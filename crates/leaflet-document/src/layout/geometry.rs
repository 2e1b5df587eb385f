// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page geometry derived from the layout configuration and the logo's aspect
// ratio.

use std::num::NonZeroUsize;

use leaflet_core::config::LayoutConfig;
use leaflet_core::error::{LeafletError, Result};

/// Positions shared by every page of one document, in PDF user units with the
/// origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    /// Displayed logo width.
    pub logo_width: u32,
    /// Displayed logo height, from the source aspect ratio.
    pub logo_height: u32,
    /// Bottom-left corner of the logo.
    pub logo_x: i64,
    pub logo_y: i64,
    /// Title baseline.
    pub title_y: i64,
    /// First body baseline.
    pub body_y: i64,
    /// Body lines that fit between `body_y` and the bottom margin.
    pub lines_per_page: NonZeroUsize,
}

impl PageGeometry {
    /// Lay out a page for a logo of `pixel_width` x `pixel_height`.
    ///
    /// Fails with `LayoutOverflow` when not even one body line fits.
    pub fn compute(layout: &LayoutConfig, pixel_width: u32, pixel_height: u32) -> Result<Self> {
        let logo_width = layout.logo_width;
        let logo_height = scaled_height(logo_width, pixel_width, pixel_height);

        let logo_x = layout.margin_x as i64;
        let logo_y = layout.page_height as i64 - layout.margin_top as i64 - logo_height as i64;
        let title_y = logo_y - layout.title_gap as i64;
        let body_y = title_y - layout.body_gap as i64;

        let available = body_y - layout.margin_bottom as i64;
        let line_height = layout.body_line_height;
        let lines = if line_height == 0 || available < 0 {
            0
        } else {
            (available / line_height as i64) as usize
        };
        let lines_per_page = NonZeroUsize::new(lines).ok_or(LeafletError::LayoutOverflow {
            available,
            line_height,
        })?;

        Ok(Self {
            logo_width,
            logo_height,
            logo_x,
            logo_y,
            title_y,
            body_y,
            lines_per_page,
        })
    }
}

/// `round(display_width * pixel_height / pixel_width)`, at least 1.
fn scaled_height(display_width: u32, pixel_width: u32, pixel_height: u32) -> u32 {
    let w = pixel_width.max(1) as u64;
    let scaled = (2 * display_width as u64 * pixel_height as u64 + w) / (2 * w);
    scaled.clamp(1, u32::MAX as u64) as u32
}
