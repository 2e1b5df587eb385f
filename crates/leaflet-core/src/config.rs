// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout and render configuration.

use serde::{Deserialize, Serialize};

/// Page geometry and typography for generated leaflets.
///
/// All distances are PDF user units (1/72 inch). The defaults reproduce the
/// published leaflets exactly; changing any of them changes output bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Page width (US Letter).
    pub page_width: u32,
    /// Page height (US Letter).
    pub page_height: u32,
    /// Left margin; also the x position of the logo, title and body.
    pub margin_x: u32,
    /// Distance from the top edge to the top of the logo.
    pub margin_top: u32,
    /// Body text never descends below this distance from the bottom edge.
    pub margin_bottom: u32,
    /// Title font size (Helvetica-Bold).
    pub title_font_size: u32,
    /// Body font size (Helvetica).
    pub body_font_size: u32,
    /// Vertical advance between body lines.
    pub body_line_height: u32,
    /// Displayed logo width; height follows the source aspect ratio.
    pub logo_width: u32,
    /// Gap between the bottom of the logo and the title baseline.
    pub title_gap: u32,
    /// Gap between the title baseline and the first body baseline.
    pub body_gap: u32,
    /// Maximum characters per wrapped body line.
    pub wrap_width: usize,
    /// Title used when the supplied one is blank after normalisation.
    pub fallback_title: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 612,
            page_height: 792,
            margin_x: 54,
            margin_top: 54,
            margin_bottom: 54,
            title_font_size: 18,
            body_font_size: 11,
            body_line_height: 14,
            logo_width: 160,
            title_gap: 18,
            body_gap: 26,
            wrap_width: 90,
            fallback_title: "Resource".into(),
        }
    }
}

/// Settings for a generation run as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixel width the source logo is downscaled to before embedding.
    pub logo_pixel_width: u32,
    /// Re-parse every produced file and check its cross-reference offsets.
    pub verify_output: bool,
    /// Layout applied to every document in the run.
    pub layout: LayoutConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            logo_pixel_width: 320,
            verify_output: false,
            layout: LayoutConfig::default(),
        }
    }
}
