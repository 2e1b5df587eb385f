// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Leaflet pipeline.

use serde::{Deserialize, Serialize};

/// Channels per pixel of a decoded PNG (RGBA, 8 bits each).
pub const RGBA_CHANNELS: u8 = 4;
/// Channels per pixel after compositing onto white (RGB).
pub const RGB_CHANNELS: u8 = 3;

/// An 8-bit-per-channel raster held in row-major order.
///
/// The pixel buffer always holds exactly `width * height * channels` bytes.
/// Each pipeline stage produces a fresh image rather than editing one in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wrap a pixel buffer, returning `None` when its length does not match
    /// the declared dimensions.
    pub fn from_raw(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(channels as usize)?;
        if channels == 0 || pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Borrow the raw pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image and return its pixel bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Bytes in one row of pixels.
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }
}

/// The final logo, flattened to RGB and ready for embedding as an image
/// XObject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLogo {
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Raw RGB bytes, row-major, `width * height * 3` long.
    pub rgb_bytes: Vec<u8>,
}

impl DocumentLogo {
    /// Whether the byte buffer agrees with the declared dimensions.
    pub fn is_consistent(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.rgb_bytes.len()
                == self.width as usize * self.height as usize * RGB_CHANNELS as usize
    }
}

/// Everything needed to build one leaflet.
///
/// The logo is borrowed so that a single prepared logo can back any number of
/// builds, including concurrent ones.
#[derive(Debug, Clone)]
pub struct DocumentSpec<'a> {
    /// Heading printed under the logo on every page.
    pub title: String,
    /// Body paragraphs, one entry per source line, in order.
    pub lines: Vec<String>,
    /// Logo shown at the top of every page.
    pub logo: &'a DocumentLogo,
}

impl<'a> DocumentSpec<'a> {
    pub fn new(title: impl Into<String>, lines: Vec<String>, logo: &'a DocumentLogo) -> Self {
        Self {
            title: title.into(),
            lines,
            logo,
        }
    }
}
