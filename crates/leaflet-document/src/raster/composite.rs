// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Alpha compositing onto an opaque white page.

use leaflet_core::types::{DocumentLogo, RGB_CHANNELS, RGBA_CHANNELS, RasterImage};

/// Blend one colour channel over white: `c * a + 255 * (1 - a)`, rounded.
fn over_white(channel: u8, alpha: f64) -> u8 {
    (channel as f64 * alpha + 255.0 * (1.0 - alpha)).round() as u8
}

/// Flatten an image onto white and return tightly packed RGB bytes.
///
/// RGBA is blended and its alpha dropped; RGB passes through. Other channel
/// layouts yield no bytes, which the writer rejects as an inconsistent logo.
pub fn composite_on_white(image: &RasterImage) -> Vec<u8> {
    match image.channels() {
        RGB_CHANNELS => image.pixels().to_vec(),
        RGBA_CHANNELS => {
            let pixel_count = image.width() as usize * image.height() as usize;
            let mut rgb = Vec::with_capacity(pixel_count * 3);
            for px in image.pixels().chunks_exact(RGBA_CHANNELS as usize) {
                let alpha = px[3] as f64 / 255.0;
                rgb.extend(px[..3].iter().map(|&c| over_white(c, alpha)));
            }
            rgb
        }
        _ => Vec::new(),
    }
}

/// Composite `image` onto white and package it for the PDF writer.
pub fn flatten_logo(image: &RasterImage) -> DocumentLogo {
    DocumentLogo {
        width: image.width(),
        height: image.height(),
        rgb_bytes: composite_on_white(image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_pixel(rgba: [u8; 4]) -> RasterImage {
        RasterImage::from_raw(1, 1, 4, rgba.to_vec()).unwrap()
    }

    #[test]
    fn transparent_becomes_white() {
        assert_eq!(composite_on_white(&one_pixel([12, 34, 56, 0])), vec![255, 255, 255]);
    }

    #[test]
    fn opaque_keeps_colour() {
        assert_eq!(composite_on_white(&one_pixel([12, 34, 56, 255])), vec![12, 34, 56]);
    }

    #[test]
    fn half_alpha_blends() {
        // 0 * 128/255 + 255 * 127/255 = 127
        assert_eq!(composite_on_white(&one_pixel([0, 255, 0, 128])), vec![127, 255, 127]);
    }

    #[test]
    fn rgb_passes_through() {
        let rgb = RasterImage::from_raw(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(composite_on_white(&rgb), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn grey_alpha_input_gives_unusable_logo() {
        let grey = RasterImage::from_raw(2, 1, 2, vec![10, 255, 20, 255]).unwrap();
        let logo = flatten_logo(&grey);
        assert!(logo.rgb_bytes.is_empty());
        assert!(!logo.is_consistent());
    }

    #[test]
    fn flatten_logo_keeps_dimensions() {
        let image = RasterImage::from_raw(2, 2, 4, [255, 0, 0, 255].repeat(4)).unwrap();
        let logo = flatten_logo(&image);
        assert_eq!((logo.width, logo.height), (2, 2));
        assert_eq!(logo.rgb_bytes, [255, 0, 0].repeat(4));
        assert!(logo.is_consistent());
    }
}
