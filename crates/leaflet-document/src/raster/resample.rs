// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Nearest-neighbour downscaling.

use leaflet_core::types::RasterImage;
use tracing::debug;

/// Downscale `image` to `target_width` pixels wide, preserving aspect ratio.
///
/// Never upscales: a target at or above the current width returns the input
/// untouched. Each destination pixel copies the source pixel at
/// `(floor(x * w / tw), floor(y * h / th))`, so output is fully deterministic.
pub fn resample(image: RasterImage, target_width: u32) -> RasterImage {
    let target_width = target_width.max(1);
    if target_width >= image.width() {
        return image;
    }

    let (width, height) = (image.width() as u64, image.height() as u64);
    let tw = target_width as u64;
    // round(height * tw / width) in integers, halves rounding up.
    let th = ((2 * height * tw + width) / (2 * width)).max(1);

    let channels = image.channels() as usize;
    let stride = image.stride();
    let src = image.pixels();
    let mut out = Vec::with_capacity(tw as usize * th as usize * channels);

    for y in 0..th {
        let src_y = ((y * height) / th).min(height - 1) as usize;
        let row = &src[src_y * stride..(src_y + 1) * stride];
        for x in 0..tw {
            let src_x = ((x * width) / tw).min(width - 1) as usize;
            out.extend_from_slice(&row[src_x * channels..(src_x + 1) * channels]);
        }
    }

    debug!(
        from_w = width,
        from_h = height,
        to_w = tw,
        to_h = th,
        "Logo resampled"
    );

    // Dimensions and buffer length agree by construction.
    RasterImage::from_raw(target_width, th as u32, image.channels(), out).unwrap_or(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RasterImage {
        let pixels = (0..width * height)
            .flat_map(|i| [i as u8, (i >> 8) as u8, 0, 255])
            .collect();
        RasterImage::from_raw(width, height, 4, pixels).unwrap()
    }

    #[test]
    fn same_width_is_identity() {
        let image = gradient(5, 3);
        assert_eq!(resample(image.clone(), 5), image);
    }

    #[test]
    fn never_upscales() {
        let image = gradient(5, 3);
        assert_eq!(resample(image.clone(), 50), image);
    }

    #[test]
    fn halves_dimensions() {
        let out = resample(gradient(4, 4), 2);
        assert_eq!((out.width(), out.height()), (2, 2));
        // Samples source (0,0), (2,0), (0,2), (2,2) -> indices 0, 2, 8, 10.
        let firsts: Vec<u8> = out.pixels().chunks_exact(4).map(|p| p[0]).collect();
        assert_eq!(firsts, vec![0, 2, 8, 10]);
    }

    #[test]
    fn height_rounds_and_stays_positive() {
        // 3 * 2 / 4 = 1.5 rounds to 2.
        let out = resample(gradient(4, 3), 2);
        assert_eq!(out.height(), 2);

        // 1 * 1 / 10 = 0.1 rounds to 0, clamped to 1.
        let out = resample(gradient(10, 1), 1);
        assert_eq!((out.width(), out.height()), (1, 1));
    }

    #[test]
    fn preserves_channel_count() {
        let rgb = RasterImage::from_raw(4, 2, 3, vec![7; 24]).unwrap();
        let out = resample(rgb, 2);
        assert_eq!(out.channels(), 3);
        assert_eq!(out.pixels().len(), 2 * 1 * 3);
    }
}
