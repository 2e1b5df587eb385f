// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PNG decoder: chunk framing, header validation, and scanline reconstruction
// for 8-bit RGBA non-interlaced images. Inflate is delegated to `flate2`.

use std::io::Read;

use flate2::read::ZlibDecoder;
use leaflet_core::error::{LeafletError, Result};
use leaflet_core::types::{RGBA_CHANNELS, RasterImage};
use tracing::{debug, info, instrument};

use super::filter::{FilterType, unfilter_scanline};

/// The eight bytes every PNG stream starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const COLOR_TYPE_RGBA: u8 = 6;
const SUPPORTED_BIT_DEPTH: u8 = 8;

/// Fields of the `IHDR` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub interlace: u8,
}

impl PngHeader {
    fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 13 {
            return Err(LeafletError::Format(format!(
                "IHDR chunk too short: {} bytes",
                data.len()
            )));
        }
        Ok(Self {
            width: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            height: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            bit_depth: data[8],
            color_type: data[9],
            interlace: data[12],
        })
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LeafletError::Format(format!(
                "image has zero size: {}x{}",
                self.width, self.height
            )));
        }
        if self.bit_depth != SUPPORTED_BIT_DEPTH {
            return Err(LeafletError::Format(format!(
                "unsupported bit depth: {} (expected 8)",
                self.bit_depth
            )));
        }
        if self.color_type != COLOR_TYPE_RGBA {
            return Err(LeafletError::Format(format!(
                "unsupported color type: {} (expected 6 = RGBA)",
                self.color_type
            )));
        }
        if self.interlace != 0 {
            return Err(LeafletError::Format(
                "interlaced images are not supported".into(),
            ));
        }
        Ok(())
    }
}

/// One length-prefixed, type-tagged record.
#[derive(Debug, Clone, Copy)]
struct Chunk<'b> {
    kind: [u8; 4],
    data: &'b [u8],
}

/// Walks the chunks following the signature. Stops quietly when fewer than
/// eight bytes (a length and a type) remain.
struct ChunkIter<'b> {
    rest: &'b [u8],
}

impl<'b> Iterator for ChunkIter<'b> {
    type Item = Result<Chunk<'b>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.len() < 8 {
            return None;
        }
        let (head, body) = self.rest.split_at(8);
        let length = u32::from_be_bytes([head[0], head[1], head[2], head[3]]) as usize;
        let kind = [head[4], head[5], head[6], head[7]];

        if body.len() < length {
            self.rest = &[];
            return Some(Err(LeafletError::Format(format!(
                "chunk {} declares {} bytes but only {} remain",
                String::from_utf8_lossy(&kind),
                length,
                body.len()
            ))));
        }

        let data = &body[..length];
        // The CRC trails the payload; it is not checked.
        self.rest = body.get(length + 4..).unwrap_or(&[]);
        Some(Ok(Chunk { kind, data }))
    }
}

/// Decode an 8-bit RGBA, non-interlaced PNG into raw pixels.
#[instrument(skip(bytes), fields(bytes_len = bytes.len()))]
pub fn decode_png(bytes: &[u8]) -> Result<RasterImage> {
    if bytes.len() < PNG_SIGNATURE.len() || bytes[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return Err(LeafletError::Format("invalid PNG signature".into()));
    }

    let mut header: Option<PngHeader> = None;
    let mut compressed: Vec<u8> = Vec::new();

    let chunks = ChunkIter {
        rest: &bytes[PNG_SIGNATURE.len()..],
    };
    for chunk in chunks {
        let chunk = chunk?;
        match &chunk.kind {
            b"IHDR" => header = Some(PngHeader::parse(chunk.data)?),
            b"IDAT" => compressed.extend_from_slice(chunk.data),
            b"IEND" => break,
            other => debug!(chunk = %String::from_utf8_lossy(other), "Skipping ancillary chunk"),
        }
    }

    let header = header.ok_or_else(|| LeafletError::Format("missing IHDR chunk".into()))?;
    header.validate()?;

    if compressed.is_empty() {
        return Err(LeafletError::Format("no IDAT image data".into()));
    }

    let bpp = RGBA_CHANNELS as usize;
    let stride = (header.width as usize)
        .checked_mul(bpp)
        .ok_or_else(|| LeafletError::Format("image too wide".into()))?;
    let expected = (stride + 1)
        .checked_mul(header.height as usize)
        .ok_or_else(|| LeafletError::Format("image too large".into()))?;

    let inflated = inflate(&compressed, expected)?;
    if inflated.len() < expected {
        return Err(LeafletError::Format(format!(
            "image data truncated: {} of {} bytes",
            inflated.len(),
            expected
        )));
    }

    debug!(
        compressed = compressed.len(),
        inflated = inflated.len(),
        "Image data inflated"
    );

    let pixels = reconstruct(&inflated, stride, header.height as usize, bpp)?;

    info!(
        width = header.width,
        height = header.height,
        "PNG decoded"
    );

    RasterImage::from_raw(header.width, header.height, RGBA_CHANNELS, pixels)
        .ok_or_else(|| LeafletError::Format("decoded pixel count mismatch".into()))
}

/// Inflate the concatenated `IDAT` payload, reading no more than the image
/// can use.
///
/// `limit` comes from the untrusted header, so the buffer grows with the data
/// actually inflated instead of being sized up front.
fn inflate(compressed: &[u8], limit: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(compressed.len().saturating_mul(4).min(limit));
    ZlibDecoder::new(compressed)
        .take(limit as u64)
        .read_to_end(&mut out)
        .map_err(|e| LeafletError::Inflate(e.to_string()))?;
    Ok(out)
}

/// Undo the scanline filters, keeping only the previous row as state.
fn reconstruct(inflated: &[u8], stride: usize, height: usize, bpp: usize) -> Result<Vec<u8>> {
    let mut pixels = Vec::with_capacity(stride * height);
    let mut prior = vec![0u8; stride];
    let mut row = vec![0u8; stride];

    for (y, line) in inflated.chunks_exact(stride + 1).take(height).enumerate() {
        let filter = FilterType::try_from(line[0])?;
        row.copy_from_slice(&line[1..]);
        let previous = (y > 0).then_some(prior.as_slice());
        unfilter_scanline(filter, &mut row, previous, bpp);
        pixels.extend_from_slice(&row);
        std::mem::swap(&mut prior, &mut row);
    }

    Ok(pixels)
}
