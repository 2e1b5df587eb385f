// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanline defiltering: reverses the per-row predictors PNG applies before
// compression.

use leaflet_core::error::{LeafletError, Result};

/// Per-scanline predictor selected by the leading filter byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    None,
    Sub,
    Up,
    Average,
    Paeth,
}

impl TryFrom<u8> for FilterType {
    type Error = LeafletError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Sub),
            2 => Ok(Self::Up),
            3 => Ok(Self::Average),
            4 => Ok(Self::Paeth),
            other => Err(LeafletError::Format(format!(
                "unsupported scanline filter type: {other}"
            ))),
        }
    }
}

/// Paeth predictor: whichever of `a` (left), `b` (up), `c` (up-left) is
/// closest to `a + b - c`, ties resolved in that order.
pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Reconstruct one scanline in place.
///
/// `row` holds the filtered bytes on entry and the raw bytes on return.
/// `prior` is the previous reconstructed row, or `None` for the first row
/// (treated as all zeros). `bpp` is bytes per complete pixel.
pub fn unfilter_scanline(filter: FilterType, row: &mut [u8], prior: Option<&[u8]>, bpp: usize) {
    let up_at = |i: usize| prior.map_or(0, |p| p[i]);

    match filter {
        FilterType::None => {}
        FilterType::Sub => {
            for i in bpp..row.len() {
                row[i] = row[i].wrapping_add(row[i - bpp]);
            }
        }
        FilterType::Up => {
            if let Some(prior) = prior {
                for (x, up) in row.iter_mut().zip(prior) {
                    *x = x.wrapping_add(*up);
                }
            }
        }
        FilterType::Average => {
            for i in 0..row.len() {
                let left = if i >= bpp { row[i - bpp] as u16 } else { 0 };
                let up = up_at(i) as u16;
                row[i] = row[i].wrapping_add(((left + up) / 2) as u8);
            }
        }
        FilterType::Paeth => {
            for i in 0..row.len() {
                let left = if i >= bpp { row[i - bpp] } else { 0 };
                let up = up_at(i);
                let up_left = if i >= bpp { up_at(i - bpp) } else { 0 };
                row[i] = row[i].wrapping_add(paeth(left, up, up_left));
            }
        }
    }
}
