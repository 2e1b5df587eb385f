// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Leaflet.

use thiserror::Error;

/// Top-level error type for all Leaflet operations.
#[derive(Debug, Error)]
pub enum LeafletError {
    // -- Decode errors --
    #[error("malformed or unsupported PNG: {0}")]
    Format(String),

    #[error("PNG image data failed to inflate: {0}")]
    Inflate(String),

    // -- Layout errors --
    #[error(
        "page layout leaves no room for body text: {available} units available, \
         {line_height} needed per line"
    )]
    LayoutOverflow { available: i64, line_height: u32 },

    // -- Write errors --
    #[error("PDF write failed: {0}")]
    Write(String),

    // -- Collaborator I/O --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("manifest lists an unusable output name: {0}")]
    InvalidManifest(String),
}

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// PNG signature, chunk, inflate, or scanline reconstruction.
    Decode,
    /// Wrapping and pagination.
    Layout,
    /// Object graph construction and serialisation.
    Write,
    /// Reading inputs or writing outputs outside the core.
    Io,
}

impl LeafletError {
    /// The stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Format(_) | Self::Inflate(_) => Stage::Decode,
            Self::LayoutOverflow { .. } => Stage::Layout,
            Self::Write(_) => Stage::Write,
            Self::Io(_) | Self::Manifest(_) | Self::InvalidManifest(_) => Stage::Io,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Decode => "decode",
            Self::Layout => "layout",
            Self::Write => "write",
            Self::Io => "io",
        };
        f.write_str(name)
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LeafletError>;
