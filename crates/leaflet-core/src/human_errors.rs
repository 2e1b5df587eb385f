// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error reports for people running the generator.
//
// Every technical error is mapped to plain English with a concrete suggestion
// and the pipeline stage that failed. Nothing here is retriable: every stage is
// a pure transform, so the same input fails the same way twice.

use crate::error::{LeafletError, Stage};

/// A plain-language description of a failure.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    /// Stage that failed (decode, layout, write, io).
    pub stage: Stage,
    /// One-line summary.
    pub message: String,
    /// What to change before running again.
    pub suggestion: String,
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} {}", self.stage, self.message, self.suggestion)
    }
}

/// Convert a `LeafletError` into an `ErrorReport`.
pub fn describe_error(err: &LeafletError) -> ErrorReport {
    let stage = err.stage();
    match err {
        LeafletError::Format(detail) => {
            if detail.contains("signature") {
                ErrorReport {
                    stage,
                    message: "The logo file is not a PNG image.".into(),
                    suggestion: "Export the logo as PNG and point --logo at that file.".into(),
                }
            } else if detail.contains("bit depth")
                || detail.contains("color type")
                || detail.contains("interlac")
            {
                ErrorReport {
                    stage,
                    message: "The logo PNG uses a layout the generator cannot read.".into(),
                    suggestion: format!(
                        "Re-save it as 8-bit RGBA without interlacing. ({detail})"
                    ),
                }
            } else {
                ErrorReport {
                    stage,
                    message: "The logo PNG is damaged or incomplete.".into(),
                    suggestion: format!("Re-export the logo and try again. ({detail})"),
                }
            }
        }

        LeafletError::Inflate(detail) => ErrorReport {
            stage,
            message: "The logo's compressed image data could not be unpacked.".into(),
            suggestion: format!("Re-export the logo and try again. ({detail})"),
        },

        LeafletError::LayoutOverflow {
            available,
            line_height,
        } => ErrorReport {
            stage,
            message: "There is no room left on the page for body text.".into(),
            suggestion: format!(
                "Reduce the margins, logo width or line height ({available} units free, \
                 {line_height} needed per line)."
            ),
        },

        LeafletError::Write(detail) => ErrorReport {
            stage,
            message: "The PDF could not be assembled.".into(),
            suggestion: format!("This indicates inconsistent input data. ({detail})"),
        },

        LeafletError::Io(io) => ErrorReport {
            stage,
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check the paths and permissions. ({io})"),
        },

        LeafletError::Manifest(json) => ErrorReport {
            stage,
            message: "The manifest is not valid.".into(),
            suggestion: format!(
                "Fix the JSON at line {}, column {}. ({json})",
                json.line(),
                json.column()
            ),
        },

        LeafletError::InvalidManifest(detail) => ErrorReport {
            stage,
            message: "The manifest names an output file that cannot be used.".into(),
            suggestion: format!(
                "Give every document its own plain file name, without folders. ({detail})"
            ),
        },
    }
}
