// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page content: drawing instructions for one page and their rendering to
// content-stream operators.

use leaflet_core::config::LayoutConfig;

use crate::layout::{PageGeometry, normalize_ascii};

/// Resource name of the logo image XObject.
pub const LOGO_RESOURCE: &str = "Logo";
/// Resource name of the regular body font.
pub const BODY_FONT_RESOURCE: &str = "F1";
/// Resource name of the bold title font.
pub const TITLE_FONT_RESOURCE: &str = "F2";

/// One drawing instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp<'a> {
    /// Place and paint the logo image.
    ShowLogo,
    /// Draw the title in the bold font.
    ShowTitle(&'a str),
    /// Open the body text block at the first body baseline.
    BeginBody,
    /// Draw one body line at the current baseline.
    ShowBodyLine(&'a str),
    /// Move down one body line.
    NextLine,
    /// Close the body text block.
    EndBody,
}

/// The ordered instructions for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent<'a> {
    ops: Vec<DrawOp<'a>>,
}

impl<'a> PageContent<'a> {
    /// Logo, title, then the page's body lines with a line advance between
    /// consecutive lines (none after the last).
    pub fn for_page(title: &'a str, lines: &'a [String]) -> Self {
        let mut ops = Vec::with_capacity(lines.len() * 2 + 4);
        ops.push(DrawOp::ShowLogo);
        ops.push(DrawOp::ShowTitle(title));
        ops.push(DrawOp::BeginBody);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                ops.push(DrawOp::NextLine);
            }
            ops.push(DrawOp::ShowBodyLine(line));
        }
        ops.push(DrawOp::EndBody);
        Self { ops }
    }

    pub fn ops(&self) -> &[DrawOp<'a>] {
        &self.ops
    }

    /// Render to content-stream bytes: one operator per line, newline
    /// terminated.
    pub fn render(&self, geometry: &PageGeometry, layout: &LayoutConfig) -> Vec<u8> {
        let mut lines: Vec<String> = Vec::with_capacity(self.ops.len() * 2 + 8);
        for op in &self.ops {
            match op {
                DrawOp::ShowLogo => {
                    lines.push("q".into());
                    lines.push(format!(
                        "{} 0 0 {} {} {} cm",
                        geometry.logo_width, geometry.logo_height, geometry.logo_x, geometry.logo_y
                    ));
                    lines.push(format!("/{LOGO_RESOURCE} Do"));
                    lines.push("Q".into());
                }
                DrawOp::ShowTitle(title) => {
                    lines.push("BT".into());
                    lines.push(format!("/{TITLE_FONT_RESOURCE} {} Tf", layout.title_font_size));
                    lines.push(format!("{} {} Td", layout.margin_x, geometry.title_y));
                    lines.push(format!("({}) Tj", escape_pdf_string(title)));
                    lines.push("ET".into());
                }
                DrawOp::BeginBody => {
                    lines.push("BT".into());
                    lines.push(format!("/{BODY_FONT_RESOURCE} {} Tf", layout.body_font_size));
                    lines.push(format!("{} {} Td", layout.margin_x, geometry.body_y));
                }
                DrawOp::ShowBodyLine(line) => {
                    lines.push(format!("({}) Tj", escape_pdf_string(line)));
                }
                DrawOp::NextLine => {
                    lines.push(format!("0 -{} Td", layout.body_line_height));
                }
                DrawOp::EndBody => lines.push("ET".into()),
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out.into_bytes()
    }
}

/// Normalise to ASCII, then backslash-escape the string-literal delimiters
/// `\`, `(` and `)`.
pub fn escape_pdf_string(text: &str) -> String {
    let normalized = normalize_ascii(text);
    let mut out = String::with_capacity(normalized.len() + 8);
    for c in normalized.chars() {
        if matches!(c, '\\' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Body of a stream object: dictionary with an exact `/Length`, then the data.
pub fn stream_object_body(dict_entries: &[String], data: &[u8]) -> Vec<u8> {
    let dict = format!("<< {} /Length {} >>\nstream\n", dict_entries.join(" "), data.len());
    let mut body = Vec::with_capacity(dict.len() + data.len() + 10);
    body.extend_from_slice(dict.as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(b"\nendstream");
    body
}
