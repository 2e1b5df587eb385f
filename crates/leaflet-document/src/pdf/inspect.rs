// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF structure inspector: re-reads a produced file's trailer and
// cross-reference table and checks that every offset lands exactly on its
// object header. Handles the single-subsection classic xref layout the writer
// emits; it is not a general PDF parser.

use std::sync::LazyLock;

use leaflet_core::error::{LeafletError, Result};
use regex::bytes::Regex;
use tracing::{debug, instrument};

static SIZE_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/Size (\d+)").expect("valid /Size regex"));
static ROOT_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/Root (\d+) 0 R").expect("valid /Root regex"));

/// What the cross-reference table and trailer say about a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrefReport {
    /// In-use objects (the trailer's `/Size` minus the free entry).
    pub object_count: usize,
    /// Catalog object number from `/Root`.
    pub root: u32,
    /// Byte offset of the `xref` keyword.
    pub startxref: usize,
    /// Offset of object `k` at index `k - 1`.
    pub offsets: Vec<usize>,
}

fn invalid(detail: impl Into<String>) -> LeafletError {
    LeafletError::Write(format!("structure check failed: {}", detail.into()))
}

/// Parse and verify the cross-reference structure of `bytes`.
#[instrument(skip(bytes), fields(bytes_len = bytes.len()))]
pub fn inspect_pdf(bytes: &[u8]) -> Result<XrefReport> {
    if !bytes.starts_with(b"%PDF-") {
        return Err(invalid("missing %PDF- header"));
    }

    let marker = rfind(bytes, b"startxref")
        .ok_or_else(|| invalid("no startxref keyword"))?;
    let mut tail = Lines::new(bytes, marker);
    tail.next_line()?; // "startxref"
    let startxref: usize = parse_number(tail.next_line()?, "startxref offset")?;

    let mut lines = Lines::new(bytes, startxref);
    if lines.next_line()? != "xref" {
        return Err(invalid(format!("startxref {startxref} does not point at xref")));
    }

    let subsection = lines.next_line()?;
    let (first, count) = subsection
        .split_once(' ')
        .ok_or_else(|| invalid(format!("bad xref subsection header {subsection:?}")))?;
    if first != "0" {
        return Err(invalid("xref subsection does not start at object 0"));
    }
    let count: usize = parse_number(count, "xref entry count")?;
    if count == 0 {
        return Err(invalid("xref has no entries"));
    }

    let free = lines.next_line()?;
    if !free.ends_with(" f") && !free.ends_with(" f ") {
        return Err(invalid("object 0 is not the free-list head"));
    }

    // Each xref entry is 20 bytes, which bounds any honest count.
    let mut offsets = Vec::with_capacity((count - 1).min(bytes.len() / 20));
    for id in 1..count {
        let entry = lines.next_line()?;
        let mut fields = entry.split_whitespace();
        let offset = fields.next().unwrap_or_default();
        let kind = fields.nth(1).unwrap_or_default();
        if kind != "n" {
            return Err(invalid(format!("object {id} is not marked in use")));
        }
        offsets.push(parse_number(offset, "object offset")?);
    }

    if lines.next_line()? != "trailer" {
        return Err(invalid("xref table is not followed by a trailer"));
    }
    let trailer = bytes
        .get(lines.pos..marker)
        .ok_or_else(|| invalid("trailer dictionary overlaps startxref"))?;
    let size: usize = capture_number(&SIZE_ENTRY, trailer, "/Size")?;
    let root: u32 = capture_number(&ROOT_ENTRY, trailer, "/Root")?;

    if size != count {
        return Err(invalid(format!("/Size {size} but xref lists {count} entries")));
    }

    for (index, &offset) in offsets.iter().enumerate() {
        let header = format!("{} 0 obj\n", index + 1);
        let found = bytes.get(offset..).is_some_and(|b| b.starts_with(header.as_bytes()));
        if !found {
            return Err(invalid(format!(
                "object {} offset {offset} does not point at its header",
                index + 1
            )));
        }
    }

    let root_offset = root
        .checked_sub(1)
        .and_then(|i| offsets.get(i as usize))
        .copied()
        .ok_or_else(|| invalid(format!("/Root {root} is not in the xref table")))?;
    let root_body = &bytes[root_offset..];
    let root_end = find(root_body, b"\nendobj").unwrap_or(root_body.len());
    if find(&root_body[..root_end], b"/Type /Catalog").is_none() {
        return Err(invalid(format!("/Root {root} is not a catalog")));
    }

    debug!(objects = offsets.len(), root, startxref, "Cross-reference table verified");

    Ok(XrefReport {
        object_count: offsets.len(),
        root,
        startxref,
        offsets,
    })
}

/// Newline-delimited ASCII lines starting at a byte position.
struct Lines<'b> {
    bytes: &'b [u8],
    pos: usize,
}

impl<'b> Lines<'b> {
    fn new(bytes: &'b [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    fn next_line(&mut self) -> Result<&'b str> {
        let rest = self
            .bytes
            .get(self.pos..)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| invalid(format!("unexpected end of file at byte {}", self.pos)))?;
        let len = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
        self.pos += (len + 1).min(rest.len());
        std::str::from_utf8(&rest[..len])
            .map(|line| line.trim_end_matches('\r'))
            .map_err(|_| invalid(format!("non-ASCII structure line at byte {}", self.pos)))
    }
}

fn parse_number<T: std::str::FromStr>(text: &str, what: &str) -> Result<T> {
    text.trim()
        .parse()
        .map_err(|_| invalid(format!("bad {what}: {text:?}")))
}

fn capture_number<T: std::str::FromStr>(re: &Regex, haystack: &[u8], what: &str) -> Result<T> {
    let digits = re
        .captures(haystack)
        .and_then(|c| c.get(1))
        .ok_or_else(|| invalid(format!("trailer has no {what}")))?;
    let text = std::str::from_utf8(digits.as_bytes()).unwrap_or_default();
    parse_number(text, what)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}
