// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Object arena: numbered indirect objects and their serialisation with a
// cross-reference table.

use std::fmt;
use std::num::NonZeroU32;

use leaflet_core::error::{LeafletError, Result};

/// File header. The second line is left out; output is pure ASCII apart from
/// image samples.
pub const PDF_HEADER: &[u8] = b"%PDF-1.4\n";

/// Number of an indirect object. Ids are 1-based, dense, and assigned in
/// creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(NonZeroU32);

impl ObjectId {
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Indirect reference syntax, e.g. `4 0 R`.
    pub fn reference(self) -> String {
        format!("{} 0 R", self.0)
    }

    fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Arena of object bodies indexed by `id - 1`.
///
/// Objects that must be referenced before their contents are known are
/// `reserve`d with a placeholder and later `replace`d by id; ids never move.
#[derive(Debug, Default)]
pub struct ObjectTable {
    bodies: Vec<Vec<u8>>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object and return its id.
    pub fn add(&mut self, body: impl Into<Vec<u8>>) -> ObjectId {
        self.bodies.push(body.into());
        let id = u32::try_from(self.bodies.len()).unwrap_or(u32::MAX);
        // len() >= 1 after the push.
        ObjectId(NonZeroU32::MIN.saturating_add(id - 1))
    }

    /// Allocate an id now whose body will be patched in later.
    pub fn reserve(&mut self, placeholder: impl Into<Vec<u8>>) -> ObjectId {
        self.add(placeholder)
    }

    /// Overwrite the body of an existing object in place.
    pub fn replace(&mut self, id: ObjectId, body: impl Into<Vec<u8>>) -> Result<()> {
        let slot = self.bodies.get_mut(id.index()).ok_or_else(|| {
            LeafletError::Write(format!("object {id} is not in the object table"))
        })?;
        *slot = body.into();
        Ok(())
    }

    pub fn get(&self, id: ObjectId) -> Option<&[u8]> {
        self.bodies.get(id.index()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Serialise every object in id order, followed by the cross-reference
    /// table and a trailer naming `root` as the document catalog.
    pub fn serialize(&self, root: ObjectId) -> Result<Vec<u8>> {
        if self.get(root).is_none() {
            return Err(LeafletError::Write(format!(
                "catalog object {root} is not in the object table"
            )));
        }

        let body_bytes: usize = self.bodies.iter().map(Vec::len).sum();
        let mut out = Vec::with_capacity(body_bytes + 64 * self.bodies.len() + 128);
        out.extend_from_slice(PDF_HEADER);

        let mut xref = CrossReferenceTable::with_capacity(self.bodies.len());
        for (index, body) in self.bodies.iter().enumerate() {
            xref.record(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_start = out.len();
        xref.write_to(&mut out);

        let size = self.bodies.len() + 1;
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {size} /Root {} >>\nstartxref\n{xref_start}\n%%EOF\n",
                root.reference()
            )
            .as_bytes(),
        );
        Ok(out)
    }
}

/// Absolute byte offsets of objects `1..=n`, recorded in a single forward
/// pass as they are written.
#[derive(Debug, Default)]
pub struct CrossReferenceTable {
    offsets: Vec<usize>,
}

impl CrossReferenceTable {
    pub fn with_capacity(objects: usize) -> Self {
        Self {
            offsets: Vec::with_capacity(objects),
        }
    }

    /// Record where the next object starts.
    pub fn record(&mut self, offset: usize) {
        self.offsets.push(offset);
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Emit the `xref` section: the free head of object 0, then one
    /// fixed-width entry per object.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(format!("xref\n0 {}\n", self.offsets.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &self.offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
    }
}
