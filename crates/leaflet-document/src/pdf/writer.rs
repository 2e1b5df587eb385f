// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: assembles the leaflet object graph by hand and serialises it
// with an exact cross-reference table.
//
// Object order is fixed: two standard fonts, the logo image, the shared
// resource dictionary, one content stream per page, the page tree (reserved
// as a placeholder, patched once the pages exist), the pages, and finally the
// catalog.

use leaflet_core::config::LayoutConfig;
use leaflet_core::error::{LeafletError, Result};
use leaflet_core::types::{DocumentLogo, DocumentSpec};
use tracing::{debug, info, instrument};

use super::content::{
    BODY_FONT_RESOURCE, LOGO_RESOURCE, PageContent, TITLE_FONT_RESOURCE, stream_object_body,
};
use super::objects::{ObjectId, ObjectTable};
use crate::layout::{PageGeometry, normalize_ascii, paginate, wrap_lines};

const PAGES_PLACEHOLDER: &str = "<< /Type /Pages /Kids [] /Count 0 >>";

/// Builds leaflet PDFs with a fixed layout.
///
/// The writer holds no per-document state, so one instance can be shared
/// across threads and used for any number of concurrent builds.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    layout: LayoutConfig,
}

impl PdfWriter {
    /// Create a writer with the given layout.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Build the complete PDF for `spec`.
    #[instrument(skip(self, spec), fields(title = %spec.title, lines = spec.lines.len()))]
    pub fn build(&self, spec: &DocumentSpec<'_>) -> Result<Vec<u8>> {
        let logo = spec.logo;
        if !logo.is_consistent() {
            return Err(LeafletError::Write(format!(
                "logo is {}x{} but carries {} RGB bytes",
                logo.width,
                logo.height,
                logo.rgb_bytes.len()
            )));
        }

        let layout = &self.layout;
        let geometry = PageGeometry::compute(layout, logo.width, logo.height)?;

        let title = normalize_ascii(&spec.title).trim().to_string();
        let title = if title.is_empty() {
            layout.fallback_title.clone()
        } else {
            title
        };

        let body = wrap_lines(&spec.lines, layout.wrap_width);
        let pages = paginate(&body, geometry.lines_per_page);

        debug!(
            wrapped_lines = body.len(),
            pages = pages.len(),
            lines_per_page = geometry.lines_per_page.get(),
            "Text layout complete"
        );

        let mut objects = ObjectTable::new();

        let font_regular =
            objects.add("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>");
        let font_bold =
            objects.add("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>");
        let image = objects.add(image_object_body(logo));
        let resources = objects.add(format!(
            "<< /Font << /{BODY_FONT_RESOURCE} {} /{TITLE_FONT_RESOURCE} {} >> \
             /XObject << /{LOGO_RESOURCE} {} >> >>",
            font_regular.reference(),
            font_bold.reference(),
            image.reference()
        ));

        let contents: Vec<ObjectId> = pages
            .iter()
            .map(|lines| {
                let stream = PageContent::for_page(&title, lines).render(&geometry, layout);
                objects.add(stream_object_body(&[], &stream))
            })
            .collect();

        let page_tree = objects.reserve(PAGES_PLACEHOLDER);

        let kids: Vec<ObjectId> = contents
            .iter()
            .map(|content| {
                objects.add(format!(
                    "<< /Type /Page /Parent {} /MediaBox [0 0 {} {}] /Resources {} /Contents {} >>",
                    page_tree.reference(),
                    layout.page_width,
                    layout.page_height,
                    resources.reference(),
                    content.reference()
                ))
            })
            .collect();

        let kid_refs: Vec<String> = kids.iter().map(|kid| kid.reference()).collect();
        objects.replace(
            page_tree,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kid_refs.join(" "),
                kids.len()
            ),
        )?;

        let catalog = objects.add(format!(
            "<< /Type /Catalog /Pages {} >>",
            page_tree.reference()
        ));

        let output = objects.serialize(catalog)?;

        info!(
            pages = kids.len(),
            objects = objects.len(),
            bytes = output.len(),
            "PDF built"
        );

        Ok(output)
    }
}

/// Build a leaflet with the default layout.
pub fn build_pdf(spec: &DocumentSpec<'_>) -> Result<Vec<u8>> {
    PdfWriter::default().build(spec)
}

/// Image XObject carrying the logo as raw, uncompressed RGB samples.
fn image_object_body(logo: &DocumentLogo) -> Vec<u8> {
    stream_object_body(
        &[
            "/Type /XObject".into(),
            "/Subtype /Image".into(),
            format!("/Width {}", logo.width),
            format!("/Height {}", logo.height),
            "/ColorSpace /DeviceRGB".into(),
            "/BitsPerComponent 8".into(),
        ],
        &logo.rgb_bytes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_logo() -> DocumentLogo {
        DocumentLogo {
            width: 2,
            height: 2,
            rgb_bytes: [255, 0, 0].repeat(4),
        }
    }

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn single_line_document_has_one_page() {
        let logo = red_logo();
        let spec = DocumentSpec::new("Bill review", vec!["Only line".into()], &logo);
        let pdf = text(&build_pdf(&spec).unwrap());

        assert!(pdf.starts_with("%PDF-1.4\n1 0 obj\n"));
        assert!(pdf.contains("/Kids [7 0 R] /Count 1"));
        assert!(pdf.contains("7 0 obj\n<< /Type /Page /Parent 6 0 R /MediaBox [0 0 612 792] /Resources 4 0 R /Contents 5 0 R >>"));
        assert!(pdf.contains("8 0 obj\n<< /Type /Catalog /Pages 6 0 R >>"));
        assert!(pdf.contains("trailer\n<< /Size 9 /Root 8 0 R >>"));
        assert!(pdf.ends_with("%%EOF\n"));
    }

    #[test]
    fn object_layout_is_fixed() {
        let logo = red_logo();
        let spec = DocumentSpec::new("T", Vec::new(), &logo);
        let pdf = text(&build_pdf(&spec).unwrap());

        assert!(pdf.contains(
            "1 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n"
        ));
        assert!(pdf.contains(
            "2 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>\nendobj\n"
        ));
        assert!(pdf.contains(
            "3 0 obj\n<< /Type /XObject /Subtype /Image /Width 2 /Height 2 \
             /ColorSpace /DeviceRGB /BitsPerComponent 8 /Length 12 >>\nstream\n"
        ));
        assert!(pdf.contains(
            "4 0 obj\n<< /Font << /F1 1 0 R /F2 2 0 R >> /XObject << /Logo 3 0 R >> >>\nendobj\n"
        ));
    }

    #[test]
    fn long_body_spills_onto_more_pages() {
        let logo = red_logo();
        // Square logo leaves room for 34 lines per page.
        let lines: Vec<String> = (0..70).map(|i| format!("line {i}")).collect();
        let spec = DocumentSpec::new("T", lines, &logo);
        let pdf = text(&build_pdf(&spec).unwrap());

        // 3 content streams (5, 6, 7), tree 8, pages 9..=11, catalog 12.
        assert!(pdf.contains("/Kids [9 0 R 10 0 R 11 0 R] /Count 3"));
        assert!(pdf.contains("<< /Size 13 /Root 12 0 R >>"));
    }

    #[test]
    fn blank_title_falls_back() {
        let logo = red_logo();
        let spec = DocumentSpec::new(" \u{00A0} ", vec![], &logo);
        let pdf = text(&build_pdf(&spec).unwrap());
        assert!(pdf.contains("(Resource) Tj"));
    }

    #[test]
    fn title_is_normalised_and_escaped() {
        let logo = red_logo();
        let spec = DocumentSpec::new("  Caf\u{e9} (Help) \u{2014} \u{201C}now\u{201D} ", vec![], &logo);
        let pdf = text(&build_pdf(&spec).unwrap());
        assert!(pdf.contains("(Caf\u{e9} \\(Help\\) - \"now\") Tj"));
    }

    #[test]
    fn inconsistent_logo_is_write_error() {
        let logo = DocumentLogo {
            width: 3,
            height: 2,
            rgb_bytes: vec![0; 12],
        };
        let spec = DocumentSpec::new("T", vec![], &logo);
        let err = build_pdf(&spec).unwrap_err();
        assert!(matches!(err, LeafletError::Write(_)));
    }

    #[test]
    fn impossible_layout_is_layout_error() {
        let logo = red_logo();
        let writer = PdfWriter::new(LayoutConfig {
            logo_width: 700,
            ..LayoutConfig::default()
        });
        let err = writer.build(&DocumentSpec::new("T", vec![], &logo)).unwrap_err();
        assert!(matches!(err, LeafletError::LayoutOverflow { .. }));
    }

    #[test]
    fn builds_are_deterministic() {
        let logo = red_logo();
        let spec = DocumentSpec::new("Same", vec!["a".into(), "b".into()], &logo);
        assert_eq!(build_pdf(&spec).unwrap(), build_pdf(&spec).unwrap());
    }
}
