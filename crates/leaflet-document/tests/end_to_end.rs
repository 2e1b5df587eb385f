// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end tests: PNG bytes in, verified PDF bytes out. Third-party
// encoders and readers (`image`, `lopdf`) are used only as independent
// cross-checks.

use image::ImageEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use leaflet_core::types::{DocumentLogo, DocumentSpec};
use leaflet_document::layout::{normalize_ascii, wrap_line};
use leaflet_document::raster::{flatten_logo, resample};
use leaflet_document::{PdfWriter, build_pdf, decode_png, inspect_pdf, prepare_logo};

/// A deterministic RGBA pattern with varying alpha.
fn pattern(width: u32, height: u32) -> Vec<u8> {
    (0..height)
        .flat_map(|y| {
            (0..width).flat_map(move |x| {
                [
                    (x * 37 + y * 11) as u8,
                    (x * 5 + y * 91) as u8,
                    (x ^ y) as u8,
                    ((x + y) * 17) as u8,
                ]
            })
        })
        .collect()
}

fn encode_png(width: u32, height: u32, rgba: &[u8], filter: FilterType) -> Vec<u8> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Default, filter)
        .write_image(rgba, width, height, image::ExtendedColorType::Rgba8)
        .unwrap();
    buf
}

fn red_logo() -> DocumentLogo {
    DocumentLogo {
        width: 2,
        height: 2,
        rgb_bytes: [255, 0, 0].repeat(4),
    }
}

#[test]
fn decoder_agrees_with_reference_encoder_for_every_filter() {
    let (width, height) = (23, 17);
    let rgba = pattern(width, height);
    for filter in [
        FilterType::NoFilter,
        FilterType::Sub,
        FilterType::Up,
        FilterType::Avg,
        FilterType::Paeth,
        FilterType::Adaptive,
    ] {
        let png = encode_png(width, height, &rgba, filter);
        let decoded = decode_png(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (width, height));
        assert_eq!(decoded.pixels(), rgba.as_slice(), "filter {filter:?}");
    }
}

#[test]
fn decode_then_resample_to_own_width_is_identity() {
    let rgba = pattern(40, 9);
    let png = encode_png(40, 9, &rgba, FilterType::Adaptive);
    let decoded = decode_png(&png).unwrap();
    let same = resample(decoded.clone(), decoded.width());
    assert_eq!(same, decoded);
}

#[test]
fn rgb_png_is_rejected() {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(&[1, 2, 3], 1, 1, image::ExtendedColorType::Rgb8)
        .unwrap();
    let err = decode_png(&buf).unwrap_err();
    assert_eq!(err.stage(), leaflet_core::Stage::Decode);
}

#[test]
fn one_line_red_logo_document() {
    let logo = red_logo();
    let pdf = build_pdf(&DocumentSpec::new("Quick guide", vec!["Call today.".into()], &logo))
        .unwrap();

    let report = inspect_pdf(&pdf).unwrap();
    assert_eq!(report.object_count, 8);
    for (index, &offset) in report.offsets.iter().enumerate() {
        let header = format!("{} 0 obj\n", index + 1);
        assert!(pdf[offset..].starts_with(header.as_bytes()));
    }

    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    assert_eq!(doc.get_pages().len(), 1);

    let image = doc.get_object((3, 0)).unwrap().as_stream().unwrap();
    assert_eq!(image.dict.get(b"Width").unwrap().as_i64().unwrap(), 2);
    assert_eq!(image.content, [255, 0, 0].repeat(4));
}

#[test]
fn empty_body_still_has_one_page() {
    let logo = red_logo();
    let pdf = build_pdf(&DocumentSpec::new("Empty", Vec::new(), &logo)).unwrap();
    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn long_document_paginates_and_reads_back() {
    // A 320x80 logo leaves 42 body lines per page.
    let logo = DocumentLogo {
        width: 320,
        height: 80,
        rgb_bytes: vec![200; 320 * 80 * 3],
    };
    let lines: Vec<String> = (0..85).map(|i| format!("- item {i}")).collect();
    let pdf = build_pdf(&DocumentSpec::new("Directory", lines, &logo)).unwrap();

    inspect_pdf(&pdf).unwrap();
    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    assert_eq!(doc.get_pages().len(), 3);
}

#[test]
fn trailer_size_and_root_match_objects() {
    let logo = red_logo();
    let lines: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
    let pdf = build_pdf(&DocumentSpec::new("Count", lines, &logo)).unwrap();
    let report = inspect_pdf(&pdf).unwrap();

    // 100 lines at 34 per page -> 3 pages: 4 fixed + 3 streams + tree + 3 pages + catalog.
    assert_eq!(report.object_count, 12);
    assert_eq!(report.root as usize, report.object_count);

    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/Size 13 /Root 12 0 R"));
}

#[test]
fn full_logo_pipeline_feeds_the_writer() {
    let rgba = pattern(640, 160);
    let png = encode_png(640, 160, &rgba, FilterType::Adaptive);
    let logo = prepare_logo(&png, 320).unwrap();
    assert_eq!((logo.width, logo.height), (320, 80));

    // Same result as running the stages by hand.
    let by_hand = flatten_logo(&resample(decode_png(&png).unwrap(), 320));
    assert_eq!(logo, by_hand);

    let pdf = PdfWriter::default()
        .build(&DocumentSpec::new("Logo", vec!["Body".into()], &logo))
        .unwrap();
    inspect_pdf(&pdf).unwrap();
    assert!(String::from_utf8_lossy(&pdf).contains("160 0 0 40 54 698 cm"));
}

#[test]
fn wrapped_text_survives_into_the_content_stream() {
    let logo = red_logo();
    let long = "word ".repeat(40);
    let pdf = build_pdf(&DocumentSpec::new("Wrap", vec![long.clone()], &logo)).unwrap();
    let text = String::from_utf8_lossy(&pdf);

    for line in wrap_line(&normalize_ascii(&long), 90) {
        assert!(text.contains(&format!("({line}) Tj")));
    }
}

#[test]
fn shared_logo_builds_in_parallel() {
    let logo = red_logo();
    let titles = ["One", "Two", "Three", "Four"];

    let outputs: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = titles
            .iter()
            .map(|title| {
                let logo = &logo;
                scope.spawn(move || {
                    build_pdf(&DocumentSpec::new(*title, vec!["shared".into()], logo)).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (title, pdf) in titles.iter().zip(&outputs) {
        inspect_pdf(pdf).unwrap();
        let sequential =
            build_pdf(&DocumentSpec::new(*title, vec!["shared".into()], &logo)).unwrap();
        assert_eq!(pdf, &sequential);
    }
}
