// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output fingerprints: SHA-256 of every written leaflet.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of a finished leaflet.
///
/// Builds are byte-deterministic, so an unchanged leaflet logs the same
/// fingerprint on every run.
pub fn fingerprint(pdf: &[u8]) -> String {
    hex::encode(Sha256::digest(pdf))
}

#[cfg(test)]
mod tests {
    use leaflet_core::types::{DocumentLogo, DocumentSpec};
    use leaflet_document::build_pdf;

    use super::*;

    fn leaflet(title: &str) -> Vec<u8> {
        let logo = DocumentLogo {
            width: 1,
            height: 1,
            rgb_bytes: vec![0, 90, 160],
        };
        build_pdf(&DocumentSpec::new(title, vec!["Call us.".into()], &logo)).unwrap()
    }

    #[test]
    fn fingerprint_is_lowercase_hex_sha256() {
        let digest = fingerprint(&leaflet("Fingerprint"));
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn rebuilt_leaflet_keeps_its_fingerprint() {
        assert_eq!(fingerprint(&leaflet("Same")), fingerprint(&leaflet("Same")));
    }

    #[test]
    fn any_content_change_moves_the_fingerprint() {
        assert_ne!(fingerprint(&leaflet("Before")), fingerprint(&leaflet("After")));
    }
}
