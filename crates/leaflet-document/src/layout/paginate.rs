// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagination into fixed-capacity pages.

use std::num::NonZeroUsize;

/// Slice `lines` into consecutive pages of at most `capacity` lines.
///
/// A document always has at least one page, so empty input yields a single
/// empty page.
pub fn paginate<T>(lines: &[T], capacity: NonZeroUsize) -> Vec<&[T]> {
    if lines.is_empty() {
        return vec![&lines[..0]];
    }
    lines.chunks(capacity.get()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn empty_input_gives_one_empty_page() {
        let lines: Vec<String> = Vec::new();
        let pages = paginate(&lines, cap(40));
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn splits_85_lines_into_40_40_5() {
        let lines: Vec<usize> = (0..85).collect();
        let pages = paginate(&lines, cap(40));
        let sizes: Vec<usize> = pages.iter().map(|p| p.len()).collect();
        assert_eq!(sizes, vec![40, 40, 5]);
        assert_eq!(pages[2][0], 80);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let lines = vec!["x"; 80];
        assert_eq!(paginate(&lines, cap(40)).len(), 2);
    }
}
