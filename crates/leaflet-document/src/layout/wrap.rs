// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Greedy word wrapping with list-marker indentation.

use std::sync::LazyLock;

use regex::Regex;

use super::normalize::normalize_ascii;

/// Leading bullet (`- `, `* `) or numbered (`12. `) marker, after optional
/// whitespace. Nothing else counts as indentation.
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:- |\* |[0-9]+\. )").expect("valid list marker regex"));

/// Wrap one source line so no output line exceeds `max_chars` characters.
///
/// The line is ASCII-normalised first. Short lines come back as-is. Longer
/// lines keep any list marker as an indent on every continuation; words are
/// packed greedily and a word longer than the limit is kept whole on its own
/// line rather than split.
pub fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let normalized = normalize_ascii(line);
    if normalized.is_empty() || char_len(&normalized) <= max_chars {
        return vec![normalized];
    }

    let indent = LIST_MARKER
        .find(&normalized)
        .map_or("", |m| m.as_str());
    let rest = normalized[indent.len()..].trim();

    let mut lines = Vec::new();
    let mut current = indent.to_string();

    for word in rest.split_whitespace() {
        let at_indent = current == indent;
        let candidate_len = if at_indent {
            char_len(indent) + char_len(word)
        } else {
            char_len(&current) + 1 + char_len(word)
        };

        if candidate_len > max_chars && !at_indent {
            lines.push(std::mem::replace(&mut current, format!("{indent}{word}")));
            continue;
        }
        if !at_indent {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.trim().is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(normalized.chars().take(max_chars).collect());
    }
    lines
}

/// Wrap every line in order and flatten the result.
pub fn wrap_lines<S: AsRef<str>>(lines: &[S], max_chars: usize) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| wrap_line(line.as_ref(), max_chars))
        .collect()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
