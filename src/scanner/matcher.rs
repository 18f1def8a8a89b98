//! Content access and pattern matching helpers
//!
//! All matching is case-sensitive and single-pass per rule per file. Line
//! numbers are 1-indexed, counted by splitting content on newline boundaries.

use regex::Regex;
use std::path::Path;
use tracing::warn;

/// Read a file to a string, or skip it with a warning
///
/// I/O and UTF-8 decode failures are non-fatal: the file is dropped from the
/// scan and remaining files are still processed.
pub fn read_file(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            warn!("Skipping unreadable file {}: {}", path.display(), e);
            None
        }
    }
}

/// Whole-file containment match: does the pattern occur anywhere?
pub fn content_matches(re: &Regex, content: &str) -> bool {
    re.is_match(content)
}

/// All lines matching a pattern, as (1-indexed line number, line) pairs
pub fn matching_lines<'a>(re: &Regex, content: &'a str) -> Vec<(usize, &'a str)> {
    content
        .split('\n')
        .enumerate()
        .filter(|(_, line)| re.is_match(line))
        .map(|(idx, line)| (idx + 1, line))
        .collect()
}

/// All lines containing a literal substring, as (1-indexed line number, line)
pub fn lines_containing<'a>(needle: &str, content: &'a str) -> Vec<(usize, &'a str)> {
    content
        .split('\n')
        .enumerate()
        .filter(|(_, line)| line.contains(needle))
        .map(|(idx, line)| (idx + 1, line))
        .collect()
}
