use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// One top-level rule in a stylesheet: its selector text and the full
/// `selector { body }` slice.
#[derive(Debug, Clone, Copy)]
struct Rule<'a> {
    selector: &'a str,
    text: &'a str,
}

/// Loads the raw stylesheet the generator produced for `project`.
///
/// # Errors
///
/// Returns [`Error::Io`] if `<project>.css` is missing or unreadable;
/// a missing stylesheet means the generator broke its output contract.
pub(crate) fn read_generated_css(output_dir: &Path, project: &str) -> Result<String> {
    let path = output_dir.join(format!("{project}.css"));
    fs::read_to_string(&path).map_err(|e| Error::io(&path, e))
}

/// Extracts every icon class of `project` from the stylesheet, in order
/// of first appearance.
///
/// A class is any `.{project}-<tail>:before` selector occurrence with
/// the leading dot and the `:before` suffix stripped. Occurrences are
/// kept as-is: duplicates are not dropped, the order is the stylesheet
/// order, and classes of other projects are excluded. The tail is
/// captured liberally so that a malformed class name reaches the naming
/// validator instead of being silently skipped.
pub(crate) fn extract_class_list(css: &str, project: &str) -> Vec<String> {
    let prefix = format!(".{project}-");
    let mut classes = Vec::new();

    for (idx, _) in css.match_indices(&prefix) {
        let rest = &css[idx + prefix.len()..];
        let tail_end = rest
            .find(|c: char| {
                c.is_whitespace() || matches!(c, ':' | ',' | '.' | '{' | '[' | '>' | '~' | '+' | ')')
            })
            .unwrap_or(rest.len());
        let tail = &rest[..tail_end];

        if !tail.is_empty() && rest[tail_end..].starts_with(":before") {
            classes.push(format!("{project}-{tail}"));
        }
    }

    classes
}

/// Extracts the full text of every top-level rule whose selector starts
/// with `.{project}-`, in stylesheet order.
pub(crate) fn extract_rule_bodies(css: &str, project: &str) -> Vec<String> {
    let prefix = format!(".{project}-");

    scan_rules(css)
        .into_iter()
        .filter(|rule| rule.selector.starts_with(&prefix))
        .map(|rule| rule.text.to_string())
        .collect()
}

/// Minimal CSS rule scanner: selector up to `{`, then a brace-balanced
/// body. Comments and quoted strings are skipped, so a rule containing
/// `}` inside a string or a comment is not truncated.
fn scan_rules(css: &str) -> Vec<Rule<'_>> {
    let bytes = css.as_bytes();
    let mut rules = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if bytes[i] == b'/' && css[i..].starts_with("/*") {
            i = skip_comment(css, i);
            continue;
        }

        let start = i;
        let Some(open) = find_block_open(css, start) else {
            // Block-less statement (`@import ...;` or trailing junk).
            i = match css[start..].find(';') {
                Some(p) => start + p + 1,
                None => bytes.len(),
            };
            continue;
        };

        let (text, next) = match find_block_close(css, open) {
            Some(close) => (&css[start..=close], close + 1),
            // Unterminated rule: runs to end of input.
            None => (&css[start..], bytes.len()),
        };

        rules.push(Rule {
            selector: css[start..open].trim(),
            text,
        });
        i = next;
    }

    rules
}

/// Finds the `{` opening the statement's block, or `None` if a `;` or
/// the end of input comes first.
fn find_block_open(css: &str, from: usize) -> Option<usize> {
    let bytes = css.as_bytes();
    let mut i = from;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => return Some(i),
            b';' => return None,
            b'/' if css[i..].starts_with("/*") => i = skip_comment(css, i),
            _ => i += 1,
        }
    }

    None
}

/// Finds the `}` matching the `{` at `open`, skipping nested blocks,
/// strings and comments.
fn find_block_close(css: &str, open: usize) -> Option<usize> {
    let bytes = css.as_bytes();
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
                i += 1;
            }
            b'"' | b'\'' => i = skip_string(css, i),
            b'/' if css[i..].starts_with("/*") => i = skip_comment(css, i),
            _ => i += 1,
        }
    }

    None
}

/// Returns the index just past the `*/` closing the comment at `from`.
fn skip_comment(css: &str, from: usize) -> usize {
    match css[from + 2..].find("*/") {
        Some(p) => from + 2 + p + 2,
        None => css.len(),
    }
}

/// Returns the index just past the quote closing the string at `from`,
/// honoring backslash escapes.
fn skip_string(css: &str, from: usize) -> usize {
    let bytes = css.as_bytes();
    let quote = bytes[from];
    let mut i = from + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }

    bytes.len()
}
