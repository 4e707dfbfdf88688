//! Line classification for regulation text
//!
//! Each predicate is pure and independently testable; `classify_line`
//! evaluates them in fixed precedence order: article declaration, clause
//! marker, section header, continuation.

use regex::Regex;
use std::sync::OnceLock;

/// Classification of a line of regulation text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// An article declaration, e.g. "Pasal 14 Rencana Studi Semester".
    /// Carries the full heading label.
    ArticleDeclaration(String),
    /// A clause marker at line start, e.g. "(2) Batas maksimum SKS..."
    ClauseMarker(u32),
    /// An all-caps section or chapter header, e.g. "BAB II KETENTUAN UMUM"
    SectionHeader,
    /// Ordinary running text, including mid-sentence continuations
    Continuation,
}

fn article_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Pasal\s+\d+\b").expect("valid regex"))
}

fn clause_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\((\d+)\)").expect("valid regex"))
}

/// Extract the article heading label if the line is an article declaration
/// (keyword + number, optionally followed by a title on the same line)
pub fn article_declaration_label(line: &str) -> Option<String> {
    let line = line.trim();
    if article_re().is_match(line) {
        Some(line.to_string())
    } else {
        None
    }
}

/// Extract the clause number if the line starts with a `(n)` marker.
/// Markers are only honoured at line start; `(1)` embedded in running text
/// is ignored.
pub fn clause_marker_number(line: &str) -> Option<u32> {
    clause_re()
        .captures(line.trim_start())
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Whether the line is an all-caps section/chapter header of at least
/// `min_len` characters (uppercase letters and spaces only)
pub fn is_section_header(line: &str, min_len: usize) -> bool {
    let line = line.trim();
    line.chars().count() >= min_len
        && line.chars().any(|c| c.is_alphabetic())
        && line
            .chars()
            .all(|c| c.is_whitespace() || (c.is_alphabetic() && c.is_uppercase()))
}

/// Classify a line with fixed predicate precedence
pub fn classify_line(line: &str, section_header_min_len: usize) -> LineClass {
    if let Some(label) = article_declaration_label(line) {
        return LineClass::ArticleDeclaration(label);
    }
    if let Some(number) = clause_marker_number(line) {
        return LineClass::ClauseMarker(number);
    }
    if is_section_header(line, section_header_min_len) {
        return LineClass::SectionHeader;
    }
    LineClass::Continuation
}

/// Whether a line classified as continuation could not be confidently
/// classified: it starts with an uppercase letter, so it might also be the
/// opening of a new section. The merge policy still treats it as
/// continuation (prefer merging over truncating a clause), but callers
/// count these occurrences.
pub fn is_ambiguous_continuation(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() && c.is_uppercase())
}
