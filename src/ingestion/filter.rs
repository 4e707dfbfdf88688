//! Page filtering: cover/ToC discard and header/footer stripping
//!
//! Header/footer detection needs a full pass over all pages before any page
//! can be emitted, so the filter runs strictly between extraction and
//! continuation merging, producing an immutable filtered-page sequence.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::config::IngestionConfig;
use crate::ingestion::classify::{article_declaration_label, clause_marker_number};
use crate::types::{FilteredPage, Page};

/// Outcome of filtering one document's pages
#[derive(Debug)]
pub struct FilterOutcome {
    /// Surviving pages, original indices preserved (gaps where pages were
    /// discarded)
    pub pages: Vec<FilteredPage>,
    /// Pages dropped: corrupt, cover, or table of contents
    pub pages_skipped: usize,
}

/// Removes non-substantive pages and repeating boilerplate lines
pub struct PageFilter {
    config: IngestionConfig,
}

fn toc_leader_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.{3,}\s*\d+\s*$").expect("valid regex"))
}

fn digit_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("valid regex"))
}

impl PageFilter {
    /// Create a filter with the given thresholds
    pub fn new(config: IngestionConfig) -> Self {
        Self { config }
    }

    /// Filter a full document's pages
    pub fn filter(&self, pages: &[Page]) -> FilterOutcome {
        let boilerplate = self.detect_boilerplate(pages);
        let mut filtered = Vec::with_capacity(pages.len());
        let mut pages_skipped = 0usize;

        for page in pages {
            if page.corrupt {
                tracing::debug!(page = page.index, "Skipping corrupt page");
                pages_skipped += 1;
                continue;
            }

            let text = strip_boilerplate(&page.text, &boilerplate);

            if page.index < self.config.front_matter_pages && self.is_front_matter_noise(&text) {
                tracing::debug!(page = page.index, "Discarding cover/ToC page");
                pages_skipped += 1;
                continue;
            }

            filtered.push(FilteredPage {
                index: page.index,
                text,
            });
        }

        FilterOutcome {
            pages: filtered,
            pages_skipped,
        }
    }

    /// Identify lines repeating verbatim (page numbers normalised) across a
    /// majority of pages
    fn detect_boilerplate(&self, pages: &[Page]) -> HashSet<String> {
        let usable: Vec<&Page> = pages.iter().filter(|p| !p.corrupt).collect();
        if usable.len() < self.config.header_min_pages {
            return HashSet::new();
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        for page in &usable {
            // Count each normalised line at most once per page
            let lines: HashSet<String> =
                page.text.lines().map(normalize_page_numbers).collect();
            for line in lines {
                if !line.is_empty() {
                    *counts.entry(line).or_default() += 1;
                }
            }
        }

        let threshold =
            (usable.len() as f64 * self.config.header_repeat_ratio).ceil() as usize;
        counts
            .into_iter()
            .filter(|(line, count)| *count >= threshold && !is_protected_line(line))
            .map(|(line, _)| line)
            .collect()
    }

    /// Heuristic classifier for title pages and tables of contents.
    ///
    /// Pages containing at least one article or clause marker are never
    /// discarded, regardless of other indicators.
    fn is_front_matter_noise(&self, text: &str) -> bool {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines
            .iter()
            .any(|l| article_declaration_label(l).is_some() || clause_marker_number(l).is_some())
        {
            return false;
        }
        if lines.is_empty() {
            return true;
        }

        if lines
            .iter()
            .any(|l| l.trim().to_uppercase().starts_with("DAFTAR ISI"))
        {
            return true;
        }

        let toc_like = lines
            .iter()
            .filter(|l| toc_leader_re().is_match(l) || l.trim().chars().all(|c| c.is_ascii_digit()))
            .count();
        if toc_like as f64 / lines.len() as f64 >= self.config.toc_line_ratio {
            return true;
        }

        // Title-page shape: a handful of short display lines, none of which
        // read like running prose
        lines.len() <= 10 && !lines.iter().any(|l| l.trim_end().ends_with('.'))
    }
}

/// Replace digit runs so "Halaman 3" and "Halaman 17" compare equal
fn normalize_page_numbers(line: &str) -> String {
    digit_run_re().replace_all(line.trim(), "#").into_owned()
}

/// Article/clause lines never count as boilerplate even if a short document
/// repeats them
fn is_protected_line(normalized: &str) -> bool {
    normalized.starts_with("Pasal #") || normalized.starts_with("(#)")
}

fn strip_boilerplate(text: &str, boilerplate: &HashSet<String>) -> String {
    text.lines()
        .filter(|l| !boilerplate.contains(&normalize_page_numbers(l)))
        .collect::<Vec<_>>()
        .join("\n")
}
