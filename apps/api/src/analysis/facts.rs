//! Best-effort candidate facts pulled from raw (unnormalized) extracted text.
//!
//! Name extraction is a pattern heuristic over the leading text window. It has known false
//! negatives and false positives (a capitalized job title can win when no name is
//! present) and reports no confidence. Callers get `"Candidate"` when nothing plausible
//! is found.

use std::sync::LazyLock;

use regex::Regex;

/// Characters of raw text inspected for a name.
pub const NAME_WINDOW_CHARS: usize = 300;

pub const FALLBACK_NAME: &str = "Candidate";

/// Default summary length in words.
pub const DEFAULT_SUMMARY_WORDS: usize = 50;

/// Two or three consecutive all-caps words of 2+ letters on one line: `JOHN SMITH`.
static UPPERCASE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}(?:[ \t]+[A-Z]{2,}){1,2}\b").expect("valid regex"));

/// One to three consecutive capitalized words on one line: `Jane Doe`.
static CAPITALIZED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){0,2}\b").expect("valid regex")
});

/// A single capitalized word of 3+ characters.
static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Za-z]{2,}\b").expect("valid regex"));

/// Résumé section labels that look like names to the patterns above, with an optional
/// trailing `of`/`for` (`RESUME OF`, `Profile for`).
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:about|address|career|contact|curriculum|cv|details|education|email|experience|name|objective|personal|phone|profile|resume|skills|summary|vitae)\b(?:[ \t]+(?:of|for)\b)?",
    )
    .expect("valid regex")
});

/// Replaces every heading label with a line break so that no run can span it.
fn mask_headings(window: &str) -> String {
    HEADING.replace_all(window, "\n").into_owned()
}

fn first_match(pattern: &Regex, window: &str) -> Option<String> {
    pattern.find(window).map(|m| m.as_str().to_string())
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Probable person name from the first [`NAME_WINDOW_CHARS`] characters of `raw_text`.
///
/// Tried in order: an all-caps run (returned title-cased), a capitalized run, a single
/// capitalized word; otherwise [`FALLBACK_NAME`]. Résumé headings such as `Profile` or
/// `CURRICULUM VITAE` are cut out of the window first, so `RESUME OF JOHN SMITH` yields
/// `John Smith`.
pub fn extract_name(raw_text: &str) -> String {
    let window: String = raw_text.chars().take(NAME_WINDOW_CHARS).collect();
    let window = mask_headings(&window);

    if let Some(run) = first_match(&UPPERCASE_RUN, &window) {
        return run
            .split_whitespace()
            .map(title_case)
            .collect::<Vec<_>>()
            .join(" ");
    }

    first_match(&CAPITALIZED_RUN, &window)
        .or_else(|| first_match(&CAPITALIZED_WORD, &window))
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

/// First `word_limit` whitespace-delimited tokens of `raw_text`, joined by single spaces.
pub fn summarize(raw_text: &str, word_limit: usize) -> String {
    raw_text
        .split_whitespace()
        .take(word_limit)
        .collect::<Vec<_>>()
        .join(" ")
}
