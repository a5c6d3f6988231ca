//! Vocabulary gap analysis: reference terms the candidate never uses.
//!
//! The narrative is gated on whether any gap exists, not on which terms are missing. It
//! is composed from two fixed phrase pools and never names the missing terms; those are
//! returned separately in `missing_terms` for callers that want them.

use std::collections::{BTreeSet, HashSet};

use crate::analysis::normalizer::tokens;
use crate::analysis::stopwords::Stopwords;

pub const ALIGNED_MESSAGE: &str =
    "The resume is well-aligned with the job description. No significant keyword gaps were found.";

/// Shorter tokens are never reported as gaps.
const MIN_GAP_LEN: usize = 4;

/// Words frequent in job postings that say nothing about a skill.
const DOMAIN_NOISE: &[&str] = &[
    "ability", "able", "across", "also", "based", "candidate", "company", "environment",
    "excellent", "experience", "good", "highly", "ideal", "including", "join", "looking",
    "must", "plus", "preferred", "required", "requirements", "responsibilities", "role",
    "seeking", "skills", "strong", "team", "that", "this", "will", "within", "work",
    "working", "years",
];

const CAPABILITY_PHRASES: [&str; 3] = [
    "hands-on exposure to some of the core tools and technologies the role depends on",
    "depth in several of the technical areas the posting emphasizes",
    "evidence of the domain-specific practices listed among the requirements",
];

const PRESENTATION_PHRASES: [&str; 2] = [
    "clearer, quantified descriptions of relevant project outcomes",
    "explicit use of the terminology the job description relies on",
];

/// Outcome of comparing a candidate's vocabulary against the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct GapReport {
    pub aligned: bool,
    pub message: String,
    /// Filtered reference terms absent from the candidate, sorted.
    pub missing_terms: Vec<String>,
}

/// Reference terms missing from the candidate after length and noise filtering.
pub fn missing_terms(
    candidate_normalized: &str,
    reference_normalized: &str,
    stopwords: &Stopwords,
) -> Vec<String> {
    let candidate: HashSet<&str> = tokens(candidate_normalized).collect();
    tokens(reference_normalized)
        .filter(|t| !candidate.contains(t))
        .filter(|t| t.len() >= MIN_GAP_LEN)
        .filter(|t| !stopwords.contains(t) && !DOMAIN_NOISE.contains(t))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Compares normalized candidate text against normalized reference text.
pub fn find_gaps(
    candidate_normalized: &str,
    reference_normalized: &str,
    stopwords: &Stopwords,
) -> GapReport {
    let missing = missing_terms(candidate_normalized, reference_normalized, stopwords);

    if missing.is_empty() {
        return GapReport {
            aligned: true,
            message: ALIGNED_MESSAGE.to_string(),
            missing_terms: missing,
        };
    }

    GapReport {
        aligned: false,
        message: gap_narrative(),
        missing_terms: missing,
    }
}

fn gap_narrative() -> String {
    format!(
        "Compared with the job description, the resume would benefit from {}. \
         It could also be strengthened by {}.",
        join_phrases(&CAPABILITY_PHRASES),
        join_phrases(&PRESENTATION_PHRASES),
    )
}

/// `a`, `a and b`, `a, b, and c`.
fn join_phrases(phrases: &[&str]) -> String {
    match phrases {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}
