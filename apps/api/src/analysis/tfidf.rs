//! TF-IDF vectorizer and cosine scorer.
//!
//! The vector space is rebuilt for every call from `{reference} ∪ candidates`, so IDF is
//! relative to the batch being scored. Scoring the same pair inside a different batch
//! gives a different number. There is no fitted state to share between requests.
//!
//! Weighting:
//! - tf = raw term count in the document
//! - idf = ln((1 + n) / (1 + df)) + 1 (smoothed, n = documents in the batch)
//! - only tokens of 2+ characters enter the vocabulary

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::analysis::normalizer::tokens;
use crate::analysis::stopwords::Stopwords;

const MIN_TOKEN_LEN: usize = 2;

/// Pluggable similarity backend. Implement this to swap scoring without touching the
/// pipeline or handlers.
///
/// Carried in `AppState` as `Arc<dyn MatchScorer>`.
pub trait MatchScorer: Send + Sync {
    /// Similarity in `[0, 1]` of each candidate against `reference`, positionally
    /// aligned with `candidates`. Inputs are normalized text.
    fn score(&self, reference: &str, candidates: &[String]) -> Vec<f64>;

    /// Label surfaced in logs.
    fn backend(&self) -> &'static str;
}

/// Batch-relative TF-IDF + cosine similarity.
#[derive(Debug, Clone, Default)]
pub struct TfidfScorer {
    /// Set under the vectorizer-filter policy: these tokens never enter the vocabulary.
    ignore: Option<Arc<Stopwords>>,
}

impl TfidfScorer {
    pub fn new() -> Self {
        Self { ignore: None }
    }

    pub fn ignoring(stopwords: Arc<Stopwords>) -> Self {
        Self {
            ignore: Some(stopwords),
        }
    }

    fn terms<'a>(&self, text: &'a str) -> Vec<&'a str> {
        tokens(text)
            .filter(|t| t.len() >= MIN_TOKEN_LEN)
            .filter(|t| self.ignore.as_ref().map_or(true, |sw| !sw.contains(t)))
            .collect()
    }
}

impl MatchScorer for TfidfScorer {
    fn score(&self, reference: &str, candidates: &[String]) -> Vec<f64> {
        // Reference always sits at index 0.
        let documents: Vec<Vec<&str>> = std::iter::once(reference)
            .chain(candidates.iter().map(String::as_str))
            .map(|doc| self.terms(doc))
            .collect();

        let space = VectorSpace::fit(&documents);
        let vectors: Vec<SparseVector> = documents.iter().map(|d| space.transform(d)).collect();

        let Some((reference_vec, candidate_vecs)) = vectors.split_first() else {
            return vec![0.0; candidates.len()];
        };
        candidate_vecs
            .iter()
            .map(|c| cosine_similarity(reference_vec, c))
            .collect()
    }

    fn backend(&self) -> &'static str {
        "tfidf"
    }
}

type SparseVector = HashMap<usize, f64>;

/// Vocabulary and IDF weights fitted to one batch.
struct VectorSpace {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl VectorSpace {
    fn fit(documents: &[Vec<&str>]) -> Self {
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in documents {
            let mut seen: Vec<&str> = doc.clone();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        Self { vocabulary, idf }
    }

    fn transform(&self, document: &[&str]) -> SparseVector {
        let mut vector = SparseVector::new();
        for term in document {
            if let Some(&index) = self.vocabulary.get(*term) {
                *vector.entry(index).or_insert(0.0) += 1.0;
            }
        }
        for (index, weight) in vector.iter_mut() {
            *weight *= self.idf[*index];
        }
        vector
    }
}

fn norm(v: &SparseVector) -> f64 {
    v.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// `dot(a, b) / (|a| * |b|)`, or 0 when either vector is zero.
fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let (na, nb) = (norm(a), norm(b));
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(i, w)| large.get(i).map(|x| w * x))
        .sum();
    (dot / (na * nb)).clamp(0.0, 1.0)
}

/// Percentage form: `score * 100` rounded to 2 decimal places.
pub fn to_percentage(score: f64) -> f64 {
    (score * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::normalize;

    fn score_texts(reference: &str, candidates: &[&str]) -> Vec<f64> {
        let sw = Stopwords::english();
        let reference = normalize(reference, Some(&sw));
        let candidates: Vec<String> = candidates.iter().map(|c| normalize(c, Some(&sw))).collect();
        TfidfScorer::new().score(&reference, &candidates)
    }

    #[test]
    fn test_identical_text_scores_100() {
        let scores = score_texts(
            "python developer with sql experience",
            &["python developer with sql experience"],
        );
        assert_eq!(to_percentage(scores[0]), 100.0);
    }

    #[test]
    fn test_self_similarity_is_maximal() {
        for doc in ["rust", "distributed systems in rust", "go go go kubernetes"] {
            let scores = TfidfScorer::new().score(doc, &[doc.to_string()]);
            assert!((scores[0] - 1.0).abs() < 1e-9, "self-similarity of {doc:?} was {}", scores[0]);
        }
    }

    #[test]
    fn test_disjoint_vocabularies_score_zero() {
        let scores = score_texts("java backend engineer", &["python frontend designer"]);
        assert_eq!(scores, vec![0.0]);
        assert_eq!(to_percentage(scores[0]), 0.0);
    }

    #[test]
    fn test_empty_documents_score_zero() {
        let scores = TfidfScorer::new().score("", &[String::new(), String::new()]);
        assert_eq!(scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_candidate_scores_zero_without_affecting_others() {
        let scores = TfidfScorer::new().score("rust python", &[String::new(), "rust".to_string()]);
        assert_eq!(scores[0], 0.0);
        assert!(scores[1] > 0.0);
    }

    #[test]
    fn test_no_candidates_yields_no_scores() {
        assert!(TfidfScorer::new().score("rust", &[]).is_empty());
    }

    #[test]
    fn test_single_letter_tokens_ignored() {
        // "c" never enters the vocabulary, so the candidate is a zero vector.
        let scores = TfidfScorer::new().score("c", &["c".to_string()]);
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_scores_stay_attached_to_candidates_when_permuted() {
        let reference = "rust python sql docker";
        let a = "rust python".to_string();
        let b = "sql java".to_string();
        let forward = TfidfScorer::new().score(reference, &[a.clone(), b.clone()]);
        let reversed = TfidfScorer::new().score(reference, &[b, a]);
        assert!((forward[0] - reversed[1]).abs() < 1e-12);
        assert!((forward[1] - reversed[0]).abs() < 1e-12);
    }

    #[test]
    fn test_batch_composition_changes_scores() {
        let reference = "python sql";
        let candidate = "python java".to_string();
        let alone = TfidfScorer::new().score(reference, &[candidate.clone()]);
        let with_other = TfidfScorer::new().score(reference, &[candidate, "sql".to_string()]);
        // IDF is fitted per batch: adding "sql" lowers its rarity and shifts the weights.
        assert!((alone[0] - with_other[0]).abs() > 1e-6);
        assert!((alone[0] - 0.3360).abs() < 1e-3, "got {}", alone[0]);
        assert!((with_other[0] - 0.4283).abs() < 1e-3, "got {}", with_other[0]);
    }

    #[test]
    fn test_decreasing_overlap_ranks_descending() {
        let scores = score_texts(
            "rust python sql docker kubernetes",
            &["rust java", "rust python sql docker", "rust python"],
        );
        assert!(scores[1] > scores[2], "{scores:?}");
        assert!(scores[2] > scores[0], "{scores:?}");
    }

    #[test]
    fn test_vectorizer_filter_ignores_stopwords() {
        let scorer = TfidfScorer::ignoring(Arc::new(Stopwords::english()));
        // Only stopwords are shared, so the documents are orthogonal.
        let scores = scorer.score("the rust and", &["the python and".to_string()]);
        assert_eq!(scores, vec![0.0]);

        let unfiltered = TfidfScorer::new().score("the rust and", &["the python and".to_string()]);
        assert!(unfiltered[0] > 0.0);
    }

    #[test]
    fn test_scores_bounded() {
        let scores = score_texts(
            "senior rust engineer distributed systems",
            &["rust rust rust engineer", "systems", "", "cooking"],
        );
        for s in scores {
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_percentage_rounds_to_two_decimals() {
        assert_eq!(to_percentage(0.123456), 12.35);
        assert_eq!(to_percentage(0.0), 0.0);
        assert_eq!(to_percentage(0.99999999999), 100.0);
    }
}
