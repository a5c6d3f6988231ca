// Text analysis: normalization, TF-IDF scoring, fact extraction, gap analysis.
// Everything here is pure and synchronous; callers own the data for one invocation.

pub mod facts;
pub mod gaps;
pub mod normalizer;
pub mod stopwords;
pub mod tfidf;

use std::sync::Arc;

use crate::analysis::stopwords::Stopwords;
use crate::analysis::tfidf::{MatchScorer, TfidfScorer};
use crate::config::StopwordPolicy;

/// Normalization bound to the deployment's stopword policy.
#[derive(Debug, Clone)]
pub struct TextPolicy {
    pub policy: StopwordPolicy,
    pub stopwords: Arc<Stopwords>,
}

impl TextPolicy {
    pub fn new(policy: StopwordPolicy, stopwords: Arc<Stopwords>) -> Self {
        Self { policy, stopwords }
    }

    pub fn normalize(&self, text: &str) -> String {
        match self.policy {
            StopwordPolicy::PreFilter => normalizer::normalize(text, Some(self.stopwords.as_ref())),
            StopwordPolicy::VectorizerFilter => normalizer::normalize(text, None),
        }
    }

    /// The scorer matching this policy.
    pub fn scorer(&self) -> Arc<dyn MatchScorer> {
        match self.policy {
            StopwordPolicy::PreFilter => Arc::new(TfidfScorer::new()),
            StopwordPolicy::VectorizerFilter => {
                Arc::new(TfidfScorer::ignoring(Arc::clone(&self.stopwords)))
            }
        }
    }
}

impl Default for TextPolicy {
    fn default() -> Self {
        Self::new(StopwordPolicy::default(), Arc::new(Stopwords::english()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "Python developer with SQL experience and the drive to learn";
    const RESUME: &str = "Python developer. SQL, Docker; eager to learn the stack";

    #[test]
    fn test_pre_filter_strips_stopwords_upstream() {
        let text = TextPolicy::new(StopwordPolicy::PreFilter, Arc::new(Stopwords::english()));
        assert_eq!(text.normalize("the Python and SQL"), "python sql");
    }

    #[test]
    fn test_vectorizer_filter_keeps_stopwords_in_text() {
        let text = TextPolicy::new(
            StopwordPolicy::VectorizerFilter,
            Arc::new(Stopwords::english()),
        );
        assert_eq!(text.normalize("the Python and SQL"), "the python and sql");
    }

    #[test]
    fn test_both_policies_agree_on_scores() {
        let sw = Arc::new(Stopwords::english());
        let scores: Vec<f64> = [StopwordPolicy::PreFilter, StopwordPolicy::VectorizerFilter]
            .into_iter()
            .map(|policy| {
                let text = TextPolicy::new(policy, Arc::clone(&sw));
                text.scorer()
                    .score(&text.normalize(JD), &[text.normalize(RESUME)])[0]
            })
            .collect();
        assert!((scores[0] - scores[1]).abs() < 1e-12, "{scores:?}");
    }
}
