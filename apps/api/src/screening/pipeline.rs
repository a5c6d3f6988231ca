//! Screening pipeline: extract → normalize → {score, facts, gaps}.
//!
//! One invocation owns all of its working data. Nothing is cached between calls; the
//! scorer fits a fresh vector space per batch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::analysis::facts::{extract_name, summarize};
use crate::analysis::gaps::find_gaps;
use crate::analysis::tfidf::{to_percentage, MatchScorer};
use crate::analysis::TextPolicy;
use crate::config::Config;
use crate::errors::AppError;
use crate::extraction::{extract_text, Document};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// One candidate's position in a ranked screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub name: String,
    pub match_percentage: f64, // 0 – 100, 2 decimals
}

/// A document skipped during a batch screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedDocument {
    pub name: String,
    pub reason: String,
}

/// Multi-candidate result, `results` sorted descending by match percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub scan_id: Uuid,
    pub scanned_at: DateTime<Utc>,
    pub results: Vec<RankedResult>,
    pub rejected: Vec<RejectedDocument>,
    pub scorer_backend: String,
}

/// Single-candidate result with extracted facts and the gap narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: Uuid,
    pub scanned_at: DateTime<Utc>,
    /// Display name of the uploaded document.
    pub name: String,
    pub candidate_name: String,
    pub summary: String,
    pub gap_report: String,
    pub missing_terms: Vec<String>,
    pub match_percentage: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Context
// ────────────────────────────────────────────────────────────────────────────

/// Read-only collaborators for every invocation, built once at startup.
#[derive(Clone)]
pub struct ScreeningContext {
    pub text: TextPolicy,
    pub scorer: Arc<dyn MatchScorer>,
    pub summary_word_limit: usize,
}

impl ScreeningContext {
    pub fn new(text: TextPolicy, summary_word_limit: usize) -> Self {
        let scorer = text.scorer();
        Self {
            text,
            scorer,
            summary_word_limit,
        }
    }

    pub fn from_config(config: &Config, text: TextPolicy) -> Self {
        Self::new(text, config.summary_word_limit)
    }
}

impl Default for ScreeningContext {
    fn default() -> Self {
        Self::new(TextPolicy::default(), Config::default().summary_word_limit)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Rejects the request before any processing when either side is absent.
pub fn validate_inputs(reference: &str, candidate_count: usize) -> Result<(), AppError> {
    if reference.trim().is_empty() {
        return Err(AppError::MissingInput(
            "Please enter a job description".to_string(),
        ));
    }
    if candidate_count == 0 {
        return Err(AppError::MissingInput(
            "Please upload at least one resume".to_string(),
        ));
    }
    Ok(())
}

/// Scores raw candidate texts against a raw reference text. Percentages, aligned with
/// `candidates`.
pub fn score_texts(
    reference: &str,
    candidates: &[String],
    ctx: &ScreeningContext,
) -> Result<Vec<f64>, AppError> {
    validate_inputs(reference, candidates.len())?;

    let reference = ctx.text.normalize(reference);
    let candidates: Vec<String> = candidates.iter().map(|c| ctx.text.normalize(c)).collect();

    Ok(ctx
        .scorer
        .score(&reference, &candidates)
        .into_iter()
        .map(to_percentage)
        .collect())
}

/// One résumé against one job description. Extraction failure is terminal.
pub fn scan(
    reference: &str,
    document: &Document,
    ctx: &ScreeningContext,
) -> Result<ScanReport, AppError> {
    validate_inputs(reference, 1)?;

    let scan_id = Uuid::new_v4();
    let span = info_span!("scan", %scan_id, document = %document.name);
    let _guard = span.enter();

    let raw_text = extract_text(document)?;

    let reference_normalized = ctx.text.normalize(reference);
    let candidate_normalized = ctx.text.normalize(&raw_text);

    let score = ctx
        .scorer
        .score(&reference_normalized, std::slice::from_ref(&candidate_normalized))
        .first()
        .copied()
        .unwrap_or(0.0);

    let gaps = find_gaps(
        &candidate_normalized,
        &reference_normalized,
        &ctx.text.stopwords,
    );

    let aligned = gaps.aligned;
    let report = ScanReport {
        scan_id,
        scanned_at: Utc::now(),
        name: document.name.clone(),
        candidate_name: extract_name(&raw_text),
        summary: summarize(&raw_text, ctx.summary_word_limit),
        gap_report: gaps.message,
        missing_terms: gaps.missing_terms,
        match_percentage: to_percentage(score),
    };

    info!(
        match_percentage = report.match_percentage,
        aligned,
        gaps = report.missing_terms.len(),
        "Scan complete"
    );
    Ok(report)
}

/// Many résumés against one job description, ranked. A document that fails extraction
/// is skipped and reported under `rejected`; the rest are still scored.
pub fn screen(
    reference: &str,
    documents: &[Document],
    ctx: &ScreeningContext,
) -> Result<ScreeningReport, AppError> {
    validate_inputs(reference, documents.len())?;

    let scan_id = Uuid::new_v4();
    let span = info_span!("screen", %scan_id, candidates = documents.len());
    let _guard = span.enter();

    let mut names = Vec::with_capacity(documents.len());
    let mut texts = Vec::with_capacity(documents.len());
    let mut rejected = Vec::new();

    for document in documents {
        match extract_text(document) {
            Ok(raw_text) => {
                names.push(document.name.clone());
                texts.push(ctx.text.normalize(&raw_text));
            }
            Err(e) => {
                warn!(document = %document.name, "Skipping document: {e}");
                rejected.push(RejectedDocument {
                    name: document.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let results = if texts.is_empty() {
        Vec::new()
    } else {
        let reference_normalized = ctx.text.normalize(reference);
        let scores = ctx.scorer.score(&reference_normalized, &texts);
        rank(names, scores)
    };

    info!(
        scored = results.len(),
        rejected = rejected.len(),
        backend = ctx.scorer.backend(),
        "Screen complete"
    );

    Ok(ScreeningReport {
        scan_id,
        scanned_at: Utc::now(),
        results,
        rejected,
        scorer_backend: ctx.scorer.backend().to_string(),
    })
}

/// Pairs names with scores and sorts descending. Ties keep input order.
pub fn rank(names: Vec<String>, scores: Vec<f64>) -> Vec<RankedResult> {
    let mut results: Vec<RankedResult> = names
        .into_iter()
        .zip(scores)
        .map(|(name, score)| RankedResult {
            name,
            match_percentage: to_percentage(score),
        })
        .collect();
    results.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    results
}
