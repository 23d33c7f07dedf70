//! Evaluation pipeline: structure the JD, match the resume, score, then suggest.
//!
//! Collaborator failures are absorbed at this boundary: a failing embedder
//! contributes 0.0 similarity and a failing suggestion service yields an error
//! marker. Only missing document text rejects an evaluation.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::evaluation::requirements::{structure, RequirementRecord};
use crate::evaluation::scoring::{CompositeScorer, Verdict};
use crate::evaluation::skill_matcher::match_requirements;
use crate::extraction::ExtractedDocument;
use crate::suggestions::{SuggestionGenerator, Suggestions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    JobDescription,
    Resume,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::JobDescription => f.write_str("job description"),
            DocumentRole::Resume => f.write_str("resume"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EvaluationError {
    #[error("Failed to extract text from the {0}")]
    ExtractionFailure(DocumentRole),
}

/// Full result of one JD/resume evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub id: Uuid,
    pub jd_title: String,
    pub resume_filename: Option<String>,
    pub score: f64,
    pub verdict: Verdict,
    pub semantic_similarity: f64,
    pub must_have_score: f64,
    pub nice_to_have_score: f64,
    pub degree_match: bool,
    pub experience_match: f64,
    pub missing_must_have: Vec<String>,
    pub missing_nice_to_have: Vec<String>,
    pub suggestions: Suggestions,
    pub evaluated_at: DateTime<Utc>,
}

/// Stateless orchestrator; one instance serves concurrent evaluations.
#[derive(Clone)]
pub struct Evaluator {
    scorer: CompositeScorer,
    suggester: Arc<dyn SuggestionGenerator>,
}

impl Evaluator {
    pub fn new(scorer: CompositeScorer, suggester: Arc<dyn SuggestionGenerator>) -> Self {
        Self { scorer, suggester }
    }

    /// Structures a JD on its own (preview without a resume).
    pub fn structure_jd(&self, jd: &ExtractedDocument) -> Result<RequirementRecord, EvaluationError> {
        require_text(jd, DocumentRole::JobDescription)?;
        Ok(structure(&jd.raw_text, &jd.sections))
    }

    pub async fn evaluate(
        &self,
        jd: &ExtractedDocument,
        resume: &ExtractedDocument,
        resume_filename: Option<String>,
    ) -> Result<Evaluation, EvaluationError> {
        let requirements = self.structure_jd(jd)?;
        require_text(resume, DocumentRole::Resume)?;

        if requirements.must_have().is_empty() {
            warn!(title = requirements.title(), "JD yielded no must-have requirements");
        }
        if requirements.nice_to_have().is_empty() {
            warn!(title = requirements.title(), "JD yielded no nice-to-have requirements");
        }

        if resume.sections.is_empty() {
            warn!("resume has no recognised section headers");
        }

        let features = match_requirements(&requirements, &resume.sections);

        let semantic_similarity = match self
            .scorer
            .semantic_similarity(&jd.raw_text, &resume.sections)
            .await
        {
            Ok(similarity) => similarity,
            Err(e) => {
                warn!(
                    embedder = self.scorer.embedder_name(),
                    error = %e,
                    "embedding failed; semantic similarity set to 0.0"
                );
                0.0
            }
        };

        let result = self.scorer.score(&features, semantic_similarity);
        let suggestions = self
            .suggester
            .suggest(
                features.missing_must_have(),
                requirements.title(),
                result.final_score,
            )
            .await;

        info!(
            title = requirements.title(),
            score = result.final_score,
            verdict = %result.verdict,
            semantic_similarity,
            missing_must_have = features.missing_must_have().len(),
            suggestions_failed = suggestions.is_failed(),
            "evaluation complete"
        );

        Ok(Evaluation {
            id: Uuid::new_v4(),
            jd_title: requirements.title().to_string(),
            resume_filename,
            score: result.final_score,
            verdict: result.verdict,
            semantic_similarity,
            must_have_score: features.must_have_score(),
            nice_to_have_score: features.nice_to_have_score(),
            degree_match: features.degree_match(),
            experience_match: features.experience_match(),
            missing_must_have: features.missing_must_have().to_vec(),
            missing_nice_to_have: features.missing_nice_to_have().to_vec(),
            suggestions,
            evaluated_at: Utc::now(),
        })
    }
}

fn require_text(doc: &ExtractedDocument, role: DocumentRole) -> Result<(), EvaluationError> {
    if doc.has_text() {
        Ok(())
    } else {
        Err(EvaluationError::ExtractionFailure(role))
    }
}
