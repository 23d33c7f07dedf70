//! Composite Scorer — folds hard-match features and semantic similarity into one
//! weighted score with a three-tier verdict.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::embedding::{cosine_similarity, EmbedError, Embedder};
use crate::evaluation::skill_matcher::{round_to, HardMatchFeatures};
use crate::evaluation::vocabulary::SEMANTIC_SECTIONS;
use crate::extraction::SectionMap;

pub const HIGH_THRESHOLD: f64 = 75.0;
pub const MEDIUM_THRESHOLD: f64 = 50.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("weight '{name}' must be a finite, non-negative number (got {value})")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("weights must sum to a positive number")]
    ZeroWeightSum,
}

/// Relative weight of each signal. The score divides by the actual sum, so the
/// weights need not add up to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightConfig {
    must_have: f64,
    nice_to_have: f64,
    degree: f64,
    experience: f64,
    semantic: f64,
}

impl WeightConfig {
    pub fn new(
        must_have: f64,
        nice_to_have: f64,
        degree: f64,
        experience: f64,
        semantic: f64,
    ) -> Result<Self, ConfigError> {
        let named = [
            ("must_have", must_have),
            ("nice_to_have", nice_to_have),
            ("degree", degree),
            ("experience", experience),
            ("semantic", semantic),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }

        let weights = Self {
            must_have,
            nice_to_have,
            degree,
            experience,
            semantic,
        };
        if weights.total() <= 0.0 {
            return Err(ConfigError::ZeroWeightSum);
        }
        Ok(weights)
    }

    pub fn total(&self) -> f64 {
        self.must_have + self.nice_to_have + self.degree + self.experience + self.semantic
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            must_have: 40.0,
            nice_to_have: 10.0,
            degree: 5.0,
            experience: 10.0,
            semantic: 35.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verdict {
    Low,
    Medium,
    High,
}

impl Verdict {
    pub fn from_score(final_score: f64) -> Self {
        if final_score >= HIGH_THRESHOLD {
            Verdict::High
        } else if final_score >= MEDIUM_THRESHOLD {
            Verdict::Medium
        } else {
            Verdict::Low
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::High => "High",
            Verdict::Medium => "Medium",
            Verdict::Low => "Low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    /// 0 – 100, one decimal place.
    pub final_score: f64,
    pub verdict: Verdict,
}

/// Weighted score: `Σ weight × signal / Σ weight × 100`, rounded to one decimal.
pub fn score(
    features: &HardMatchFeatures,
    semantic_similarity: f64,
    weights: &WeightConfig,
) -> ScoreResult {
    let degree_signal = if features.degree_match() { 1.0 } else { 0.0 };
    let raw = weights.must_have * features.must_have_score()
        + weights.nice_to_have * features.nice_to_have_score()
        + weights.degree * degree_signal
        + weights.experience * features.experience_match()
        + weights.semantic * semantic_similarity.clamp(0.0, 1.0);

    let final_score = round_to(raw / weights.total() * 100.0, 1);
    ScoreResult {
        final_score,
        verdict: Verdict::from_score(final_score),
    }
}

/// Resume text compared against the JD: summary, experience and projects bodies
/// in that order, each followed by a newline.
pub fn semantic_resume_text(resume_sections: &SectionMap) -> String {
    SEMANTIC_SECTIONS
        .iter()
        .filter_map(|key| resume_sections.get(key))
        .fold(String::new(), |mut text, body| {
            text.push_str(body);
            text.push('\n');
            text
        })
}

/// Scorer with its embedding collaborator injected.
#[derive(Clone)]
pub struct CompositeScorer {
    weights: WeightConfig,
    embedder: Arc<dyn Embedder>,
}

impl CompositeScorer {
    pub fn new(weights: WeightConfig, embedder: Arc<dyn Embedder>) -> Self {
        Self { weights, embedder }
    }

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    pub fn embedder_name(&self) -> &'static str {
        self.embedder.name()
    }

    /// Cosine similarity of the JD text and the resume's narrative sections,
    /// clamped to [0, 1] and rounded to three decimals.
    ///
    /// Returns 0.0 without calling the embedder when the resume has no
    /// summary, experience or projects text.
    pub async fn semantic_similarity(
        &self,
        jd_text: &str,
        resume_sections: &SectionMap,
    ) -> Result<f64, EmbedError> {
        let resume_text = semantic_resume_text(resume_sections);
        if resume_text.trim().is_empty() {
            debug!("resume has no narrative sections; semantic similarity is 0.0");
            return Ok(0.0);
        }

        let jd_vector = self.embedder.embed(jd_text).await?;
        let resume_vector = self.embedder.embed(&resume_text).await?;
        let similarity = cosine_similarity(&jd_vector, &resume_vector).clamp(0.0, 1.0);
        Ok(round_to(similarity, 3))
    }

    pub fn score(&self, features: &HardMatchFeatures, semantic_similarity: f64) -> ScoreResult {
        score(features, semantic_similarity, &self.weights)
    }
}
