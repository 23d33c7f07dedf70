//! Skill Matcher — fuzzy-matches JD requirements against resume content.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::evaluation::fuzzy::{meets_threshold, partial_ratio};
use crate::evaluation::requirements::RequirementRecord;
use crate::evaluation::vocabulary::{IGNORED_SKILL_PREFIX, RESUME_SKILL_SECTIONS};
use crate::extraction::SectionMap;

/// Hard-match signals for one JD/resume pair.
///
/// Scores are clamped to [0, 1] and rounded to two decimals on construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardMatchFeatures {
    must_have_score: f64,
    nice_to_have_score: f64,
    degree_match: bool,
    experience_match: f64,
    missing_must_have: Vec<String>,
    missing_nice_to_have: Vec<String>,
}

impl HardMatchFeatures {
    pub fn new(
        must_have_score: f64,
        nice_to_have_score: f64,
        degree_match: bool,
        experience_match: f64,
        missing_must_have: Vec<String>,
        missing_nice_to_have: Vec<String>,
    ) -> Self {
        Self {
            must_have_score: round_to(must_have_score.clamp(0.0, 1.0), 2),
            nice_to_have_score: round_to(nice_to_have_score.clamp(0.0, 1.0), 2),
            degree_match,
            experience_match: experience_match.clamp(0.0, 1.0),
            missing_must_have,
            missing_nice_to_have,
        }
    }

    pub fn must_have_score(&self) -> f64 {
        self.must_have_score
    }

    pub fn nice_to_have_score(&self) -> f64 {
        self.nice_to_have_score
    }

    pub fn degree_match(&self) -> bool {
        self.degree_match
    }

    pub fn experience_match(&self) -> f64 {
        self.experience_match
    }

    pub fn missing_must_have(&self) -> &[String] {
        &self.missing_must_have
    }

    pub fn missing_nice_to_have(&self) -> &[String] {
        &self.missing_nice_to_have
    }
}

/// Outcome of matching one requirement list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListMatch {
    pub matched: usize,
    pub missing: Vec<String>,
}

impl ListMatch {
    /// `matched / max(total, 1)`; an empty list scores 0.0.
    pub fn score(&self) -> f64 {
        let total = self.matched + self.missing.len();
        self.matched as f64 / total.max(1) as f64
    }
}

/// Compares a JD's requirements against a resume's sections.
pub fn match_requirements(
    requirements: &RequirementRecord,
    resume_sections: &SectionMap,
) -> HardMatchFeatures {
    let resume_skills = extract_resume_skills(resume_sections);
    if resume_skills.is_empty() {
        warn!("resume has no extractable skill lines; hard-match scores will be zero");
    }

    let must = match_list(requirements.must_have(), &resume_skills);
    let nice = match_list(requirements.nice_to_have(), &resume_skills);
    debug!(
        candidates = resume_skills.len(),
        must_matched = must.matched,
        nice_matched = nice.matched,
        "requirements matched"
    );

    let resume_text = resume_sections
        .bodies()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let degree_match = requirements
        .degrees()
        .iter()
        .any(|degree| resume_text.contains(degree.as_str()));

    // Placeholder until resume experience durations are parsed.
    let experience_match = if requirements.years_required() == 0 {
        1.0
    } else {
        0.5
    };

    HardMatchFeatures::new(
        must.score(),
        nice.score(),
        degree_match,
        experience_match,
        must.missing,
        nice.missing,
    )
}

/// Candidate skill lines from the skill-bearing resume sections, lowercased and
/// stripped of bullet punctuation.
pub fn extract_resume_skills(sections: &SectionMap) -> BTreeSet<String> {
    RESUME_SKILL_SECTIONS
        .iter()
        .filter_map(|key| sections.get(key))
        .flat_map(str::lines)
        .map(|line| {
            line.trim_matches(|c: char| c.is_whitespace() || matches!(c, '•' | '-' | '*'))
                .to_lowercase()
        })
        .filter(|line| line.chars().count() > 1 && !line.starts_with(IGNORED_SKILL_PREFIX))
        .collect()
}

/// A requirement matches when any candidate reaches the fuzzy threshold.
pub fn match_list(requirements: &[String], resume_skills: &BTreeSet<String>) -> ListMatch {
    let mut matched = 0;
    let mut missing = Vec::new();

    for requirement in requirements {
        let needle = requirement.to_lowercase();
        let hit = resume_skills
            .iter()
            .any(|skill| meets_threshold(partial_ratio(&needle, skill)));
        if hit {
            matched += 1;
        } else {
            missing.push(requirement.clone());
        }
    }

    ListMatch { matched, missing }
}

/// Rounds half to even, so exact halves such as 0.625 go down to 0.62.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
