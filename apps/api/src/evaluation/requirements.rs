//! Requirement Structurer — turns JD text and its sections into a `RequirementRecord`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::evaluation::vocabulary::{
    DEGREE_KEYWORDS, FALLBACK_REQUIREMENT_KEYWORDS, MUST_HAVE_SECTION_MARKERS,
    NICE_TO_HAVE_SECTION_MARKERS, ROLE_NOUNS,
};
use crate::extraction::SectionMap;

pub const MAX_REQUIREMENTS: usize = 20;
pub const MAX_FALLBACK_REQUIREMENTS: usize = 12;
pub const MAX_TITLE_CHARS: usize = 120;
const TITLE_SCAN_LINES: usize = 10;
const DEFAULT_TITLE: &str = "Role";

static YEARS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\+?\s+(?:years?|yrs?)").expect("valid years pattern")
});
static BULLET_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r?\n[-•*]\s+|\r?\n\d+\.\s+").expect("valid bullet pattern")
});

/// Structured requirements of one JD.
///
/// Requirement lists keep discovery order, hold no duplicates and are capped at
/// [`MAX_REQUIREMENTS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementRecord {
    title: String,
    must_have: Vec<String>,
    nice_to_have: Vec<String>,
    years_required: u32,
    degrees: Vec<String>,
}

impl RequirementRecord {
    pub fn new(
        title: impl Into<String>,
        must_have: Vec<String>,
        nice_to_have: Vec<String>,
        years_required: u32,
        degrees: Vec<String>,
    ) -> Self {
        let title: String = title.into();
        Self {
            title: truncate_chars(title.trim(), MAX_TITLE_CHARS),
            must_have: dedup_capped(must_have, MAX_REQUIREMENTS),
            nice_to_have: dedup_capped(nice_to_have, MAX_REQUIREMENTS),
            years_required,
            degrees: dedup_capped(degrees, DEGREE_KEYWORDS.len()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn must_have(&self) -> &[String] {
        &self.must_have
    }

    pub fn nice_to_have(&self) -> &[String] {
        &self.nice_to_have
    }

    pub fn years_required(&self) -> u32 {
        self.years_required
    }

    pub fn degrees(&self) -> &[String] {
        &self.degrees
    }
}

/// Builds the requirement record for a JD.
pub fn structure(raw_text: &str, sections: &SectionMap) -> RequirementRecord {
    let mut must_have = Vec::new();
    let mut nice_to_have = Vec::new();

    for (name, body) in sections.iter() {
        let name = name.to_lowercase();
        if MUST_HAVE_SECTION_MARKERS.iter().any(|m| name.contains(m)) {
            must_have.extend(split_bullets(body));
        }
        if NICE_TO_HAVE_SECTION_MARKERS.iter().any(|m| name.contains(m)) {
            nice_to_have.extend(split_bullets(body));
        }
    }

    if must_have.is_empty() {
        must_have = fallback_requirements(raw_text);
        debug!(
            found = must_have.len(),
            "no must-have section; mined requirement lines"
        );
    }

    RequirementRecord::new(
        extract_title(raw_text),
        must_have,
        nice_to_have,
        extract_years_required(raw_text),
        extract_degrees(raw_text),
    )
}

/// First of the leading lines naming a role, else the first line, else "Role".
pub fn extract_title(raw_text: &str) -> String {
    let role_line = raw_text.lines().take(TITLE_SCAN_LINES).find(|line| {
        let lowered = line.to_lowercase();
        ROLE_NOUNS.iter().any(|noun| lowered.contains(noun))
    });

    match role_line.or_else(|| raw_text.lines().next()) {
        Some(line) => truncate_chars(line.trim(), MAX_TITLE_CHARS),
        None => DEFAULT_TITLE.to_string(),
    }
}

/// Splits a section body into bullet items.
///
/// Items start at `-`, `•`, `*` or `N.` markers at line starts. Marker
/// punctuation and whitespace are trimmed; fragments of one char or less are dropped.
pub fn split_bullets(text: &str) -> Vec<String> {
    BULLET_BOUNDARY
        .split(text)
        .map(|item| item.trim_matches(|c: char| c.is_whitespace() || " -•*.\t".contains(c)))
        .filter(|item| item.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Largest `<N> years` / `<N>+ yrs` figure in the text, 0 when absent.
pub fn extract_years_required(raw_text: &str) -> u32 {
    YEARS_PATTERN
        .captures_iter(raw_text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Degree keywords present anywhere in the text, in vocabulary order.
pub fn extract_degrees(raw_text: &str) -> Vec<String> {
    let lowered = raw_text.to_lowercase();
    DEGREE_KEYWORDS
        .iter()
        .filter(|degree| lowered.contains(*degree))
        .map(|degree| degree.to_string())
        .collect()
}

fn fallback_requirements(raw_text: &str) -> Vec<String> {
    raw_text
        .lines()
        .map(str::trim)
        .filter(|line| {
            let lowered = line.to_lowercase();
            FALLBACK_REQUIREMENT_KEYWORDS
                .iter()
                .any(|kw| lowered.contains(kw))
        })
        .take(MAX_FALLBACK_REQUIREMENTS)
        .map(str::to_string)
        .collect()
}

fn dedup_capped(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len().min(cap));
    for item in items {
        if out.len() == cap {
            break;
        }
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
