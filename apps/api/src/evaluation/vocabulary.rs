//! Keyword tables driving the heuristic structuring and matching passes.
//!
//! Extend these tables to widen detection; the matching logic reads them as data.

/// Section headers recognised by the segmenter. A line is a header when its
/// normalized form equals or starts with one of these.
pub const SECTION_HEADERS: &[&str] = &[
    // resume side
    "summary",
    "objective",
    "skills",
    "technical skills",
    "experience",
    "work experience",
    "professional experience",
    "projects",
    "education",
    "certifications",
    "achievements",
    "publications",
    // JD side
    "requirements",
    "responsibilities",
    "key responsibilities",
    "qualifications",
    "preferred qualifications",
    "must have",
    "nice to have",
    "good to have",
];

/// Nouns that mark a line as a plausible job title.
pub const ROLE_NOUNS: &[&str] = &[
    "engineer",
    "developer",
    "analyst",
    "scientist",
    "manager",
    "designer",
];

/// Section-name fragments whose bullets become must-have requirements.
pub const MUST_HAVE_SECTION_MARKERS: &[&str] = &["requirement", "must", "responsibilit"];

/// Section-name fragments whose bullets become nice-to-have requirements.
pub const NICE_TO_HAVE_SECTION_MARKERS: &[&str] =
    &["good", "preferred", "nice", "qualification", "education"];

/// Line keywords mined when no must-have section was found.
pub const FALLBACK_REQUIREMENT_KEYWORDS: &[&str] = &[
    "experience",
    "proficient",
    "hands-on",
    "required",
    "responsibilities",
];

/// Degree keywords, matched as substrings of lowercased text.
pub const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "master", "b.tech", "btech", "m.tech", "mtech", "be", "me", "bsc", "msc", "mca",
];

/// Resume sections mined for candidate skills.
pub const RESUME_SKILL_SECTIONS: &[&str] = &["skills", "technical_skills", "projects", "experience"];

/// Resume sections compared against the JD for semantic similarity, in concatenation order.
pub const SEMANTIC_SECTIONS: &[&str] = &["summary", "experience", "projects"];

/// Resume lines starting with this prefix are never treated as skills.
pub const IGNORED_SKILL_PREFIX: &str = "location";
