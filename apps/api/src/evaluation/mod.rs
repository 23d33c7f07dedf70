// Structuring-and-scoring core.
// Segmented JD text becomes a RequirementRecord, the Skill Matcher turns it into
// HardMatchFeatures against a resume, and the Composite Scorer produces the verdict.
// Collaborators (embedder, suggestion service) are injected into the pipeline.

pub mod fuzzy;
pub mod handlers;
pub mod pipeline;
pub mod requirements;
pub mod scoring;
pub mod skill_matcher;
pub mod vocabulary;
