//! Suggestion generation — turns missing must-have skills into resume advice.
//!
//! Failures never abort an evaluation: they surface as `Suggestions::failed`,
//! an explicit error marker alongside empty lists.

pub mod prompts;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::LlmClient;
use crate::suggestions::prompts::{
    NO_MISSING_SKILLS, SUGGESTION_PROMPT_TEMPLATE, SUGGESTION_SYSTEM,
};

pub const MAX_PER_SECTION: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    #[serde(default)]
    pub resume_fixes: Vec<String>,
    #[serde(default)]
    pub skills_to_add: Vec<String>,
    #[serde(default)]
    pub experience_suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Suggestions {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Caps each list and strips markdown emphasis the model may leave in.
    fn tidy(self) -> Self {
        Self {
            resume_fixes: tidy_list(self.resume_fixes),
            skills_to_add: tidy_list(self.skills_to_add),
            experience_suggestions: tidy_list(self.experience_suggestions),
            error: self.error,
        }
    }
}

static STRONG_STARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^*\s](?:[^*]*[^*\s])?)\*\*").expect("valid strong pattern")
});
static EMPHASIS_STAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").expect("valid emphasis pattern")
});
// Inner whitespace is required so dunder identifiers like `__init__` are left alone.
static STRONG_UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__([^_\s][^_]*\s[^_]*[^_\s])__").expect("valid underscore pattern")
});
static LEADING_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*•-]\s+").expect("valid bullet pattern"));

/// Unwraps paired markdown emphasis and drops a leading bullet marker.
fn strip_markdown(item: &str) -> String {
    let item = item.trim();
    let item = LEADING_BULLET.replace(item, "");
    let item = STRONG_STARS.replace_all(&item, "$1");
    let item = EMPHASIS_STAR.replace_all(&item, "$1");
    let item = STRONG_UNDERSCORES.replace_all(&item, "$1");
    item.trim().to_string()
}

fn tidy_list(items: Vec<String>) -> Vec<String> {
    items
        .iter()
        .map(|item| strip_markdown(item))
        .filter(|item| !item.is_empty())
        .take(MAX_PER_SECTION)
        .collect()
}

#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    async fn suggest(&self, missing_skills: &[String], role: &str, score: f64) -> Suggestions;
}

/// Builds the user prompt sent to the model.
pub fn build_prompt(missing_skills: &[String], role: &str, score: f64) -> String {
    let missing = if missing_skills.is_empty() {
        NO_MISSING_SKILLS.to_string()
    } else {
        missing_skills.join(", ")
    };
    SUGGESTION_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{score}", &format!("{score:.1}"))
        .replace("{missing_skills}", &missing)
}

/// Suggestions from the LLM client.
pub struct LlmSuggestionGenerator(pub LlmClient);

#[async_trait]
impl SuggestionGenerator for LlmSuggestionGenerator {
    async fn suggest(&self, missing_skills: &[String], role: &str, score: f64) -> Suggestions {
        let prompt = build_prompt(missing_skills, role, score);
        match self.0.call_json::<Suggestions>(&prompt, SUGGESTION_SYSTEM).await {
            Ok(suggestions) => Suggestions {
                error: None,
                ..suggestions
            }
            .tidy(),
            Err(e) => {
                warn!(error = %e, "suggestion generation failed");
                Suggestions::failed(e.to_string())
            }
        }
    }
}

/// Used when no LLM credentials are configured.
pub struct DisabledSuggestions;

#[async_trait]
impl SuggestionGenerator for DisabledSuggestions {
    async fn suggest(&self, _missing_skills: &[String], _role: &str, _score: f64) -> Suggestions {
        Suggestions::failed("suggestion service is not configured")
    }
}
