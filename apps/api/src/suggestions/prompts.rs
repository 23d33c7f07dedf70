// Prompt constants for resume improvement suggestions.

/// System prompt for suggestion generation — enforces JSON-only output.
pub const SUGGESTION_SYSTEM: &str = "You are an experienced technical recruiter and career coach. \
    You give concrete, actionable advice for improving a resume against a specific role. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Suggestion prompt template. Replace `{role}`, `{score}` and `{missing_skills}` before sending.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"The candidate is applying for a role as {role}.
Their resume received a relevance score of {score}/100.
The following must-have skills were missing: {missing_skills}.

Suggest how they can improve their resume or gain relevant experience to better match the job description.

Return a JSON object with this EXACT schema (no extra fields):
{
  "resume_fixes": ["..."],
  "skills_to_add": ["..."],
  "experience_suggestions": ["..."]
}

Give at most 5 short bullet strings per list."#;

/// Placeholder used in the prompt when no must-have skill is missing.
pub const NO_MISSING_SKILLS: &str = "None explicitly detected";
