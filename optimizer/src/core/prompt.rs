//! Instructional message construction

/// Objective used when the caller supplies no goal.
pub const DEFAULT_GOAL: &str = "Improve clarity, structure, and effectiveness.";

/// Model alias used when the caller supplies none; routes to the default
/// provider.
pub const DEFAULT_MODEL: &str = "gemini-flash";

/// Resolve the goal actually sent upstream: the trimmed caller goal when
/// non-blank, the fixed default otherwise.
pub fn effective_goal(goal: Option<&str>) -> &str {
    match goal.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => DEFAULT_GOAL,
    }
}

/// Build the single instructional message for a structured call, embedding
/// the draft prompt and goal verbatim.
pub fn build_optimization_message(prompt: &str, goal: &str) -> String {
    format!(
        r#"You are a World-Class Prompt Engineer and AI Optimization Specialist.
Your objective is to transform the user's Draft Prompt into a professional, high-performance prompt that yields perfect results.

---
INPUTS:
DRAFT PROMPT: "{prompt}"
OPTIMIZATION GOAL: "{goal}"
---

INSTRUCTIONS:
1. Analyze the Draft Prompt for ambiguity, weak verbs, lack of context, and structural issues.
2. Generate 3 DISTINCT variations that achieve the Optimization Goal with professional excellence:
   - Variation 1: The "Structural Enhancement". Focus on formatting, clear sections, and step-by-step instructions.
   - Variation 2: The "Cognitive Precision". Focus on precise terminology, constraints, and chain-of-thought requirements.
   - Variation 3: The "Creative/Persuasive". Focus on tone, engagement, and compelling language (if relevant to goal).

3. CRITIQUE REQUIREMENTS:
   - Do not just say "Improved clarity." Be specific such as "Replaced passive voice with active commands."
   - The critique must justify WHY this variation is professional and effective.

4. OUTPUT FORMAT:
You must output strict, valid JSON. Do not include markdown naming like ```json.
[
    {{
        "variation": "...",
        "critique": "...",
        "score": 92
    }},
    ...
]
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_goal_falls_back_to_default() {
        assert_eq!(effective_goal(None), DEFAULT_GOAL);
        assert_eq!(effective_goal(Some("")), DEFAULT_GOAL);
        assert_eq!(effective_goal(Some("   ")), DEFAULT_GOAL);
    }

    #[test]
    fn non_blank_goal_is_trimmed() {
        assert_eq!(effective_goal(Some("  be concise  ")), "be concise");
    }

    #[test]
    fn message_embeds_prompt_and_goal_verbatim() {
        let message = build_optimization_message("write a poem", "sound formal");
        assert!(message.contains(r#"DRAFT PROMPT: "write a poem""#));
        assert!(message.contains(r#"OPTIMIZATION GOAL: "sound formal""#));
        assert!(message.contains("Structural Enhancement"));
        assert!(message.contains("Cognitive Precision"));
        assert!(message.contains("Creative/Persuasive"));
    }
}
