// Resume analyzer LLM prompt template.
// All prompts for the analyzer module are defined here.

pub const RESUME_ANALYSIS_PROMPT: &str = "\
Analyze the following resume and provide feedback on the following aspects:
1. **Formatting:** Assess the overall layout, readability, and consistency.
2. **Skill Gaps:** Identify any missing skills that are commonly required for the roles mentioned.
3. **Suggestions for Improvement:** Offer actionable advice to enhance the resume's quality and impact.

**Resume Content:**
{resume_text}";

/// Embeds the resume text, unmodified, at the end of the analysis instructions.
pub fn build_prompt(resume_text: &str) -> String {
    RESUME_ANALYSIS_PROMPT.replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_all_three_dimensions() {
        let prompt = build_prompt("Jane Roe");
        assert!(prompt.contains("**Formatting:**"));
        assert!(prompt.contains("**Skill Gaps:**"));
        assert!(prompt.contains("**Suggestions for Improvement:**"));
    }

    #[test]
    fn test_resume_text_is_appended_verbatim() {
        let resume = "John Doe, Software Engineer...\n- Rust, Go\n";
        let prompt = build_prompt(resume);
        assert!(prompt.ends_with(&format!("**Resume Content:**\n{resume}")));
    }

    #[test]
    fn test_placeholder_like_text_in_resume_is_not_expanded() {
        // Only the template's own placeholder is substituted.
        let prompt = build_prompt("Worked on {resume_text} templating");
        assert!(prompt.ends_with("Worked on {resume_text} templating"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt("same input"), build_prompt("same input"));
    }
}
