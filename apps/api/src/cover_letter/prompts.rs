// LLM prompt constants for cover letters.

/// Cover letter prompt. Replace `{name}`, `{headline}`, `{skills}`, `{title}`, `{company}`
/// and `{description}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a concise, tailored cover letter.

Rules:
- 2 paragraphs, 70-90 words
- Professional but human tone
- No placeholders or template language
- Focus on relevant skills and experience

Candidate:
Name: {name}
Headline: {headline}
Skills: {skills}

Job:
Title: {title}
Company: {company}
Description: {description}

Write the cover letter:"#;
