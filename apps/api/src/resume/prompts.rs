// LLM prompt constants for resume profile extraction.

/// Profile extraction prompt. Replace `{resume_text}` before sending.
pub const PROFILE_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract the following from this resume and return ONLY valid JSON:

1. name: Full name of the candidate
2. headline: Current job title or professional headline
3. skills: List of 8-15 SPECIFIC, SEARCHABLE professional skills
4. industry: The primary industry/domain (e.g. "fintech", "e-commerce", "healthcare")
5. search_terms: 3-5 job title variations this person would search for on job boards

SKILLS RULES:
- Extract DOMAIN-SPECIFIC skills, NOT generic ones
- GOOD: "payment gateway integration", "UPI services", "merchant onboarding", "digital payments"
- BAD: "ai modules", "api mappings", "modules" (too vague)
- Include specific tools/platforms: "Salesforce", "JIRA", "SAP"
- DO NOT include soft skills or generic office tools
- Each skill should realistically appear in a job posting

SEARCH_TERMS: job TITLES the person would search for, not skills.

Return ONLY: {"name": "...", "headline": "...", "skills": [...], "industry": "...", "search_terms": [...]}

{json_only}

Resume text:
{resume_text}

JSON:"#;
