// Prompt templates for every classifier task the pipeline issues.
// Placeholders ({like_this}) are filled from the task payload.

pub const TASK_CATEGORIZE_SKILLS: &str = "categorize_skills";
pub const TASK_EXTRACT_CONTACT: &str = "extract_contact";
pub const TASK_EXTRACT_EXPERIENCE: &str = "extract_experience";
pub const TASK_EXTRACT_EDUCATION: &str = "extract_education";

pub const SKILLS_SYSTEM: &str = "\
You are a precise resume skill classifier. \
Bucket the skills found in the input text into the requested arrays. \
You MUST respond with valid JSON only — no markdown fences, no explanations. \
Never invent skills that are not present in the input.";

pub const SKILLS_PROMPT: &str = r#"Classify every skill mentioned in the following resume text.

INPUT TEXT:
{skills_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "technical": [{"name": "string", "category": "programming" | "database" | "cloud" | "devops" | "frontend" | "backend" | "mobile" | "other", "proficiency": "string" | null, "years_of_experience": number | null}],
  "soft": ["string"],
  "frameworks": ["string"],
  "languages": ["string"],
  "tools": ["string"],
  "certifications": ["string"]
}

RULES:
1. A skill may appear in both "technical" and one of the flat arrays (e.g. JavaScript in "languages").
2. Use "other" when no category fits. Do not invent new categories.
3. Return ONLY the JSON object — nothing else."#;

pub const CONTACT_SYSTEM: &str = "\
You are a precise resume contact extractor. \
Return only fields that literally appear in the input. \
You MUST respond with valid JSON only — no markdown fences, no explanations.";

pub const CONTACT_PROMPT: &str = r#"Extract contact details from the top of this resume.

INPUT TEXT:
{contact_text}

OUTPUT SCHEMA (return exactly this structure, null for absent fields):
{
  "name": "string" | null,
  "email": "string" | null,
  "phone": "string" | null,
  "location": "string" | null,
  "linkedin": "string" | null,
  "github": "string" | null,
  "website": "string" | null,
  "summary": "string" | null
}

Return ONLY the JSON object — nothing else."#;

pub const EXPERIENCE_SYSTEM: &str = "\
You are a precise resume experience extractor. \
Extract roles, companies, and industries exactly as stated — never inflate titles. \
You MUST respond with valid JSON only — no markdown fences, no explanations.";

pub const EXPERIENCE_PROMPT: &str = r#"Extract work experience from the following resume text.

INPUT TEXT:
{experience_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "roles": [{"title": "string", "company": "string", "duration": "string", "responsibilities": ["string"]}],
  "companies": ["string"],
  "industries": ["string"]
}

RULES:
1. Use "Unknown" for a company or duration you cannot determine.
2. Do not compute or return total years — that is derived downstream.
3. Return ONLY the JSON object — nothing else."#;

pub const EDUCATION_SYSTEM: &str = "\
You are a precise resume education extractor. \
You MUST respond with valid JSON only — no markdown fences, no explanations.";

pub const EDUCATION_PROMPT: &str = r#"Extract education entries from the following resume text.

INPUT TEXT:
{education_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "entries": [{
    "institution": "string",
    "degree": "string",
    "field": "string" | null,
    "start_date": "string" | null,
    "end_date": "string" | null,
    "gpa": number | null,
    "achievements": ["string"]
  }]
}

RULES:
1. Use "Unknown" for an institution you cannot determine.
2. Dates may be plain years ("2019").
3. Return ONLY the JSON object — nothing else."#;

/// Resolves a task name to its (system, prompt template) pair.
pub fn template_for(task: &str) -> Option<(&'static str, &'static str)> {
    match task {
        TASK_CATEGORIZE_SKILLS => Some((SKILLS_SYSTEM, SKILLS_PROMPT)),
        TASK_EXTRACT_CONTACT => Some((CONTACT_SYSTEM, CONTACT_PROMPT)),
        TASK_EXTRACT_EXPERIENCE => Some((EXPERIENCE_SYSTEM, EXPERIENCE_PROMPT)),
        TASK_EXTRACT_EDUCATION => Some((EDUCATION_SYSTEM, EDUCATION_PROMPT)),
        _ => None,
    }
}
