// All LLM prompt constants for the intake pipeline.
// Each module that makes inference calls keeps its prompts alongside it.

/// System prompt for profile extraction — enforces JSON-only output.
pub const PROFILE_SYSTEM: &str =
    "You are an expert technical recruiter analyzing a candidate's resume. \
    Extract structured profile information from the resume text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Profile extraction prompt template. Replace `{resume_text}` before sending.
pub const PROFILE_PROMPT_TEMPLATE: &str = r#"Extract a structured profile from the resume below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "Two-sentence narrative of the candidate's background",
  "skills": ["Go", "PostgreSQL"],
  "experience": [
    "Senior Engineer at Acme (2019-2024): led the payments platform"
  ],
  "raw_text": ""
}

Rules:
- "skills": concrete technologies, languages, and tools, in the order they
  appear. No soft skills.
- "experience": one entry per role or project, most recent first.
- "summary": factual, grounded in the resume text only. Do NOT invent
  employers, titles, or dates.
- Leave "raw_text" empty.

RESUME:
{resume_text}"#;

/// System prompt for fit scoring — enforces JSON-only output.
pub const FIT_SYSTEM: &str =
    "You are an expert technical recruiter assessing how well a candidate's \
    resume matches a job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Fit scoring prompt template.
/// Replace `{job_description}` and `{resume_text}` before sending.
pub const FIT_PROMPT_TEMPLATE: &str = r#"Score how well the resume below matches the job description.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 75,
  "strengths": ["Direct Go experience on distributed systems"],
  "gaps": ["No Kubernetes exposure mentioned"],
  "notes": "One short paragraph of assessment"
}

Rules:
- "score" is an integer from 0 to 100. 0 = no overlap, 100 = ideal match.
- Base strengths and gaps only on what the resume and job description say.
- Keep "notes" under 60 words.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}"#;
