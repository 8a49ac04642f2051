/// Resume → profile extraction. `{resume_text}` is replaced with the PDF text.
pub const RESUME_EXTRACT_PROMPT: &str = r#"Here is a hackathon participant's resume:

<resume>
{resume_text}
</resume>

Extract the following and respond with JSON matching this schema exactly:
{
  "experience_level": "string",
  "primary_role": "string",
  "secondary_role": "string",
  "primary_skills": ["string"],
  "secondary_skills": ["string"],
  "school": "string or null"
}

Rules:
- primary_role and secondary_role must each be one of: "front-end", "back-end", "data science", "business".
- primary_skills: the 3 strongest languages or tools related to primary_role.
- secondary_skills: 3 other languages or tools related to secondary_role.
- experience_level is experience with attending hackathons, one of: "beginner", "intermediate", "expert".
- Use null for anything the resume does not support."#;
