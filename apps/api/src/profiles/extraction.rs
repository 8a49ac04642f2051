//! Resume extraction: turns an uploaded PDF into profile fields.
//!
//! `AppState` holds an `Arc<dyn ProfileExtractor>`; the default backend asks the LLM.

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::matching::bucketizer::RoleBucket;
use crate::matching::profile::ExperienceLevel;
use crate::profiles::models::ExtractedProfile;
use crate::profiles::prompts::RESUME_EXTRACT_PROMPT;

/// Skills kept per list; the prompt asks for three.
const MAX_SKILLS_PER_LIST: usize = 3;

#[async_trait]
pub trait ProfileExtractor: Send + Sync {
    async fn extract(&self, resume_text: &str) -> Result<ExtractedProfile, AppError>;
}

pub struct LlmProfileExtractor(pub LlmClient);

#[async_trait]
impl ProfileExtractor for LlmProfileExtractor {
    async fn extract(&self, resume_text: &str) -> Result<ExtractedProfile, AppError> {
        let prompt = RESUME_EXTRACT_PROMPT.replace("{resume_text}", resume_text);
        let extracted: ExtractedProfile = self
            .0
            .call_json(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Resume extraction failed: {e}")))?;

        let extracted = extracted.sanitized();
        info!(
            primary_role = ?extracted.primary_role,
            experience_level = ?extracted.experience_level,
            "extracted profile from resume"
        );
        Ok(extracted)
    }
}

impl ExtractedProfile {
    /// Canonicalises roles and level; values the engine cannot use become `None`.
    pub fn sanitized(self) -> Self {
        let role = |r: Option<String>| {
            r.as_deref()
                .and_then(RoleBucket::from_role)
                .map(|b| b.as_str().to_string())
        };
        let skills = |list: Vec<String>| {
            list.into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .take(MAX_SKILLS_PER_LIST)
                .collect()
        };

        ExtractedProfile {
            experience_level: self
                .experience_level
                .as_deref()
                .and_then(ExperienceLevel::parse)
                .map(|l| l.as_str().to_string()),
            primary_role: role(self.primary_role),
            secondary_role: role(self.secondary_role),
            primary_skills: skills(self.primary_skills),
            secondary_skills: skills(self.secondary_skills),
            school: self.school.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Pulls plain text out of an uploaded PDF.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;
    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}
