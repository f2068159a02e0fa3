//! Text generation behind an injectable strategy.
//!
//! The section/assignment state machines never know which backend produced
//! their text: the service boots on the deterministic mock and swaps in the
//! LLM-backed implementation when an API key is configured.

pub mod handlers;
pub mod templates;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{prompts, LlmClient};
use crate::models::account::Account;
use crate::models::rep::Rep;

/// Inputs for drafting a handoff brief.
#[derive(Debug, Clone)]
pub struct BriefContext {
    pub account: Account,
    pub from_rep: Rep,
    pub to_rep: Rep,
}

/// Requested register for a drafted email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailTone {
    #[default]
    Professional,
    Warm,
    Concise,
}

/// Fields accepted by the email drafting surface.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailRequest {
    pub account_name: String,
    pub contact_name: String,
    pub contact_title: String,
    pub from_owner: String,
    pub to_owner: String,
    pub brief_summary: String,
    #[serde(default)]
    pub tone: EmailTone,
}

/// The text generation strategy. Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_brief(&self, ctx: &BriefContext) -> Result<String, AppError>;
    async fn generate_email(&self, req: &EmailRequest) -> Result<String, AppError>;
    async fn regenerate_section(&self, heading: &str, body: &str) -> Result<String, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// MockTextGenerator — default, fully offline
// ────────────────────────────────────────────────────────────────────────────

/// Simulated generation latency. Long enough that the busy flag is
/// observable, short enough not to drag the demo.
const MOCK_LATENCY: Duration = Duration::from_millis(650);

/// Deterministic template-backed generator. Same inputs, same text, no
/// network.
pub struct MockTextGenerator;

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate_brief(&self, ctx: &BriefContext) -> Result<String, AppError> {
        tokio::time::sleep(MOCK_LATENCY).await;
        Ok(templates::render_brief(ctx))
    }

    async fn generate_email(&self, req: &EmailRequest) -> Result<String, AppError> {
        tokio::time::sleep(MOCK_LATENCY).await;
        Ok(templates::render_email(req))
    }

    async fn regenerate_section(&self, heading: &str, body: &str) -> Result<String, AppError> {
        tokio::time::sleep(MOCK_LATENCY).await;
        Ok(templates::refine_section(heading, body))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmTextGenerator — real backend
// ────────────────────────────────────────────────────────────────────────────

/// LLM-backed generator. All calls go through the single `LlmClient`.
pub struct LlmTextGenerator {
    llm: LlmClient,
}

impl LlmTextGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    async fn call_text(&self, prompt: &str, system: &str, what: &str) -> Result<String, AppError> {
        let response = self
            .llm
            .call(prompt, system)
            .await
            .map_err(|e| AppError::Llm(format!("{what} failed: {e}")))?;
        response
            .text()
            .map(str::to_owned)
            .ok_or_else(|| AppError::Llm(format!("{what} returned empty content")))
    }
}

#[async_trait]
impl TextGenerator for LlmTextGenerator {
    async fn generate_brief(&self, ctx: &BriefContext) -> Result<String, AppError> {
        self.call_text(
            &prompts::brief_prompt(ctx),
            prompts::BRIEF_SYSTEM,
            "Brief generation",
        )
        .await
    }

    async fn generate_email(&self, req: &EmailRequest) -> Result<String, AppError> {
        self.call_text(
            &prompts::email_prompt(req),
            prompts::EMAIL_SYSTEM,
            "Email generation",
        )
        .await
    }

    async fn regenerate_section(&self, heading: &str, body: &str) -> Result<String, AppError> {
        self.call_text(
            &prompts::section_prompt(heading, body),
            prompts::BRIEF_SYSTEM,
            "Section regeneration",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::Segment;

    fn ctx() -> BriefContext {
        BriefContext {
            account: Account {
                id: "acct-1".to_string(),
                name: "Meridian Analytics".to_string(),
                segment: Segment::Enterprise,
                industry: "Financial Services".to_string(),
                arr: 480_000,
                health: 82,
                owner_rep_id: "rep-from".to_string(),
            },
            from_rep: Rep {
                id: "rep-from".to_string(),
                name: "Camille Laurent".to_string(),
                specialties: vec!["Mid-Market".to_string()],
                remaining_capacity: 6,
            },
            to_rep: Rep {
                id: "rep-to".to_string(),
                name: "Amara Okafor".to_string(),
                specialties: vec!["Enterprise".to_string()],
                remaining_capacity: 3,
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_brief_resolves_after_simulated_delay() {
        let generator = MockTextGenerator;
        let brief = generator.generate_brief(&ctx()).await.unwrap();
        assert!(brief.contains("Meridian Analytics"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_regeneration_appends_content() {
        let generator = MockTextGenerator;
        let body = "Existing risk commentary.";
        let regenerated = generator
            .regenerate_section("## Risks", body)
            .await
            .unwrap();
        assert_ne!(regenerated, body);
        assert!(regenerated.starts_with(body));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_generation_is_deterministic() {
        let generator = MockTextGenerator;
        let first = generator.generate_brief(&ctx()).await.unwrap();
        let second = generator.generate_brief(&ctx()).await.unwrap();
        assert_eq!(first, second);
    }
}
