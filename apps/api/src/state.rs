use std::sync::Arc;

use crate::compose::TextGenerator;
use crate::fixtures::FixtureStore;
use crate::llm_client::LlmClient;
use crate::revise::sessions::BriefSessions;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Static demo dataset; the only data source behind the directory routes.
    pub fixtures: Arc<FixtureStore>,
    /// Demo auth sessions plus per-session onboarding storage.
    pub sessions: SessionStore,
    /// Open brief editing sessions, one per drafted document.
    pub briefs: BriefSessions,
    /// Pluggable text generation. Default: deterministic mock; an API key
    /// swaps in the LLM-backed implementation at startup.
    pub generator: Arc<dyn TextGenerator>,
    /// Present only when an API key is configured; powers the streaming
    /// email route.
    pub llm: Option<LlmClient>,
}
