use std::convert::Infallible;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Response,
    Json,
};
use futures::StreamExt;
use tracing::{error, info};

use super::EmailRequest;
use crate::errors::AppError;
use crate::llm_client::prompts;
use crate::session;
use crate::state::AppState;

/// POST /api/ai/email
///
/// The one real proxy route: drafts a handoff email and streams it back as
/// plain text. Requires a demo session; every failure surfaces as the same
/// generic 500 body.
pub async fn handle_generate_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<EmailRequest>,
) -> Result<Response, AppError> {
    let token = session::bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    if !state.sessions.authenticate(&token) {
        return Err(AppError::Unauthorized);
    }

    info!("Drafting handoff email for {}", req.account_name);

    let body = match &state.llm {
        Some(llm) => {
            let stream = llm
                .stream(&prompts::email_prompt(&req), prompts::EMAIL_SYSTEM)
                .await
                .map_err(|err| {
                    error!("Email generation stream failed to start: {err}");
                    AppError::EmailGeneration
                })?;
            Body::from_stream(stream.map(Ok::<String, Infallible>))
        }
        None => {
            // Offline mode: draft the whole email with the mock generator
            // and send it as a single chunk.
            let text = state.generator.generate_email(&req).await.map_err(|err| {
                error!("Email generation failed: {err}");
                AppError::EmailGeneration
            })?;
            Body::from(text)
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(body)
        .map_err(|err| AppError::Internal(anyhow::anyhow!("Failed to build response: {err}")))
}
