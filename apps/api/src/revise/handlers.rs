use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::editor::{DocumentEditor, ReviseError};
use super::section::Section;
use super::sessions::BriefSession;
use crate::compose::BriefContext;
use crate::errors::AppError;
use crate::render::{render_preview, Block};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OpenBriefRequest {
    pub account_id: String,
    pub from_rep_id: String,
    pub to_rep_id: String,
}

#[derive(Debug, Serialize)]
pub struct SectionView {
    pub index: usize,
    pub heading: String,
    pub body: String,
    pub edited: bool,
    pub accepted: bool,
    pub regenerating: bool,
}

impl SectionView {
    fn from_section(index: usize, section: &Section) -> Self {
        Self {
            index,
            heading: section.heading.clone(),
            body: section.body.clone(),
            edited: section.edited,
            accepted: section.accepted,
            regenerating: section.regenerating,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BriefView {
    pub session_id: Uuid,
    pub account_id: String,
    pub sections: Vec<SectionView>,
    pub accepted_sections: usize,
    pub edited_sections: usize,
}

fn brief_view(session_id: Uuid, session: &BriefSession) -> BriefView {
    BriefView {
        session_id,
        account_id: session.account_id.clone(),
        sections: session
            .editor
            .sections()
            .iter()
            .enumerate()
            .map(|(i, s)| SectionView::from_section(i, s))
            .collect(),
        accepted_sections: session.editor.accepted_count(),
        edited_sections: session.editor.edited_count(),
    }
}

/// POST /api/briefs
///
/// Drafts a handoff brief for the account and opens an editing session
/// around it.
pub async fn handle_open_brief(
    State(state): State<AppState>,
    Json(req): Json<OpenBriefRequest>,
) -> Result<Json<BriefView>, AppError> {
    let account = state
        .fixtures
        .account(&req.account_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Account {} not found", req.account_id)))?;
    let from_rep = state
        .fixtures
        .rep(&req.from_rep_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Rep {} not found", req.from_rep_id)))?;
    let to_rep = state
        .fixtures
        .rep(&req.to_rep_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Rep {} not found", req.to_rep_id)))?;

    let ctx = BriefContext {
        account,
        from_rep,
        to_rep,
    };
    let content = state.generator.generate_brief(&ctx).await?;
    let editor = DocumentEditor::from_content(&content);

    let session = BriefSession::new(editor, req.account_id, req.from_rep_id, req.to_rep_id);
    let session_id = state.briefs.open(session);
    info!("Opened brief session {session_id}");

    let view = state
        .briefs
        .with_session(&session_id, |s| brief_view(session_id, s))
        .ok_or_else(|| AppError::NotFound(format!("Brief session {session_id} not found")))?;
    Ok(Json(view))
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Brief session {id} not found"))
}

/// GET /api/briefs/:id
pub async fn handle_get_brief(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BriefView>, AppError> {
    state
        .briefs
        .with_session(&id, |s| brief_view(id, s))
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

#[derive(Debug, Deserialize)]
pub struct EditSectionRequest {
    pub body: String,
}

/// POST /api/briefs/:id/sections/:index/edit
pub async fn handle_edit_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(req): Json<EditSectionRequest>,
) -> Result<Json<BriefView>, AppError> {
    let result = state
        .briefs
        .with_session(&id, |s| {
            s.editor.edit_section(index, &req.body)?;
            Ok::<_, ReviseError>(brief_view(id, s))
        })
        .ok_or_else(|| session_not_found(id))??;
    Ok(Json(result))
}

/// POST /api/briefs/:id/sections/:index/accept
pub async fn handle_accept_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<BriefView>, AppError> {
    let result = state
        .briefs
        .with_session(&id, |s| {
            s.editor.accept_section(index)?;
            Ok::<_, ReviseError>(brief_view(id, s))
        })
        .ok_or_else(|| session_not_found(id))??;
    Ok(Json(result))
}

/// POST /api/briefs/:id/sections/:index/revert
pub async fn handle_revert_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<BriefView>, AppError> {
    let result = state
        .briefs
        .with_session(&id, |s| {
            s.editor.revert_section(index)?;
            Ok::<_, ReviseError>(brief_view(id, s))
        })
        .ok_or_else(|| session_not_found(id))??;
    Ok(Json(result))
}

/// POST /api/briefs/:id/sections/:index/regenerate
///
/// Marks the section busy and spawns the generation task; the rewritten text
/// lands when the task resolves. Responds 202 immediately so the client can
/// poll section state.
pub async fn handle_regenerate_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<StatusCode, AppError> {
    let (heading, body) = state
        .briefs
        .with_session(&id, |s| {
            s.editor.begin_regeneration(index)?;
            let section = &s.editor.sections()[index];
            Ok::<_, ReviseError>((section.heading.clone(), section.body.clone()))
        })
        .ok_or_else(|| session_not_found(id))??;

    let generator = state.generator.clone();
    let sessions = state.briefs.clone();
    let handle = tokio::spawn(async move {
        let text = match generator.regenerate_section(&heading, &body).await {
            Ok(text) => text,
            Err(err) => {
                // Regeneration always resolves; on failure the section keeps
                // its current text and just loses the busy flag.
                warn!("Section regeneration failed: {err}");
                body
            }
        };
        let applied = sessions.with_session(&id, |s| s.editor.complete_regeneration(index, &text));
        match applied {
            Some(Err(err)) => warn!("Could not apply regenerated text: {err}"),
            None => info!("Brief session {id} closed before regeneration finished"),
            Some(Ok(())) => {}
        }
    });
    state.briefs.with_session(&id, |s| s.track_task(handle));

    Ok(StatusCode::ACCEPTED)
}

/// GET /api/briefs/:id/preview
pub async fn handle_preview_brief(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Block>>, AppError> {
    state
        .briefs
        .with_session(&id, |s| render_preview(&s.editor.assemble()))
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

#[derive(Debug, Serialize)]
pub struct SaveBriefResponse {
    pub content: String,
}

/// POST /api/briefs/:id/save
///
/// Reassembles the document and hands the text back to the caller. The
/// session stays open; there is nothing to persist server-side.
pub async fn handle_save_brief(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaveBriefResponse>, AppError> {
    let content = state
        .briefs
        .with_session(&id, |s| s.editor.assemble())
        .ok_or_else(|| session_not_found(id))?;
    info!("Saved brief session {id} ({} bytes)", content.len());
    Ok(Json(SaveBriefResponse { content }))
}

/// DELETE /api/briefs/:id
///
/// Discards the session outright, aborting any regeneration still running.
pub async fn handle_close_brief(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.briefs.close(&id) {
        info!("Closed brief session {id}");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}
