pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::compose::handlers as compose_handlers;
use crate::fixtures;
use crate::recommend::handlers as recommend_handlers;
use crate::revise::handlers as revise_handlers;
use crate::session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Demo sessions + onboarding storage
        .route(
            "/api/session/demo",
            post(session::handle_create_demo_session),
        )
        .route(
            "/api/session/storage/:key",
            get(session::handle_get_storage).put(session::handle_put_storage),
        )
        // Directory data (fixture-backed, read-only)
        .route("/api/accounts", get(fixtures::handle_list_accounts))
        .route("/api/accounts/:id", get(fixtures::handle_get_account))
        .route("/api/reps", get(fixtures::handle_list_reps))
        .route("/api/transitions", get(fixtures::handle_list_transitions))
        // Transition wizard support
        .route(
            "/api/transitions/recommendations",
            post(recommend_handlers::handle_recommendations),
        )
        .route(
            "/api/transitions/assignments/validate",
            post(recommend_handlers::handle_validate_assignments),
        )
        // Brief editing sessions
        .route("/api/briefs", post(revise_handlers::handle_open_brief))
        .route(
            "/api/briefs/:id",
            get(revise_handlers::handle_get_brief).delete(revise_handlers::handle_close_brief),
        )
        .route(
            "/api/briefs/:id/preview",
            get(revise_handlers::handle_preview_brief),
        )
        .route(
            "/api/briefs/:id/save",
            post(revise_handlers::handle_save_brief),
        )
        .route(
            "/api/briefs/:id/sections/:index/edit",
            post(revise_handlers::handle_edit_section),
        )
        .route(
            "/api/briefs/:id/sections/:index/accept",
            post(revise_handlers::handle_accept_section),
        )
        .route(
            "/api/briefs/:id/sections/:index/regenerate",
            post(revise_handlers::handle_regenerate_section),
        )
        .route(
            "/api/briefs/:id/sections/:index/revert",
            post(revise_handlers::handle_revert_section),
        )
        // AI drafting proxy
        .route("/api/ai/email", post(compose_handlers::handle_generate_email))
        .with_state(state)
}
