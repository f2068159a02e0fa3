use std::collections::HashMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::assignment::{AssignmentError, AssignmentPlan};
use super::scoring::{build_recommendations, candidate_pool, AccountRecommendation};
use crate::errors::AppError;
use crate::models::account::Account;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    pub selected_account_ids: Vec<String>,
    pub departing_rep_id: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<AccountRecommendation>,
    /// Seeded with each account's top candidate; the client may override any
    /// entry before validating.
    pub default_assignments: HashMap<String, String>,
}

/// POST /api/transitions/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(req): Json<RecommendationsRequest>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    if req.selected_account_ids.is_empty() {
        return Err(AppError::Validation(
            "selected_account_ids must not be empty".to_string(),
        ));
    }
    state
        .fixtures
        .rep(&req.departing_rep_id)
        .ok_or_else(|| AppError::NotFound(format!("Rep {} not found", req.departing_rep_id)))?;

    // Resolve accounts in request order; the order feeds the score arithmetic.
    let mut selected: Vec<&Account> = Vec::with_capacity(req.selected_account_ids.len());
    for id in &req.selected_account_ids {
        let account = state
            .fixtures
            .account(id)
            .ok_or_else(|| AppError::NotFound(format!("Account {id} not found")))?;
        selected.push(account);
    }

    let reps = state.fixtures.reps();
    let recommendations = build_recommendations(&selected, &req.departing_rep_id, reps);
    let plan = AssignmentPlan::default_from(&recommendations);

    info!(
        "Scored {} accounts against {} candidates for departing rep {}",
        selected.len(),
        candidate_pool(reps, &req.departing_rep_id).len(),
        req.departing_rep_id
    );

    Ok(Json(RecommendationsResponse {
        recommendations,
        default_assignments: plan.entries().clone(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ValidateAssignmentsRequest {
    pub selected_account_ids: Vec<String>,
    pub departing_rep_id: String,
    pub assignments: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct ValidateAssignmentsResponse {
    pub complete: bool,
    pub assigned: usize,
}

/// POST /api/transitions/assignments/validate
///
/// The gate for moving past the review step. Fails 422 with the unassigned
/// account ids when any selected account lacks an assignment.
pub async fn handle_validate_assignments(
    State(state): State<AppState>,
    Json(req): Json<ValidateAssignmentsRequest>,
) -> Result<Json<ValidateAssignmentsResponse>, AppError> {
    let mut plan = AssignmentPlan::default();
    for (account_id, rep_id) in &req.assignments {
        state
            .fixtures
            .account(account_id)
            .ok_or_else(|| AssignmentError::UnknownAccount(account_id.clone()))?;
        let rep = state
            .fixtures
            .rep(rep_id)
            .ok_or_else(|| AssignmentError::UnknownRep(rep_id.clone()))?;
        plan.assign(account_id, rep, &req.departing_rep_id)?;
    }

    plan.ensure_complete(&req.selected_account_ids)?;

    Ok(Json(ValidateAssignmentsResponse {
        complete: true,
        assigned: plan.len(),
    }))
}
