//! Candidate scoring for account reassignment.
//!
//! The score is a deterministic placeholder standing in for a real
//! suitability model: a small index-derived spread plus a flat bonus when a
//! rep specialty overlaps the account segment. Downstream ranking, the top-3
//! cut, and the default-assignment step all key off this exact arithmetic.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::account::Account;
use crate::models::rep::Rep;

/// Scores never leave this band.
const SCORE_MIN: u32 = 60;
const SCORE_MAX: u32 = 95;
/// How many candidates each account surfaces.
const TOP_CANDIDATES: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One scored candidate for one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepRecommendation {
    pub rep_id: String,
    pub rep_name: String,
    pub score: u32,
    pub specialty_match: bool,
}

/// The ranked shortlist for one selected account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecommendation {
    pub account_id: String,
    pub account_name: String,
    /// Descending by score, at most three entries. Empty when no rep in the
    /// roster is eligible.
    pub recommendations: Vec<RepRecommendation>,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// True when any specialty is a case-insensitive substring of the segment
/// label, or the label a substring of the specialty.
pub fn specialty_match(segment: &str, specialties: &[String]) -> bool {
    let segment = segment.to_lowercase();
    specialties.iter().any(|specialty| {
        let specialty = specialty.to_lowercase();
        segment.contains(&specialty) || specialty.contains(&segment)
    })
}

/// Deterministic candidate score in [SCORE_MIN, SCORE_MAX].
///
/// `rep_index` is the candidate's position in the eligible pool and
/// `account_index` the account's position in the selection; the same inputs
/// always produce the same score.
pub fn score(
    segment: &str,
    specialties: &[String],
    rep_index: usize,
    account_index: usize,
) -> u32 {
    let offset = if specialty_match(segment, specialties) {
        72
    } else {
        55
    };
    let base = (rep_index * 13 + account_index * 7) % 20 + offset;
    (base as u32).clamp(SCORE_MIN, SCORE_MAX)
}

/// Reps eligible to receive accounts: everyone except the departing rep,
/// with capacity left, in roster order.
pub fn candidate_pool<'a>(reps: &'a [Rep], departing_rep_id: &str) -> Vec<&'a Rep> {
    reps.iter()
        .filter(|rep| rep.id != departing_rep_id && rep.remaining_capacity > 0)
        .collect()
}

/// Scores every eligible rep against every selected account and returns each
/// account's ranked shortlist.
pub fn build_recommendations(
    selected: &[&Account],
    departing_rep_id: &str,
    reps: &[Rep],
) -> Vec<AccountRecommendation> {
    let candidates = candidate_pool(reps, departing_rep_id);
    if candidates.is_empty() {
        warn!("No eligible candidates remain besides {departing_rep_id}; shortlists will be empty");
    }

    selected
        .iter()
        .enumerate()
        .map(|(account_index, account)| {
            let segment = account.segment.label();
            let mut scored: Vec<RepRecommendation> = candidates
                .iter()
                .enumerate()
                .map(|(rep_index, rep)| RepRecommendation {
                    rep_id: rep.id.clone(),
                    rep_name: rep.name.clone(),
                    score: score(segment, &rep.specialties, rep_index, account_index),
                    specialty_match: specialty_match(segment, &rep.specialties),
                })
                .collect();

            // Stable sort: equal scores keep roster order.
            scored.sort_by(|a, b| b.score.cmp(&a.score));
            scored.truncate(TOP_CANDIDATES);

            AccountRecommendation {
                account_id: account.id.clone(),
                account_name: account.name.clone(),
                recommendations: scored,
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
