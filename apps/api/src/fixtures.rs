//! Static demo dataset. Every directory route reads from here; nothing in
//! this service writes back. The data is deliberately small and hand-shaped
//! so dashboards, the wizard, and briefs all have something to show.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;

use crate::errors::AppError;
use crate::models::account::{Account, Segment};
use crate::models::rep::Rep;
use crate::models::transition::{Transition, TransitionStage};
use crate::state::AppState;

pub struct FixtureStore {
    accounts: Vec<Account>,
    reps: Vec<Rep>,
    transitions: Vec<Transition>,
}

impl FixtureStore {
    /// The demo dataset used by every environment of this service.
    pub fn demo() -> Self {
        Self {
            accounts: demo_accounts(),
            reps: demo_reps(),
            transitions: demo_transitions(),
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn reps(&self) -> &[Rep] {
        &self.reps
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn rep(&self, id: &str) -> Option<&Rep> {
        self.reps.iter().find(|r| r.id == id)
    }
}

fn account(
    id: &str,
    name: &str,
    segment: Segment,
    industry: &str,
    arr: u64,
    health: u8,
    owner_rep_id: &str,
) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        segment,
        industry: industry.to_string(),
        arr,
        health,
        owner_rep_id: owner_rep_id.to_string(),
    }
}

fn rep(id: &str, name: &str, specialties: &[&str], remaining_capacity: u32) -> Rep {
    Rep {
        id: id.to_string(),
        name: name.to_string(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        remaining_capacity,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("static fixture date")
}

fn demo_accounts() -> Vec<Account> {
    vec![
        account(
            "acct-meridian",
            "Meridian Analytics",
            Segment::Enterprise,
            "Financial Services",
            480_000,
            82,
            "rep-laurent",
        ),
        account(
            "acct-bluepeak",
            "BluePeak Logistics",
            Segment::MidMarket,
            "Transportation",
            195_000,
            67,
            "rep-laurent",
        ),
        account(
            "acct-solstice",
            "Solstice Health",
            Segment::Enterprise,
            "Healthcare",
            610_000,
            58,
            "rep-laurent",
        ),
        account(
            "acct-quartz",
            "Quartz Manufacturing",
            Segment::Commercial,
            "Manufacturing",
            240_000,
            74,
            "rep-tanaka",
        ),
        account(
            "acct-harborline",
            "Harborline Retail",
            Segment::MidMarket,
            "Retail",
            150_000,
            88,
            "rep-laurent",
        ),
        account(
            "acct-nimbus",
            "Nimbus Software",
            Segment::Smb,
            "Technology",
            48_000,
            91,
            "rep-navarro",
        ),
        account(
            "acct-atlasway",
            "Atlasway Insurance",
            Segment::Enterprise,
            "Insurance",
            530_000,
            45,
            "rep-okafor",
        ),
        account(
            "acct-verdant",
            "Verdant Foods",
            Segment::Commercial,
            "Food & Beverage",
            120_000,
            70,
            "rep-laurent",
        ),
    ]
}

fn demo_reps() -> Vec<Rep> {
    vec![
        rep("rep-okafor", "Amara Okafor", &["Enterprise", "FINS"], 3),
        rep(
            "rep-lindqvist",
            "Elsa Lindqvist",
            &["Mid-Market", "Healthcare"],
            5,
        ),
        // Fully booked; stays in the roster but never gets recommended.
        rep("rep-navarro", "Diego Navarro", &["SMB", "Tech"], 0),
        rep(
            "rep-tanaka",
            "Yui Tanaka",
            &["Commercial", "Manufacturing"],
            4,
        ),
        rep(
            "rep-hughes",
            "Morgan Hughes",
            &["Enterprise", "Healthcare"],
            2,
        ),
        rep("rep-laurent", "Camille Laurent", &["Mid-Market", "Retail"], 6),
    ]
}

fn demo_transitions() -> Vec<Transition> {
    vec![
        Transition {
            id: "trn-1087".to_string(),
            account_id: "acct-quartz".to_string(),
            from_rep_id: "rep-tanaka".to_string(),
            to_rep_id: "rep-okafor".to_string(),
            stage: TransitionStage::IntroSent,
            sla_days: 14,
            due_date: date(2026, 8, 21),
        },
        Transition {
            id: "trn-1091".to_string(),
            account_id: "acct-meridian".to_string(),
            from_rep_id: "rep-laurent".to_string(),
            to_rep_id: "rep-okafor".to_string(),
            stage: TransitionStage::BriefDrafted,
            sla_days: 14,
            due_date: date(2026, 8, 28),
        },
        Transition {
            id: "trn-1094".to_string(),
            account_id: "acct-harborline".to_string(),
            from_rep_id: "rep-laurent".to_string(),
            to_rep_id: "rep-lindqvist".to_string(),
            stage: TransitionStage::Planning,
            sla_days: 21,
            due_date: date(2026, 9, 10),
        },
        Transition {
            id: "trn-1060".to_string(),
            account_id: "acct-nimbus".to_string(),
            from_rep_id: "rep-hughes".to_string(),
            to_rep_id: "rep-navarro".to_string(),
            stage: TransitionStage::Completed,
            sla_days: 14,
            due_date: date(2026, 7, 30),
        },
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Directory route handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/accounts
pub async fn handle_list_accounts(State(state): State<AppState>) -> Json<Vec<Account>> {
    Json(state.fixtures.accounts().to_vec())
}

/// GET /api/accounts/:id
pub async fn handle_get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Account>, AppError> {
    state
        .fixtures
        .account(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Account {id} not found")))
}

/// GET /api/reps
pub async fn handle_list_reps(State(state): State<AppState>) -> Json<Vec<Rep>> {
    Json(state.fixtures.reps().to_vec())
}

/// GET /api/transitions
pub async fn handle_list_transitions(State(state): State<AppState>) -> Json<Vec<Transition>> {
    Json(state.fixtures.transitions().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_scores_within_bounds() {
        for account in FixtureStore::demo().accounts() {
            assert!(account.health <= 100, "{} health out of range", account.id);
        }
    }

    #[test]
    fn test_account_owners_resolve() {
        let store = FixtureStore::demo();
        for account in store.accounts() {
            assert!(
                store.rep(&account.owner_rep_id).is_some(),
                "{} owned by unknown rep {}",
                account.id,
                account.owner_rep_id
            );
        }
    }

    #[test]
    fn test_transition_references_resolve() {
        let store = FixtureStore::demo();
        for transition in store.transitions() {
            assert!(store.account(&transition.account_id).is_some());
            assert!(store.rep(&transition.from_rep_id).is_some());
            assert!(store.rep(&transition.to_rep_id).is_some());
        }
    }

    #[test]
    fn test_at_least_one_rep_is_fully_booked() {
        // The wizard's capacity filter needs a rep it can exclude.
        assert!(FixtureStore::demo()
            .reps()
            .iter()
            .any(|r| r.remaining_capacity == 0));
    }

    #[test]
    fn test_ids_are_unique() {
        let store = FixtureStore::demo();
        let mut ids: Vec<&str> = store.accounts().iter().map(|a| a.id.as_str()).collect();
        ids.extend(store.reps().iter().map(|r| r.id.as_str()));
        ids.extend(store.transitions().iter().map(|t| t.id.as_str()));
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
