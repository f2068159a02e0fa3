//! Account-to-rep choices for one transition workflow.
//!
//! Defaults come from each account's top recommendation; every entry stays
//! user-overridable. The workflow may only move past review once every
//! selected account has an assignment, checked per account rather than by
//! comparing counts (an account with an empty shortlist would otherwise
//! block, or slip through, silently).

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use super::scoring::AccountRecommendation;
use crate::models::rep::Rep;

#[derive(Debug, Error, PartialEq)]
pub enum AssignmentError {
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Unknown rep: {0}")]
    UnknownRep(String),

    #[error("Rep {0} is the departing owner and cannot receive reassigned accounts")]
    DepartingRep(String),

    #[error("{} selected account(s) have no assignment", .0.len())]
    Unassigned(Vec<String>),
}

#[derive(Debug, Default, Clone)]
pub struct AssignmentPlan {
    assignments: HashMap<String, String>,
}

impl AssignmentPlan {
    /// Seeds the plan with each account's top-ranked candidate. Accounts
    /// with an empty shortlist get no entry and must be assigned manually.
    pub fn default_from(recommendations: &[AccountRecommendation]) -> Self {
        let mut plan = Self::default();
        for rec in recommendations {
            if let Some(top) = rec.recommendations.first() {
                plan.assignments
                    .insert(rec.account_id.clone(), top.rep_id.clone());
            }
        }
        plan
    }

    /// Unconditionally replaces the account's assignment. Manual choices may
    /// come from the full roster; capacity gates recommendations, not
    /// overrides.
    pub fn assign(
        &mut self,
        account_id: &str,
        rep: &Rep,
        departing_rep_id: &str,
    ) -> Result<(), AssignmentError> {
        if rep.id == departing_rep_id {
            return Err(AssignmentError::DepartingRep(rep.id.clone()));
        }
        if rep.remaining_capacity == 0 {
            warn!(
                "Assigning {account_id} to {} despite zero remaining capacity",
                rep.id
            );
        }
        self.assignments
            .insert(account_id.to_string(), rep.id.clone());
        Ok(())
    }

    pub fn get(&self, account_id: &str) -> Option<&str> {
        self.assignments.get(account_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn entries(&self) -> &HashMap<String, String> {
        &self.assignments
    }

    /// Selected accounts still lacking an assignment, in selection order.
    pub fn missing_assignments(&self, selected: &[String]) -> Vec<String> {
        selected
            .iter()
            .filter(|id| !self.assignments.contains_key(*id))
            .cloned()
            .collect()
    }

    /// The review-step gate: every selected account must be assigned.
    pub fn ensure_complete(&self, selected: &[String]) -> Result<(), AssignmentError> {
        let missing = self.missing_assignments(selected);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AssignmentError::Unassigned(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::scoring::RepRecommendation;

    fn make_rep(id: &str, capacity: u32) -> Rep {
        Rep {
            id: id.to_string(),
            name: format!("Rep {id}"),
            specialties: vec![],
            remaining_capacity: capacity,
        }
    }

    fn rec(account_id: &str, rep_ids: &[&str]) -> AccountRecommendation {
        AccountRecommendation {
            account_id: account_id.to_string(),
            account_name: format!("Account {account_id}"),
            recommendations: rep_ids
                .iter()
                .enumerate()
                .map(|(i, id)| RepRecommendation {
                    rep_id: id.to_string(),
                    rep_name: format!("Rep {id}"),
                    score: 90 - i as u32,
                    specialty_match: false,
                })
                .collect(),
        }
    }

    fn selected(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_default_from_takes_top_candidate() {
        let plan = AssignmentPlan::default_from(&[
            rec("acct-1", &["rep-a", "rep-b"]),
            rec("acct-2", &["rep-c"]),
        ]);
        assert_eq!(plan.get("acct-1"), Some("rep-a"));
        assert_eq!(plan.get("acct-2"), Some("rep-c"));
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_default_skips_empty_shortlists() {
        let plan = AssignmentPlan::default_from(&[rec("acct-1", &[])]);
        assert!(plan.is_empty());
        assert_eq!(plan.get("acct-1"), None);
    }

    #[test]
    fn test_assign_replaces_existing_entry() {
        let mut plan = AssignmentPlan::default_from(&[rec("acct-1", &["rep-a"])]);
        plan.assign("acct-1", &make_rep("rep-b", 2), "rep-x").unwrap();
        assert_eq!(plan.get("acct-1"), Some("rep-b"));
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_assign_rejects_departing_rep() {
        let mut plan = AssignmentPlan::default();
        let err = plan
            .assign("acct-1", &make_rep("rep-x", 2), "rep-x")
            .unwrap_err();
        assert_eq!(err, AssignmentError::DepartingRep("rep-x".to_string()));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_assign_allows_fully_booked_rep_as_override() {
        let mut plan = AssignmentPlan::default();
        plan.assign("acct-1", &make_rep("rep-a", 0), "rep-x").unwrap();
        assert_eq!(plan.get("acct-1"), Some("rep-a"));
    }

    #[test]
    fn test_missing_assignments_lists_unassigned_in_order() {
        let plan = AssignmentPlan::default_from(&[rec("acct-2", &["rep-a"])]);
        let missing = plan.missing_assignments(&selected(&["acct-1", "acct-2", "acct-3"]));
        assert_eq!(missing, selected(&["acct-1", "acct-3"]));
    }

    #[test]
    fn test_ensure_complete_passes_when_all_assigned() {
        let plan = AssignmentPlan::default_from(&[
            rec("acct-1", &["rep-a"]),
            rec("acct-2", &["rep-b"]),
        ]);
        assert!(plan.ensure_complete(&selected(&["acct-1", "acct-2"])).is_ok());
    }

    #[test]
    fn test_ensure_complete_blocks_zero_shortlist_account() {
        // The count-comparison bug this replaces: one extra assignment must
        // not mask a different account with no assignment.
        let mut plan = AssignmentPlan::default_from(&[rec("acct-1", &[])]);
        plan.assign("acct-9", &make_rep("rep-a", 1), "rep-x").unwrap();

        let err = plan
            .ensure_complete(&selected(&["acct-1"]))
            .unwrap_err();
        assert_eq!(
            err,
            AssignmentError::Unassigned(selected(&["acct-1"]))
        );
    }
}
