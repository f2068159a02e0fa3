use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStage {
    Planning,
    BriefDrafted,
    IntroSent,
    Completed,
}

/// One account handoff in flight, as shown on the dashboard list.
/// The SLA window is a fixed day count against `due_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub account_id: String,
    pub from_rep_id: String,
    pub to_rep_id: String,
    pub stage: TransitionStage,
    pub sla_days: u32,
    pub due_date: NaiveDate,
}
