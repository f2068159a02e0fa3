use serde::{Deserialize, Serialize};

/// An account manager who can give up or receive accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rep {
    pub id: String,
    pub name: String,
    /// Free-text tags matched against account segments.
    pub specialties: Vec<String>,
    /// How many more accounts this rep can take on. Zero means the rep is
    /// never surfaced as a recommendation candidate.
    pub remaining_capacity: u32,
}
