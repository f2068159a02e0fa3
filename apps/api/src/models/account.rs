use serde::{Deserialize, Serialize};

/// Customer segment. The label feeds specialty matching, so it stays a
/// closed enum rather than free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Enterprise,
    MidMarket,
    Smb,
    Commercial,
}

impl Segment {
    pub fn label(&self) -> &'static str {
        match self {
            Segment::Enterprise => "Enterprise",
            Segment::MidMarket => "Mid-Market",
            Segment::Smb => "SMB",
            Segment::Commercial => "Commercial",
        }
    }
}

/// One customer account. Immutable within a session; sourced from fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub segment: Segment,
    pub industry: String,
    /// Annual recurring revenue in whole dollars.
    pub arr: u64,
    /// 0 to 100.
    pub health: u8,
    pub owner_rep_id: String,
}
