use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded action, attributed to the acting username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub actor: String,
    pub action: String,
    pub at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(actor: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            action: action.into(),
            at: Utc::now(),
        }
    }
}
