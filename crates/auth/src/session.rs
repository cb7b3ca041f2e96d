use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::UserId;

use crate::Role;

/// The authenticated identity bound to a sequence of operations.
///
/// A session is an explicit value threaded through every gated call; there
/// is no ambient "current user" state anywhere in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn issue(user_id: UserId, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
            issued_at: Utc::now(),
        }
    }
}
