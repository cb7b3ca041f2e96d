use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, UserId};

use crate::{PasswordHash, Role};

/// A provisioned user account.
///
/// The username is fixed at creation; only the password hash and role may
/// change afterwards, and those mutations are admin-gated at the service
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub password_hash: PasswordHash,
    pub role: Role,
}

impl UserRecord {
    pub fn new(
        username: impl Into<String>,
        password_hash: PasswordHash,
        role: Role,
    ) -> DomainResult<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        Ok(Self {
            id: UserId::new(),
            username,
            password_hash,
            role,
        })
    }
}
