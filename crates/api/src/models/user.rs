//! User domain types.

use chrono::{DateTime, Utc};

use meezy_core::{Email, Role, UserId, UserProfile};

use crate::store::Record;

/// A registered account as stored by the API.
///
/// Implements `Debug` manually to redact the password hash.
#[derive(Clone)]
pub struct User {
    /// Sequential user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, unique across users.
    pub email: Email,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Role chosen at registration.
    pub role: Role,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The fields safe to return to clients.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A validated registration, ready to insert.
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
}

impl Record for User {
    type Id = UserId;
    type Draft = NewUser;

    const KIND: &'static str = "user";

    fn id(&self) -> UserId {
        self.id
    }

    fn from_draft(id: UserId, draft: NewUser) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            password_hash: draft.password_hash,
            role: draft.role,
            created_at: Utc::now(),
        }
    }

    fn conflicts_with(&self, draft: &NewUser) -> bool {
        self.email == draft.email
    }
}
