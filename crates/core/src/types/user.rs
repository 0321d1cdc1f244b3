//! Public view of a registered account.

use serde::{Deserialize, Serialize};

use super::{Email, Role, UserId};

/// The account fields returned by `/api/register`, `/api/login` and
/// `/api/me`. Never carries the password credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
}
