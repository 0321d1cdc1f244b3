//! Local client state: token, signed-in user, and cart.
//!
//! Kept in a single JSON file between invocations.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use meezy_core::api::AuthResponse;
use meezy_core::{Cart, UserProfile};

/// Default state file, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = ".meezy-session.json";

/// Errors reading or writing the state file.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access state file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("state file {path} is corrupt: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Everything the client remembers between commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub cart: Cart,
}

impl Session {
    /// Read the state file. A missing file is an empty session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, SessionError> {
        let display = path.display().to_string();
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SessionError::Io {
                    path: display,
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| SessionError::Parse {
            path: display,
            source,
        })
    }

    /// Write the state file, replacing any previous contents.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<(), SessionError> {
        let display = path.display().to_string();
        let content = serde_json::to_string_pretty(self).map_err(|source| SessionError::Parse {
            path: display.clone(),
            source,
        })?;

        tokio::fs::write(path, content)
            .await
            .map_err(|source| SessionError::Io {
                path: display,
                source,
            })
    }

    /// Remember the token and user from a register/login response.
    pub fn sign_in(&mut self, response: AuthResponse) {
        self.token = Some(response.token);
        self.user = Some(response.user);
    }

    /// Forget the token and user. The cart is kept.
    pub fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use meezy_core::{Email, Price, Product, ProductId, Role, UserId};

    use super::*;

    fn signed_in() -> Session {
        let mut session = Session::default();
        session.sign_in(AuthResponse {
            token: "tok".to_owned(),
            user: UserProfile {
                id: UserId::new(1),
                name: "Asha".to_owned(),
                email: Email::parse("asha@meezy.in").unwrap(),
                role: Role::Seller,
            },
        });
        session.cart.add(
            &Product {
                id: ProductId::new(2),
                title: "Product 2".to_owned(),
                price: Price::from_major(200),
                seller: "Bob".to_owned(),
                description: String::new(),
            },
            2,
        );
        session
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::load(&dir.path().join("absent.json")).await.unwrap();
        assert_eq!(session, Session::default());
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let session = signed_in();

        session.save(&path).await.unwrap();
        assert_eq!(Session::load(&path).await.unwrap(), session);
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        assert!(matches!(
            Session::load(&path).await,
            Err(SessionError::Parse { .. })
        ));
    }

    #[test]
    fn test_sign_out_keeps_cart() {
        let mut session = signed_in();
        session.sign_out();

        assert!(session.token().is_none());
        assert!(session.user.is_none());
        assert_eq!(session.cart.item_count(), 2);
    }
}
